use std::fmt;
use std::time::Duration;

/// One call to the recognizer as seen by the retry loop. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecognitionAttempt {
    pub index: u32,
    pub delay: Duration,
    pub outcome: AttemptOutcome,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptOutcome {
    Recognized { chars: usize },
    NoMatch,
    Canceled { reason: String, detail: String },
    TimedOut,
    NotConfigured,
}

impl RecognitionAttempt {
    pub fn new(index: u32, delay: Duration, outcome: AttemptOutcome) -> Self {
        Self {
            index,
            delay,
            outcome,
        }
    }

    pub fn succeeded(&self) -> bool {
        matches!(self.outcome, AttemptOutcome::Recognized { .. })
    }
}

impl fmt::Display for AttemptOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttemptOutcome::Recognized { chars } => write!(f, "recognized ({} chars)", chars),
            AttemptOutcome::NoMatch => f.write_str("no match"),
            AttemptOutcome::Canceled { reason, detail } => {
                write!(f, "canceled: {} | {}", reason, detail)
            }
            AttemptOutcome::TimedOut => f.write_str("timed out"),
            AttemptOutcome::NotConfigured => f.write_str("not configured"),
        }
    }
}
