use std::fmt;
use std::str::FromStr;

/// Where the stored text came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TranscriptionSource {
    Azure,
    Stub,
}

impl TranscriptionSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            TranscriptionSource::Azure => "azure",
            TranscriptionSource::Stub => "stub",
        }
    }
}

impl FromStr for TranscriptionSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "azure" => Ok(TranscriptionSource::Azure),
            "stub" => Ok(TranscriptionSource::Stub),
            _ => Err(format!("Invalid transcription source: {}", s)),
        }
    }
}

impl fmt::Display for TranscriptionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
