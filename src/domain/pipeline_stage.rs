use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PipelineStage {
    Fetching,
    Normalizing,
    Recognizing,
    Cleanup,
    Done,
    Failed,
}

impl PipelineStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            PipelineStage::Fetching => "FETCHING",
            PipelineStage::Normalizing => "NORMALIZING",
            PipelineStage::Recognizing => "RECOGNIZING",
            PipelineStage::Cleanup => "CLEANUP",
            PipelineStage::Done => "DONE",
            PipelineStage::Failed => "FAILED",
        }
    }
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
