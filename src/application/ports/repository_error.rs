/// Failure of the transcription store itself; a missing record is `Ok(None)`.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}
