#[derive(Debug, thiserror::Error)]
pub enum TriageError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("the queue is empty")]
    EmptyQueue,
    #[error("there is no previous call to undo")]
    NoPreviousCall,
    #[error("failed to write history CSV: {0}")]
    CsvExport(#[from] csv::Error),
    #[error("failed to flush history CSV: {0}")]
    CsvFlush(std::io::Error),
    #[error("history CSV is not valid UTF-8: {0}")]
    CsvEncoding(std::string::FromUtf8Error),
}

pub type TriageResult<T> = std::result::Result<T, TriageError>;
