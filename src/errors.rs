use std::fmt;

#[derive(Debug, Clone)]
pub enum SharekeyError {
    WordList(String),
    FileOperation(String),
    Validation(String),
    PoolExhausted(String),
}

impl SharekeyError {
    /// Stable error code, used in logs
    pub fn code(&self) -> &'static str {
        match self {
            SharekeyError::WordList(_) => "E001",
            SharekeyError::FileOperation(_) => "E002",
            SharekeyError::Validation(_) => "E003",
            SharekeyError::PoolExhausted(_) => "E004",
        }
    }

    pub fn error_type(&self) -> &'static str {
        match self {
            SharekeyError::WordList(_) => "Word List Error",
            SharekeyError::FileOperation(_) => "File Operation Error",
            SharekeyError::Validation(_) => "Validation Error",
            SharekeyError::PoolExhausted(_) => "Key Pool Exhausted",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            SharekeyError::WordList(msg) => msg,
            SharekeyError::FileOperation(msg) => msg,
            SharekeyError::Validation(msg) => msg,
            SharekeyError::PoolExhausted(msg) => msg,
        }
    }

    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for SharekeyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for SharekeyError {}

impl SharekeyError {
    pub fn word_list<T: Into<String>>(msg: T) -> Self {
        SharekeyError::WordList(msg.into())
    }

    pub fn file_operation<T: Into<String>>(msg: T) -> Self {
        SharekeyError::FileOperation(msg.into())
    }

    pub fn validation<T: Into<String>>(msg: T) -> Self {
        SharekeyError::Validation(msg.into())
    }

    pub fn pool_exhausted<T: Into<String>>(msg: T) -> Self {
        SharekeyError::PoolExhausted(msg.into())
    }
}

impl From<std::io::Error> for SharekeyError {
    fn from(err: std::io::Error) -> Self {
        SharekeyError::FileOperation(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SharekeyError>;
