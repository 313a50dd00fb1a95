use std::fmt;

#[derive(Debug)]
pub enum IoError {
    /// File read/write failure.
    Io(String),
    /// Malformed CSV or JSON text.
    Parse(String),
    /// File has no header line / no content.
    Empty,
    /// Extension other than .csv or .json.
    UnsupportedFormat(String),
}

impl fmt::Display for IoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(msg) => write!(f, "IO error: {msg}"),
            Self::Parse(msg) => write!(f, "parse error: {msg}"),
            Self::Empty => write!(f, "empty file"),
            Self::UnsupportedFormat(ext) => {
                write!(f, "unsupported file format '{ext}' (expected .csv or .json)")
            }
        }
    }
}

impl std::error::Error for IoError {}

impl From<std::io::Error> for IoError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}
