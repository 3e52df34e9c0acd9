pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("CSV parse error at line {line}: {message}")]
    Csv { line: usize, message: String },

    #[error("Missing column: {name}")]
    MissingColumn { name: String },

    #[error("Invalid record at line {line}: {message}")]
    InvalidRecord { line: usize, message: String },
}
