use thiserror::Error;

/// Errors raised while ingesting program source. An error aborts the
/// ingestion call; lines already ingested keep their effect.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("line {line}: statement '{keyword}' is missing its operand")]
    MissingOperand { keyword: String, line: usize },

    #[error("line {line}: '{token}' is not a valid integer")]
    InvalidInteger { token: String, line: usize },

    #[error("line {line}: unknown keyword '{keyword}'")]
    UnknownKeyword { keyword: String, line: usize },

    #[error("line {line}: function '{name}' is already defined")]
    DuplicateFunction { name: String, line: usize },
}
