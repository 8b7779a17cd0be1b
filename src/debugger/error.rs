use thiserror::Error;

/// Fatal execution errors. The failing entry point aborts immediately; the
/// call stack and memory keep the state reached before the failing statement.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RuntimeError {
    #[error("undefined variable '{name}' at line {line}")]
    UndefinedVariable { name: String, line: usize },

    #[error("undefined function '{name}' at line {line}")]
    UndefinedFunction { name: String, line: usize },
}
