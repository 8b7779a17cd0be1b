mod breakpoints;
mod error;
mod interpreter;
mod memory;
mod stepping;

pub use breakpoints::Breakpoints;
pub use error::RuntimeError;
pub use interpreter::Interpreter;
pub use memory::{Memory, Variable};
pub use stepping::RunOutcome;

/// One live invocation of a template: which template, the line it was called
/// from, and a private cursor into the template's operation sequence.
///
/// Every `call` creates a fresh frame over the same immutable body, so
/// recursive or repeated calls never share a cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub template: String,
    pub called_from: usize,
    pub cursor: usize,
}

impl Frame {
    pub fn new(template: impl Into<String>, called_from: usize) -> Self {
        Self {
            template: template.into(),
            called_from,
            cursor: 0,
        }
    }
}
