mod builder;
mod error;
mod types;

pub use builder::{Ingest, ProgramBuilder};
pub use error::ParseError;
pub use types::{Op, Program, Stmt, Template, Value, MAIN};
