mod dispatcher;
mod runner;

pub use dispatcher::{dispatch, parse_command, Command, DispatchError, Response};
pub use runner::run_interactive;
