pub mod dap;
pub mod debugger;
pub mod executor;
pub mod parser;
