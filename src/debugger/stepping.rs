/// Why `run()` handed control back to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// A breakpoint fired; the statement at `line` has not executed yet.
    Paused { line: usize },
    /// The call stack drained; the program ran to completion.
    Finished,
}
