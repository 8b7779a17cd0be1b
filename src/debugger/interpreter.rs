use super::{Breakpoints, Frame, Memory, RunOutcome, RuntimeError};
use crate::parser::{Ingest, Op, ParseError, Program, ProgramBuilder, Stmt, Value, MAIN};

/// The interpreter: template table, call stack, global memory, breakpoints
/// and the printed-output buffer, driven through `run`, `step` and
/// `step_over`.
///
/// Execution is single-threaded and cooperative. The entry points return
/// control to the caller at a breakpoint or on completion, with all state
/// retained for the next call.
#[derive(Debug)]
pub struct Interpreter {
    program: Program,
    call_stack: Vec<Frame>,
    memory: Memory,
    breakpoints: Breakpoints,
    output: Vec<String>,
}

impl Interpreter {
    pub fn new() -> Self {
        Self {
            program: Program::new(),
            call_stack: Vec::new(),
            memory: Memory::new(),
            breakpoints: Breakpoints::new(),
            output: Vec::new(),
        }
    }

    /// Ingest a block of program source, extending the template table and
    /// registering any `add break` lines it contains.
    pub fn load(&mut self, source: &str) -> Result<(), ParseError> {
        let Ingest { breakpoints } = ProgramBuilder::new(&mut self.program).ingest(source)?;
        for line in breakpoints {
            self.breakpoints.add(line);
        }
        Ok(())
    }

    pub fn add_breakpoint(&mut self, line: usize) {
        self.breakpoints.add(line);
    }

    pub fn remove_breakpoint(&mut self, line: usize) {
        self.breakpoints.remove(line);
    }

    pub fn clear_breakpoints(&mut self) {
        self.breakpoints.clear();
    }

    pub fn has_breakpoint(&self, line: usize) -> bool {
        self.breakpoints.contains(line)
    }

    /// Printed values accumulated since the last drain.
    pub fn take_output(&mut self) -> Vec<String> {
        std::mem::take(&mut self.output)
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    pub fn call_depth(&self) -> usize {
        self.call_stack.len()
    }

    /// An empty call stack: no execution is pending.
    pub fn is_idle(&self) -> bool {
        self.call_stack.is_empty()
    }

    /// Arrange a fresh pass of the root template without executing anything.
    /// A no-op while execution is already pending.
    pub fn start(&mut self) {
        if self.call_stack.is_empty() {
            self.call_stack.push(Frame::new(MAIN, 0));
        }
    }

    /// Run until a breakpoint fires or the program completes. Starting from
    /// an empty call stack begins a fresh pass of the root template.
    pub fn run(&mut self) -> Result<RunOutcome, RuntimeError> {
        self.start();
        while let Some(frame) = self.call_stack.last() {
            match self.stmt_at(frame).map(|stmt| stmt.line) {
                None => {
                    self.call_stack.pop();
                }
                Some(line) => {
                    if self.breakpoints.should_pause(line) {
                        self.breakpoints.note_pause(line);
                        return Ok(RunOutcome::Paused { line });
                    }
                    self.breakpoints.clear_pause();
                    self.execute_top()?;
                }
            }
        }
        Ok(RunOutcome::Finished)
    }

    /// Execute exactly one statement of the top frame, ignoring breakpoints.
    /// Frames exhausted by a previous call are discarded first; returns
    /// `Ok(false)` when nothing was pending.
    pub fn step(&mut self) -> Result<bool, RuntimeError> {
        if !self.settle() {
            return Ok(false);
        }
        self.execute_top()?;
        Ok(true)
    }

    /// Execute one statement; if it invoked a function, drive the callee
    /// (and anything it transitively invokes) to completion, ignoring
    /// breakpoints, until the stack returns to its pre-step depth.
    pub fn step_over(&mut self) -> Result<bool, RuntimeError> {
        if !self.settle() {
            return Ok(false);
        }
        let depth = self.call_stack.len();
        self.execute_top()?;
        while self.call_stack.len() > depth {
            if self.top_exhausted() {
                self.call_stack.pop();
            } else {
                self.execute_top()?;
            }
        }
        Ok(true)
    }

    /// Every memory entry as (name, value, last-changed line), in insertion
    /// order of first write.
    pub fn inspect_memory(&self) -> Vec<(String, Value, usize)> {
        self.memory
            .iter()
            .map(|(name, var)| (name.to_string(), var.value, var.last_changed))
            .collect()
    }

    /// Every active frame except the root, top of stack first, as
    /// (called-from line, template name).
    pub fn inspect_trace(&self) -> Vec<(usize, String)> {
        self.call_stack
            .iter()
            .rev()
            .filter(|frame| frame.template != MAIN)
            .map(|frame| (frame.called_from, frame.template.clone()))
            .collect()
    }

    fn stmt_at(&self, frame: &Frame) -> Option<&Stmt> {
        self.program
            .template(&frame.template)
            .and_then(|t| t.body.get(frame.cursor))
    }

    fn top_exhausted(&self) -> bool {
        self.call_stack
            .last()
            .is_some_and(|frame| self.stmt_at(frame).is_none())
    }

    /// Pop frames whose cursor has moved past their last operation; true
    /// when a runnable frame remains on top.
    fn settle(&mut self) -> bool {
        while self.top_exhausted() {
            self.call_stack.pop();
        }
        !self.call_stack.is_empty()
    }

    /// Execute the top frame's current operation and advance its cursor.
    /// The cursor only advances on success, so a failed statement stays
    /// current.
    fn execute_top(&mut self) -> Result<(), RuntimeError> {
        let Some(stmt) = self.call_stack.last().and_then(|f| self.stmt_at(f)).cloned() else {
            return Ok(());
        };
        match stmt.op {
            Op::Set { name, value } => {
                self.memory.write(&name, value, stmt.line);
                self.advance();
            }
            Op::Sub { name, value } => {
                let var = self.memory.read(&name).ok_or_else(|| {
                    RuntimeError::UndefinedVariable {
                        name: name.clone(),
                        line: stmt.line,
                    }
                })?;
                // Arithmetic wraps; the language has no overflow error.
                self.memory.write(&name, var.value.wrapping_sub(value), stmt.line);
                self.advance();
            }
            Op::Rem { name } => {
                self.memory.remove(&name);
                self.advance();
            }
            Op::Print { name } => {
                let var = self.memory.read(&name).ok_or_else(|| {
                    RuntimeError::UndefinedVariable {
                        name: name.clone(),
                        line: stmt.line,
                    }
                })?;
                self.output.push(var.value.to_string());
                self.advance();
            }
            Op::Call { target } => {
                if self.program.template(&target).is_none() {
                    return Err(RuntimeError::UndefinedFunction {
                        name: target,
                        line: stmt.line,
                    });
                }
                // The caller resumes past the call once the callee returns.
                self.advance();
                self.call_stack.push(Frame::new(target, stmt.line));
            }
        }
        Ok(())
    }

    fn advance(&mut self) {
        if let Some(frame) = self.call_stack.last_mut() {
            frame.cursor += 1;
        }
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}
