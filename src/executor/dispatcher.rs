use crate::debugger::{Interpreter, RunOutcome, RuntimeError};
use crate::parser::ParseError;
use thiserror::Error;

/// Errors surfaced by the command dispatcher.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Runtime(#[from] RuntimeError),

    #[error("'{0}' is not a valid breakpoint line")]
    InvalidBreakLine(String),
}

/// A reserved debugger command. Input matching none of these is treated as
/// program source and fed to the builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Run,
    Step,
    StepOver,
    AddBreak(usize),
    PrintMem,
    PrintTrace,
    BeginCode,
    EndCode,
}

/// What the frontend should do with a dispatched command: program output and
/// inspection dumps go to stdout, the status note to stderr.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Response {
    pub output: Vec<String>,
    pub status: Option<String>,
}

/// Classify one input line against the reserved command table.
pub fn parse_command(text: &str) -> Result<Option<Command>, DispatchError> {
    let trimmed = text.trim();
    let command = match trimmed {
        "run" => Command::Run,
        "step" => Command::Step,
        "step over" => Command::StepOver,
        "print mem" => Command::PrintMem,
        "print trace" => Command::PrintTrace,
        "set code" => Command::BeginCode,
        "end set code" => Command::EndCode,
        _ => {
            let Some(rest) = trimmed.strip_prefix("add break ") else {
                return Ok(None);
            };
            let mut lexer = shlex::Shlex::new(rest);
            let token = lexer.next().unwrap_or_default();
            let line = token
                .trim()
                .parse()
                .map_err(|_| DispatchError::InvalidBreakLine(token.clone()))?;
            Command::AddBreak(line)
        }
    };
    Ok(Some(command))
}

/// Route one block of input: reserved commands onto the engine's typed entry
/// points, anything else into the program builder.
pub fn dispatch(interp: &mut Interpreter, text: &str) -> Result<Response, DispatchError> {
    let mut resp = Response::default();
    match parse_command(text)? {
        Some(Command::Run) => {
            let outcome = interp.run()?;
            resp.output = interp.take_output();
            resp.status = Some(match outcome {
                RunOutcome::Paused { line } => format!("stopped at line {line}"),
                RunOutcome::Finished => "program finished".to_string(),
            });
        }
        Some(Command::Step) => {
            let stepped = interp.step()?;
            resp.output = interp.take_output();
            if !stepped {
                resp.status = Some("nothing to step".to_string());
            }
        }
        Some(Command::StepOver) => {
            let stepped = interp.step_over()?;
            resp.output = interp.take_output();
            if !stepped {
                resp.status = Some("nothing to step".to_string());
            }
        }
        Some(Command::AddBreak(line)) => {
            interp.add_breakpoint(line);
            resp.status = Some(format!("breakpoint set at line {line}"));
        }
        Some(Command::PrintMem) => {
            resp.output = interp
                .inspect_memory()
                .into_iter()
                .map(|(name, value, line)| format!("{name} {value} {line}"))
                .collect();
        }
        Some(Command::PrintTrace) => {
            resp.output = interp
                .inspect_trace()
                .into_iter()
                .map(|(called_from, name)| format!("{called_from} {name}"))
                .collect();
        }
        // Session markers from the original console protocol; the builder
        // does not need them, so they are accepted and ignored.
        Some(Command::BeginCode) | Some(Command::EndCode) => {}
        None => interp.load(text)?,
    }
    Ok(resp)
}
