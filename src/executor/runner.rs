use super::dispatcher::{self, parse_command, Command};
use crate::debugger::Interpreter;
use std::io::{self, BufRead, Write};

/// Interactive debugger loop: one command per stdin line, program output on
/// stdout, prompts and status on stderr.
///
/// Between `set code` and `end set code` raw lines are collected and
/// submitted to the builder as a single block, so `def` bodies keep their
/// indentation and line numbering.
pub fn run_interactive(interp: &mut Interpreter) -> io::Result<()> {
    let stdin = io::stdin();
    let mut code_block: Option<Vec<String>> = None;
    let mut input = String::new();

    loop {
        eprint!("> ");
        io::stderr().flush()?;

        input.clear();
        if stdin.lock().read_line(&mut input)? == 0 {
            break;
        }
        let text = input.trim_end_matches(['\r', '\n']);

        if code_block.is_some() {
            if matches!(parse_command(text), Ok(Some(Command::EndCode))) {
                let block = code_block.take().unwrap_or_default();
                feed(interp, &block.join("\n"));
            } else if let Some(block) = code_block.as_mut() {
                block.push(text.to_string());
            }
            continue;
        }

        match text.trim() {
            "" => continue,
            "q" | "quit" => break,
            _ => {}
        }
        if matches!(parse_command(text), Ok(Some(Command::BeginCode))) {
            code_block = Some(Vec::new());
            continue;
        }

        feed(interp, text);
    }

    Ok(())
}

fn feed(interp: &mut Interpreter, text: &str) {
    match dispatcher::dispatch(interp, text) {
        Ok(resp) => {
            for line in resp.output {
                println!("{line}");
            }
            if let Some(status) = resp.status {
                eprintln!("🔍 {status}");
            }
        }
        Err(e) => eprintln!("❌ {e}"),
    }
}
