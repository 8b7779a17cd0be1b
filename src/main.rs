use minilang_debugger::debugger::Interpreter;
use minilang_debugger::{dap, executor};
use std::{env, fs, io, process};

fn main() -> io::Result<()> {
    let args: Vec<String> = env::args().collect();

    let dap_mode = args
        .iter()
        .any(|arg| arg == "--dap" || arg == "--debug-adapter");
    if dap_mode {
        eprintln!("Starting in DAP mode...");
        return dap::run_dap_mode();
    }

    eprintln!("Starting in interactive mode...");
    let mut interp = Interpreter::new();

    // First non-flag argument is a script to preload.
    if let Some(path) = args.iter().skip(1).find(|arg| !arg.starts_with('-')) {
        match fs::read_to_string(path) {
            Ok(source) => {
                if let Err(e) = interp.load(&source) {
                    eprintln!("❌ {e}");
                    process::exit(1);
                }
                eprintln!("Loaded program from '{path}'");
            }
            Err(e) => {
                eprintln!("Failed to read '{path}': {e}");
                process::exit(1);
            }
        }
    }

    executor::run_interactive(&mut interp)
}
