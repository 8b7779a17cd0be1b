mod protocol;
mod server;

use std::io;

pub use protocol::{DapMessage, DapMessageContent};
pub use server::DapServer;

/// Serve Debug Adapter Protocol requests over stdin/stdout until the client
/// disconnects or stdin closes.
pub fn run_dap_mode() -> io::Result<()> {
    eprintln!("DAP server starting...");

    let mut server = DapServer::new();

    loop {
        let Some(msg) = server.read_message() else {
            break;
        };

        match msg.content {
            DapMessageContent::Request { command, arguments } => match command.as_str() {
                "initialize" => server.handle_initialize(msg.seq, command),
                "launch" | "attach" => server.handle_launch(msg.seq, command, arguments),
                "setBreakpoints" => server.handle_set_breakpoints(msg.seq, command, arguments),
                "configurationDone" => server.handle_configuration_done(msg.seq, command),
                "threads" => server.handle_threads(msg.seq, command),
                "stackTrace" => server.handle_stack_trace(msg.seq, command),
                "scopes" => server.handle_scopes(msg.seq, command),
                "variables" => server.handle_variables(msg.seq, command),
                "continue" => server.handle_continue(msg.seq, command),
                "next" => server.handle_next(msg.seq, command),
                "stepIn" => server.handle_step_in(msg.seq, command),
                "disconnect" => {
                    server.send_response(msg.seq, command, true, None);
                    break;
                }
                _ => {
                    eprintln!("⚠️  Unhandled DAP command: {command}");
                    server.send_response(msg.seq, command, false, None);
                }
            },
            _ => {
                eprintln!("📬 Non-request message ignored");
            }
        }
    }

    eprintln!("DAP server exiting");
    Ok(())
}
