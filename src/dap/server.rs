use super::protocol::{DapMessage, DapMessageContent};
use crate::debugger::{Interpreter, RunOutcome, RuntimeError};
use serde_json::{json, Value};
use std::io::{self, BufRead, Read, Write};

/// Reference handed out for the single "Globals" scope.
const GLOBALS_REF: u64 = 1;

// DAP clients number lines from 1; the engine from 0.
fn from_client_line(line: u64) -> usize {
    line.saturating_sub(1) as usize
}

fn to_client_line(line: usize) -> u64 {
    line as u64 + 1
}

/// Debug Adapter Protocol server over stdin/stdout.
///
/// The engine suspends cooperatively (`run()` returns at breakpoints), so
/// every request is served synchronously on this thread; no execution
/// worker is needed.
pub struct DapServer {
    seq: u64,
    interp: Interpreter,
    program_path: Option<String>,
    stop_on_entry: bool,
}

impl DapServer {
    pub fn new() -> Self {
        Self {
            seq: 0,
            interp: Interpreter::new(),
            program_path: None,
            stop_on_entry: false,
        }
    }

    fn next_seq(&mut self) -> u64 {
        self.seq += 1;
        self.seq
    }

    pub fn send_response(
        &mut self,
        request_seq: u64,
        command: String,
        success: bool,
        body: Option<Value>,
    ) {
        let msg = DapMessage {
            seq: self.next_seq(),
            msg_type: "response".to_string(),
            content: DapMessageContent::Response {
                request_seq,
                success,
                command,
                message: None,
                body,
            },
        };
        self.send_message(&msg);
    }

    pub fn send_event(&mut self, event: String, body: Option<Value>) {
        let msg = DapMessage {
            seq: self.next_seq(),
            msg_type: "event".to_string(),
            content: DapMessageContent::Event { event, body },
        };
        self.send_message(&msg);
    }

    fn send_message(&self, msg: &DapMessage) {
        let Ok(json) = serde_json::to_string(msg) else {
            return;
        };
        // Framing must be exactly "Content-Length: {len}\r\n\r\n{json}".
        print!("Content-Length: {}\r\n\r\n{}", json.len(), json);
        let _ = io::stdout().flush();
    }

    pub fn read_message(&self) -> Option<DapMessage> {
        let stdin = io::stdin();
        let mut handle = stdin.lock();

        let mut content_length = 0;
        {
            let mut lines = handle.by_ref().lines();
            loop {
                match lines.next() {
                    Some(Ok(line)) => {
                        if line.is_empty() || line == "\r" {
                            break;
                        }
                        if let Some(rest) = line.strip_prefix("Content-Length:") {
                            content_length = rest.trim().parse().unwrap_or(0);
                        }
                    }
                    _ => return None,
                }
            }
        }

        if content_length == 0 {
            return None;
        }
        let mut buffer = vec![0u8; content_length];
        if handle.read_exact(&mut buffer).is_err() {
            return None;
        }
        serde_json::from_slice(&buffer).ok()
    }

    pub fn handle_initialize(&mut self, seq: u64, command: String) {
        let body = json!({
            "supportsConfigurationDoneRequest": true,
            "supportsStepBack": false,
            "supportsFunctionBreakpoints": false,
            "supportsConditionalBreakpoints": false,
            "supportsSetVariable": false,
        });
        self.send_response(seq, command, true, Some(body));
        self.send_event("initialized".to_string(), None);
    }

    pub fn handle_launch(&mut self, seq: u64, command: String, args: Option<Value>) {
        let program = args
            .as_ref()
            .and_then(|v| v.get("program"))
            .and_then(|v| v.as_str())
            .unwrap_or("program.mini")
            .to_string();
        self.stop_on_entry = args
            .as_ref()
            .and_then(|v| v.get("stopOnEntry"))
            .and_then(|v| v.as_bool())
            .unwrap_or(false);

        eprintln!("🚀 Launching program: {program}");

        match std::fs::read_to_string(&program) {
            Ok(source) => match self.interp.load(&source) {
                Ok(()) => {
                    self.program_path = Some(program);
                    self.send_response(seq, command, true, None);
                }
                Err(e) => {
                    eprintln!("❌ Parse error: {e}");
                    self.send_response(seq, command, false, Some(json!({ "error": e.to_string() })));
                }
            },
            Err(e) => {
                eprintln!("❌ Failed to read '{program}': {e}");
                self.send_response(seq, command, false, None);
            }
        }
    }

    /// `setBreakpoints` replaces the whole set for the source.
    pub fn handle_set_breakpoints(&mut self, seq: u64, command: String, args: Option<Value>) {
        self.interp.clear_breakpoints();
        let mut verified = Vec::new();
        if let Some(bps) = args
            .as_ref()
            .and_then(|v| v.get("breakpoints"))
            .and_then(|v| v.as_array())
        {
            for bp in bps {
                if let Some(line) = bp.get("line").and_then(|v| v.as_u64()) {
                    self.interp.add_breakpoint(from_client_line(line));
                    verified.push(json!({ "verified": true, "line": line }));
                }
            }
        }
        self.send_response(seq, command, true, Some(json!({ "breakpoints": verified })));
    }

    /// `configurationDone` starts the first pass over the root template.
    /// With `stopOnEntry` the pass is armed but nothing executes until the
    /// client steps or continues.
    pub fn handle_configuration_done(&mut self, seq: u64, command: String) {
        self.send_response(seq, command, true, None);
        if self.stop_on_entry {
            self.interp.start();
            self.send_stopped("entry");
        } else {
            self.resume();
        }
    }

    pub fn handle_threads(&mut self, seq: u64, command: String) {
        let body = json!({ "threads": [{ "id": 1, "name": "main" }] });
        self.send_response(seq, command, true, Some(body));
    }

    pub fn handle_stack_trace(&mut self, seq: u64, command: String) {
        let source = self
            .program_path
            .as_ref()
            .map(|path| json!({ "path": path }))
            .unwrap_or(Value::Null);
        let mut frames: Vec<Value> = self
            .interp
            .inspect_trace()
            .into_iter()
            .enumerate()
            .map(|(i, (called_from, name))| {
                json!({
                    "id": i + 1,
                    "name": name,
                    "line": to_client_line(called_from),
                    "column": 0,
                    "source": source.clone(),
                })
            })
            .collect();
        if !self.interp.is_idle() {
            frames.push(json!({
                "id": 0,
                "name": "main",
                "line": to_client_line(0),
                "column": 0,
                "source": source,
            }));
        }
        let body = json!({ "stackFrames": frames, "totalFrames": frames.len() });
        self.send_response(seq, command, true, Some(body));
    }

    pub fn handle_scopes(&mut self, seq: u64, command: String) {
        let body = json!({
            "scopes": [{
                "name": "Globals",
                "variablesReference": GLOBALS_REF,
                "expensive": false,
            }]
        });
        self.send_response(seq, command, true, Some(body));
    }

    pub fn handle_variables(&mut self, seq: u64, command: String) {
        let variables: Vec<Value> = self
            .interp
            .inspect_memory()
            .into_iter()
            .map(|(name, value, line)| {
                json!({
                    "name": name,
                    "value": value.to_string(),
                    "variablesReference": 0,
                    "evaluateName": format!("{name} (line {})", to_client_line(line)),
                })
            })
            .collect();
        self.send_response(seq, command, true, Some(json!({ "variables": variables })));
    }

    pub fn handle_continue(&mut self, seq: u64, command: String) {
        self.send_response(seq, command, true, Some(json!({ "allThreadsContinued": true })));
        self.resume();
    }

    pub fn handle_next(&mut self, seq: u64, command: String) {
        self.send_response(seq, command, true, None);
        match self.interp.step_over() {
            Ok(stepped) => {
                self.flush_output();
                if stepped {
                    self.send_stopped("step");
                } else {
                    self.send_event("terminated".to_string(), None);
                }
            }
            Err(e) => self.report_abort(e),
        }
    }

    pub fn handle_step_in(&mut self, seq: u64, command: String) {
        self.send_response(seq, command, true, None);
        match self.interp.step() {
            Ok(stepped) => {
                self.flush_output();
                if stepped {
                    self.send_stopped("step");
                } else {
                    self.send_event("terminated".to_string(), None);
                }
            }
            Err(e) => self.report_abort(e),
        }
    }

    fn resume(&mut self) {
        match self.interp.run() {
            Ok(outcome) => {
                self.flush_output();
                match outcome {
                    RunOutcome::Paused { line } => {
                        eprintln!("🔍 Stopped at line {}", to_client_line(line));
                        self.send_stopped("breakpoint");
                    }
                    RunOutcome::Finished => {
                        eprintln!("✅ Program finished");
                        self.send_event("terminated".to_string(), None);
                    }
                }
            }
            Err(e) => self.report_abort(e),
        }
    }

    fn send_stopped(&mut self, reason: &str) {
        self.send_event(
            "stopped".to_string(),
            Some(json!({
                "reason": reason,
                "threadId": 1,
                "allThreadsStopped": true,
            })),
        );
    }

    fn flush_output(&mut self) {
        for line in self.interp.take_output() {
            self.send_event(
                "output".to_string(),
                Some(json!({ "category": "stdout", "output": format!("{line}\n") })),
            );
        }
    }

    fn report_abort(&mut self, e: RuntimeError) {
        eprintln!("❌ Execution error: {e}");
        self.flush_output();
        self.send_event(
            "output".to_string(),
            Some(json!({ "category": "stderr", "output": format!("{e}\n") })),
        );
        self.send_event("terminated".to_string(), None);
    }
}

impl Default for DapServer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_lines_are_one_based() {
        assert_eq!(from_client_line(1), 0);
        assert_eq!(from_client_line(0), 0, "line 0 from a client must not underflow");
        assert_eq!(to_client_line(0), 1);
        assert_eq!(from_client_line(to_client_line(41)), 41);
    }
}
