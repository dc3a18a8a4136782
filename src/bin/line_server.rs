use std::io::{self, BufRead, Write};

use ui_line_renderer::server::protocol::{error_codes, Request, Response};
use ui_line_renderer::server::util::init_logging;
use ui_line_renderer::server::{dispatch, ServerState};

fn main() -> anyhow::Result<()> {
    init_logging();
    log::info!("[Line Server] Starting line server...");

    let mut state = ServerState::new();
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                log::error!("[Line Server] Error reading stdin: {}", e);
                continue;
            }
        };

        if line.trim().is_empty() {
            continue;
        }

        let response_line = match serde_json::from_str::<Request>(&line) {
            Ok(request) => {
                log::debug!("[Line Server] Request: {}", request.method);
                dispatch(&mut state, request)
            }
            Err(e) => {
                log::warn!("[Line Server] Failed to parse request: {}", e);
                Response::error(None, error_codes::PARSE_ERROR, format!("Parse error: {}", e)).to_line()
            }
        };

        writeln!(stdout, "{}", response_line)?;
        stdout.flush()?;
    }

    log::info!("[Line Server] Shutting down after {} requests...", state.requests_handled);
    Ok(())
}
