use crate::cli::dispatcher::{Dispatcher, Flow};
use crate::domain::ports::{ClientRepository, PlanetRepository, TicketRepository};
use crate::utils::error::{ErrorCategory, Result, SpaceTravelError};
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

pub const PROMPT: &str = "> ";

/// Reads commands until `exit` or end of input.
///
/// A failing command is reported and the loop keeps going; only a failure
/// to read input or write output ends the session with an error.
pub async fn run<S, R, W>(dispatcher: &Dispatcher<S>, mut input: R, out: &mut W) -> Result<()>
where
    S: ClientRepository + PlanetRepository + TicketRepository + Clone,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    tracing::info!("Entering interactive CLI mode. Type 'help' for list of commands.");
    let mut buf = Vec::new();

    loop {
        write!(out, "{}", PROMPT)?;
        out.flush()?;

        buf.clear();
        if input.read_until(b'\n', &mut buf).await? == 0 {
            writeln!(out)?;
            break;
        }
        // Undecodable bytes become U+FFFD; only that command can fail.
        let line = String::from_utf8_lossy(&buf);

        match dispatcher.execute_line(line.trim(), out).await {
            Ok(Flow::Continue) => {}
            Ok(Flow::Exit) => {
                tracing::info!("Exiting interactive CLI.");
                break;
            }
            Err(e) => report(&e, line.trim(), out)?,
        }
    }

    tracing::info!("Interactive CLI session ended.");
    Ok(())
}

fn report<W: Write>(err: &SpaceTravelError, line: &str, out: &mut W) -> Result<()> {
    match err.category() {
        ErrorCategory::NotFound => tracing::warn!("Command '{}' failed: {}", line, err),
        _ => tracing::error!("Command '{}' failed: {} ({:?})", line, err, err.category()),
    }
    writeln!(out, "Error: {}", err.user_friendly_message())?;
    Ok(())
}
