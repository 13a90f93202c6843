//! # My Shop CLI Library
//!
//! Everything behind the `myshop` binary, kept in a library so the session
//! can be driven from tests.
//!
//! ## Module Organization
//! ```text
//! myshop_cli/
//! ├── lib.rs          ◄─── You are here (logging, repl/script runners)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── shop.rs     ◄─── ShopHandle (Arc<Mutex<ShopStore>>)
//! │   ├── todo.rs     ◄─── TodoHandle
//! │   └── config.rs   ◄─── ConfigState (env over defaults)
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── shop.rs     ◄─── Goods, cart, wallet, buy
//! │   └── todo.rs     ◄─── Todo list
//! ├── session.rs      ◄─── Line parsing and dispatch
//! ├── view.rs         ◄─── Text rendering of pages
//! └── error.rs        ◄─── ApiError / CliError
//! ```
//!
//! ## Output Streams
//! Replies go to stdout; logs go to stderr, so `--json` output can be
//! piped straight into another tool.

pub mod commands;
pub mod error;
pub mod session;
pub mod state;
pub mod view;

use std::io::{BufRead, Write};

use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use error::CliError;
use session::{Session, Step};

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=myshop_core=trace` - Trace the store only
/// - Default: INFO, DEBUG for the myshop crates
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,myshop_core=debug,myshop_cli=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Reads session lines from `input` until EOF or `quit`.
///
/// ## Startup
/// In text mode the home page is shown first, like opening the site.
pub fn run_repl<R, W>(session: &mut Session, input: R, output: &mut W) -> Result<(), CliError>
where
    R: BufRead,
    W: Write,
{
    info!("repl started");
    if let Step::Reply(text) = session.render_page()? {
        write_reply(output, &text)?;
    }

    for line in input.lines() {
        let line = line?;
        match session.handle_line(&line)? {
            Step::Reply(text) => write_reply(output, &text)?,
            Step::Empty => {}
            Step::Quit => {
                debug!("quit requested");
                break;
            }
        }
    }

    info!("repl finished");
    Ok(())
}

/// Runs each argument as one session line, in order.
pub fn run_script<W, S>(session: &mut Session, lines: &[S], output: &mut W) -> Result<(), CliError>
where
    W: Write,
    S: AsRef<str>,
{
    for line in lines {
        match session.handle_line(line.as_ref())? {
            Step::Reply(text) => write_reply(output, &text)?,
            Step::Empty => {}
            Step::Quit => break,
        }
    }
    Ok(())
}

fn write_reply<W: Write>(output: &mut W, text: &str) -> Result<(), CliError> {
    output.write_all(text.as_bytes())?;
    output.flush()?;
    Ok(())
}
