//! My Shop CLI - the storefront in a terminal.
//!
//! # Usage
//!
//! ```bash
//! # Interactive session
//! myshop repl
//!
//! # One-shot script: add two apples and buy them
//! myshop run "add 1" "add 1" "buy" "wallet"
//!
//! # Same, as JSON lines
//! myshop --json run "add 1" "buy"
//! ```
//!
//! # Configuration
//!
//! `MYSHOP_STORE_NAME`, `MYSHOP_INITIAL_BALANCE`,
//! `MYSHOP_FREE_SHIPPING_THRESHOLD`, `MYSHOP_SHIPPING_FEE`,
//! `MYSHOP_CATALOG_PATH`. Logging follows `RUST_LOG`.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

use myshop_cli::error::CliError;
use myshop_cli::session::{OutputFormat, Session};
use myshop_cli::state::ConfigState;

#[derive(Parser)]
#[command(name = "myshop")]
#[command(author, version, about = "My Shop storefront")]
struct Cli {
    /// Print replies as JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Read session commands from stdin
    Repl,
    /// Run each argument as a session command
    Run {
        /// Session commands, e.g. "add 1" "buy"
        #[arg(required = true)]
        commands: Vec<String>,
    },
}

fn main() {
    myshop_cli::init_tracing();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config = ConfigState::from_env()?;
    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    };
    let mut session = Session::new(config, format)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Repl => {
            let stdin = std::io::stdin();
            myshop_cli::run_repl(&mut session, stdin.lock(), &mut out)
        }
        Commands::Run { commands } => myshop_cli::run_script(&mut session, &commands, &mut out),
    }
}
