//! # Struk Entry Point
//!
//! ## Startup Sequence
//! 1. Parse process arguments
//! 2. Initialize tracing (stderr)
//! 3. Start a current-thread runtime
//! 4. Load configuration and run the REPL (see `struk_cli_lib::run`)

use clap::Parser;
use struk_cli_lib::cli::Cli;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    struk_cli_lib::init_tracing();

    // One command at a time; no need for worker threads
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?
        .block_on(struk_cli_lib::run(cli))
}
