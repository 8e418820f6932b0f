//! # Struk CLI Library
//!
//! Interactive shell for drafting a receipt, issuing it through the receipt
//! service, and saving it as a PNG.
//!
//! ## Module Organization
//! ```text
//! struk_cli_lib/
//! ├── lib.rs          ◄─── You are here (logging, dispatch, REPL loop)
//! ├── cli.rs          ◄─── Process arguments & REPL line grammar
//! ├── state/
//! │   ├── mod.rs      ◄─── AppContext + state exports
//! │   ├── session.rs  ◄─── Ledger, banner, busy flags
//! │   └── config.rs   ◄─── TOML + environment configuration
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── ledger.rs   ◄─── Draft editing commands
//! │   ├── receipt.rs  ◄─── submit / show / ping
//! │   └── export.rs   ◄─── PNG snapshot command
//! └── error.rs        ◄─── User-facing error type
//! ```
//!
//! ## Session Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │   add / remove / customer / notes          submit            export     │
//! │  ┌──────────────────────────────┐   ┌─────────────────┐  ┌───────────┐ │
//! │  │       Empty / Editable       │──►│   Confirmed     │─►│  PNG file │ │
//! │  │  (draft, live preview)       │   │ (number, total) │  │ (repeat)  │ │
//! │  └──────────────────────────────┘   └────────┬────────┘  └───────────┘ │
//! │                 ▲                            │ reset                    │
//! │                 └────────────────────────────┘                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod cli;
pub mod commands;
pub mod error;
pub mod state;

use std::fmt::Write as _;

use struk_core::types::pad_receipt_number;
use struk_export::AssetLoader;
use struk_issuer::ReceiptIssuer;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use cli::{parse_line, Cli, Command};
use error::ApiError;
use state::{AppConfig, AppContext, Control, SessionState};

const PROMPT: &str = "struk> ";

/// Result of one REPL command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Output(String),
    Quit,
}

/// Initializes the tracing subscriber.
///
/// Logs go to stderr so they never mix with the preview on stdout.
/// `RUST_LOG` overrides the default filter.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,struk=debug,reqwest=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Runs one parsed command against the session.
pub async fn execute<I: ReceiptIssuer, L: AssetLoader>(
    ctx: &AppContext<I, L>,
    state: &SessionState,
    command: Command,
) -> Result<Outcome, ApiError> {
    debug!(?command, "execute");

    let output = match command {
        Command::Add {
            name,
            quantity,
            price,
        } => {
            commands::ledger::add_item(state, &name, &quantity, &price)?;
            commands::receipt::show(ctx, state)
        }
        Command::Remove { index } => {
            commands::ledger::remove_item(state, index)?;
            commands::receipt::show(ctx, state)
        }
        Command::Customer { name } => {
            commands::ledger::set_customer_name(state, &name.join(" "))?;
            commands::receipt::show(ctx, state)
        }
        Command::Notes { text } => {
            commands::ledger::set_notes(state, &text.join(" "))?;
            commands::receipt::show(ctx, state)
        }
        Command::Show => commands::receipt::show(ctx, state),
        Command::Submit => {
            let receipt = commands::receipt::submit(ctx, state).await?;
            format!(
                "Receipt #{} issued\n\n{}",
                pad_receipt_number(receipt.number),
                commands::receipt::show(ctx, state)
            )
        }
        Command::Export => {
            let path = commands::export::export(ctx, state).await?;
            format!("Saved {}", path.display())
        }
        Command::Reset => {
            commands::ledger::reset(state)?;
            commands::receipt::show(ctx, state)
        }
        Command::Ping => commands::receipt::ping(ctx).await?,
        Command::Help => help(state),
        Command::Quit => return Ok(Outcome::Quit),
    };

    Ok(Outcome::Output(output))
}

fn help(state: &SessionState) -> String {
    state.with_session(|s| {
        let mut out = String::from("Commands:\n");
        for control in Control::ALL {
            let marker = if s.is_enabled(control) { " " } else { "-" };
            let _ = writeln!(out, " {} {}", marker, control.usage());
        }
        out.push_str("   show\n   help\n   quit\n");
        out.push_str("('-' marks commands unavailable right now)\n");
        out
    })
}

/// Loads configuration and runs the REPL on stdin until `quit` or EOF.
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = AppConfig::load(cli.config)?;
    if let Some(url) = cli.backend {
        config.backend.base_url = url;
        config.validate()?;
    }

    info!(backend = %config.backend.base(), "Starting Struk");
    let ctx = AppContext::from_config(config)?;
    let state = ctx.new_session();

    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    stdout
        .write_all(format!("{}\n", commands::receipt::show(&ctx, &state)).as_bytes())
        .await?;

    loop {
        stdout.write_all(PROMPT.as_bytes()).await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        let result = match parse_line(&line) {
            Ok(Some(command)) => execute(&ctx, &state, command).await,
            Ok(None) => continue,
            Err(err) => Err(err),
        };

        let text = match result {
            Ok(Outcome::Quit) => break,
            Ok(Outcome::Output(text)) => text,
            Err(err) => format!("! {}", err),
        };
        stdout.write_all(text.as_bytes()).await?;
        if !text.ends_with('\n') {
            stdout.write_all(b"\n").await?;
        }
    }

    info!("Bye");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{context, FakeIssuer, FakeLoader, TEST_LOGO_URL};
    use crate::error::ErrorCode;
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::{json, Value};
    use struk_core::Phase;
    use struk_issuer::{HttpIssuer, IssuerConfig};

    async fn serve(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    async fn issue_seven(Json(body): Json<Value>) -> Json<Value> {
        Json(json!({
            "number": 7,
            "items": body["items"],
            "total": 35000,
            "customer_name": body["customer_name"],
            "notes": body["notes"],
        }))
    }

    fn line(text: &str) -> Command {
        parse_line(text).unwrap().unwrap()
    }

    #[tokio::test]
    async fn test_repl_session_against_receipt_service() {
        let base = serve(Router::new().route("/api/receipts", post(issue_seven))).await;
        let dir = tempfile::tempdir().unwrap();

        let mut config = AppConfig::default();
        config.backend = IssuerConfig::with_base_url(base);
        config.brand.logo_url = Some(TEST_LOGO_URL.to_string());
        config.export.output_dir = Some(dir.path().to_path_buf());
        let issuer = HttpIssuer::new(config.backend.clone()).unwrap();
        let ctx = AppContext::with_parts(config, issuer, FakeLoader::default());
        let state = ctx.new_session();

        for text in [
            r#"add "Produk A" 2 15000"#,
            r#"add "Produk B" 1 5000"#,
            "customer Budi Santoso",
        ] {
            execute(&ctx, &state, line(text)).await.unwrap();
        }

        let Outcome::Output(out) = execute(&ctx, &state, line("submit")).await.unwrap() else {
            panic!("expected output");
        };
        assert!(out.contains("Receipt #0007 issued"));
        assert!(out.contains("Rp 35.000"));
        state.with_session(|s| {
            assert_eq!(s.phase(), Phase::Confirmed);
            assert_eq!(s.ledger().draft().customer_name.as_deref(), Some("Budi Santoso"));
        });

        let Outcome::Output(out) = execute(&ctx, &state, line("export")).await.unwrap() else {
            panic!("expected output");
        };
        assert!(out.contains("VELLIXAO_Struk_#0007.png"));
        assert!(dir.path().join("VELLIXAO_Struk_#0007.png").exists());
    }

    #[tokio::test]
    async fn test_edits_after_submit_are_rejected() {
        let ctx = context(FakeIssuer::answering(3, 1000.0));
        let state = ctx.new_session();
        execute(&ctx, &state, line("add X 1 1000")).await.unwrap();
        execute(&ctx, &state, line("submit")).await.unwrap();

        let err = execute(&ctx, &state, line("add Y 1 500")).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ReceiptConfirmed);

        execute(&ctx, &state, line("reset")).await.unwrap();
        state.with_session(|s| {
            assert_eq!(s.phase(), Phase::Empty);
            assert!(s.ledger().items().is_empty());
            assert!(s.ledger().confirmed().is_none());
            assert!(s.banner().is_none());
        });
        let fresh = ctx.new_session();
        assert_eq!(state.with_session(|s| s.clone()), fresh.with_session(|s| s.clone()));
    }

    #[tokio::test]
    async fn test_help_marks_disabled_controls() {
        let ctx = context(FakeIssuer::answering(3, 1000.0));
        let state = ctx.new_session();

        let Outcome::Output(out) = execute(&ctx, &state, Command::Help).await.unwrap() else {
            panic!("expected output");
        };
        assert!(out.contains(" - export"));
        assert!(out.contains("   add <name> <qty> <price>"));
    }

    #[tokio::test]
    async fn test_quit() {
        let ctx = context(FakeIssuer::answering(3, 1000.0));
        let state = ctx.new_session();
        assert_eq!(
            execute(&ctx, &state, Command::Quit).await.unwrap(),
            Outcome::Quit
        );
    }
}
