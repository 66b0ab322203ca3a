//! Plainspeak CLI binary.
//!
//! Subcommands: `serve` (HTTP server) and `explain` (one explanation, printed as JSON).

mod logging;

use std::io::{IsTerminal, Read};
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use plainspeak::{ExplainError, ExplainRequest, Explainer, ValidationError};
use thiserror::Error;

const APP_NAME: &str = "plainspeak";

#[derive(Parser, Debug)]
#[command(name = "plainspeak")]
#[command(about = "Plainspeak — explain confusing text in plain language")]
struct Args {
    #[command(subcommand)]
    cmd: Command,

    /// Read settings from this TOML file instead of ~/.config/plainspeak/config.toml
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone)]
enum Command {
    /// Run the HTTP server (POST /api/explain)
    Serve(ServeArgs),
    /// Explain text once and print the result as JSON
    Explain(ExplainArgs),
}

#[derive(clap::Args, Debug, Clone)]
struct ServeArgs {
    /// Listen address (default: PLAINSPEAK_ADDR, server.addr, or 127.0.0.1:8080)
    #[arg(long, value_name = "ADDR")]
    addr: Option<String>,
}

#[derive(clap::Args, Debug, Clone)]
struct ExplainArgs {
    /// quick, normal (default) or kid
    #[arg(short, long, value_name = "MODE")]
    mode: Option<String>,

    /// Answer to a clarifying question from a previous run; repeat for each answer
    #[arg(short = 'a', long = "answer", value_name = "ANSWER")]
    answers: Vec<String>,

    /// Pretty-print the JSON result
    #[arg(long)]
    pretty: bool,

    /// Text to explain; read from stdin when omitted
    #[arg(trailing_var_arg = true)]
    text: Vec<String>,
}

#[derive(Debug, Error)]
enum CliError {
    #[error("config: {0}")]
    Config(#[from] config::LoadError),
    #[error("{0}")]
    Validation(#[from] ValidationError),
    #[error("{0}")]
    Explain(#[from] ExplainError),
    #[error("read stdin: {0}")]
    Stdin(#[from] std::io::Error),
    #[error("write result: {0}")]
    Output(#[from] serde_json::Error),
    #[error("server: {0}")]
    Serve(Box<dyn std::error::Error + Send + Sync>),
}

fn load_settings(args: &Args) -> Result<config::Settings, config::LoadError> {
    match &args.config {
        Some(path) => config::load_settings_from_file(path, None),
        None => config::load_settings(APP_NAME, None),
    }
}

/// Joins positional words; falls back to stdin when none were given and stdin is piped.
fn input_text(words: &[String]) -> Result<String, std::io::Error> {
    if !words.is_empty() {
        return Ok(words.join(" "));
    }
    let mut stdin = std::io::stdin();
    if stdin.is_terminal() {
        return Ok(String::new());
    }
    let mut buf = String::new();
    stdin.read_to_string(&mut buf)?;
    Ok(buf)
}

async fn run_explain(settings: &config::Settings, args: ExplainArgs) -> Result<(), CliError> {
    let text = input_text(&args.text)?;
    let request =
        ExplainRequest::from_parts(Some(text.as_str()), args.mode.as_deref(), &args.answers)?;
    let explainer = Explainer::from_settings(settings);
    let result = explainer.explain_request(&request).await?;
    let out = if args.pretty {
        serde_json::to_string_pretty(&result)?
    } else {
        serde_json::to_string(&result)?
    };
    println!("{}", out);
    Ok(())
}

async fn run(args: Args) -> Result<(), CliError> {
    // Settings first: .env may carry RUST_LOG / LOG_FILE.
    let settings = load_settings(&args)?;
    if let Err(e) = logging::init() {
        eprintln!("logging init failed: {}", e);
    }
    tracing::debug!(model = ?settings.completion.model, "settings loaded");

    match args.cmd {
        Command::Serve(serve_args) => {
            serve::run_serve_with_settings(&settings, serve_args.addr.as_deref())
                .await
                .map_err(CliError::Serve)
        }
        Command::Explain(explain_args) => run_explain(&settings, explain_args).await,
    }
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    if let Err(e) = run(args).await {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
