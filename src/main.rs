//! `kobana` command-line entrypoint.
//!
//! Checks and prepares Kobana requests from JSON files without calling the API.
//!
//! Commands:
//! - `kobana validate <FILE> [--kind charge-pix]` - Print every rule the payload
//!   breaks; exits with status 1 if there is any
//! - `kobana prepare <FILE> --kind <KIND> [--config <PATH>]` - Print the prepared
//!   request as JSON
//!
//! Environment:
//! - `.env` values loaded at startup
//! - `KOBANA_API_KEY`, `KOBANA_ENV` supply credentials for `prepare`
//! - `RUST_LOG` controls log output on stderr

use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use kobana::config::{API_KEY_VAR, ENVIRONMENT_VAR};
use kobana::telemetry::Telemetry;
use kobana::{Environment, KobanaClient, KobanaConfig, KobanaError, RequestKind, validate_kind};

#[derive(Parser, Debug)]
#[command(name = "kobana")]
#[command(about = "Validate and prepare Kobana PIX requests")]
struct CliArgs {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check a payload against the pre-flight rules
    Validate {
        /// Path to the JSON payload
        file: PathBuf,
        /// Request kind: charge-pix or create-pix-account
        #[arg(long, short, default_value = "charge-pix")]
        kind: RequestKind,
    },
    /// Validate, translate and print the request that would be sent
    Prepare {
        /// Path to the JSON payload
        file: PathBuf,
        /// Request kind: charge-pix or create-pix-account
        #[arg(long, short)]
        kind: RequestKind,
        /// JSON configuration file; takes precedence over `--api-key` and `--env`
        #[arg(long, short)]
        config: Option<PathBuf>,
        #[arg(long, env = API_KEY_VAR, hide_env_values = true)]
        api_key: Option<String>,
        /// `production`, or anything else for the sandbox
        #[arg(long, env = ENVIRONMENT_VAR)]
        env: Option<String>,
    },
}

fn read_payload(path: &Path) -> Result<Value, Box<dyn std::error::Error>> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
    let payload = serde_json::from_str(&contents)
        .map_err(|e| format!("Failed to parse {}: {e}", path.display()))?;
    Ok(payload)
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    // Load .env variables
    dotenv().ok();

    let _telemetry = Telemetry::new()
        .with_name(env!("CARGO_PKG_NAME"))
        .with_version(env!("CARGO_PKG_VERSION"))
        .register();

    let args = CliArgs::parse();
    match args.command {
        Command::Validate { file, kind } => {
            let payload = read_payload(&file)?;
            let validation = validate_kind(kind, &payload);
            if validation.is_valid() {
                println!("{} payload is valid", kind);
                return Ok(ExitCode::SUCCESS);
            }
            for error in validation.errors() {
                println!("{error}");
            }
            tracing::info!(errors = validation.errors().len(), "Payload is invalid");
            Ok(ExitCode::FAILURE)
        }
        Command::Prepare {
            file,
            kind,
            config,
            api_key,
            env,
        } => {
            let payload = read_payload(&file)?;
            let config = match config {
                Some(path) => KobanaConfig::from_file(&path)?,
                None => {
                    let environment = env.map(|name| name.parse::<Environment>()).transpose()?;
                    KobanaConfig::resolve(api_key, environment)?
                }
            };
            let client = KobanaClient::new(config);
            match client.prepare_kind(kind, &payload) {
                Ok(request) => {
                    println!("{}", serde_json::to_string_pretty(&request)?);
                    Ok(ExitCode::SUCCESS)
                }
                Err(KobanaError::Validation(failed)) => {
                    for error in failed.errors() {
                        println!("{error}");
                    }
                    Ok(ExitCode::FAILURE)
                }
                Err(other) => Err(other.into()),
            }
        }
    }
}
