//! rigsmith binary: serve the HTTP API, or run one recommendation from the command line.
//!
//! Subcommands: `serve`, `recommend`, `prompt` (print the prompt without calling the model).

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use cli::{build_pipeline, pipeline_kind, write_json_output, RequestArgs};
use config::RecommenderEnv;

#[derive(Parser, Debug)]
#[command(name = "rigsmith")]
#[command(about = "Rigsmith: PC build recommendations from an LLM")]
struct Args {
    #[command(subcommand)]
    cmd: Command,

    /// Verbose: debug-level logs (pipeline stages, raw LLM output)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP server (GET /, POST /recommend_direct, POST /recommend)
    Serve {
        /// Listen address (default: RIGSMITH_ADDR, 0.0.0.0:$PORT, or 127.0.0.1:8000)
        #[arg(long, value_name = "ADDR")]
        addr: Option<String>,
    },
    /// Ask the model for three builds and print the result as JSON
    Recommend {
        #[command(flatten)]
        request: RequestArgs,

        /// Use the normalized pipeline (numeric budget, derived priorities)
        #[arg(long)]
        normalized: bool,

        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,

        /// Write the JSON to this file instead of stdout
        #[arg(long, value_name = "PATH")]
        file: Option<PathBuf>,
    },
    /// Print the prompt that would be sent; no network call
    Prompt {
        #[command(flatten)]
        request: RequestArgs,

        #[arg(long)]
        normalized: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let args = Args::parse();

    let load_result = config::load_and_apply("rigsmith", None);
    let log_dir = std::env::var_os("RIGSMITH_LOG_DIR").map(PathBuf::from);
    let default_filter = if args.verbose { "debug" } else { "info" };
    let _tracing = config::init_tracing("rigsmith", default_filter, log_dir.as_deref());
    if let Err(e) = load_result {
        tracing::warn!("config not loaded: {}", e);
    }

    let env = RecommenderEnv::from_env();

    match args.cmd {
        Command::Serve { addr } => {
            let addr = addr.unwrap_or_else(|| env.listen_addr.clone());
            serve::run_serve(&addr, serve::AppState::from_env(&env)).await?;
        }
        Command::Recommend {
            request,
            normalized,
            pretty,
            file,
        } => {
            let pipeline = build_pipeline(&env, pipeline_kind(normalized));
            let result = pipeline.recommend(&request.to_request()).await;
            write_json_output(&serde_json::to_value(&result)?, file.as_deref(), pretty)?;
        }
        Command::Prompt {
            request,
            normalized,
        } => {
            let pipeline = build_pipeline(&env, pipeline_kind(normalized));
            println!("{}", pipeline.build_prompt(&request.to_request()));
        }
    }
    Ok(())
}
