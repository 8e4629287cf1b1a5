//! Shared pieces of the `rigsmith` binary: request flags, pipeline construction and JSON
//! output.

use std::path::Path;

use clap::Args;
use config::RecommenderEnv;
use rigsmith::{Brands, Budget, Pipeline, PipelineKind, PipelineProfile, UserRequest};

/// Request fields as command-line flags.
#[derive(Args, Debug, Clone)]
pub struct RequestArgs {
    /// What the PC is for, e.g. "gaming and streaming"
    #[arg(short, long, value_name = "TEXT")]
    pub usage: String,

    /// Budget: an amount ("85000") or a range ("70000-90000")
    #[arg(short, long, value_name = "BUDGET")]
    pub budget: Option<String>,

    /// Preferred brands, delimited by , ; | / or \
    #[arg(long, value_name = "LIST")]
    pub brands: Option<String>,

    #[arg(long, value_name = "TEXT")]
    pub speed: Option<String>,

    /// Storage capacity wish, e.g. "2TB"
    #[arg(long, value_name = "TEXT")]
    pub storage: Option<String>,

    /// Graphics power wish, e.g. "high"
    #[arg(long, value_name = "TEXT")]
    pub graphics: Option<String>,

    /// Cooling noise wish, e.g. "very quiet"
    #[arg(long, value_name = "TEXT")]
    pub cooling: Option<String>,
}

impl RequestArgs {
    /// A budget that is a plain integer is sent as a number, anything else as text.
    pub fn to_request(&self) -> UserRequest {
        UserRequest {
            usage: self.usage.clone(),
            preferred_brands: self.brands.clone().map(Brands::Joined),
            speed: self.speed.clone(),
            storage_capacity: self.storage.clone(),
            graphics_power: self.graphics.clone(),
            quiet_cooling: self.cooling.clone(),
            budget: self.budget.as_deref().map(|b| match b.trim().parse::<i128>() {
                Ok(n) => Budget::Amount(n),
                Err(_) => Budget::Text(b.to_string()),
            }),
        }
    }
}

pub fn pipeline_kind(normalized: bool) -> PipelineKind {
    if normalized {
        PipelineKind::Normalized
    } else {
        PipelineKind::Direct
    }
}

/// Mistral-backed pipeline for `kind`, configured from settings.
pub fn build_pipeline(env: &RecommenderEnv, kind: PipelineKind) -> Pipeline {
    Pipeline::new(PipelineProfile::for_kind(kind), serve::mistral_client(env))
        .with_options(serve::pipeline_options(env))
}

/// Writes JSON to stdout or to `file`. Pretty is multi-line, otherwise one line.
pub fn write_json_output(
    value: &serde_json::Value,
    file: Option<&Path>,
    pretty: bool,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let s = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    match file {
        Some(path) => std::fs::write(path, format!("{}\n", s))?,
        None => {
            println!("{}", s);
            std::io::Write::flush(&mut std::io::stdout())?;
        }
    }
    Ok(())
}
