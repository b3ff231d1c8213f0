use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use deltapack_tools::{format_plans_text, plan_fields, FieldConfig};

#[derive(Parser)]
#[command(
    name = "deltapack-tools",
    version,
    about = "deltapack scheme planning and inspection tools"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compose schemes for a field config and report per-field bit costs.
    SchemePlan {
        /// Path to the field config JSON.
        config: PathBuf,
        /// Output format.
        #[arg(long, value_enum, default_value_t = PlanFormat::Text)]
        format: PlanFormat,
    },
    /// Print the quantization-table fingerprint peers compare at handshake.
    Fingerprint,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PlanFormat {
    Text,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::SchemePlan { config, format } => {
            let text = fs::read_to_string(&config)
                .with_context(|| format!("read config {}", config.display()))?;
            let fields: Vec<FieldConfig> =
                serde_json::from_str(&text).context("parse field config")?;
            let plans = plan_fields(&fields)?;
            match format {
                PlanFormat::Text => print!("{}", format_plans_text(&plans)),
                PlanFormat::Json => {
                    let json =
                        serde_json::to_string_pretty(&plans).context("serialize plans")?;
                    println!("{json}");
                }
            }
        }
        Command::Fingerprint => {
            println!("0x{:016X}", codec::table_fingerprint());
        }
    }
    Ok(())
}
