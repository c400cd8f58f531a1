pub mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "orchard",
    about = "Orchard commodity-core CLI",
    long_about = "Normalize free-text commodity labels, resolve seasonal availability, and \
                  compute per-contact effective prices over the injectable rule tables.",
    after_help = "Examples:\n  orchard normalize \"Apples - Cosmic Crisp\" \"Organic Blueberries\"\n  orchard season mandarin --variety \"Sumo Citrus\" --source Suntreat --month 2\n  orchard price --base 10.00 --global-pct 12.5"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Normalize one or more raw commodity labels into taxonomy records")]
    Normalize {
        #[arg(required = true, help = "Raw labels, e.g. \"Apples - Cosmic Crisp\"")]
        raw: Vec<String>,
        #[arg(long, help = "TOML rule file merged over the builtin tables")]
        rules: Option<PathBuf>,
    },
    #[command(about = "Resolve the season window for a commodity and report the in-season verdict")]
    Season {
        commodity: String,
        #[arg(long, help = "Variety text used for source-specific lookups")]
        variety: Option<String>,
        #[arg(long, help = "Use organic season data where a source provides it")]
        organic: bool,
        #[arg(long, help = "Source context, e.g. a supplier name")]
        source: Option<String>,
        #[arg(long, help = "Reference month 1-12 (defaults to the current month)")]
        month: Option<u8>,
        #[arg(long, help = "TOML rule file merged over the builtin tables")]
        rules: Option<PathBuf>,
    },
    #[command(about = "Run labels through the full import pipeline: normalize, resolve, flag")]
    Import {
        #[arg(required = true)]
        raw: Vec<String>,
        #[arg(long, help = "Source context applied to every label")]
        source: Option<String>,
        #[arg(long, help = "Reference month 1-12 (defaults to the current month)")]
        month: Option<u8>,
        #[arg(long, help = "TOML rule file merged over the builtin tables")]
        rules: Option<PathBuf>,
    },
    #[command(about = "Compute an effective price showing which adjustment layer won")]
    Price {
        #[arg(long, help = "Base price, e.g. 10.00")]
        base: String,
        #[arg(long, help = "Contact-level global adjustment percentage")]
        global_pct: Option<String>,
        #[arg(long, help = "Per-variation override percentage")]
        override_pct: Option<String>,
    },
    #[command(about = "Load, validate, and summarize the effective rule book")]
    Rules {
        #[arg(long, help = "TOML rule file merged over the builtin tables")]
        rules: Option<PathBuf>,
    },
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Normalize { raw, rules } => commands::normalize::run(&raw, rules.as_deref()),
        Command::Season { commodity, variety, organic, source, month, rules } => {
            commands::season::run(
                &commodity,
                variety.as_deref(),
                organic,
                source.as_deref(),
                month,
                rules.as_deref(),
            )
        }
        Command::Import { raw, source, month, rules } => {
            commands::import::run(&raw, source.as_deref(), month, rules.as_deref())
        }
        Command::Price { base, global_pct, override_pct } => {
            commands::price::run(&base, global_pct.as_deref(), override_pct.as_deref())
        }
        Command::Rules { rules } => commands::rules::run(rules.as_deref()),
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}
