use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use nephro_core::{PatientRecord, Rule, RuleEngine, Summary};
use nephro_record::Form;

mod config;

use config::{OUTPUT_FORMAT_ENV, RunConfig};

#[derive(Parser)]
#[command(name = "nephroguide")]
#[command(about = "Renal decision support from a structured patient form")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a form document and print the assessment
    Assess {
        /// Form document (YAML or JSON), or '-' for standard input
        file: PathBuf,
        /// Output format: text, yaml or json (overrides NEPHRO_OUTPUT_FORMAT)
        #[arg(long)]
        format: Option<String>,
    },
    /// Print the full patient summary including the assessment
    Summary {
        /// Form document (YAML or JSON), or '-' for standard input
        file: PathBuf,
    },
    /// Validate a form document without evaluating it
    Check {
        /// Form document (YAML or JSON), or '-' for standard input
        file: PathBuf,
    },
    /// List the rules in evaluation order
    Rules,
}

/// Entry point for the NephroGuide command-line runner.
///
/// Logs go to standard error so that standard output carries only results.
///
/// # Environment Variables
/// - `NEPHRO_OUTPUT_FORMAT`: default output format for `assess` (default: "text")
/// - `RUST_LOG`: tracing filter (default: "nephroguide=info,nephro_record=warn")
fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("nephroguide=info".parse()?)
                .add_directive("nephro_record=warn".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Assess { file, format }) => {
            let config = RunConfig::resolve(std::env::var(OUTPUT_FORMAT_ENV).ok(), format)?;
            let record = load_record(&file)?;
            let assessment = RuleEngine::evaluate(&record);
            tracing::info!(
                diagnosis = %assessment.diagnosis,
                warnings = assessment.warnings.len(),
                "assessment complete"
            );
            print!("{}", config.output_format().render(&assessment)?);
        }
        Some(Commands::Summary { file }) => {
            let record = load_record(&file)?;
            let assessment = RuleEngine::evaluate(&record);
            print!("{}", Summary::render(&record, Some(&assessment)));
        }
        Some(Commands::Check { file }) => {
            load_record(&file)?;
            println!("ok: {}", file.display());
        }
        Some(Commands::Rules) => {
            for line in rule_listing() {
                println!("{line}");
            }
        }
        None => {
            println!("Use 'nephroguide --help' for commands");
        }
    }

    Ok(())
}

/// Read and parse a form document.
fn load_record(path: &Path) -> anyhow::Result<PatientRecord> {
    let text = read_input(path)?;
    let record =
        Form::parse(&text).with_context(|| format!("invalid form document {}", path.display()))?;
    tracing::info!(file = %path.display(), "loaded form");
    Ok(record)
}

/// Read the whole input, treating `-` as standard input.
fn read_input(path: &Path) -> anyhow::Result<String> {
    if path == Path::new("-") {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("failed to read standard input")?;
        return Ok(text);
    }

    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn rule_listing() -> Vec<String> {
    Rule::ORDER
        .iter()
        .enumerate()
        .map(|(i, rule)| format!("{}. {:<30} {}", i + 1, rule.name(), rule.description()))
        .collect()
}
