use crate::spec::load_document;
use crate::validator::{SpecValidator, ValidationResult};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "swagcheck")]
#[command(about = "Semantic validator for Swagger 2.0 specs", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate a Swagger 2.0 spec and report errors and warnings
    Check {
        #[arg(short, long)]
        spec: PathBuf,

        /// Exit non-zero when warnings are present as well
        #[arg(long, default_value_t = false)]
        strict: bool,
    },
}

pub fn run_cli() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    match &cli.command {
        Commands::Check { spec, strict } => {
            let doc = load_document(spec)?;
            info!(spec = %spec.display(), "validating");
            let result = SpecValidator::new().validate(&doc).sorted();
            print_result(&result);
            if result.has_errors() || (*strict && !result.warnings.is_empty()) {
                std::process::exit(1);
            }
            Ok(())
        }
    }
}

/// Print a validation result, errors first, warnings after.
pub fn print_result(result: &ValidationResult) {
    if result.is_clean() {
        println!("✅ spec is valid");
        return;
    }

    if !result.errors.is_empty() {
        eprintln!("❌ {} error(s):", result.errors.len());
        for issue in &result.errors {
            eprintln!("   [{}] {}", issue.code, issue.message);
        }
    }

    if !result.warnings.is_empty() {
        eprintln!("⚠️  {} warning(s):", result.warnings.len());
        for issue in &result.warnings {
            eprintln!("   [{}] {}", issue.code, issue.message);
        }
    }
}
