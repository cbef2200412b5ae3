use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::{Parser, Subcommand};

use settings_extractor::{build_preview, extract_document, registry, PageText};

#[derive(Parser)]
#[command(
    name = "settings_extractor",
    about = "Extract motor-controller function settings from export text"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract settings from page text files (one file per page, in order)
    Extract {
        /// Page text files, in page order
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Emit the result and preview as JSON instead of a table
        #[arg(long)]
        json: bool,
        /// Fail (exit nonzero) when confidence falls below this threshold
        #[arg(long)]
        min_confidence: Option<f64>,
    },
    /// List the named function definitions
    Functions,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Extract {
            files,
            json,
            min_confidence,
        } => {
            let mut pages = Vec::with_capacity(files.len());
            for (index, path) in files.iter().enumerate() {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("reading {}", path.display()))?;
                pages.push(PageText { index, text });
            }

            let result = extract_document(&pages);
            let preview = build_preview(&result.settings);

            if json {
                let out = serde_json::json!({ "result": result, "preview": preview });
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                if preview.is_empty() {
                    println!("No settings extracted; enter values manually.");
                } else {
                    println!(
                        "{:>4} | {:<24} | {:>5} | {:<9} | {}",
                        "F", "Name", "Value", "Expected", "OK"
                    );
                    println!("{}", "-".repeat(58));
                    for row in &preview {
                        println!(
                            "{:>4} | {:<24} | {:>5} | {:>4}-{:<4} | {}",
                            row.function,
                            truncate(row.name, 24),
                            row.value,
                            row.expected_min,
                            row.expected_max,
                            if row.in_range { "yes" } else { "NO" }
                        );
                    }
                }
                println!(
                    "\n{} settings from {} pages ({} dropped), confidence {:.2}",
                    result.valid_count,
                    pages.len(),
                    result.invalid_count,
                    result.confidence
                );
            }

            if let Some(min) = min_confidence {
                if result.confidence < min {
                    anyhow::bail!(
                        "confidence {:.2} below threshold {:.2}; manual entry recommended",
                        result.confidence,
                        min
                    );
                }
            }
            Ok(())
        }
        Commands::Functions => {
            println!(
                "{:>4} | {:<24} | {:<9} | {}",
                "F", "Name", "Expected", "Description"
            );
            println!("{}", "-".repeat(96));
            for def in registry::named_definitions() {
                println!(
                    "{:>4} | {:<24} | {:>4}-{:<4} | {}",
                    def.number,
                    def.name,
                    def.expected_range.0,
                    def.expected_range.1,
                    truncate(def.description, 50)
                );
            }
            Ok(())
        }
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {:.1}s", elapsed.as_secs_f64());
    }

    result
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max).collect();
        format!("{}...", truncated)
    }
}
