use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Instant;

use slot_score::config::{ColorMode, OutputFormat};

const EXIT_SUCCESS: i32 = 0;
const EXIT_INPUT: i32 = 2;
const EXIT_CONFIG: i32 = 4;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Score a session file and print the result
    Score {
        /// Session file (YAML, or JSON with a .json extension); `-` reads stdin
        session: PathBuf,

        /// Output format (overrides the config file)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Score even when no row has both a model and sales
        #[arg(long)]
        allow_empty: bool,
    },
    /// Write a blank session template with three machine rows
    Init {
        /// Where to write the template
        #[arg(default_value = "session.yaml")]
        path: PathBuf,

        /// Date to put in the template (defaults to today)
        #[arg(long)]
        date: Option<chrono::NaiveDate>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// List known machine models with their baselines, and island keys
    Catalog,
}

#[derive(Parser, Debug)]
#[command(name = "slot-score")]
#[command(about = "Slot-machine daily sales scoring CLI", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/slot-score/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// When to color output (overrides the config file)
    #[arg(long, value_enum, global = true)]
    color: Option<ColorMode>,

    #[command(subcommand)]
    command: Commands,
}

fn main() {
    let cli = Cli::parse();
    let start_time = Instant::now();

    let config_path = cli.config.map(PathBuf::from);
    let config = match slot_score::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    if let Err(e) = slot_score::telemetry::init(cli.verbose, config.log_level.as_deref()) {
        eprintln!("Config error: {:#}", e);
        std::process::exit(EXIT_CONFIG);
    }

    let color_mode = cli.color.or(config.color).unwrap_or_default();
    let use_colors = slot_score::output::should_use_colors(color_mode);

    match cli.command {
        Commands::Score {
            session,
            format,
            allow_empty,
        } => {
            let input = match slot_score::session::load_session(&session) {
                Ok(input) => input,
                Err(e) => {
                    eprintln!("Session error: {:#}", e);
                    std::process::exit(EXIT_INPUT);
                }
            };

            for entry in &input.machines {
                let model = entry.model.trim();
                if !model.is_empty() && !slot_score::session::is_catalog_model(model) {
                    tracing::info!(model, "model is not in the catalog, using the standard baseline");
                }
            }

            if !allow_empty && !input.has_scorable_machine() {
                eprintln!("Nothing to score: no machine row has both a model and sales.");
                eprintln!("Fill in at least one row, or pass --allow-empty.");
                std::process::exit(EXIT_INPUT);
            }

            let result = slot_score::scoring::calculate_score(&input);

            let output = match format.or(config.format).unwrap_or_default() {
                OutputFormat::Text => {
                    slot_score::output::format_report(&result, &input.context, use_colors)
                }
                OutputFormat::Tsv => slot_score::output::format_tsv(&result),
                OutputFormat::Json => match slot_score::output::format_json(&result) {
                    Ok(json) => json,
                    Err(e) => {
                        eprintln!("Failed to serialize result: {:#}", e);
                        std::process::exit(EXIT_INPUT);
                    }
                },
            };
            println!("{}", output);

            tracing::debug!(
                machines = result.machines.len(),
                elapsed = ?start_time.elapsed(),
                "scored session"
            );
        }
        Commands::Init { path, date, force } => {
            let date = date.unwrap_or_else(|| chrono::Local::now().date_naive());
            if let Err(e) = slot_score::session::write_template(&path, date, force) {
                eprintln!("Failed to write template: {:#}", e);
                std::process::exit(EXIT_INPUT);
            }
            println!("Session template written to {}", path.display());
            println!("Fill it in, then run `slot-score score {}`.", path.display());
        }
        Commands::Catalog => {
            let entries = slot_score::session::catalog_entries();
            let width = entries
                .iter()
                .map(|e| e.model.chars().count())
                .max()
                .unwrap_or(0);

            println!("Models:");
            for entry in &entries {
                println!(
                    "  {}",
                    slot_score::output::format_catalog_line(
                        entry.model,
                        entry.tier.label(),
                        entry.tier.base_median(),
                        width
                    )
                );
            }
            println!("  (any other model uses the standard baseline)");
            println!();
            println!("Islands:");
            for island in slot_score::session::IslandLocation::ALL {
                println!("  {:<18} {}", island.key(), island.floor_label());
            }
        }
    }

    std::process::exit(EXIT_SUCCESS);
}
