use clap::{Parser, Subcommand};
use renovation_lp::rules::{FieldId, FieldValue, RuleSet};
use renovation_lp::{config, generate, output};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "renovation-lp")]
#[command(about = "Landing page builder for renovation case studies")]
#[command(long_about = "\
Landing page builder for renovation case studies

Renders one static page with a before/after comparison slider, case
thumbnails, an FAQ accordion, and a validated contact form. The interactive
widgets are driven by the crate's wasm build, loaded from pkg/ next to the
page.

Source structure:

  site/
  ├── config.toml                  # Copy, cases, FAQ, form, colors (optional)
  └── assets/                      # Copied to the output root as-is
      └── cases/
          ├── bath-before.jpg
          └── bath-after.jpg

Run 'renovation-lp gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Source directory
    #[arg(long, default_value = "site", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render the page and copy assets into the output directory
    Build,
    /// Validate config and asset references without building
    Check,
    /// Print a stock config.toml with all options documented
    GenConfig,
    /// Run one contact form rule against a value
    Validate {
        /// name, tel, email, contact_method, or privacy
        field: FieldId,
        /// Field text; `true`/`false` for privacy; an option value (or "") for contact_method
        value: String,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "renovation_lp=warn".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Build => {
            println!("==> Building {}", cli.source.display());
            let summary = generate::build(&cli.source, &cli.output)?;
            output::print_build_output(&summary);
            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            let report = generate::check(&cli.source)?;
            output::print_check_output(&report);
            if !report.is_ok() {
                return Err(format!("{} referenced image(s) missing", report.missing.len()).into());
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
        Command::Validate { field, value } => {
            let config = config::load_config(&cli.source)?;
            let rules = RuleSet::standard(&config.form.messages);
            let verdict = rules.validate_one(field, &FieldValue::from_raw(field, &value));
            output::print_verdict(&verdict);
            if !verdict.valid {
                return Err(format!("{field} is invalid").into());
            }
        }
    }

    Ok(())
}
