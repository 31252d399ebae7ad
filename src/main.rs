use chrono::{Local, NaiveDate};
use clap::{ArgAction, Parser};
use mongoose::generate::{self, GenerateOptions};
use mongoose::{config, output, scan};
use std::path::PathBuf;

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup, called exactly once
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "mongoose")]
#[command(about = "Static site generator for markdown notes")]
#[command(long_about = "\
Static site generator for markdown notes

Your filesystem is the data source. Directories become sidebar sections,
markdown files become pages, and each page gets a table of contents built
from its level 2 and 3 headings.

Content structure:

  content/
  ├── config.toml                  # Site config (optional)
  ├── welcome.md                   # Root files → \"Documentation\" section
  ├── getting-started/             # Section \"Getting Started\"
  │   ├── install.md               #   → getting-started/install.html
  │   └── first_steps.md
  └── assets/images/               # Logo and favicon (paths set in config)

Frontmatter (optional, at the very top of a file):

  ---
  title: Installation              # Default: from filename (first_steps → \"First Steps\")
  date: 2024-02-01                 # Default: today, or --date
  ---

Ordering: pages oldest first within a section, sections by their newest page.
The first page of the first section is also written as index.html.

Run 'mongoose --print-config' to print a documented config.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Content directory
    #[arg(required_unless_present = "print_config")]
    input: Option<PathBuf>,

    /// Output directory
    #[arg(default_value = "output")]
    output: PathBuf,

    /// Date used for pages without a frontmatter date (default: today)
    #[arg(long, value_name = "YYYY-MM-DD")]
    date: Option<NaiveDate>,

    /// Validate and list the content directory without writing anything
    #[arg(long)]
    check: bool,

    /// Print a stock config.toml with all options documented
    #[arg(long)]
    print_config: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if cli.print_config {
        print!("{}", config::stock_config_toml());
        return Ok(());
    }

    let Some(input) = cli.input else {
        return Err("missing content directory".into());
    };

    if !input.is_dir() {
        return Err(generate::GenerateError::MissingInput(input).into());
    }

    if cli.check {
        println!("==> Checking {}", input.display());
        config::load_config(&input)?;
        let sections = scan::scan(&input)?;
        output::print_scan_output(&sections, &input);
        println!("==> Content is valid");
        return Ok(());
    }

    let today = cli.date.unwrap_or_else(|| Local::now().date_naive());
    println!("==> Generating {} → {}", input.display(), cli.output.display());
    let report = generate::generate(&input, &cli.output, &GenerateOptions::new(today))?;
    output::print_generate_output(&report);
    println!("==> Build complete: {}", cli.output.display());

    Ok(())
}

/// Install the stderr log subscriber. `RUST_LOG` directives are honoured on
/// top of the level picked by `-v`.
fn init_tracing(verbose: u8) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();
}
