// src/main.rs
// =============================================================================
// This is the entry point of the visibility checklist.
//
// What happens here:
// 1. Parse command-line arguments using clap (all optional)
// 2. Set up logging to stderr, so stdout carries only the report
// 3. Build the run settings from flags and environment
// 4. Run the checklist and print the report
// 5. Exit 0 whether or not checks failed: this tool reports, it does not gate
// =============================================================================

mod checker; // src/checker/ - extractor, URL rules, freshness, HTTP requests
mod cli; // src/cli.rs - command-line parsing
mod config; // src/config.rs - defaults, flags and environment
mod github; // src/github/ - repository metadata and its checks
mod report; // src/report.rs - text and JSON rendering
mod site; // src/site/ - the checklist orchestrator

use anyhow::Result;
use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use cli::Cli;
use config::Settings;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // A bad --repo is rejected by clap above. Only an HTTP client that can't
    // be built ends up here; failing checks are part of the report.
    let exit_code = match run(&cli).await {
        Ok(()) => 0,
        Err(e) => {
            error!("{:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

async fn run(cli: &Cli) -> Result<()> {
    let settings = Settings::from_cli(cli);
    let results = site::run_checklist(&settings).await?;

    if cli.json {
        println!("{}", report::render_json(&results)?);
    } else {
        print!("{}", report::render_text(&results));
    }

    Ok(())
}

// RUST_LOG wins over the defaults
fn init_logging(verbose: bool) {
    let default = if verbose {
        "visibility_check=debug"
    } else {
        "visibility_check=warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
