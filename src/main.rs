//! ERW Figures - Main entry point
//!
//! Reads the precomputed CDR scenario tables and renders the publication
//! figures as PNG files. With no arguments it reproduces the full set;
//! `--figure`, `--data-dir`, `--results-dir`, `--scatter-scenario` and
//! `--income-scenarios` narrow or redirect the run.

use erw_figures::config::FigureConfig;
use erw_figures::pipeline;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

fn main() {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();

    println!("ERW figure generator v{}", env!("CARGO_PKG_VERSION"));

    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = match FigureConfig::from_args(&args) {
        Ok(config) => config,
        Err(e) => {
            error!("invalid arguments: {e}");
            std::process::exit(2);
        }
    };

    match pipeline::generate_figures(&config) {
        Ok(results) => {
            info!("done: {} file(s) written", results.len());
        }
        Err(e) => {
            error!("figure generation failed: {e}");
            std::process::exit(1);
        }
    }
}
