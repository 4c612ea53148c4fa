mod cli;
mod config;
mod error;
mod launch;
mod project;
mod tools;
mod utils;

use tracing_subscriber::EnvFilter;

fn main() {
    // Diagnostics go to stderr; stdout carries resolved paths for scripts.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();
    cli::run();
}
