// src/bin/prober.rs
use std::time::Duration;

use anyhow::{ensure, Result};
use clap::Parser;

use service_probe::prober::{
    self, probe_api, probe_health, render_api, render_health, ProbeSession, Target,
};

/// Remote API check client
#[derive(Parser, Debug)]
#[command(name = "prober", version)]
#[command(about = "Queries a responder's /healthcheck and /api endpoints")]
struct Cli {
    /// Server URL, http(s)://host[:port]
    #[arg(short, long)]
    url: String,

    /// Request timeout in seconds
    #[arg(short, long, default_value_t = 5.0)]
    timeout: f64,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    ensure!(cli.timeout > 0.0, "timeout must be positive");

    // Setup failures below are fatal: no connection is possible without a
    // usable scheme and host. A bad port is recovered with a warning.
    let target = Target::resolve(&cli.url, prober::DEFAULT_PORT)?;
    if target.defaulted_port {
        println!(
            "WARNING: port should be in range of 1 - 65535, default value will be used: {}",
            target.port
        );
    }
    println!("Remote server address: {}", target.base_url());

    let session = ProbeSession::connect(&target, Duration::from_secs_f64(cli.timeout))?;

    // Strictly sequential: the health probe completes (or fails and is
    // reported) before the API probe starts, and both always run.
    println!("\nChecking endpoint: {} ...", prober::HEALTHCHECK_PATH);
    let health = probe_health(&session).await;
    for line in render_health(&health) {
        println!("{line}");
    }

    println!("\nChecking endpoint: {} ...", prober::API_PATH);
    let api = probe_api(&session).await;
    for line in render_api(&api) {
        println!("{line}");
    }

    Ok(())
}
