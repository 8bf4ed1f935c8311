//! `wab-bench`: per-node cost benchmark for audio processing graphs.

use std::process::ExitCode;

use anyhow::{Context, Result};
use bench_runtime::{BenchRuntime, RuntimeConfig};
use clap::Parser;
use tracing::{debug, error};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let config = RuntimeConfig::parse();
    bench_telemetry::init_telemetry(&config.telemetry())
        .context("failed to initialize telemetry")?;

    let runtime = BenchRuntime::new(config);

    if runtime.config().list {
        for line in runtime.catalog_listing() {
            println!("{line}");
        }
        return Ok(ExitCode::SUCCESS);
    }

    let report = runtime.run().await?;

    if runtime.config().json {
        println!(
            "{}",
            serde_json::to_string_pretty(&report).context("failed to encode report")?
        );
    }
    debug!(metrics = %bench_telemetry::gather_text()?, "final metrics");

    match &report.score {
        Ok(_) => Ok(ExitCode::SUCCESS),
        Err(e) => {
            error!(error = %e, "benchmark produced no score");
            Ok(ExitCode::FAILURE)
        }
    }
}
