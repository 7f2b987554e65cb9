//! add-arrays - elementwise-add benchmark, GPU kernel vs host.
//!
//! Takes no arguments. Runs the default configuration (1e8 elements, 256
//! threads per block, seed 0) on CUDA device 0 and prints the report to
//! stdout. Diagnostics go to stderr; set `RUST_LOG=debug` to see transfer
//! timings and the device/host result comparison.

use std::process::ExitCode;

use colored::Colorize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use addbench::prelude::*;

fn setup_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();
}

fn run() -> Result<BenchReport> {
    let config = BenchConfig::default();
    let backend = CudaBackend::new(config.device_ordinal)?;

    let report = Benchmark::new(config, backend)?.run()?;
    debug!(
        max_abs_diff = report.max_abs_diff(),
        upload_ms = report.upload.as_secs_f64() * 1000.0,
        download_ms = report.download.as_secs_f64() * 1000.0,
        "Device and host results compared"
    );

    Ok(report)
}

fn main() -> ExitCode {
    setup_logging();

    match run() {
        Ok(report) => {
            print!("{report}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}
