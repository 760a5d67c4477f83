//! docs-mirror CLI entry point.
//!
//! This binary is the composition root. Responsibilities:
//!
//! 1. **Parse configuration** — command-line flags plus `LINEAR_API_KEY`,
//!    validated before any filesystem or network activity.
//! 2. **Wire observability** — `tracing-subscriber` with an `EnvFilter` and
//!    either the human-readable or the JSON formatter on stderr.
//! 3. **Construct infrastructure** — a [`linear::LinearClient`] handed to
//!    [`mirror::sync_docs`] as its [`mirror::IssueTracker`].
//! 4. **Report** — progress and the run summary on stdout, printed as the
//!    run advances, and the process exit code: `0` on success or a completed
//!    preview, `1` on any failure.

mod config;
mod logging;

use std::io::Write;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use config::{Args, CliConfig, API_KEY_ENV};
use linear::LinearClient;
use logging::init_logging;
use mirror::{
    sync_docs_with_progress, MirrorError, PreparedUpdate, SyncMode, SyncProgress, SyncReport,
    PREVIEW_LISTING_LIMIT,
};
use tracing::error;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.log_json);

    let mut out = std::io::stdout();
    let result = run(&args, &mut out).await;
    ExitCode::from(finish(&mut out, result))
}

async fn run(args: &Args, out: &mut impl Write) -> anyhow::Result<()> {
    let config = CliConfig::from_args(args, std::env::var(API_KEY_ENV).ok())?;
    let client =
        LinearClient::new(config.linear.clone()).context("failed to construct Linear client")?;

    let mut progress = ConsoleProgress { out: &mut *out };
    let report = sync_docs_with_progress(&client, &config.sync, &mut progress).await?;
    print_report(out, &report)?;
    Ok(())
}

/// Prints progress lines as the sync reaches each stage.
struct ConsoleProgress<W: Write> {
    out: W,
}

impl<W: Write> SyncProgress for ConsoleProgress<W> {
    fn prepared(&mut self, updates: &[PreparedUpdate]) {
        if let Err(e) = writeln!(self.out, "Prepared {} updates.", updates.len()) {
            error!(error = %e, "Failed to write progress");
        }
    }

    fn applied(&mut self, update: &PreparedUpdate) {
        if let Err(e) = writeln!(self.out, "Updated {}", update.path) {
            error!(error = %e, "Failed to write progress");
        }
    }
}

/// Prints what remains of the summary once the run has succeeded.
fn print_report(out: &mut impl Write, report: &SyncReport) -> std::io::Result<()> {
    if report.mode == SyncMode::Preview {
        for update in report.prepared.iter().take(PREVIEW_LISTING_LIMIT) {
            writeln!(out, "- {} -> {}", update.path, update.issue_id)?;
        }
        writeln!(out, "Dry run only. Use --apply to update issues.")?;
    }
    Ok(())
}

/// Reports the outcome of a run and returns the process exit code.
fn finish(out: &mut impl Write, result: anyhow::Result<()>) -> u8 {
    match result {
        Ok(()) => 0,
        Err(e) => {
            if let Err(write_err) = report_failure(out, &e) {
                error!(error = %write_err, "Failed to write failure report");
            }
            1
        }
    }
}

fn report_failure(out: &mut impl Write, err: &anyhow::Error) -> std::io::Result<()> {
    match err.downcast_ref::<MirrorError>() {
        Some(MirrorError::UnmappedDocuments { paths }) => {
            writeln!(out, "Missing Linear issues for paths:")?;
            for path in paths {
                writeln!(out, "- {path}")?;
            }
            writeln!(out, "Aborting due to missing mappings.")?;
        }
        Some(MirrorError::Configuration { message }) => {
            writeln!(out, "{message}")?;
        }
        _ => {
            let message = format!("{err:#}");
            error!(error = %message, "Sync failed");
        }
    }
    Ok(())
}
