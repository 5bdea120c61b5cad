//! `m3uprobe check <input> <output>` – probe a URL list, write the working set.

use anyhow::Result;
use m3uprobe_core::batch::{self, working_set};
use m3uprobe_core::config::ProbeConfig;
use m3uprobe_core::fetch::CurlFetch;
use m3uprobe_core::probe::Prober;
use m3uprobe_core::report::ProgressSink;
use m3uprobe_core::targets;
use std::path::Path;
use std::sync::Arc;

/// Runs the batch prober. Input errors are fatal before any probing starts;
/// per-URL failures only exclude that URL from the working set.
pub fn run_check(input: &Path, output: &Path, cfg: &ProbeConfig, sequential: bool) -> Result<()> {
    println!("Reading: {}", input.display());
    let urls = targets::read_targets(input)?;
    println!("Found {} URLs to check\n", urls.len());

    let prober = Prober::new(CurlFetch::new(cfg.user_agent.as_str()), cfg.clone());
    let (sink, writer) = ProgressSink::stdout();
    let reports = if sequential {
        batch::run_sequential(&prober, &urls, &sink)
    } else {
        tracing::debug!(workers = cfg.workers, "starting worker pool");
        batch::run_concurrent(Arc::new(prober), &urls, cfg.workers, &sink)
    };
    drop(sink);
    writer.finish();

    let working = working_set(&reports);
    targets::write_url_list(output, &working)?;

    println!("\nDone! Found {} working links out of {}.", working.len(), urls.len());
    println!("Saved to: {}", output.display());
    Ok(())
}
