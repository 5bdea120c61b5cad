//! `m3uprobe probe <url>` – probe a single playlist URL.

use m3uprobe_core::config::ProbeConfig;
use m3uprobe_core::fetch::CurlFetch;
use m3uprobe_core::probe::Prober;

/// Probes one URL and prints the outcome. Returns the process exit code:
/// 0 when the stream is live, 3 when it is not (scriptable).
pub fn run_probe(url: &str, cfg: &ProbeConfig) -> i32 {
    let prober = Prober::new(CurlFetch::new(cfg.user_agent.as_str()), cfg.clone());
    let outcome = prober.probe_outcome(url);
    let marker = if outcome.is_live() { "OK ✓" } else { "×" };
    println!("{url}  →  {marker} ({outcome})");
    if outcome.is_live() {
        0
    } else {
        3
    }
}
