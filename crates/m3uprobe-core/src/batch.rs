//! Sequential and concurrent batch drivers over the prober.
//!
//! A single URL's failure never aborts the batch; it is simply excluded
//! from the working set. Each probe is attempted exactly once per run, with
//! no retry or backoff.

use std::collections::VecDeque;
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread;

use crate::fetch::Fetch;
use crate::probe::Prober;
use crate::report::ProgressSink;

/// Result of one probe in a batch run. `index` is the 1-based input
/// position, kept so callers that need stable ordering can re-sort.
#[derive(Debug, Clone)]
pub struct ProbeReport {
    pub index: usize,
    pub url: String,
    pub live: bool,
}

/// Extracts the working set from a batch run: the input URLs that probed
/// live, carried through unmodified. The output is always a subset of the
/// input; no URL is synthesized or rewritten.
pub fn working_set(reports: &[ProbeReport]) -> Vec<String> {
    reports
        .iter()
        .filter(|r| r.live)
        .map(|r| r.url.clone())
        .collect()
}

/// Probes each target one at a time, in input order.
pub fn run_sequential<F: Fetch>(
    prober: &Prober<F>,
    targets: &[String],
    sink: &ProgressSink,
) -> Vec<ProbeReport> {
    let total = targets.len();
    let mut reports = Vec::with_capacity(total);
    for (i, url) in targets.iter().enumerate() {
        let live = prober.probe(url);
        sink.result(i + 1, total, url, live);
        reports.push(ProbeReport {
            index: i + 1,
            url: url.clone(),
            live,
        });
    }
    reports
}

/// Probes all targets with a bounded worker pool.
///
/// Workers pull from a shared queue and push results as they complete, so
/// report order is completion order, not input order; only the result set
/// is guaranteed. Pool size is `min(workers, targets.len())`, at least 1.
pub fn run_concurrent<F>(
    prober: Arc<Prober<F>>,
    targets: &[String],
    workers: usize,
    sink: &ProgressSink,
) -> Vec<ProbeReport>
where
    F: Fetch + Send + Sync + 'static,
{
    let total = targets.len();
    if total == 0 {
        return Vec::new();
    }

    let work: Arc<Mutex<VecDeque<(usize, String)>>> = Arc::new(Mutex::new(
        targets
            .iter()
            .cloned()
            .enumerate()
            .map(|(i, url)| (i + 1, url))
            .collect(),
    ));
    let (tx, rx) = mpsc::channel();
    let num_workers = workers.max(1).min(total);
    let mut handles = Vec::with_capacity(num_workers);
    for _ in 0..num_workers {
        let work = Arc::clone(&work);
        let tx = tx.clone();
        let prober = Arc::clone(&prober);
        let sink = sink.clone();
        handles.push(thread::spawn(move || loop {
            let (index, url) = match work.lock().unwrap().pop_front() {
                Some(pair) => pair,
                None => break,
            };
            let live = prober.probe(&url);
            sink.result(index, total, &url, live);
            let _ = tx.send(ProbeReport { index, url, live });
        }));
    }
    drop(tx);

    // Collect in completion order. The iterator ends once every worker has
    // exited; a panicked worker loses only its own in-flight probe.
    let reports: Vec<ProbeReport> = rx.iter().collect();
    for handle in handles {
        let _ = handle.join();
    }
    reports
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProbeConfig;
    use crate::fetch::mock::MockFetch;
    use std::collections::BTreeSet;

    fn fixture() -> (MockFetch, Vec<String>) {
        let fetch = MockFetch::new()
            .playlist(
                "http://host/a/master.m3u8",
                "#EXTM3U\n#EXT-X-STREAM-INF:BANDWIDTH=1\nvariant.m3u8\n",
            )
            .status("http://host/a/variant.m3u8", 200)
            .status("http://host/b/master.m3u8", 404)
            .playlist("http://host/c/master.m3u8", "#EXTM3U\n");
        let targets = vec![
            "http://host/a/master.m3u8".to_string(),
            "http://host/b/master.m3u8".to_string(),
            "http://host/c/master.m3u8".to_string(),
        ];
        (fetch, targets)
    }

    #[test]
    fn sequential_preserves_input_order() {
        let (fetch, targets) = fixture();
        let prober = Prober::new(fetch, ProbeConfig::default());
        let (sink, writer) = ProgressSink::stdout();
        let reports = run_sequential(&prober, &targets, &sink);
        drop(sink);
        writer.finish();

        let indices: Vec<usize> = reports.iter().map(|r| r.index).collect();
        assert_eq!(indices, vec![1, 2, 3]);
        assert_eq!(working_set(&reports), vec!["http://host/a/master.m3u8"]);
    }

    #[test]
    fn concurrent_set_matches_sequential_set() {
        let (fetch, targets) = fixture();
        let prober = Prober::new(fetch, ProbeConfig::default());
        let (sink, writer) = ProgressSink::stdout();
        let sequential: BTreeSet<String> =
            working_set(&run_sequential(&prober, &targets, &sink))
                .into_iter()
                .collect();

        let (fetch, targets) = fixture();
        let prober = Arc::new(Prober::new(fetch, ProbeConfig::default()));
        let concurrent: BTreeSet<String> =
            working_set(&run_concurrent(prober, &targets, 4, &sink))
                .into_iter()
                .collect();
        drop(sink);
        writer.finish();

        assert_eq!(sequential, concurrent);
    }

    #[test]
    fn working_set_is_subset_of_input() {
        let (fetch, targets) = fixture();
        let prober = Arc::new(Prober::new(fetch, ProbeConfig::default()));
        let (sink, writer) = ProgressSink::stdout();
        let reports = run_concurrent(prober, &targets, 2, &sink);
        drop(sink);
        writer.finish();

        assert_eq!(reports.len(), targets.len());
        for url in working_set(&reports) {
            assert!(targets.contains(&url));
        }
    }

    #[test]
    fn empty_input_yields_empty_reports() {
        let prober = Prober::new(MockFetch::new(), ProbeConfig::default());
        let (sink, writer) = ProgressSink::stdout();
        assert!(run_sequential(&prober, &[], &sink).is_empty());
        let prober = Arc::new(Prober::new(MockFetch::new(), ProbeConfig::default()));
        assert!(run_concurrent(prober, &[], 8, &sink).is_empty());
        drop(sink);
        writer.finish();
    }

    #[test]
    fn more_workers_than_targets_is_fine() {
        let (fetch, targets) = fixture();
        let prober = Arc::new(Prober::new(fetch, ProbeConfig::default()));
        let (sink, writer) = ProgressSink::stdout();
        let reports = run_concurrent(prober, &targets, 64, &sink);
        drop(sink);
        writer.finish();
        assert_eq!(reports.len(), 3);
    }
}
