//! Target list I/O: JSON array of URL strings in, working set out.

use anyhow::{bail, Context, Result};
use std::fs;
use std::path::Path;

/// Reads the input target list: a JSON array of URL strings.
///
/// Entries are trimmed and blank entries dropped. An unreadable file,
/// malformed JSON, a non-array top level, or a non-string element is an
/// error the CLI treats as fatal before any probing starts.
pub fn read_targets(path: &Path) -> Result<Vec<String>> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("reading input file {}", path.display()))?;
    let value: serde_json::Value = serde_json::from_str(&data)
        .with_context(|| format!("parsing input file {}", path.display()))?;
    let serde_json::Value::Array(items) = value else {
        bail!(
            "input file {} must contain a JSON array of strings",
            path.display()
        );
    };

    let mut targets = Vec::with_capacity(items.len());
    for item in items {
        let serde_json::Value::String(s) = item else {
            bail!(
                "input file {} must contain only strings, found {}",
                path.display(),
                item
            );
        };
        let s = s.trim();
        if !s.is_empty() {
            targets.push(s.to_string());
        }
    }
    Ok(targets)
}

/// Writes a URL list as pretty-printed JSON. Non-Latin characters pass
/// through verbatim (serde_json never forces ASCII escapes). The list is
/// written to a sibling temp file and renamed into place so a failed run
/// never leaves a truncated file behind.
pub fn write_url_list(path: &Path, urls: &[String]) -> Result<()> {
    let mut json = serde_json::to_string_pretty(urls).context("serializing url list")?;
    json.push('\n');

    let tmp = path.with_extension("tmp");
    fs::write(&tmp, json.as_bytes())
        .with_context(|| format!("writing output file {}", tmp.display()))?;
    fs::rename(&tmp, path)
        .with_context(|| format!("moving {} to {}", tmp.display(), path.display()))?;
    Ok(())
}
