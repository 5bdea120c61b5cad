//! `m3uprobe gen` – expand a URL template over a numeric range into an
//! input list for `check`.

use anyhow::{ensure, Result};
use m3uprobe_core::targets;
use std::path::Path;

pub fn run_gen(template: &str, start: u64, end: u64, output: &Path) -> Result<()> {
    ensure!(
        template.contains("{}"),
        "template must contain a {{}} placeholder"
    );
    ensure!(start <= end, "start ({start}) must not be greater than end ({end})");

    println!("Generating {} URLs...", end - start + 1);
    let urls: Vec<String> = (start..=end)
        .map(|n| template.replacen("{}", &n.to_string(), 1))
        .collect();

    targets::write_url_list(output, &urls)?;

    // Range is non-empty by the checks above.
    println!("First URL: {}", urls[0]);
    println!("Last URL:  {}", urls[urls.len() - 1]);
    println!("Total items: {}", urls.len());
    println!("Saved to: {}", output.display());
    Ok(())
}
