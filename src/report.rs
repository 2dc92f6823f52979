use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

// ---------------------------------------------------------------------------
// Saving PDF reports
// ---------------------------------------------------------------------------

/// Default file name offered for a dataset's report.
pub fn report_file_name(dataset_id: u64) -> String {
    format!("report_{dataset_id}.pdf")
}

/// Ask the user where to save the report. `None` if the dialog was cancelled.
pub fn choose_destination(dataset_id: u64) -> Option<PathBuf> {
    rfd::FileDialog::new()
        .set_title("Save PDF report")
        .set_file_name(report_file_name(dataset_id))
        .add_filter("PDF Files", &["pdf"])
        .save_file()
}

/// Write the report bytes, replacing any existing file.
pub fn save_report(path: &Path, bytes: &[u8]) -> Result<()> {
    std::fs::write(path, bytes).with_context(|| format!("writing {}", path.display()))?;
    log::info!("Saved report to {} ({} bytes)", path.display(), bytes.len());
    Ok(())
}
