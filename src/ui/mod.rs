pub mod charts;
pub mod dashboard;
pub mod panels;

use std::path::PathBuf;

/// A user request raised while drawing, dispatched by the app after the frame
/// is laid out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    SelectFile(PathBuf),
    Upload,
    Reset,
    DownloadPdf,
    RefreshHistory,
    OpenDataset(u64),
    CheckHealth,
    DismissNotice,
}
