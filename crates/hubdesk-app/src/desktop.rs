//! OS integration: default browser and native file dialogs.

use std::path::PathBuf;
use std::process::Command;

/// Hand `target` to the OS opener (browser for URLs, viewer for files).
pub fn open_in_shell(target: &str) -> Result<(), String> {
    opener_command(target)
        .spawn()
        .map(|_| ())
        .map_err(|e| format!("failed to open {target}: {e}"))
}

fn opener_command(target: &str) -> Command {
    #[cfg(target_os = "macos")]
    let mut cmd = Command::new("open");

    #[cfg(target_os = "windows")]
    let mut cmd = Command::new("explorer");

    #[cfg(all(unix, not(target_os = "macos")))]
    let mut cmd = Command::new("xdg-open");

    cmd.arg(target);
    cmd
}

/// Modal "open file" dialog limited to PDFs. `None` when cancelled.
pub fn pick_pdf() -> Option<PathBuf> {
    rfd::FileDialog::new()
        .set_title("Open PDF")
        .add_filter("PDF", &["pdf"])
        .pick_file()
}
