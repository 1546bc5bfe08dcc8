//! Handing a rendered report to the outside world: as a file on disk or as an
//! inline `data:` URI for a browser. Both carry the same bytes.

use std::fs;
use std::io;
use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::{DateTime, Local};

pub const FILE_PREFIX: &str = "lista_compras_";
pub const MIME_TYPE: &str = "application/pdf";

/// `lista_compras_YYYYMMDD_HHMMSS.pdf`
pub fn export_file_name(now: DateTime<Local>) -> String {
    format!("{FILE_PREFIX}{}.pdf", now.format("%Y%m%d_%H%M%S"))
}

/// Write `bytes` to `path`, creating missing parent directories.
pub fn save_to_path(bytes: &[u8], path: &Path) -> io::Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    fs::write(path, bytes)?;
    log::info!("Saved report ({} bytes) to {}", bytes.len(), path.display());
    Ok(())
}

/// `data:application/pdf;base64,...`
pub fn data_uri(bytes: &[u8]) -> String {
    format!("data:{MIME_TYPE};base64,{}", STANDARD.encode(bytes))
}

/// `file://` URL for a saved report, suitable for the platform opener.
pub fn file_url(path: &Path) -> String {
    let absolute = path
        .canonicalize()
        .unwrap_or_else(|_| path.to_path_buf());
    format!("file://{}", absolute.display())
}
