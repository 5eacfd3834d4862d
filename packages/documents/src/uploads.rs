// ABOUTME: On-disk storage for uploaded document bytes
// ABOUTME: Timestamped file naming, writes under the upload directory, best-effort removal

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

/// `{YYYYmmddHHMMSS}_{name}` with spaces replaced by underscores.
pub fn upload_file_name(original: &str, now: DateTime<Utc>) -> String {
    let base = Path::new(original)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| original.to_string());

    format!("{}_{}", now.format("%Y%m%d%H%M%S"), base.replace(' ', "_"))
}

/// Write bytes under `dir`, creating it when missing. Returns the full path.
pub async fn save_upload(dir: &Path, file_name: &str, bytes: &[u8]) -> std::io::Result<PathBuf> {
    tokio::fs::create_dir_all(dir).await?;

    let path = dir.join(file_name);
    tokio::fs::write(&path, bytes).await?;

    debug!("Saved upload to {}", path.display());
    Ok(path)
}

/// Remove a stored upload. Failures are logged and swallowed.
pub async fn remove_upload(path: &str) {
    match tokio::fs::remove_file(path).await {
        Ok(()) => debug!("Removed upload {}", path),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!("Upload {} already gone", path)
        }
        Err(e) => warn!("Failed to remove upload {}: {}", path, e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_upload_file_name_format() {
        let now = Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();

        assert_eq!(
            upload_file_name("Annual Report 2024.pdf", now),
            "20240309140507_Annual_Report_2024.pdf"
        );
        // Path components in client-supplied names are dropped.
        assert_eq!(
            upload_file_name("../../etc/passwd.pdf", now),
            "20240309140507_passwd.pdf"
        );
    }

    #[tokio::test]
    async fn test_save_then_remove() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("uploads");

        let path = save_upload(&nested, "a.pdf", b"%PDF").await.unwrap();
        assert_eq!(tokio::fs::read(&path).await.unwrap(), b"%PDF");

        let path_str = path.to_string_lossy().into_owned();
        remove_upload(&path_str).await;
        assert!(!path.exists());

        // Second removal is a no-op.
        remove_upload(&path_str).await;
    }
}
