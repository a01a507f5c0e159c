//! Shared staging helpers for the concrete transfer clients.

use reqwest::Client;
use std::path::Path;
use tracing::debug;

use crate::filespec::{FileSpec, StatusCode};

use super::types::TransferError;

/// Replica source URL for a scope/lfn pair under a storage endpoint.
pub(crate) fn resolve_replica_url(endpoint: &str, scope: &str, lfn: &str) -> String {
    format!("{}/{}/{}", endpoint.trim_end_matches('/'), scope, lfn)
}

/// Whether this descriptor is eligible for direct remote access: the job
/// reads the turl in place and nothing is copied into the workdir.
pub(crate) fn direct_access_eligible(file: &FileSpec) -> bool {
    file.accessmode == "direct"
        && (file.direct_access_lan.is_true() || file.direct_access_wan.is_true())
}

/// Fetch replica bytes from a `file://` or http(s) source.
pub(crate) async fn fetch_bytes(
    http: &Client,
    lfn: &str,
    source: &str,
) -> Result<Vec<u8>, TransferError> {
    let fetch_err = |reason: String| TransferError::FetchFailed {
        lfn: lfn.to_string(),
        reason,
    };

    if let Some(path) = source.strip_prefix("file://") {
        tokio::fs::read(path)
            .await
            .map_err(|e| fetch_err(e.to_string()))
    } else {
        let response = http
            .get(source)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| fetch_err(e.to_string()))?;
        let bytes = response
            .bytes()
            .await
            .map_err(|e| fetch_err(e.to_string()))?;
        Ok(bytes.to_vec())
    }
}

/// Verify declared size and checksum. Only the md5 family is verifiable here;
/// other digest families are skipped.
pub(crate) fn verify(file: &FileSpec, bytes: &[u8]) -> Result<(), TransferError> {
    if let Some(expected) = file.filesize {
        let actual = bytes.len() as u64;
        if actual != expected {
            return Err(TransferError::SizeMismatch {
                lfn: file.lfn.clone(),
                expected,
                actual,
            });
        }
    }

    if let Some(expected) = file.checksum.strip_prefix("md5:") {
        let actual = format!("{:x}", md5::compute(bytes));
        if actual != expected {
            return Err(TransferError::ChecksumMismatch {
                lfn: file.lfn.clone(),
                expected: file.checksum.clone(),
                actual: format!("md5:{}", actual),
            });
        }
    } else if !file.checksum.is_empty() {
        debug!(
            "unsupported checksum family for {}: {:?}, skipping verification",
            file.lfn, file.checksum
        );
    }

    Ok(())
}

/// Stage one replica into the workdir and mark its outcome on success.
pub(crate) async fn stage_one(
    http: &Client,
    file: &mut FileSpec,
    source: &str,
    workdir: &Path,
) -> Result<(), TransferError> {
    let bytes = fetch_bytes(http, &file.lfn, source).await?;
    verify(file, &bytes)?;

    let dest = workdir.join(&file.lfn);
    tokio::fs::write(&dest, &bytes)
        .await
        .map_err(|e| TransferError::WriteFailed {
            path: dest.clone(),
            reason: e.to_string(),
        })?;

    file.status = Some("done".to_string());
    file.status_code = Some(StatusCode::Int(0));
    file.turl = Some(source.to_string());
    Ok(())
}

/// Record a per-file failure on the descriptor; the batch keeps going.
pub(crate) fn mark_failed(file: &mut FileSpec, source: &str, err: &TransferError) {
    file.status = Some("failed".to_string());
    file.status_code = Some(StatusCode::Int(err.code()));
    file.turl = Some(source.to_string());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filespec::{FileType, FlagValue};
    use std::path::PathBuf;

    fn spec(lfn: &str) -> FileSpec {
        FileSpec {
            filetype: FileType::Input,
            scope: "mc16".to_string(),
            lfn: lfn.to_string(),
            guid: "g1".to_string(),
            filesize: None,
            checksum: String::new(),
            allow_lan: FlagValue::True,
            allow_wan: FlagValue::False,
            direct_access_lan: FlagValue::Null,
            direct_access_wan: FlagValue::Null,
            is_tar: FlagValue::False,
            accessmode: String::new(),
            storage_token: String::new(),
            workdir: PathBuf::from("/work"),
            status: None,
            status_code: None,
            turl: None,
        }
    }

    #[test]
    fn test_resolve_replica_url_trims_trailing_slash() {
        assert_eq!(
            resolve_replica_url("file:///data/", "mc16", "f1"),
            "file:///data/mc16/f1"
        );
        assert_eq!(
            resolve_replica_url("http://se.example.org/atlas", "mc16", "f1"),
            "http://se.example.org/atlas/mc16/f1"
        );
    }

    #[test]
    fn test_direct_access_needs_mode_and_flag() {
        let mut file = spec("f1");
        assert!(!direct_access_eligible(&file));

        file.accessmode = "direct".to_string();
        assert!(!direct_access_eligible(&file));

        file.direct_access_lan = FlagValue::True;
        assert!(direct_access_eligible(&file));

        file.direct_access_lan = FlagValue::Raw("weird".to_string());
        file.direct_access_wan = FlagValue::True;
        assert!(direct_access_eligible(&file));
    }

    #[test]
    fn test_verify_size_mismatch() {
        let mut file = spec("f1");
        file.filesize = Some(4);
        let err = verify(&file, b"hello").unwrap_err();
        assert!(matches!(
            err,
            TransferError::SizeMismatch {
                expected: 4,
                actual: 5,
                ..
            }
        ));
    }

    #[test]
    fn test_verify_md5() {
        let mut file = spec("f1");
        file.checksum = "md5:5d41402abc4b2a76b9719d911017c592".to_string();
        assert!(verify(&file, b"hello").is_ok());

        file.checksum = "md5:00000000000000000000000000000000".to_string();
        assert!(matches!(
            verify(&file, b"hello"),
            Err(TransferError::ChecksumMismatch { .. })
        ));
    }

    #[test]
    fn test_verify_unknown_family_skipped() {
        let mut file = spec("f1");
        file.checksum = "ad:3a8b0321".to_string();
        assert!(verify(&file, b"hello").is_ok());
    }
}
