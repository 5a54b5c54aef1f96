//! Input resolution: turn a user-supplied path or URL into PDF bytes.
//!
//! pdfium opens documents straight from a byte slice, so both sources end up
//! as an owned buffer plus a display name. Whether the buffer really is a PDF
//! is decided later by the decoder, which owns that error kind.

use crate::error::Pdf2MdError;
use std::path::Path;
use tracing::{debug, info};

/// Bytes of a resolved input and the name to report it under.
#[derive(Debug)]
pub struct ResolvedInput {
    pub bytes: Vec<u8>,
    pub filename: Option<String>,
}

/// Check if the input string looks like a URL.
pub fn is_url(input: &str) -> bool {
    input.starts_with("http://") || input.starts_with("https://")
}

/// Resolve the input string to PDF bytes, downloading URLs.
pub async fn resolve_input(input: &str, timeout_secs: u64) -> Result<ResolvedInput, Pdf2MdError> {
    if input.trim().is_empty() {
        return Err(Pdf2MdError::InvalidInput {
            input: input.to_string(),
        });
    }
    if is_url(input) {
        download_url(input, timeout_secs).await
    } else {
        read_local(Path::new(input)).await
    }
}

async fn read_local(path: &Path) -> Result<ResolvedInput, Pdf2MdError> {
    let bytes = tokio::fs::read(path).await.map_err(|e| match e.kind() {
        std::io::ErrorKind::PermissionDenied => Pdf2MdError::PermissionDenied {
            path: path.to_path_buf(),
        },
        _ => Pdf2MdError::FileNotFound {
            path: path.to_path_buf(),
        },
    })?;

    debug!("Read local PDF: {} ({} bytes)", path.display(), bytes.len());
    Ok(ResolvedInput {
        bytes,
        filename: file_name_of(path),
    })
}

async fn download_url(url: &str, timeout_secs: u64) -> Result<ResolvedInput, Pdf2MdError> {
    info!("Downloading PDF from: {}", url);

    let client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(timeout_secs))
        .build()
        .map_err(|e| Pdf2MdError::DownloadFailed {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

    let response = client.get(url).send().await.map_err(|e| {
        if e.is_timeout() {
            Pdf2MdError::DownloadTimeout {
                url: url.to_string(),
                secs: timeout_secs,
            }
        } else {
            Pdf2MdError::DownloadFailed {
                url: url.to_string(),
                reason: e.to_string(),
            }
        }
    })?;

    if !response.status().is_success() {
        return Err(Pdf2MdError::DownloadFailed {
            url: url.to_string(),
            reason: format!("HTTP {}", response.status()),
        });
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|e| Pdf2MdError::DownloadFailed {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

    info!("Downloaded {} bytes", bytes.len());
    Ok(ResolvedInput {
        bytes: bytes.to_vec(),
        filename: Some(filename_from_url(url)),
    })
}

fn file_name_of(path: &Path) -> Option<String> {
    path.file_name().map(|n| n.to_string_lossy().into_owned())
}

/// Last non-empty URL path segment that looks like a file name.
pub fn filename_from_url(url: &str) -> String {
    if let Ok(parsed) = reqwest::Url::parse(url) {
        if let Some(mut segments) = parsed.path_segments() {
            if let Some(last) = segments.next_back() {
                if !last.is_empty() && last.contains('.') {
                    return last.to_string();
                }
            }
        }
    }

    "downloaded.pdf".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_is_url() {
        assert!(is_url("https://example.com/doc.pdf"));
        assert!(is_url("http://example.com/doc.pdf"));
        assert!(!is_url("/tmp/doc.pdf"));
        assert!(!is_url("doc.pdf"));
        assert!(!is_url(""));
    }

    #[test]
    fn filename_from_url_uses_last_segment() {
        assert_eq!(
            filename_from_url("https://example.com/papers/attention.pdf"),
            "attention.pdf"
        );
        assert_eq!(
            filename_from_url("https://arxiv.org/pdf/1706"),
            "downloaded.pdf"
        );
    }

    #[tokio::test]
    async fn missing_file_is_reported() {
        let err = resolve_input("/definitely/not/here.pdf", 5)
            .await
            .unwrap_err();
        assert!(matches!(err, Pdf2MdError::FileNotFound { .. }), "got {err:?}");
    }

    #[tokio::test]
    async fn blank_input_is_invalid() {
        let err = resolve_input("   ", 5).await.unwrap_err();
        assert!(matches!(err, Pdf2MdError::InvalidInput { .. }));
    }

    #[tokio::test]
    async fn local_file_bytes_and_name() {
        let mut tmp = tempfile::Builder::new().suffix(".pdf").tempfile().unwrap();
        tmp.write_all(b"%PDF-1.4\n").unwrap();
        let path = tmp.path().to_string_lossy().to_string();

        let resolved = resolve_input(&path, 5).await.unwrap();
        assert_eq!(resolved.bytes, b"%PDF-1.4\n");
        assert!(resolved.filename.unwrap().ends_with(".pdf"));
    }
}
