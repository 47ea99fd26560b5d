//! Decoding the base64 payload and writing it to disk

use crate::error::{Error, Result};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use std::path::Path;

/// Decode a base64 payload
///
/// ASCII whitespace (line wrapping) is ignored. Anything else outside the
/// standard alphabet, or bad padding, yields [`Error::Decode`].
pub fn decode_payload(payload: &str) -> Result<Vec<u8>> {
    let compact: String = payload
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    Ok(STANDARD.decode(compact)?)
}

/// Decode `payload` and write the bytes to `path`
///
/// Any existing file is overwritten. Nothing is written if decoding fails.
/// Returns the number of bytes written.
///
/// # Examples
///
/// ```no_run
/// use danfe_fetch::output::write_document;
///
/// # async fn example() -> danfe_fetch::Result<()> {
/// let written = write_document("JVBERi0xLjQK", "danfe.pdf".as_ref()).await?;
/// assert_eq!(written, 9);
/// # Ok(())
/// # }
/// ```
pub async fn write_document(payload: &str, path: &Path) -> Result<u64> {
    let bytes = decode_payload(payload)?;

    tokio::fs::write(path, &bytes).await.map_err(|source| Error::Output {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::info!(path = %path.display(), bytes = bytes.len(), "document saved");
    Ok(bytes.len() as u64)
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[tokio::test]
    async fn round_trip_preserves_arbitrary_bytes() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("doc.pdf");
        let original: Vec<u8> = (0..=255u8).cycle().take(1000).collect();

        let written = write_document(&STANDARD.encode(&original), &path)
            .await
            .unwrap();

        assert_eq!(written, 1000);
        assert_eq!(fs::read(&path).unwrap(), original);
    }

    #[tokio::test]
    async fn empty_payload_writes_empty_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("empty.pdf");

        assert_eq!(write_document("", &path).await.unwrap(), 0);
        assert!(fs::read(&path).unwrap().is_empty());
    }

    #[tokio::test]
    async fn existing_file_is_overwritten() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("doc.pdf");
        fs::write(&path, b"a much longer previous content").unwrap();

        write_document(&STANDARD.encode(b"%PDF"), &path)
            .await
            .unwrap();

        assert_eq!(fs::read(&path).unwrap(), b"%PDF");
    }

    #[test]
    fn line_wrapped_payload_is_accepted() {
        let encoded = STANDARD.encode(b"%PDF-1.4 wrapped payload");
        let (head, tail) = encoded.split_at(12);
        let wrapped = format!("{head}\r\n{tail}\n");

        assert_eq!(decode_payload(&wrapped).unwrap(), b"%PDF-1.4 wrapped payload");
    }

    #[tokio::test]
    async fn invalid_alphabet_is_a_decode_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("doc.pdf");

        let result = write_document("JVBERi0*xLjQK", &path).await;

        assert!(matches!(result, Err(Error::Decode(_))));
        assert!(!path.exists(), "nothing should be written on decode failure");
    }

    #[test]
    fn wrong_padding_is_a_decode_error() {
        assert!(matches!(decode_payload("QUJD="), Err(Error::Decode(_))));
        assert!(matches!(decode_payload("QQ"), Err(Error::Decode(_))));
    }

    #[tokio::test]
    async fn missing_parent_directory_is_an_output_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("no/such/dir/doc.pdf");

        match write_document("QUJD", &path).await {
            Err(Error::Output { path: p, source }) => {
                assert_eq!(p, path);
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("Expected Output error, got {other:?}"),
        }
    }

    #[tokio::test(flavor = "current_thread")]
    async fn write_runs_on_single_threaded_runtime() {
        let temp_dir = TempDir::new().unwrap();
        let first = temp_dir.path().join("first.pdf");
        let second = temp_dir.path().join("second.pdf");

        let (a, b) = tokio::join!(
            write_document("QUFB", &first),
            write_document("QkJC", &second)
        );

        assert_eq!(a.unwrap(), 3);
        assert_eq!(b.unwrap(), 3);
        assert_eq!(fs::read(&first).unwrap(), b"AAA");
        assert_eq!(fs::read(&second).unwrap(), b"BBB");
    }
}
