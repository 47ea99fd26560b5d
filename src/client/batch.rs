//! Concurrent rendering of many document keys.

use crate::error::Error;
use crate::types::BatchItem;
use futures::StreamExt;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use super::DanfeClient;

/// Number of keys fetched at once when no limit is given
pub const DEFAULT_BATCH_CONCURRENCY: usize = 4;

/// Output file name for a key in batch mode: `danfe_{key}.pdf`
///
/// Characters other than ASCII alphanumerics, `-` and `_` are replaced with
/// `_` so a key can never escape the output directory.
pub fn batch_file_name(document_key: &str) -> String {
    let safe: String = document_key
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!("danfe_{}.pdf", safe)
}

impl DanfeClient {
    /// Fetch many keys, writing each to `out_dir/danfe_{key}.pdf`
    ///
    /// Each key runs as an independent [`DanfeClient::fetch_by_key`] call, at
    /// most `concurrency` at a time. Results arrive in completion order, and a
    /// failure for one key never affects the others.
    ///
    /// Two keys must never share an output file. When a key maps to a file
    /// already claimed by an earlier key (a repeated key, or keys that differ
    /// only in replaced characters such as `a.b` and `a_b`), the later key is
    /// not fetched and its item carries [`Error::InvalidKey`].
    pub async fn fetch_many<I, S>(
        &self,
        document_keys: I,
        out_dir: &Path,
        concurrency: usize,
    ) -> Vec<BatchItem>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let concurrency = concurrency.max(1);
        let jobs = claim_output_paths(document_keys.into_iter().map(Into::into), out_dir);

        let items: Vec<BatchItem> = futures::stream::iter(jobs)
            .map(|(key, path, conflict)| {
                async move {
                    let result = match conflict {
                        Some(err) => Err(err),
                        None => self.fetch_by_key(&key, &path).await,
                    };
                    if let Err(e) = &result {
                        tracing::warn!(key = %key, error = %e, "batch item failed");
                    }
                    BatchItem { key, path, result }
                }
            })
            .buffer_unordered(concurrency)
            .collect()
            .await;

        let saved = items
            .iter()
            .filter(|item| matches!(&item.result, Ok(outcome) if outcome.is_saved()))
            .count();
        tracing::info!(total = items.len(), saved, "batch finished");

        items
    }
}

/// Pair every key with its output path, flagging keys whose path is taken
fn claim_output_paths(
    keys: impl Iterator<Item = String>,
    out_dir: &Path,
) -> Vec<(String, PathBuf, Option<Error>)> {
    let mut claimed: HashMap<PathBuf, String> = HashMap::new();

    keys.map(|key| {
        let path = out_dir.join(batch_file_name(&key));
        let conflict = match claimed.get(&path) {
            Some(owner) => Some(Error::InvalidKey(format!(
                "key '{}' would overwrite {} already used by key '{}'",
                key,
                path.display(),
                owner
            ))),
            None => {
                claimed.insert(path.clone(), key.clone());
                None
            }
        };
        (key, path, conflict)
    })
    .collect()
}
