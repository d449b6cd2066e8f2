use anyhow::{Context, Result};
use serde_json::Value;
use tracing::info;

use super::LoadedData;
use crate::model::record::RecordSet;

/// Fetch a record set from an HTTP endpoint returning a JSON array.
///
/// Query parameters go through reqwest's structured encoder; callers never
/// concatenate query strings by hand. Non-2xx responses are errors, and
/// there is no retry.
pub async fn load_url(url: &str, params: &[(String, String)]) -> Result<LoadedData> {
    let client = reqwest::Client::new();
    let response = client
        .get(url)
        .query(params)
        .send()
        .await
        .with_context(|| format!("request to {} failed", url))?
        .error_for_status()
        .with_context(|| format!("{} returned an error status", url))?;

    let bytes = response
        .bytes()
        .await
        .with_context(|| format!("failed to read response from {}", url))?;

    let value: Value = serde_json::from_slice(&bytes)
        .with_context(|| format!("{} did not return valid JSON", url))?;
    let records = RecordSet::from_json(value)?;

    info!(url, rows = records.len(), bytes = bytes.len(), "fetched records");
    Ok(LoadedData {
        records,
        source_bytes: bytes.len() as u64,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unreachable_host_errors() {
        let result = load_url("http://127.0.0.1:1/records", &[]).await;
        assert!(result.is_err(), "expected error for unreachable endpoint");
    }

    #[tokio::test]
    async fn invalid_url_errors() {
        let result = load_url("not a url", &[]).await;
        assert!(result.is_err());
    }
}
