use anyhow::{Context, Result};
use serde_json::Value;
use tracing::info;

use super::LoadedData;
use crate::model::record::RecordSet;

/// Load a record set from a JSON file containing an array of objects.
pub async fn load_file(path: &str) -> Result<LoadedData> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("failed to read {}", path))?;

    let value: Value = serde_json::from_slice(&bytes)
        .with_context(|| format!("{} is not valid JSON", path))?;
    let records = RecordSet::from_json(value)?;

    info!(path, rows = records.len(), bytes = bytes.len(), "loaded file");
    Ok(LoadedData {
        records,
        source_bytes: bytes.len() as u64,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_file(name: &str, contents: &str) -> String {
        let path = std::env::temp_dir().join(name);
        std::fs::write(&path, contents).unwrap();
        path.to_string_lossy().to_string()
    }

    #[tokio::test]
    async fn loads_a_record_array() {
        let path = temp_file(
            "gridder_file_loader_ok.json",
            r#"[{"name": "a", "age": 1}, {"name": "b", "age": 2}]"#,
        );
        let loaded = load_file(&path).await.unwrap();
        assert_eq!(loaded.records.columns, vec!["name", "age"]);
        assert_eq!(loaded.records.len(), 2);
        assert!(loaded.source_bytes > 0);
    }

    #[tokio::test]
    async fn nonexistent_path_errors() {
        let result = load_file("/nonexistent/records.json").await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn invalid_json_errors() {
        let path = temp_file("gridder_file_loader_bad.json", "not json at all");
        let err = load_file(&path).await.unwrap_err();
        assert!(err.to_string().contains("not valid JSON"));
    }

    #[tokio::test]
    async fn empty_array_errors() {
        let path = temp_file("gridder_file_loader_empty.json", "[]");
        assert!(load_file(&path).await.is_err());
    }
}
