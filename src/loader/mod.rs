pub mod file_loader;
pub mod http_loader;

use anyhow::Result;

use crate::model::record::RecordSet;

/// Where the record set comes from. Exactly one load happens per run;
/// there are no refetches afterwards.
#[derive(Debug, Clone)]
pub enum DataSource {
    File(String),
    Url {
        url: String,
        params: Vec<(String, String)>,
    },
}

impl DataSource {
    /// Short label for the status bar.
    pub fn label(&self) -> &str {
        match self {
            DataSource::File(path) => path,
            DataSource::Url { url, .. } => url,
        }
    }
}

/// A decoded payload plus its raw size, shown in the status bar.
#[derive(Debug, Clone)]
pub struct LoadedData {
    pub records: RecordSet,
    pub source_bytes: u64,
}

pub async fn load(source: &DataSource) -> Result<LoadedData> {
    match source {
        DataSource::File(path) => file_loader::load_file(path).await,
        DataSource::Url { url, params } => http_loader::load_url(url, params).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_labels() {
        assert_eq!(DataSource::File("a.json".into()).label(), "a.json");
        let url = DataSource::Url {
            url: "http://x/records".into(),
            params: vec![("a".into(), "1".into())],
        };
        assert_eq!(url.label(), "http://x/records");
    }

    #[tokio::test]
    async fn load_dispatches_to_the_file_loader() {
        let result = load(&DataSource::File("/nonexistent/records.json".into())).await;
        assert!(result.is_err());
    }
}
