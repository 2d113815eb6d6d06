use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tracing::debug;

// JSON scalar
pub type FilterValue = serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterValueQuery {
    pub data_source: String,
    pub field: String,
    pub search: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum ReportBuilderError {
    #[error("{message}")]
    Validation { message: String },
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

/// Owner of report metadata; resolves filter values for a data source field.
#[async_trait]
pub trait ReportBuilder: Send + Sync {
    async fn filter_values(
        &self,
        query: &FilterValueQuery,
    ) -> Result<Vec<FilterValue>, ReportBuilderError>;
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    error: Option<String>,
}

pub struct HttpReportBuilder {
    client: Client,
    base_url: Url,
    token: Option<String>,
    semaphore: Arc<Semaphore>,
    // Upper bound on waiting for a free outbound slot
    acquire_timeout: Duration,
}

impl HttpReportBuilder {
    pub fn new(
        client: Client,
        base_url: Url,
        token: Option<String>,
        max_outbound: usize,
        acquire_timeout: Duration,
    ) -> Self {
        HttpReportBuilder {
            client,
            base_url,
            token,
            semaphore: Arc::new(Semaphore::new(max_outbound)),
            acquire_timeout,
        }
    }

    fn values_url(&self, query: &FilterValueQuery) -> anyhow::Result<Url> {
        // `.` and `..` segments would be collapsed by the url crate
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| anyhow::anyhow!("report builder URL '{}' cannot be a base", self.base_url))?
            .pop_if_empty()
            .extend([
                "data-sources",
                query.data_source.as_str(),
                "fields",
                query.field.as_str(),
                "values",
            ]);
        if let Some(search) = &query.search {
            url.query_pairs_mut().append_pair("search", search);
        }
        Ok(url)
    }
}

#[async_trait]
impl ReportBuilder for HttpReportBuilder {
    async fn filter_values(
        &self,
        query: &FilterValueQuery,
    ) -> Result<Vec<FilterValue>, ReportBuilderError> {
        for (name, value) in [("data source", &query.data_source), ("field", &query.field)] {
            if value == "." || value == ".." {
                return Err(ReportBuilderError::Validation {
                    message: format!("invalid {} '{}'", name, value),
                });
            }
        }
        let url = self.values_url(query)?;

        let _permit = tokio::time::timeout(self.acquire_timeout, self.semaphore.acquire())
            .await
            .map_err(|_| {
                anyhow::anyhow!(
                    "no outbound slot for report builder within {:?}",
                    self.acquire_timeout
                )
            })?
            .map_err(|e| anyhow::anyhow!("outbound limiter closed: {}", e))?;

        debug!(%url, "Requesting filter values");
        let mut builder = self.client.get(url.clone());
        if let Some(t) = &self.token {
            builder = builder.header("Authorization", format!("Bearer {}", t));
        }
        let resp = builder
            .send()
            .await
            .map_err(|e| anyhow::anyhow!("report builder request to {} failed: {}", url, e))?;

        let status = resp.status();
        if status.is_success() {
            let values = resp
                .json::<Vec<FilterValue>>()
                .await
                .map_err(|e| anyhow::anyhow!("malformed filter values from {}: {}", url, e))?;
            if let Some(bad) = values.iter().find(|v| v.is_array() || v.is_object()) {
                return Err(anyhow::anyhow!("non-scalar filter value from {}: {}", url, bad).into());
            }
            debug!("Received {} filter value(s)", values.len());
            return Ok(values);
        }

        if status == StatusCode::BAD_REQUEST || status == StatusCode::UNPROCESSABLE_ENTITY {
            let body = resp.json::<ErrorBody>().await.ok();
            let message = body
                .and_then(|b| b.message.or(b.error))
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("invalid request").to_string());
            return Err(ReportBuilderError::Validation { message });
        }

        Err(anyhow::anyhow!("report builder at {} answered {}", url, status).into())
    }
}
