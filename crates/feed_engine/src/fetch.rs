use std::time::Duration;

use feed_logging::{feed_info, feed_warn};
use futures_util::StreamExt;
use reqwest::header::CONTENT_TYPE;
use serde_json::Value;
use swipe_core::JobListing;
use url::Url;

use crate::decode::decode_records;
use crate::{DecodeReport, FailureKind, FetchError, FetchedJobs};

pub const DEFAULT_API_URL: &str = "http://localhost:8096";

const JOBS_PATH: &str = "api/jobs";
const SYNC_PATH: &str = "api/jobs/fetch-external";

#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_bytes: u64,
    pub allowed_content_types: Vec<String>,
    /// Ask the backend to pull fresh jobs from its upstream before listing.
    pub sync_before_fetch: bool,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            max_bytes: 5 * 1024 * 1024,
            allowed_content_types: vec!["application/json".to_string()],
            sync_before_fetch: false,
        }
    }
}

#[async_trait::async_trait]
pub trait JobSource: Send + Sync {
    async fn fetch_jobs(&self) -> Result<FetchedJobs, FetchError>;
}

/// Serves a fixed list of listings; used for demos and tests.
#[derive(Debug, Clone, Default)]
pub struct StaticJobSource {
    listings: Vec<JobListing>,
}

impl StaticJobSource {
    pub fn new(listings: Vec<JobListing>) -> Self {
        Self { listings }
    }
}

#[async_trait::async_trait]
impl JobSource for StaticJobSource {
    async fn fetch_jobs(&self) -> Result<FetchedJobs, FetchError> {
        Ok(FetchedJobs {
            listings: self.listings.clone(),
            report: DecodeReport {
                records: self.listings.len(),
                ..DecodeReport::default()
            },
        })
    }
}

#[derive(Debug, Clone)]
pub struct ReqwestJobSource {
    settings: FetchSettings,
}

impl ReqwestJobSource {
    pub fn new(settings: FetchSettings) -> Self {
        Self { settings }
    }

    fn build_client(&self) -> Result<reqwest::Client, FetchError> {
        reqwest::Client::builder()
            .connect_timeout(self.settings.connect_timeout)
            .timeout(self.settings.request_timeout)
            .build()
            .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))
    }

    fn endpoint(&self, path: &str) -> Result<Url, FetchError> {
        let mut base = Url::parse(&self.settings.base_url)
            .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))?;
        if !base.path().ends_with('/') {
            let with_slash = format!("{}/", base.path());
            base.set_path(&with_slash);
        }
        base.join(path)
            .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))
    }

    fn is_content_type_allowed(&self, content_type: &str) -> bool {
        let ct = content_type.split(';').next().unwrap_or(content_type).trim();
        self.settings
            .allowed_content_types
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(ct))
    }

    /// Best-effort upstream sync. Failures are logged, never returned: the
    /// listing endpoint still serves whatever the backend already has.
    async fn sync_upstream(&self, client: &reqwest::Client) {
        let url = match self.endpoint(SYNC_PATH) {
            Ok(url) => url,
            Err(err) => {
                feed_warn!("Skipping upstream sync: {}", err);
                return;
            }
        };
        match client.get(url).send().await {
            Ok(response) if response.status().is_success() => {
                feed_info!("Upstream sync finished with {}", response.status());
            }
            Ok(response) => {
                feed_warn!("Upstream sync returned {}", response.status());
            }
            Err(err) => {
                feed_warn!("Upstream sync failed: {}", map_reqwest_error(err));
            }
        }
    }

    async fn read_body(&self, response: reqwest::Response) -> Result<Vec<u8>, FetchError> {
        let max_bytes = self.settings.max_bytes;
        if let Some(content_len) = response.content_length() {
            if content_len > max_bytes {
                return Err(FetchError::new(
                    FailureKind::TooLarge {
                        max_bytes,
                        actual: Some(content_len),
                    },
                    "response too large",
                ));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > max_bytes {
                return Err(FetchError::new(
                    FailureKind::TooLarge {
                        max_bytes,
                        actual: Some(next_len),
                    },
                    "response too large",
                ));
            }
            bytes.extend_from_slice(&chunk);
        }
        Ok(bytes)
    }
}

#[async_trait::async_trait]
impl JobSource for ReqwestJobSource {
    async fn fetch_jobs(&self) -> Result<FetchedJobs, FetchError> {
        let url = self.endpoint(JOBS_PATH)?;
        let client = self.build_client()?;

        if self.settings.sync_before_fetch {
            self.sync_upstream(&client).await;
        }

        let response = client.get(url).send().await.map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_string());
        if let Some(ct) = content_type.as_deref() {
            if !self.is_content_type_allowed(ct) {
                return Err(FetchError::new(
                    FailureKind::UnsupportedContentType {
                        content_type: ct.to_string(),
                    },
                    "unsupported content type",
                ));
            }
        }

        let bytes = self.read_body(response).await?;
        let records = match serde_json::from_slice::<Value>(&bytes) {
            Ok(Value::Array(records)) => records,
            Ok(_) => {
                return Err(FetchError::new(
                    FailureKind::Decode,
                    "expected a JSON array of jobs",
                ))
            }
            Err(err) => return Err(FetchError::new(FailureKind::Decode, err.to_string())),
        };

        if records.is_empty() {
            feed_warn!("Job source returned no jobs");
        }
        let fetched = decode_records(records);
        feed_info!(
            "Fetched {} jobs ({} skipped, {} field fallbacks)",
            fetched.listings.len(),
            fetched.report.skipped,
            fetched.report.fallbacks.len()
        );
        Ok(fetched)
    }
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        return FetchError::new(FailureKind::Timeout, err.to_string());
    }
    FetchError::new(FailureKind::Network, err.to_string())
}
