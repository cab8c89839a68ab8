use std::time::Duration;

use async_trait::async_trait;
use quiz_core::model::wire::decode_quiz_set;
use quiz_core::model::{QuestionPayload, QuizSet};
use reqwest::{Client, Url};

use super::QuestionSource;
use crate::error::SourceError;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Fetches the question set from an HTTP endpoint returning a JSON array of questions.
#[derive(Debug, Clone)]
pub struct RemoteSource {
    client: Client,
    url: Url,
}

impl RemoteSource {
    /// # Errors
    ///
    /// Returns `SourceError::InvalidUrl` for an unparsable URL and `SourceError::Http` if the
    /// HTTP client cannot be built.
    pub fn new(url: &str) -> Result<Self, SourceError> {
        Self::with_timeout(url, DEFAULT_TIMEOUT)
    }

    /// # Errors
    ///
    /// Same as [`RemoteSource::new`].
    pub fn with_timeout(url: &str, timeout: Duration) -> Result<Self, SourceError> {
        let url = Url::parse(url).map_err(|e| SourceError::InvalidUrl(format!("{url}: {e}")))?;
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, url })
    }

    #[must_use]
    pub fn url(&self) -> &Url {
        &self.url
    }
}

#[async_trait]
impl QuestionSource for RemoteSource {
    async fn load(&self) -> Result<QuizSet, SourceError> {
        let response = self.client.get(self.url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::HttpStatus(status));
        }

        let body = response.bytes().await?;
        let payloads: Vec<QuestionPayload> = serde_json::from_slice(&body)?;
        Ok(decode_quiz_set(payloads)?)
    }

    fn describe(&self) -> String {
        format!("remote ({})", self.url)
    }
}
