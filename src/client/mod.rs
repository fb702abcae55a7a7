use async_trait::async_trait;
use tracing::debug;
use url::Url;

use crate::core::error::{PredictError, PredictResult};
use crate::core::types::{PredictionRequest, PredictionResponse};
use crate::core::CalorieEstimator;

/// HTTP implementation of [`CalorieEstimator`]: posts the request body as
/// JSON to `{base_url}/predict` and reads back `{"calories": number}`.
///
/// No client-side timeout is configured; failures surface only through the
/// transport's own error signaling.
#[derive(Debug)]
pub struct HttpPredictionClient {
    http: reqwest::Client,
    base_url: Url,
}

impl HttpPredictionClient {
    pub fn new(base_url: &str) -> PredictResult<Self> {
        let base_url = Url::parse(base_url).map_err(|err| {
            PredictError::Config(format!("invalid base URL '{base_url}': {err}"))
        })?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(PredictError::Config(format!(
                "unsupported URL scheme '{}'",
                base_url.scheme()
            )));
        }

        Ok(Self {
            http: reqwest::Client::new(),
            base_url,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn predict_url(&self) -> String {
        format!("{}/predict", self.base_url.as_str().trim_end_matches('/'))
    }
}

#[async_trait]
impl CalorieEstimator for HttpPredictionClient {
    async fn estimate(&self, request: &PredictionRequest) -> PredictResult<f64> {
        let url = self.predict_url();
        debug!(%url, "posting prediction request");

        let response = self
            .http
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|err| PredictError::Network(format!("backend unreachable: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(PredictError::Server(format!(
                "prediction service returned status {status}"
            )));
        }

        let body: PredictionResponse = response
            .json()
            .await
            .map_err(|err| PredictError::Server(format!("unexpected response body: {err}")))?;

        Ok(body.calories)
    }
}
