pub mod error;
pub mod types;

pub use error::{PredictError, PredictResult};
pub use types::{PredictionRequest, PredictionResponse, SubmissionState};

use async_trait::async_trait;
use std::sync::Arc;

/// Seam between the session state machine and the prediction transport.
/// The production implementation is an HTTP client; tests substitute a
/// canned estimator.
#[async_trait]
pub trait CalorieEstimator: Send + Sync {
    /// Obtain a calorie estimate for one set of metrics. Returns the raw
    /// (unrounded) value from the service.
    async fn estimate(&self, request: &PredictionRequest) -> PredictResult<f64>;
}

#[async_trait]
impl<E: CalorieEstimator + ?Sized> CalorieEstimator for Arc<E> {
    async fn estimate(&self, request: &PredictionRequest) -> PredictResult<f64> {
        (**self).estimate(request).await
    }
}
