use tracing::{info, warn};

use crate::core::{CalorieEstimator, SubmissionState};
use crate::form::{FormValues, MetricField};

/// One user-facing prediction session: owns the form values, drives the
/// submission state machine, and talks to the estimator behind the
/// [`CalorieEstimator`] seam.
///
/// State machine: `Idle -> Loading -> {Error, Result}`; `Result -> Idle`
/// via [`reset`](Self::reset); `Error -> Loading` via a new
/// [`submit`](Self::submit). `Loading` is never a resting state.
pub struct PredictionSession<E> {
    form: FormValues,
    state: SubmissionState,
    estimator: E,
}

impl<E: CalorieEstimator> PredictionSession<E> {
    pub fn new(estimator: E) -> Self {
        Self {
            form: FormValues::new(),
            state: SubmissionState::Idle,
            estimator,
        }
    }

    pub fn form(&self) -> &FormValues {
        &self.form
    }

    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    /// Overwrite one form field with raw user input. Validation is
    /// deferred to [`submit`](Self::submit).
    pub fn update_field(&mut self, field: MetricField, raw: &str) {
        self.form.set(field, raw);
    }

    /// Validate the form and, if it passes, issue exactly one prediction
    /// request. Settles into `Result` or `Error`; a validation failure
    /// settles synchronously without any network activity.
    ///
    /// Calling this while a request is already in flight is a no-op, so at
    /// most one request is ever outstanding per session.
    pub async fn submit(&mut self) -> &SubmissionState {
        if self.state.is_loading() {
            return &self.state;
        }

        let request = match self.form.validate() {
            Ok(request) => request,
            Err(err) => {
                warn!("submission rejected: {err}");
                self.state = SubmissionState::Error(err.to_string());
                return &self.state;
            }
        };

        // Clears any prior error or result for the duration of the call.
        self.state = SubmissionState::Loading;
        info!("submitting prediction request");

        // Both arms assign, so the session always leaves Loading once the
        // call settles.
        self.state = match self.estimator.estimate(&request).await {
            Ok(calories) => {
                info!(calories, "prediction succeeded");
                SubmissionState::Result(calories.round() as i64)
            }
            Err(err) => {
                warn!("prediction failed: {err}");
                SubmissionState::Error(err.to_string())
            }
        };

        &self.state
    }

    /// Return to `Idle` with an empty form so the user can start over.
    /// Only meaningful after a successful prediction; from any other state
    /// this is a no-op.
    pub fn reset(&mut self) {
        if matches!(self.state, SubmissionState::Result(_)) {
            self.form.clear();
            self.state = SubmissionState::Idle;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::{PredictError, PredictResult};
    use crate::core::types::PredictionRequest;
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    enum Outcome {
        Calories(f64),
        ServerFailure,
        NetworkFailure,
    }

    struct MockEstimator {
        outcome: Outcome,
        calls: AtomicUsize,
        last_request: Mutex<Option<PredictionRequest>>,
    }

    impl MockEstimator {
        fn new(outcome: Outcome) -> Arc<Self> {
            Arc::new(Self {
                outcome,
                calls: AtomicUsize::new(0),
                last_request: Mutex::new(None),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl CalorieEstimator for MockEstimator {
        async fn estimate(&self, request: &PredictionRequest) -> PredictResult<f64> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_request.lock().unwrap() = Some(request.clone());
            match self.outcome {
                Outcome::Calories(value) => Ok(value),
                Outcome::ServerFailure => Err(PredictError::Server(
                    "prediction service returned status 500 Internal Server Error".into(),
                )),
                Outcome::NetworkFailure => {
                    Err(PredictError::Network("backend unreachable".into()))
                }
            }
        }
    }

    fn fill_valid(session: &mut PredictionSession<Arc<MockEstimator>>) {
        session.update_field(MetricField::Age, "25");
        session.update_field(MetricField::Weight, "70");
        session.update_field(MetricField::Duration, "30");
        session.update_field(MetricField::Steps, "4000");
        session.update_field(MetricField::HeartRate, "120");
        session.update_field(MetricField::Sleep, "7");
        session.update_field(MetricField::DailyCalories, "2200");
    }

    #[test]
    fn new_session_starts_idle() {
        let session = PredictionSession::new(MockEstimator::new(Outcome::Calories(1.0)));
        assert_eq!(*session.state(), SubmissionState::Idle);
    }

    #[tokio::test]
    async fn valid_submission_rounds_the_estimate() {
        let estimator = MockEstimator::new(Outcome::Calories(312.6));
        let mut session = PredictionSession::new(Arc::clone(&estimator));
        fill_valid(&mut session);

        session.submit().await;

        assert_eq!(*session.state(), SubmissionState::Result(313));
        assert_eq!(estimator.calls(), 1);
        let sent = estimator.last_request.lock().unwrap().clone().unwrap();
        assert_eq!(sent.steps, 4000.0);
        assert_eq!(sent.daily_calories, 2200.0);
    }

    #[tokio::test]
    async fn empty_field_fails_without_a_network_call() {
        let estimator = MockEstimator::new(Outcome::Calories(312.6));
        let mut session = PredictionSession::new(Arc::clone(&estimator));
        fill_valid(&mut session);
        session.update_field(MetricField::Sleep, "");

        let state = session.submit().await;

        assert!(matches!(state, SubmissionState::Error(msg) if !msg.is_empty()));
        assert_eq!(estimator.calls(), 0);
    }

    #[tokio::test]
    async fn non_positive_field_fails_without_a_network_call() {
        let estimator = MockEstimator::new(Outcome::Calories(312.6));
        let mut session = PredictionSession::new(Arc::clone(&estimator));
        fill_valid(&mut session);
        session.update_field(MetricField::Weight, "-70");

        session.submit().await;

        assert!(matches!(session.state(), SubmissionState::Error(_)));
        assert_eq!(estimator.calls(), 0);
    }

    #[tokio::test]
    async fn server_failure_settles_into_error() {
        let estimator = MockEstimator::new(Outcome::ServerFailure);
        let mut session = PredictionSession::new(Arc::clone(&estimator));
        fill_valid(&mut session);

        let state = session.submit().await;

        assert!(matches!(state, SubmissionState::Error(msg) if !msg.is_empty()));
        assert!(!session.state().is_loading());
    }

    #[tokio::test]
    async fn network_failure_settles_into_error() {
        let estimator = MockEstimator::new(Outcome::NetworkFailure);
        let mut session = PredictionSession::new(Arc::clone(&estimator));
        fill_valid(&mut session);

        session.submit().await;

        match session.state() {
            SubmissionState::Error(msg) => assert!(msg.contains("unreachable"), "got {msg}"),
            other => panic!("expected error state, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn reset_after_result_returns_to_idle_with_an_empty_form() {
        let estimator = MockEstimator::new(Outcome::Calories(450.2));
        let mut session = PredictionSession::new(Arc::clone(&estimator));
        fill_valid(&mut session);
        session.submit().await;
        assert_eq!(*session.state(), SubmissionState::Result(450));

        session.reset();

        assert_eq!(*session.state(), SubmissionState::Idle);
        assert_eq!(session.form().get(MetricField::Age), "");
    }

    #[tokio::test]
    async fn reset_from_error_is_a_noop() {
        let estimator = MockEstimator::new(Outcome::ServerFailure);
        let mut session = PredictionSession::new(Arc::clone(&estimator));
        fill_valid(&mut session);
        session.submit().await;
        let before = session.state().clone();

        session.reset();

        assert_eq!(*session.state(), before);
        assert_eq!(session.form().get(MetricField::Age), "25");
    }

    #[tokio::test]
    async fn error_state_allows_a_new_submission() {
        let estimator = MockEstimator::new(Outcome::ServerFailure);
        let mut session = PredictionSession::new(Arc::clone(&estimator));
        fill_valid(&mut session);
        session.submit().await;
        assert!(matches!(session.state(), SubmissionState::Error(_)));

        session.submit().await;

        assert_eq!(estimator.calls(), 2);
        assert!(session.state().is_settled());
    }
}
