use crate::core::error::{PredictError, PredictResult};
use crate::core::types::PredictionRequest;

/// The seven metrics the prediction service accepts, in form order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricField {
    Age,
    Weight,
    Duration,
    Steps,
    HeartRate,
    Sleep,
    DailyCalories,
}

impl MetricField {
    pub const ALL: [MetricField; 7] = [
        MetricField::Age,
        MetricField::Weight,
        MetricField::Duration,
        MetricField::Steps,
        MetricField::HeartRate,
        MetricField::Sleep,
        MetricField::DailyCalories,
    ];

    /// Wire key used in the JSON request body.
    pub fn name(&self) -> &'static str {
        match self {
            MetricField::Age => "age",
            MetricField::Weight => "weight",
            MetricField::Duration => "duration",
            MetricField::Steps => "steps",
            MetricField::HeartRate => "heart_rate",
            MetricField::Sleep => "sleep",
            MetricField::DailyCalories => "daily_calories",
        }
    }

    /// Human-facing label, as shown on the prompts.
    pub fn label(&self) -> &'static str {
        match self {
            MetricField::Age => "Age",
            MetricField::Weight => "Weight",
            MetricField::Duration => "Workout time",
            MetricField::Steps => "Steps",
            MetricField::HeartRate => "Heart rate",
            MetricField::Sleep => "Sleep hours",
            MetricField::DailyCalories => "Daily calorie intake",
        }
    }

    /// Display unit, if the metric has one.
    pub fn unit(&self) -> Option<&'static str> {
        match self {
            MetricField::Age => Some("yrs"),
            MetricField::Weight => Some("kg"),
            MetricField::Duration => Some("min"),
            MetricField::Steps => None,
            MetricField::HeartRate => Some("bpm"),
            MetricField::Sleep => Some("hrs"),
            MetricField::DailyCalories => Some("kCal"),
        }
    }
}

/// Raw form state: one string slot per metric. All seven slots always
/// exist; a slot is either empty (unfilled) or holds whatever the user
/// typed. Nothing is validated until submission.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormValues {
    age: String,
    weight: String,
    duration: String,
    steps: String,
    heart_rate: String,
    sleep: String,
    daily_calories: String,
}

impl FormValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: MetricField) -> &str {
        match field {
            MetricField::Age => &self.age,
            MetricField::Weight => &self.weight,
            MetricField::Duration => &self.duration,
            MetricField::Steps => &self.steps,
            MetricField::HeartRate => &self.heart_rate,
            MetricField::Sleep => &self.sleep,
            MetricField::DailyCalories => &self.daily_calories,
        }
    }

    /// Overwrite a single field, leaving the other six untouched.
    pub fn set(&mut self, field: MetricField, raw: &str) {
        let slot = match field {
            MetricField::Age => &mut self.age,
            MetricField::Weight => &mut self.weight,
            MetricField::Duration => &mut self.duration,
            MetricField::Steps => &mut self.steps,
            MetricField::HeartRate => &mut self.heart_rate,
            MetricField::Sleep => &mut self.sleep,
            MetricField::DailyCalories => &mut self.daily_calories,
        };
        *slot = raw.to_string();
    }

    /// Empty every slot.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Validate all seven fields and coerce them into a request body.
    ///
    /// Strict policy: every field must be non-empty and parse as a finite
    /// number greater than zero. The first offending field is reported.
    pub fn validate(&self) -> PredictResult<PredictionRequest> {
        let mut parsed = [0.0f64; 7];
        for (slot, field) in parsed.iter_mut().zip(MetricField::ALL) {
            *slot = self.parse_field(field)?;
        }

        let [age, weight, duration, steps, heart_rate, sleep, daily_calories] = parsed;
        Ok(PredictionRequest {
            age,
            weight,
            duration,
            steps,
            heart_rate,
            sleep,
            daily_calories,
        })
    }

    fn parse_field(&self, field: MetricField) -> PredictResult<f64> {
        let raw = self.get(field).trim();
        if raw.is_empty() {
            return Err(PredictError::Validation(format!(
                "{} is required",
                field.label()
            )));
        }

        match raw.parse::<f64>() {
            Ok(value) if value.is_finite() && value > 0.0 => Ok(value),
            _ => Err(PredictError::Validation(format!(
                "{} must be a positive number",
                field.label()
            ))),
        }
    }
}
