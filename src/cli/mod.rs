pub mod wizard;

use anyhow::{bail, Result};
use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::time::Duration;

use crate::client::HttpPredictionClient;
use crate::config::ResolvedEndpoint;
use crate::core::SubmissionState;
use crate::form::MetricField;
use crate::session::PredictionSession;

/// The seven metrics, taken as raw strings. They are pushed through the
/// form layer so flag input obeys exactly the same validation rules as
/// interactive input.
#[derive(Debug, Args)]
pub struct PredictArgs {
    /// Age (yrs)
    #[arg(long)]
    pub age: String,

    /// Weight (kg)
    #[arg(long)]
    pub weight: String,

    /// Workout time (min)
    #[arg(long)]
    pub duration: String,

    /// Steps taken
    #[arg(long)]
    pub steps: String,

    /// Heart rate (bpm)
    #[arg(long)]
    pub heart_rate: String,

    /// Sleep hours (hrs)
    #[arg(long)]
    pub sleep: String,

    /// Daily calorie intake (kCal)
    #[arg(long)]
    pub daily_calories: String,
}

impl PredictArgs {
    fn apply(&self, session: &mut PredictionSession<HttpPredictionClient>) {
        session.update_field(MetricField::Age, &self.age);
        session.update_field(MetricField::Weight, &self.weight);
        session.update_field(MetricField::Duration, &self.duration);
        session.update_field(MetricField::Steps, &self.steps);
        session.update_field(MetricField::HeartRate, &self.heart_rate);
        session.update_field(MetricField::Sleep, &self.sleep);
        session.update_field(MetricField::DailyCalories, &self.daily_calories);
    }
}

/// One-shot prediction from command-line flags.
pub async fn run_predict(args: &PredictArgs, base_url: &str) -> Result<()> {
    let client = HttpPredictionClient::new(base_url)?;
    let mut session = PredictionSession::new(client);
    args.apply(&mut session);

    let spinner = loading_spinner()?;
    session.submit().await;
    spinner.finish_and_clear();

    match session.state() {
        SubmissionState::Result(calories) => {
            print_result(*calories);
            Ok(())
        }
        SubmissionState::Error(message) => bail!("{message}"),
        // submit() always settles into Result or Error.
        other => bail!("unexpected session state: {other:?}"),
    }
}

/// Print the effective endpoint configuration.
pub fn show_config(endpoint: &ResolvedEndpoint, config_path: Option<&Path>) {
    println!("Prediction endpoint: {}", style(&endpoint.base_url).cyan());
    println!("Resolved from:       {}", endpoint.source);
    match config_path {
        Some(path) => println!("Config file:         {}", path.display()),
        None => println!("Config file:         (none)"),
    }
}

pub(crate) fn loading_spinner() -> Result<ProgressBar> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    spinner.set_message("Calculating calories...");
    spinner.enable_steady_tick(Duration::from_millis(80));
    Ok(spinner)
}

pub(crate) fn print_result(calories: i64) {
    println!(
        "{} Estimated calories burned: {} kCal",
        style("✔").green().bold(),
        style(calories).green().bold()
    );
}
