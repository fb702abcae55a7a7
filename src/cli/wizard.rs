use anyhow::Result;
use console::style;
use dialoguer::{theme::ColorfulTheme, Confirm, Input};

use crate::client::HttpPredictionClient;
use crate::core::SubmissionState;
use crate::form::MetricField;
use crate::session::PredictionSession;

use super::{loading_spinner, print_result};

/// Interactive prediction loop: prompt the seven metrics, submit, render
/// the outcome, then offer a fresh round.
pub async fn run(base_url: &str) -> Result<()> {
    let client = HttpPredictionClient::new(base_url)?;
    let mut session = PredictionSession::new(client);

    println!("{}", style("Calorie Burn Predictor").bold());
    println!("Estimate calories burned using your fitness data\n");

    loop {
        for field in MetricField::ALL {
            let value = prompt_metric(field)?;
            session.update_field(field, &value);
        }

        let spinner = loading_spinner()?;
        session.submit().await;
        spinner.finish_and_clear();

        match session.state() {
            SubmissionState::Result(calories) => print_result(*calories),
            SubmissionState::Error(message) => {
                println!("{} {}", style("✖").red().bold(), style(message).red());
            }
            _ => {}
        }

        let again = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt("New prediction?")
            .default(false)
            .interact()?;
        if !again {
            break;
        }

        session.reset();
        println!();
    }

    Ok(())
}

fn prompt_metric(field: MetricField) -> Result<String> {
    let prompt = match field.unit() {
        Some(unit) => format!("{} ({unit})", field.label()),
        None => field.label().to_string(),
    };

    // Same strict rule as form validation, surfaced early so the wizard
    // never submits a form it knows will be rejected.
    let value: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .validate_with(|input: &String| match input.trim().parse::<f64>() {
            Ok(value) if value.is_finite() && value > 0.0 => Ok(()),
            _ => Err("enter a positive number"),
        })
        .interact_text()?;

    Ok(value)
}
