use anyhow::Result;
use console::style;
use serde::Serialize;
use somnia_components::{CalculationMode, CalculatorView};

const STATUS_WIDTH: usize = 12;

pub fn status(label: &str, message: impl AsRef<str>) {
    eprintln!(
        "{:>width$} {}",
        style(label).green().bold(),
        message.as_ref(),
        width = STATUS_WIDTH
    );
}

pub fn error(message: impl AsRef<str>) {
    eprintln!("{}: {}", style("error").red().bold(), message.as_ref());
}

#[derive(Serialize)]
struct ResultsJson<'a> {
    mode: &'static str,
    anchor: String,
    suggestions: Vec<SuggestionJson<'a>>,
}

#[derive(Serialize)]
struct SuggestionJson<'a> {
    time: &'a str,
    recommended: bool,
}

fn mode_name(mode: CalculationMode) -> &'static str {
    match mode {
        CalculationMode::Bedtime => "bedtime",
        CalculationMode::WakeUp => "wake-up",
    }
}

pub fn summary(view: &CalculatorView) -> Option<String> {
    let mode = view.mode()?;
    Some(format!(
        "{} {} suggestions",
        view.entries().len(),
        mode_name(mode)
    ))
}

pub fn results_json(view: &CalculatorView) -> Result<String> {
    let CalculatorView::Results {
        mode,
        anchor,
        entries,
    } = view
    else {
        anyhow::bail!("no results to print");
    };
    let json = ResultsJson {
        mode: mode_name(*mode),
        anchor: anchor.to_string(),
        suggestions: entries
            .iter()
            .map(|entry| SuggestionJson {
                time: &entry.text,
                recommended: entry.recommended,
            })
            .collect(),
    };
    Ok(serde_json::to_string_pretty(&json)?)
}

pub fn print_results(view: &CalculatorView) {
    let CalculatorView::Results {
        mode,
        anchor,
        entries,
    } = view
    else {
        return;
    };
    let heading = match mode {
        CalculationMode::Bedtime => format!("To wake up at {anchor}, try to fall asleep at:"),
        CalculationMode::WakeUp => format!("Going to bed at {anchor}, try to wake up at:"),
    };
    println!("{}", style(heading).bold());
    for entry in entries {
        if entry.recommended {
            println!(
                "  {:>8}  {}",
                style(&entry.text).cyan().bold(),
                style("recommended").dim()
            );
        } else {
            println!("  {:>8}", entry.text);
        }
    }
}

#[cfg(test)]
mod tests {
    use somnia_components::{SleepCalculator, SleepCalculatorArgs};

    use super::*;

    #[test]
    fn json_lists_every_suggestion() {
        let mut calculator =
            SleepCalculator::new(SleepCalculatorArgs::default()).expect("valid config");
        let json = results_json(calculator.calculate_bedtime()).expect("results");
        let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
        assert_eq!(value["mode"], "bedtime");
        assert_eq!(value["anchor"], "6:30 AM");
        assert_eq!(value["suggestions"].as_array().map(Vec::len), Some(6));
        assert_eq!(value["suggestions"][0]["time"], "9:15 PM");
        assert_eq!(value["suggestions"][1]["recommended"], true);
        assert_eq!(value["suggestions"][2]["recommended"], false);
    }

    #[test]
    fn picker_view_has_no_json() {
        assert!(results_json(&CalculatorView::Picker).is_err());
        assert_eq!(summary(&CalculatorView::Picker), None);
    }

    #[test]
    fn summary_uses_display_mode_names() {
        let mut calculator =
            SleepCalculator::new(SleepCalculatorArgs::default()).expect("valid config");
        assert_eq!(
            summary(calculator.calculate_wake_up()).as_deref(),
            Some("6 wake-up suggestions")
        );
        assert_eq!(
            summary(calculator.calculate_bedtime()).as_deref(),
            Some("6 bedtime suggestions")
        );
    }
}
