use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use larder_core::{Calendar, SuggestionEngine, SuggestionRequest, SystemCalendar};

use crate::commands::CommandResult;

/// Runs the engine over a snapshot file. No configuration or storage is touched.
pub fn run(input: &Path, today: Option<NaiveDate>) -> CommandResult {
    let raw = match fs::read_to_string(input) {
        Ok(raw) => raw,
        Err(error) => {
            return CommandResult::failure(
                "suggest",
                "input_read",
                format!("could not read `{}`: {error}", input.display()),
                7,
            );
        }
    };

    let request: SuggestionRequest = match serde_json::from_str(&raw) {
        Ok(request) => request,
        Err(error) => {
            return CommandResult::failure(
                "suggest",
                "input_parse",
                format!("invalid snapshot `{}`: {error}", input.display()),
                7,
            );
        }
    };

    let today = today.unwrap_or_else(|| SystemCalendar.today());
    let suggestions = SuggestionEngine::new().suggest(&request, today);

    match serde_json::to_value(&suggestions) {
        Ok(data) => CommandResult::success_with_data(
            "suggest",
            format!("{} suggestion(s) for {today}", suggestions.len()),
            Some(data),
        ),
        Err(error) => CommandResult::failure("suggest", "serialization", error.to_string(), 3),
    }
}
