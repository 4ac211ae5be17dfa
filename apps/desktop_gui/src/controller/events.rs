//! UI/backend events and error modeling for the desktop GUI controller.

use shared::domain::{Scenario, SessionLogEntry, SessionStats};

pub enum UiEvent {
    Info(String),
    ScenarioReady(Scenario),
    ScenarioLogged(SessionLogEntry),
    RatingAccepted { score: u8 },
    StatsUpdated(SessionStats),
    ExportFinished(String),
    Error(UiError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Transport,
    Backend,
    Validation,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    GenerateScenario,
    SubmitRating,
    Export,
    General,
}

/// Fixed user-facing text per failing operation; the raw error only goes to
/// the log. A backend decline is final, so only transient failures carry the
/// retry suggestion.
pub fn user_facing_failure(context: UiErrorContext, category: UiErrorCategory) -> &'static str {
    match (context, category) {
        (UiErrorContext::BackendStartup, _) => "Backend worker failed to start; relaunch the app.",
        (UiErrorContext::GenerateScenario, UiErrorCategory::Backend) => {
            "Failed to generate scenario"
        }
        (UiErrorContext::GenerateScenario, _) => "Failed to generate scenario. Please try again.",
        (UiErrorContext::SubmitRating, UiErrorCategory::Backend) => "Failed to submit rating",
        (UiErrorContext::SubmitRating, _) => "Failed to submit rating. Please try again.",
        (UiErrorContext::Export, UiErrorCategory::Backend) => "Failed to export data",
        (UiErrorContext::Export, _) => "Failed to export data. Please try again.",
        (UiErrorContext::General, _) => "Something went wrong. Please try again.",
    }
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let message_lower = message.to_ascii_lowercase();
        let category = if message_lower.contains("connect")
            || message_lower.contains("timed out")
            || message_lower.contains("timeout")
            || message_lower.contains("dns")
            || message_lower.contains("network")
            || message_lower.contains("unreachable")
        {
            UiErrorCategory::Transport
        } else if message_lower.contains("declined") || message_lower.contains("status") {
            UiErrorCategory::Backend
        } else if message_lower.contains("invalid")
            || message_lower.contains("missing")
            || message_lower.contains("no scenario")
        {
            UiErrorCategory::Validation
        } else {
            UiErrorCategory::Unknown
        };

        Self {
            category,
            context,
            message,
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connection_failures_classify_as_transport() {
        let err = UiError::from_message(
            UiErrorContext::GenerateScenario,
            "error sending request: connection refused",
        );
        assert_eq!(err.category(), UiErrorCategory::Transport);
    }

    #[test]
    fn declined_submissions_classify_as_backend() {
        let err = UiError::from_message(
            UiErrorContext::SubmitRating,
            "rating submission declined by backend (status: error)",
        );
        assert_eq!(err.category(), UiErrorCategory::Backend);
    }

    #[test]
    fn missing_scenario_classifies_as_validation() {
        let err = UiError::from_message(UiErrorContext::SubmitRating, "no scenario to rate");
        assert_eq!(err.category(), UiErrorCategory::Validation);
    }

    #[test]
    fn declined_operations_drop_the_retry_suggestion() {
        assert_eq!(
            user_facing_failure(UiErrorContext::Export, UiErrorCategory::Backend),
            "Failed to export data"
        );
        assert_eq!(
            user_facing_failure(UiErrorContext::Export, UiErrorCategory::Transport),
            "Failed to export data. Please try again."
        );
        assert_eq!(
            user_facing_failure(UiErrorContext::SubmitRating, UiErrorCategory::Backend),
            "Failed to submit rating"
        );
        assert_eq!(
            user_facing_failure(UiErrorContext::SubmitRating, UiErrorCategory::Unknown),
            "Failed to submit rating. Please try again."
        );
    }
}
