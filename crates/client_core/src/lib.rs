use std::{collections::HashSet, sync::Arc, time::Duration};

use anyhow::{Context, Result};
use chrono::Utc;
use reqwest::Client;
use shared::{
    domain::{RatingSubmission, Scenario, SessionLogEntry, SessionStats},
    protocol::{ExportResponse, SubmitRatingResponse, UploadStatus},
};
use thiserror::Error;
use tokio::sync::{broadcast, Mutex};
use tracing::{info, warn};

pub mod dispatcher;

/// Delay between a backend-confirmed submission and the automatic request for
/// the next scenario. Not cancellable once scheduled; a user action racing it
/// is last-writer-wins.
const AUTO_ADVANCE_DELAY: Duration = Duration::from_millis(1500);
/// Rating control midpoint, restored every time a new scenario is shown.
pub const DEFAULT_DRAFT_SCORE: u8 = 5;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("no scenario to rate")]
    NoCurrentScenario,
    #[error("rating submission declined by backend (status: {status})")]
    SubmissionDeclined { status: String },
    #[error("export declined by backend (status: {status})")]
    ExportDeclined { status: String },
}

#[derive(Debug, Clone)]
pub enum SessionEvent {
    ScenarioReady(Scenario),
    ScenarioLogged(SessionLogEntry),
    RatingAccepted { score: u8 },
    StatsUpdated(SessionStats),
    ExportFinished(String),
    Error(String),
}

struct SessionState {
    current_scenario: Option<Scenario>,
    draft_score: Option<u8>,
    completed_scenarios: u32,
    scenario_types: HashSet<String>,
    session_log: Vec<SessionLogEntry>,
}

impl SessionState {
    fn stats(&self) -> SessionStats {
        SessionStats {
            completed_scenarios: self.completed_scenarios,
            distinct_scenario_types: self.scenario_types.len() as u32,
        }
    }
}

/// Session-scoped controller for the scenario-rating workflow.
///
/// Owns the current scenario, the monotonic session counters, and the
/// append-only session log; all mutation happens behind one mutex, so
/// operations observe each other in a single serial order. State is lost when
/// the client is dropped; nothing is persisted.
pub struct SessionClient {
    http: Client,
    server_url: String,
    inner: Mutex<SessionState>,
    events: broadcast::Sender<SessionEvent>,
}

impl SessionClient {
    pub fn new(server_url: impl Into<String>) -> Arc<Self> {
        let (events, _) = broadcast::channel(256);
        Arc::new(Self {
            http: Client::new(),
            server_url: server_url.into(),
            inner: Mutex::new(SessionState {
                current_scenario: None,
                draft_score: None,
                completed_scenarios: 0,
                scenario_types: HashSet::new(),
                session_log: Vec::new(),
            }),
            events,
        })
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    /// Requests a fresh scenario from the backend.
    ///
    /// If a scenario is already on screen and the rating control holds a
    /// value, a session-log entry is appended for it first; moving on is what
    /// logs a scenario, not submitting it. On transport or parse failure the
    /// session state is left untouched and no retry is attempted.
    pub async fn generate_scenario(&self) -> Result<Scenario> {
        self.log_previous_scenario().await;

        let scenario: Scenario = self
            .http
            .get(format!("{}/generate_scenario", self.server_url))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
            .context("invalid scenario payload from backend")?;

        {
            let mut guard = self.inner.lock().await;
            guard.current_scenario = Some(scenario.clone());
            guard.draft_score = Some(DEFAULT_DRAFT_SCORE);
        }

        info!(scenario_type = %scenario.scenario_type, "scenario fetched");
        let _ = self
            .events
            .send(SessionEvent::ScenarioReady(scenario.clone()));
        Ok(scenario)
    }

    /// Records the rating control's current position.
    pub async fn set_draft_score(&self, score: u8) {
        let mut guard = self.inner.lock().await;
        if guard.current_scenario.is_some() {
            guard.draft_score = Some(score);
        }
    }

    /// Posts the current scenario with the given readiness score.
    ///
    /// On backend-confirmed success the counters advance and, after a fixed
    /// 1.5 s delay, the next scenario is requested automatically. On any
    /// failure the counters are untouched and nothing is retried; the rated
    /// scenario stays on screen for the user to skip or resubmit.
    pub async fn submit_rating(self: &Arc<Self>, score: u8) -> Result<()> {
        let scenario = {
            let mut guard = self.inner.lock().await;
            let scenario = guard
                .current_scenario
                .clone()
                .ok_or(SessionError::NoCurrentScenario)?;
            guard.draft_score = Some(score);
            scenario
        };

        let submission = RatingSubmission::new(scenario.clone(), score);
        let reply: SubmitRatingResponse = self
            .http
            .post(format!("{}/submit_rating", self.server_url))
            .json(&submission)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
            .context("invalid submission reply from backend")?;

        if !reply.is_success() {
            warn!(status = %reply.status, "backend declined rating submission");
            return Err(SessionError::SubmissionDeclined {
                status: reply.status,
            }
            .into());
        }

        let stats = {
            let mut guard = self.inner.lock().await;
            guard.completed_scenarios += 1;
            guard.scenario_types.insert(scenario.scenario_type.clone());
            guard.stats()
        };

        info!(
            score,
            scenario_type = %scenario.scenario_type,
            completed = stats.completed_scenarios,
            "rating accepted"
        );
        let _ = self.events.send(SessionEvent::RatingAccepted { score });
        let _ = self.events.send(SessionEvent::StatsUpdated(stats));

        let client = Arc::clone(self);
        tokio::spawn(async move {
            tokio::time::sleep(AUTO_ADVANCE_DELAY).await;
            if let Err(err) = client.generate_scenario().await {
                let _ = client.events.send(SessionEvent::Error(format!(
                    "failed to fetch next scenario: {err}"
                )));
            }
        });

        Ok(())
    }

    /// Asks the backend to export collected ratings and relays its status as
    /// one user-facing message. No local data leaves the client.
    pub async fn export_data(&self) -> Result<String> {
        let reply: ExportResponse = self
            .http
            .get(format!("{}/export_data", self.server_url))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
            .context("invalid export reply from backend")?;

        if !reply.is_success() {
            warn!(
                status = %reply.status,
                message = reply.message.as_deref().unwrap_or(""),
                "backend declined export"
            );
            return Err(SessionError::ExportDeclined {
                status: reply.status,
            }
            .into());
        }

        let message = compose_export_message(&reply);
        info!(record_count = reply.record_count, "export finished");
        let _ = self
            .events
            .send(SessionEvent::ExportFinished(message.clone()));
        Ok(message)
    }

    pub async fn current_scenario(&self) -> Option<Scenario> {
        self.inner.lock().await.current_scenario.clone()
    }

    pub async fn stats(&self) -> SessionStats {
        self.inner.lock().await.stats()
    }

    pub async fn session_log(&self) -> Vec<SessionLogEntry> {
        self.inner.lock().await.session_log.clone()
    }

    async fn log_previous_scenario(&self) {
        let entry = {
            let mut guard = self.inner.lock().await;
            match (guard.current_scenario.clone(), guard.draft_score) {
                (Some(scenario), Some(score)) => {
                    let entry = SessionLogEntry {
                        scenario,
                        score,
                        timestamp: Utc::now(),
                    };
                    guard.session_log.push(entry.clone());
                    Some(entry)
                }
                _ => None,
            }
        };

        if let Some(entry) = entry {
            info!(
                scenario_type = %entry.scenario.scenario_type,
                score = entry.score,
                "scenario logged before moving on"
            );
            let _ = self.events.send(SessionEvent::ScenarioLogged(entry));
        }
    }
}

fn compose_export_message(reply: &ExportResponse) -> String {
    let mut message = format!("Successfully exported {} records", reply.record_count);
    match reply.huggingface_status {
        UploadStatus::Success => {
            message.push('\n');
            message.push_str("Data uploaded to Hugging Face dataset!");
        }
        UploadStatus::NoToken | UploadStatus::Failed => {
            if let Some(detail) = reply.huggingface_message.as_deref() {
                message.push('\n');
                message.push_str(detail);
            }
        }
        UploadStatus::Unrecognized => {}
    }
    message
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
