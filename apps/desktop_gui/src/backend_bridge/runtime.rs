//! Backend worker: one thread owning a tokio runtime and the session client.
//!
//! Commands arrive over a bounded channel from the UI; everything the UI needs
//! to render flows back as [`UiEvent`]s. Session state never leaves the
//! worker, so the single-owner access model of the session client holds.

use std::thread;

use client_core::{SessionClient, SessionEvent};
use crossbeam_channel::{Receiver, Sender};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

pub fn launch(server_url: String, cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("failed to build backend runtime: {err}"),
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            let client = SessionClient::new(server_url);
            let _ = ui_tx.try_send(UiEvent::Info("Backend worker ready".to_string()));

            let mut events = client.subscribe_events();
            let ui_tx_clone = ui_tx.clone();
            tokio::spawn(async move {
                while let Ok(event) = events.recv().await {
                    let evt = match event {
                        SessionEvent::ScenarioReady(scenario) => UiEvent::ScenarioReady(scenario),
                        SessionEvent::ScenarioLogged(entry) => UiEvent::ScenarioLogged(entry),
                        SessionEvent::RatingAccepted { score } => {
                            UiEvent::RatingAccepted { score }
                        }
                        SessionEvent::StatsUpdated(stats) => UiEvent::StatsUpdated(stats),
                        SessionEvent::ExportFinished(message) => UiEvent::ExportFinished(message),
                        SessionEvent::Error(message) => UiEvent::Error(UiError::from_message(
                            UiErrorContext::General,
                            message,
                        )),
                    };
                    let _ = ui_tx_clone.try_send(evt);
                }
            });

            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    BackendCommand::GenerateScenario => {
                        tracing::info!("backend: generate_scenario");
                        if let Err(err) = client.generate_scenario().await {
                            tracing::error!("backend: generate_scenario failed: {err}");
                            let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                                UiErrorContext::GenerateScenario,
                                err.to_string(),
                            )));
                        }
                    }
                    BackendCommand::SetDraftScore { score } => {
                        client.set_draft_score(score).await;
                    }
                    BackendCommand::SubmitRating { score } => {
                        tracing::info!(score, "backend: submit_rating");
                        if let Err(err) = client.submit_rating(score).await {
                            tracing::error!("backend: submit_rating failed: {err}");
                            let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                                UiErrorContext::SubmitRating,
                                err.to_string(),
                            )));
                        }
                    }
                    BackendCommand::ExportData => {
                        tracing::info!("backend: export_data");
                        if let Err(err) = client.export_data().await {
                            tracing::error!("backend: export_data failed: {err}");
                            let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                                UiErrorContext::Export,
                                err.to_string(),
                            )));
                        }
                    }
                }
            }
        });
    });
}
