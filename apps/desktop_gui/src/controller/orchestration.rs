//! Command orchestration from UI actions to the backend command queue.

use crossbeam_channel::{Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;

pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
    status: &mut String,
) {
    let cmd_name = match &cmd {
        BackendCommand::GenerateScenario => "generate_scenario",
        BackendCommand::SetDraftScore { .. } => "set_draft_score",
        BackendCommand::SubmitRating { .. } => "submit_rating",
        BackendCommand::ExportData => "export_data",
    };

    match cmd_tx.try_send(cmd) {
        Ok(()) => tracing::debug!(command = cmd_name, "queued ui->backend command"),
        Err(TrySendError::Full(_)) => {
            *status = "UI command queue is full; please retry".to_string();
        }
        Err(TrySendError::Disconnected(_)) => {
            *status = "Backend command processor disconnected; relaunch the app".to_string();
        }
    }
}
