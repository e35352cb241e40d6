//! Command orchestration helpers from UI actions to backend command queue.

use crossbeam_channel::{Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext};

pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
) -> Result<(), UiError> {
    let cmd_name = cmd.name();
    let context = match &cmd {
        BackendCommand::Analyze { .. } => UiErrorContext::Analyze,
        BackendCommand::Download { .. } => UiErrorContext::Download,
        BackendCommand::SaveFile { .. } => UiErrorContext::SaveFile,
    };

    match cmd_tx.try_send(cmd) {
        Ok(()) => {
            tracing::debug!(command = cmd_name, "queued ui->backend command");
            Ok(())
        }
        Err(TrySendError::Full(_)) => Err(UiError::internal(
            context,
            "Too many pending requests; please retry",
        )),
        Err(TrySendError::Disconnected(_)) => Err(UiError::internal(
            context,
            "Backend worker stopped; restart the client and retry",
        )),
    }
}
