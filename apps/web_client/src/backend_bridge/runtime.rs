//! Runtime bridge between UI command queue and backend event intake.

use std::{
    sync::Arc,
    thread::{self, JoinHandle},
};

use anyhow::{Context, Result};
use client_core::VideoBackend;
use crossbeam_channel::{Receiver, Sender};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;

/// Starts the worker thread. Commands are executed one at a time, in queue
/// order, each to completion. The worker exits once either channel closes.
pub fn launch(
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
    backend: Arc<dyn VideoBackend>,
) -> Result<JoinHandle<()>> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to build backend runtime")?;

    thread::Builder::new()
        .name("backend-bridge".to_string())
        .spawn(move || {
            while let Ok(cmd) = cmd_rx.recv() {
                let name = cmd.name();
                let event = runtime.block_on(execute(backend.as_ref(), cmd));
                if ui_tx.send(event).is_err() {
                    tracing::debug!(command = name, "ui event receiver dropped; stopping worker");
                    break;
                }
            }
            tracing::debug!("backend bridge worker stopped");
        })
        .context("failed to spawn backend bridge thread")
}

async fn execute(backend: &dyn VideoBackend, cmd: BackendCommand) -> UiEvent {
    match cmd {
        BackendCommand::Analyze { generation, url } => {
            let result = backend.analyze(&url).await;
            UiEvent::AnalyzeFinished {
                generation,
                url,
                result,
            }
        }
        BackendCommand::Download {
            generation,
            url,
            format_id,
        } => {
            let result = backend.request_download(&url, &format_id).await;
            UiEvent::DownloadFinished { generation, result }
        }
        BackendCommand::SaveFile { filename, dest_dir } => {
            match backend.save_file(&filename, &dest_dir).await {
                Ok(path) => UiEvent::FileSaved { path },
                Err(err) => UiEvent::FileSaveFailed(err),
            }
        }
    }
}
