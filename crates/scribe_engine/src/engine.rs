use std::path::PathBuf;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use chrono::NaiveDate;
use scribe_logging::{scribe_error, scribe_info};

use crate::export::Exporter;
use crate::upload::Uploader;
use crate::{BatchId, EngineEvent, ExportId};

enum EngineCommand {
    Upload {
        batch: BatchId,
        index: usize,
        file: PathBuf,
        file_name: String,
        dest_path: String,
    },
    Export {
        export_id: ExportId,
        date: NaiveDate,
    },
    DismissTip {
        batch: BatchId,
        after: Duration,
    },
}

/// Runs uploads, exports and timers on a background tokio runtime and reports
/// back through [`EngineEvent`]s.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(uploader: Arc<dyn Uploader>, exporter: Arc<Exporter>) -> std::io::Result<Self> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Runtime::new()?;

        thread::spawn(move || {
            while let Ok(command) = cmd_rx.recv() {
                let uploader = uploader.clone();
                let exporter = exporter.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(uploader.as_ref(), exporter.as_ref(), command, event_tx).await;
                });
            }
        });

        Ok(Self { cmd_tx, event_rx })
    }

    pub fn upload(
        &self,
        batch: BatchId,
        index: usize,
        file: impl Into<PathBuf>,
        file_name: impl Into<String>,
        dest_path: impl Into<String>,
    ) {
        let _ = self.cmd_tx.send(EngineCommand::Upload {
            batch,
            index,
            file: file.into(),
            file_name: file_name.into(),
            dest_path: dest_path.into(),
        });
    }

    pub fn export(&self, export_id: ExportId, date: NaiveDate) {
        let _ = self.cmd_tx.send(EngineCommand::Export { export_id, date });
    }

    pub fn dismiss_tip_after(&self, batch: BatchId, after: Duration) {
        let _ = self.cmd_tx.send(EngineCommand::DismissTip { batch, after });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

async fn handle_command(
    uploader: &dyn Uploader,
    exporter: &Exporter,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::Upload {
            batch,
            index,
            file,
            file_name,
            dest_path,
        } => {
            let result = uploader.upload(&file, &file_name, &dest_path).await;
            if let Err(err) = &result {
                scribe_error!(
                    "Upload of {} (batch {} file {}) failed: {} [{}]",
                    file.display(),
                    batch,
                    index + 1,
                    err,
                    err.kind
                );
            }
            let _ = event_tx.send(EngineEvent::UploadCompleted {
                batch,
                index,
                result,
            });
        }
        EngineCommand::Export { export_id, date } => {
            let result = exporter.export(date).await;
            match &result {
                Ok(path) => scribe_info!("PDF export succeeded: {}", path.display()),
                Err(err) => scribe_error!(
                    "PDF export of {} failed: {:?}",
                    exporter.source().display(),
                    err
                ),
            }
            let _ = event_tx.send(EngineEvent::ExportCompleted { export_id, result });
        }
        EngineCommand::DismissTip { batch, after } => {
            tokio::time::sleep(after).await;
            let _ = event_tx.send(EngineEvent::TipElapsed { batch });
        }
    }
}
