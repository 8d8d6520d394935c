use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::NaiveDate;
use scribe_engine::{
    EngineEvent, EngineHandle, ExportConfig, ExportError, Exporter, FailureKind, PdfRenderer,
    StoredImage, UploadError, Uploader,
};
use tempfile::TempDir;

const WAIT: Duration = Duration::from_secs(5);

/// Accepts every file except the ones named in `reject`.
struct ScriptedUploader {
    reject: Vec<String>,
    calls: Mutex<Vec<(PathBuf, String)>>,
}

#[async_trait::async_trait]
impl Uploader for ScriptedUploader {
    async fn upload(
        &self,
        file: &Path,
        file_name: &str,
        dest_path: &str,
    ) -> Result<StoredImage, UploadError> {
        self.calls
            .lock()
            .unwrap()
            .push((file.to_path_buf(), dest_path.to_string()));
        if self.reject.iter().any(|name| name == file_name) {
            return Err(UploadError {
                kind: FailureKind::Rejected,
                message: "upload failed: unknown error".to_string(),
            });
        }
        Ok(StoredImage {
            domain: "https://cdn.example.com".to_string(),
            name: file_name.to_string(),
        })
    }
}

struct StaticRenderer;

#[async_trait::async_trait]
impl PdfRenderer for StaticRenderer {
    async fn render(&self, _source: &Path, _config: &ExportConfig) -> Result<Vec<u8>, ExportError> {
        Ok(b"%PDF".to_vec())
    }
}

fn handle(reject: &[&str], downloads: &Path) -> (EngineHandle, Arc<ScriptedUploader>) {
    let uploader = Arc::new(ScriptedUploader {
        reject: reject.iter().map(|s| s.to_string()).collect(),
        calls: Mutex::new(Vec::new()),
    });
    let exporter = Arc::new(Exporter::new(
        Arc::new(StaticRenderer),
        PathBuf::from("report.html"),
        downloads.to_path_buf(),
    ));
    let engine = EngineHandle::new(uploader.clone(), exporter).unwrap();
    (engine, uploader)
}

#[test]
fn upload_command_reports_completion() {
    let temp = TempDir::new().unwrap();
    let (engine, uploader) = handle(&[], temp.path());

    engine.upload(4, 0, "/tmp/a.png", "a.png", "/static/images/2024/");

    let event = engine.recv_timeout(WAIT).expect("event");
    assert_eq!(
        event,
        EngineEvent::UploadCompleted {
            batch: 4,
            index: 0,
            result: Ok(StoredImage {
                domain: "https://cdn.example.com".to_string(),
                name: "a.png".to_string(),
            }),
        }
    );
    assert_eq!(
        uploader.calls.lock().unwrap().as_slice(),
        &[(PathBuf::from("/tmp/a.png"), "/static/images/2024/".to_string())]
    );
}

#[test]
fn upload_failure_is_forwarded() {
    let temp = TempDir::new().unwrap();
    let (engine, _) = handle(&["bad.png"], temp.path());

    engine.upload(1, 2, "/tmp/bad.png", "bad.png", "/static/images/2024/");

    match engine.recv_timeout(WAIT).expect("event") {
        EngineEvent::UploadCompleted {
            batch: 1,
            index: 2,
            result: Err(err),
        } => assert_eq!(err.kind, FailureKind::Rejected),
        other => panic!("unexpected event {other:?}"),
    }
}

#[test]
fn export_command_writes_report() {
    let temp = TempDir::new().unwrap();
    let (engine, _) = handle(&[], temp.path());

    engine.export(9, NaiveDate::from_ymd_opt(2024, 3, 7).unwrap());

    assert_eq!(
        engine.recv_timeout(WAIT),
        Some(EngineEvent::ExportCompleted {
            export_id: 9,
            result: Ok(temp.path().join("report_2024-03-07.pdf")),
        })
    );
}

#[test]
fn tip_timer_fires_after_delay() {
    let temp = TempDir::new().unwrap();
    let (engine, _) = handle(&[], temp.path());

    engine.dismiss_tip_after(3, Duration::from_millis(50));

    assert_eq!(engine.try_recv(), None);
    assert_eq!(
        engine.recv_timeout(WAIT),
        Some(EngineEvent::TipElapsed { batch: 3 })
    );
}
