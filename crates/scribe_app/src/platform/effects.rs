use std::path::PathBuf;
use std::time::Duration;

use chrono::{Datelike, Local};
use scribe_core::{Effect, Msg, SelectedFile, UploadedImage};
use scribe_engine::{EngineEvent, EngineHandle};
use scribe_logging::{scribe_debug, scribe_info};

/// Surface for blocking, user-visible notifications.
pub trait Notifier {
    fn alert(&mut self, text: &str);
}

pub struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn alert(&mut self, text: &str) {
        eprintln!("[alert] {text}");
    }
}

/// Stand-in for the file input: hands out the files named on the command line.
#[derive(Debug, Default)]
pub struct FilePicker {
    choices: Vec<PathBuf>,
    value: Vec<SelectedFile>,
}

impl FilePicker {
    pub fn new(choices: Vec<PathBuf>) -> Self {
        Self {
            choices,
            value: Vec::new(),
        }
    }

    /// Opens the picker; each configured choice can be picked once.
    fn pick(&mut self) -> Vec<SelectedFile> {
        self.value = self
            .choices
            .drain(..)
            .map(SelectedFile::from_path)
            .collect();
        self.value.clone()
    }

    fn reset(&mut self) {
        self.value.clear();
    }

    pub fn value(&self) -> &[SelectedFile] {
        &self.value
    }
}

pub struct EffectRunner {
    engine: EngineHandle,
    picker: FilePicker,
    notifier: Box<dyn Notifier>,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle, picker: FilePicker, notifier: Box<dyn Notifier>) -> Self {
        Self {
            engine,
            picker,
            notifier,
        }
    }

    /// Runs the effects, returning messages that follow from them immediately.
    pub fn run(&mut self, effects: Vec<Effect>) -> Vec<Msg> {
        let mut follow_ups = Vec::new();
        for effect in effects {
            match effect {
                Effect::ExportPdf { export_id, date } => {
                    scribe_info!("ExportPdf export_id={} date={}", export_id, date);
                    self.engine.export(export_id, date);
                }
                Effect::OpenFilePicker => {
                    let files = self.picker.pick();
                    scribe_debug!("File picker returned {} file(s)", files.len());
                    follow_ups.push(Msg::FilesSelected {
                        files,
                        year: Local::now().year(),
                    });
                }
                Effect::UploadFile {
                    batch,
                    index,
                    file,
                    dest_path,
                } => {
                    scribe_info!(
                        "UploadFile batch={} index={} name={} dest={}",
                        batch,
                        index,
                        file.name,
                        dest_path
                    );
                    self.engine
                        .upload(batch, index, file.path, file.name, dest_path);
                }
                Effect::ShowAlert(text) => self.notifier.alert(&text),
                Effect::ResetFileInput => self.picker.reset(),
                Effect::ScheduleTipDismiss { batch, after } => {
                    self.engine.dismiss_tip_after(batch, after);
                }
            }
        }
        follow_ups
    }

    /// Waits up to `timeout` for the next engine event, mapped to a message.
    pub fn next_msg(&self, timeout: Duration) -> Option<Msg> {
        self.engine.recv_timeout(timeout).map(map_event)
    }

    pub fn picker(&self) -> &FilePicker {
        &self.picker
    }
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::UploadCompleted {
            batch,
            index,
            result,
        } => match result {
            Ok(image) => Msg::FileUploaded {
                batch,
                index,
                image: UploadedImage {
                    domain: image.domain,
                    name: image.name,
                },
            },
            Err(err) => Msg::UploadFailed {
                batch,
                index,
                reason: err.message,
            },
        },
        EngineEvent::ExportCompleted { export_id, result } => Msg::ExportFinished {
            export_id,
            result: result.map_err(|err| err.to_string()),
        },
        EngineEvent::TipElapsed { batch } => Msg::TipExpired { batch },
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use scribe_core::{Msg, UploadedImage};
    use scribe_engine::{EngineEvent, ExportError, FailureKind, StoredImage, UploadError};

    use super::{map_event, FilePicker};

    #[test]
    fn picker_hands_out_choices_once() {
        let mut picker = FilePicker::new(vec![PathBuf::from("img/a.png")]);
        let first = picker.pick();
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].name, "a.png");
        assert_eq!(picker.value().len(), 1);

        picker.reset();
        assert!(picker.value().is_empty());
        assert!(picker.pick().is_empty());
    }

    #[test]
    fn upload_events_map_to_messages() {
        let ok = map_event(EngineEvent::UploadCompleted {
            batch: 1,
            index: 0,
            result: Ok(StoredImage {
                domain: "https://cdn".to_string(),
                name: "a.png".to_string(),
            }),
        });
        assert_eq!(
            ok,
            Msg::FileUploaded {
                batch: 1,
                index: 0,
                image: UploadedImage {
                    domain: "https://cdn".to_string(),
                    name: "a.png".to_string(),
                },
            }
        );

        let failed = map_event(EngineEvent::UploadCompleted {
            batch: 1,
            index: 1,
            result: Err(UploadError {
                kind: FailureKind::Rejected,
                message: "upload failed: quota".to_string(),
            }),
        });
        assert_eq!(
            failed,
            Msg::UploadFailed {
                batch: 1,
                index: 1,
                reason: "upload failed: quota".to_string(),
            }
        );
    }

    #[test]
    fn export_failure_keeps_diagnostic_text() {
        let msg = map_event(EngineEvent::ExportCompleted {
            export_id: 2,
            result: Err(ExportError::Render("boom".to_string())),
        });
        assert_eq!(
            msg,
            Msg::ExportFinished {
                export_id: 2,
                result: Err("render failed: boom".to_string()),
            }
        );
    }

    #[test]
    fn timer_maps_to_tip_expiry() {
        assert_eq!(
            map_event(EngineEvent::TipElapsed { batch: 7 }),
            Msg::TipExpired { batch: 7 }
        );
    }
}
