use crate::effect::TIP_LINGER;
use crate::markdown::{image_snippet, image_url, upload_destination};
use crate::{BatchId, Effect, Msg, PageState, ProgressTip, TipStatus};

pub const EXPORT_FAILED_ALERT: &str = "PDF export failed, check the log for details.";

pub fn upload_failed_alert(reason: &str) -> String {
    format!("Image upload failed, please retry. Details: {reason}")
}

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: PageState, msg: Msg) -> (PageState, Vec<Effect>) {
    let effects = match msg {
        Msg::DownloadClicked { today } => {
            // Overlapping exports are allowed; each click gets its own id.
            let export_id = state.begin_export();
            vec![Effect::ExportPdf {
                export_id,
                date: today,
            }]
        }
        Msg::ExportFinished { result, .. } => {
            state.finish_export();
            match result {
                Ok(_) => Vec::new(),
                Err(_) => vec![Effect::ShowAlert(EXPORT_FAILED_ALERT.to_string())],
            }
        }
        Msg::UploadImageClicked => vec![Effect::OpenFilePicker],
        Msg::FilesSelected { files, year } => {
            // One batch at a time keeps insertions in selection order.
            if files.is_empty() || state.batch().is_some() {
                return (state, Vec::new());
            }
            let total = files.len();
            let first = files[0].clone();
            let dest_path = upload_destination(year);
            let batch = state.start_batch(files, dest_path.clone());
            state.set_tip(Some(ProgressTip {
                batch,
                status: TipStatus::Uploading { current: 1, total },
            }));
            vec![Effect::UploadFile {
                batch,
                index: 0,
                file: first,
                dest_path,
            }]
        }
        Msg::FileUploaded {
            batch,
            index,
            image,
        } => {
            if !is_awaited(&state, batch, index) {
                return (state, Vec::new());
            }
            let snippet = image_snippet(&image_url(&image.domain, &image.name));
            state.editor_mut().insert_at_caret(&snippet);
            advance_batch(&mut state)
        }
        Msg::UploadFailed {
            batch,
            index,
            reason,
        } => {
            if !is_awaited(&state, batch, index) {
                return (state, Vec::new());
            }
            state.end_batch();
            state.set_tip(None);
            vec![
                Effect::ShowAlert(upload_failed_alert(&reason)),
                Effect::ResetFileInput,
            ]
        }
        Msg::TipExpired { batch } => {
            if state.tip().is_some_and(|tip| tip.batch == batch) {
                state.set_tip(None);
            }
            Vec::new()
        }
        Msg::SelectionChanged { start, end } => {
            state.editor_mut().select(start, end);
            state.mark_dirty();
            Vec::new()
        }
    };

    (state, effects)
}

/// Only the result for the file currently in flight is accepted.
fn is_awaited(state: &PageState, batch: BatchId, index: usize) -> bool {
    state
        .batch()
        .is_some_and(|current| current.id == batch && current.uploaded == index)
}

fn advance_batch(state: &mut PageState) -> Vec<Effect> {
    let (batch, total, uploaded, next) = match state.batch_mut() {
        Some(current) => {
            current.uploaded += 1;
            let next = current
                .pending()
                .cloned()
                .map(|file| (file, current.dest_path.clone()));
            (current.id, current.total(), current.uploaded, next)
        }
        None => return Vec::new(),
    };

    if let Some((file, dest_path)) = next {
        state.set_tip(Some(ProgressTip {
            batch,
            status: TipStatus::Uploading {
                current: uploaded + 1,
                total,
            },
        }));
        return vec![Effect::UploadFile {
            batch,
            index: uploaded,
            file,
            dest_path,
        }];
    }

    state.end_batch();
    state.set_tip(Some(ProgressTip {
        batch,
        status: TipStatus::Succeeded { uploaded, total },
    }));
    vec![
        Effect::ResetFileInput,
        Effect::ScheduleTipDismiss {
            batch,
            after: TIP_LINGER,
        },
    ]
}
