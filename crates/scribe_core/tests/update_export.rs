use std::path::PathBuf;

use chrono::NaiveDate;
use scribe_core::{update, Effect, Msg, PageState, EXPORT_FAILED_ALERT};

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 7).unwrap()
}

#[test]
fn download_click_requests_export_for_today() {
    let (state, effects) = update(PageState::new(), Msg::DownloadClicked { today: day() });

    assert_eq!(
        effects,
        vec![Effect::ExportPdf {
            export_id: 1,
            date: day(),
        }]
    );
    assert_eq!(state.view().exports_in_flight, 1);
    assert!(!state.is_idle());
}

#[test]
fn double_click_starts_overlapping_exports() {
    let (state, _) = update(PageState::new(), Msg::DownloadClicked { today: day() });
    let (state, effects) = update(state, Msg::DownloadClicked { today: day() });

    assert_eq!(
        effects,
        vec![Effect::ExportPdf {
            export_id: 2,
            date: day(),
        }]
    );
    assert_eq!(state.view().exports_in_flight, 2);
}

#[test]
fn successful_export_is_quiet() {
    let (state, _) = update(PageState::new(), Msg::DownloadClicked { today: day() });
    let (state, effects) = update(
        state,
        Msg::ExportFinished {
            export_id: 1,
            result: Ok(PathBuf::from("report_2024-03-07.pdf")),
        },
    );

    assert!(effects.is_empty());
    assert!(state.is_idle());
}

#[test]
fn failed_export_alerts_user() {
    let (state, _) = update(PageState::new(), Msg::DownloadClicked { today: day() });
    let (state, effects) = update(
        state,
        Msg::ExportFinished {
            export_id: 1,
            result: Err("renderer exited with status 1".to_string()),
        },
    );

    assert_eq!(effects, vec![Effect::ShowAlert(EXPORT_FAILED_ALERT.to_string())]);
    assert!(state.is_idle());
}

#[test]
fn export_leaves_editor_untouched() {
    let state = PageState::with_editor(scribe_core::EditorBuffer::new("body"));
    let (state, _) = update(state, Msg::DownloadClicked { today: day() });
    assert_eq!(state.editor().text(), "body");
}
