use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use scribe_core::{update, EditorBuffer, Msg, PageState};
use scribe_engine::{
    AtomicFileWriter, CommandPdfRenderer, EngineHandle, Exporter, PersistError, ReqwestUploader,
    UploadError,
};
use scribe_logging::{scribe_debug, scribe_info, scribe_warn};

use super::cli::Cli;
use super::config::{self, ConfigError};
use super::effects::{EffectRunner, FilePicker, StderrNotifier};
use super::logging;
use super::render::TipRenderer;

const POLL_INTERVAL: Duration = Duration::from_millis(75);

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("cannot set up uploads: {0}")]
    Upload(#[from] UploadError),
    #[error("cannot start engine: {0}")]
    Engine(std::io::Error),
    #[error("cannot read editor file {path:?}: {source}")]
    ReadEditor {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("editor path {0:?} has no file name")]
    EditorPath(PathBuf),
    #[error("cannot save editor file: {0}")]
    SaveEditor(#[from] PersistError),
}

pub fn run_app(cli: Cli) -> Result<(), AppError> {
    let config = config::load(&cli.config)?;
    logging::initialize(config.log_destination, config.level_filter()?);

    let original = match &cli.editor {
        Some(path) => Some(load_editor(path)?),
        None => None,
    };
    let editor = EditorBuffer::new(original.clone().unwrap_or_default());

    let uploader = Arc::new(ReqwestUploader::new(
        config.upload_settings(),
        Arc::new(config.csrf_provider()),
    )?);
    let exporter = Arc::new(Exporter::new(
        Arc::new(CommandPdfRenderer::new(config.renderer_program.clone())),
        config.render_source.clone(),
        config.downloads_dir.clone(),
    ));
    let engine = EngineHandle::new(uploader, exporter).map_err(AppError::Engine)?;
    let runner = EffectRunner::new(
        engine,
        FilePicker::new(cli.upload.clone()),
        Box::new(StderrNotifier),
    );
    let mut shell = Shell::new(PageState::with_editor(editor), runner);

    if let Some(caret) = cli.caret {
        shell.dispatch(Msg::SelectionChanged {
            start: caret,
            end: caret,
        });
    }

    // Actions whose page element is missing stay unbound.
    if cli.export {
        if config.render_source.is_file() {
            shell.dispatch(Msg::DownloadClicked {
                today: Utc::now().date_naive(),
            });
        } else {
            scribe_warn!("Render source {:?} not found; export disabled", config.render_source);
            eprintln!("scribe: render source {:?} not found", config.render_source);
        }
    }
    if !cli.upload.is_empty() {
        if cli.editor.is_some() {
            shell.dispatch(Msg::UploadImageClicked);
        } else {
            scribe_warn!("Upload requested without an editor file; upload disabled");
            eprintln!("scribe: --upload needs --editor");
        }
    }

    shell.run_until_idle();
    scribe_debug!(
        "File input holds {} file(s) at exit",
        shell.runner.picker().value().len()
    );

    if let (Some(path), Some(original)) = (&cli.editor, original) {
        let text = shell.state.editor().text();
        if text != original {
            save_editor(path, text)?;
            scribe_info!("Saved editor text to {:?}", path);
        }
    }
    Ok(())
}

/// Single logical actor: applies messages one at a time and runs their effects.
struct Shell {
    state: PageState,
    runner: EffectRunner,
    tips: TipRenderer,
}

impl Shell {
    fn new(state: PageState, runner: EffectRunner) -> Self {
        Self {
            state,
            runner,
            tips: TipRenderer::default(),
        }
    }

    fn dispatch(&mut self, msg: Msg) {
        let mut inbox = VecDeque::from([msg]);
        while let Some(msg) = inbox.pop_front() {
            let state = std::mem::take(&mut self.state);
            let (mut state, effects) = update(state, msg);
            if state.consume_dirty() {
                self.tips.render(&state.view());
            }
            self.state = state;
            inbox.extend(self.runner.run(effects));
        }
    }

    fn run_until_idle(&mut self) {
        while !self.state.is_idle() {
            if let Some(msg) = self.runner.next_msg(POLL_INTERVAL) {
                self.dispatch(msg);
            }
        }
    }
}

/// A missing editor file starts an empty document.
fn load_editor(path: &Path) -> Result<String, AppError> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(text),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(String::new()),
        Err(source) => Err(AppError::ReadEditor {
            path: path.to_path_buf(),
            source,
        }),
    }
}

fn save_editor(path: &Path, text: &str) -> Result<PathBuf, AppError> {
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| AppError::EditorPath(path.to_path_buf()))?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    Ok(AtomicFileWriter::new(dir).write(file_name, text.as_bytes())?)
}
