mod app;
mod cli;
mod config;
mod effects;
mod logging;
mod render;

pub use app::{run_app, AppError};
pub use cli::Cli;
