//! Terminal surfaces: interactive console screens and one-shot commands.

pub mod commands;
pub mod console;

use serde::Serialize;
use thiserror::Error;

use crate::application::error::AppError;
use crate::application::gateway::GatewayError;
use crate::config::LoadError;
use crate::infra::error::InfraError;

/// Binary-level failure type, rendered by `main`.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("configuration error: {0}")]
    Config(#[from] LoadError),
    #[error(transparent)]
    App(#[from] AppError),
    #[error(transparent)]
    Gateway(#[from] GatewayError),
    #[error(transparent)]
    Infra(#[from] InfraError),
    #[error("failed to read input file {path}: {source}")]
    InputFile {
        path: String,
        source: std::io::Error,
    },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

pub fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    let out = serde_json::to_string_pretty(value)
        .map_err(|err| CliError::InvalidInput(format!("failed to render output: {err}")))?;
    println!("{out}");
    Ok(())
}
