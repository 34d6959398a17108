//! Errores del crate.
//!
//! Ningún error del despachador es fatal: los [`DispatchError`] se capturan
//! en la frontera de cada binding durante [`tick`](crate::CommandDispatcher::tick),
//! se registran como advertencia y se devuelven en el
//! [`TickReport`](crate::TickReport).

use std::path::PathBuf;

use thiserror::Error;

/// Fallo de un binding individual durante un tick.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    /// El generador produjo un valor que el callback no acepta.
    #[error("command '{command}' expected argument of type {expected}, generator produced {found}")]
    TypeMismatch {
        command: String,
        expected: &'static str,
        found: String,
    },

    /// El callback o el generador hicieron panic.
    #[error("command '{command}' panicked: {message}")]
    Panicked { command: String, message: String },
}

impl DispatchError {
    /// Nombre del comando que falló.
    pub fn command(&self) -> &str {
        match self {
            DispatchError::TypeMismatch { command, .. } | DispatchError::Panicked { command, .. } => {
                command
            }
        }
    }
}

/// Errores al cargar un [`KeyBindingsConfig`](crate::KeyBindingsConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}
