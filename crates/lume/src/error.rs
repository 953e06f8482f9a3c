//! Error types for the component runtime.

use std::path::PathBuf;

use lume_net::NetworkError;

use crate::component::LifecycleState;

/// Errors returned by fallible runtime operations.
///
/// Attribute and validation problems are never reported through this type:
/// they fall back to defaults or surface as inline form messages.
#[derive(Debug, thiserror::Error)]
pub enum LumeError {
    /// A configuration file could not be read.
    #[error("failed to read configuration from {path}: {source}")]
    ConfigIo {
        /// The file that was read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A configuration document is not valid TOML for [`LumeConfig`](crate::LumeConfig).
    #[error("invalid configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// A configuration could not be serialised.
    #[error("failed to serialise configuration: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    /// A different widget type is already registered under this tag.
    #[error("element <{tag}> is already defined by {existing}")]
    AlreadyDefined {
        /// The contested tag.
        tag: String,
        /// Type name of the existing definition.
        existing: &'static str,
    },

    /// No widget is registered under this tag.
    #[error("no element is defined for <{0}>")]
    UnknownElement(String),

    /// A lifecycle transition was requested from the wrong state.
    #[error("cannot {action} <{tag}> while {state}")]
    Lifecycle {
        /// Tag of the component.
        tag: &'static str,
        /// The requested transition.
        action: &'static str,
        /// The state the component was in.
        state: LifecycleState,
    },

    /// Building or using the HTTP transport failed.
    #[error(transparent)]
    Network(#[from] NetworkError),

    /// A style value or selector was rejected.
    #[error(transparent)]
    Style(#[from] lume_style::Error),
}

/// Result type for runtime operations.
pub type Result<T> = std::result::Result<T, LumeError>;
