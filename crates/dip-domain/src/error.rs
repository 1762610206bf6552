//! Error handling types

use thiserror::Error;

use crate::value_objects::{Phase, ProviderKind};

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for dip
///
/// Every registration, lifecycle and compile failure is raised synchronously
/// at the offending call site. Resolving a name that was never registered is
/// not an error: it degrades to [`crate::Resolved::Missing`].
#[derive(Error, Debug)]
pub enum Error {
    /// A module or view name was reused within its namespace
    #[error("{kind} already exists: {name}")]
    DuplicateName {
        /// Namespace the name collided in
        kind: ProviderKind,
        /// The duplicated name
        name: String,
    },

    /// A view was registered without a constructor factory
    #[error("View {name} has no constructor")]
    MissingConstructor {
        /// Name of the view
        name: String,
    },

    /// `config`/`run` was called after the lifecycle reached ready
    #[error("The {phase} queue is closed: application is already ready")]
    QueueClosed {
        /// Queue the caller tried to append to
        phase: Phase,
    },

    /// `compile` had no root element and no document to default to
    #[error("Compile target missing: no root element and no document root available")]
    CompileTargetMissing,

    /// A factory required an argument that resolved to nothing
    #[error("Missing dependency at position {position}")]
    MissingDependency {
        /// Zero-based argument position
        position: usize,
    },

    /// A factory argument did not hold the expected type
    #[error("Dependency at position {position} is not a {expected}")]
    TypeMismatch {
        /// Zero-based argument position
        position: usize,
        /// Name of the type the caller asked for
        expected: &'static str,
    },

    /// A provider factory or queued callback failed
    #[error("Factory for {name} failed: {message}")]
    Factory {
        /// Provider or task that failed
        name: String,
        /// Description of the failure
        message: String,
    },

    /// JSON parsing or serialization error
    #[error("JSON parsing error: {source}")]
    Json {
        /// The underlying JSON error
        #[from]
        source: serde_json::Error,
    },

    /// I/O operation error
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration-related error (simple form)
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration error
        message: String,
    },

    /// Configuration-related error (with source)
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Internal system error
    #[error("Internal error: {message}")]
    Internal {
        /// Description of the internal error
        message: String,
    },
}

// Registration and lifecycle error creation methods
impl Error {
    /// Create a duplicate name error
    pub fn duplicate_name<S: Into<String>>(kind: ProviderKind, name: S) -> Self {
        Self::DuplicateName {
            kind,
            name: name.into(),
        }
    }

    /// Create a missing constructor error
    pub fn missing_constructor<S: Into<String>>(name: S) -> Self {
        Self::MissingConstructor { name: name.into() }
    }

    /// Create a queue closed error
    pub fn queue_closed(phase: Phase) -> Self {
        Self::QueueClosed { phase }
    }

    /// Create a factory failure
    pub fn factory<N: Into<String>, S: Into<String>>(name: N, message: S) -> Self {
        Self::Factory {
            name: name.into(),
            message: message.into(),
        }
    }
}

// Configuration error creation methods
impl Error {
    /// Create a configuration error (simple)
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a configuration error with source
    pub fn configuration_with_source<
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::Configuration {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an I/O error with source
    pub fn io_with_source<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
        message: S,
        source: E,
    ) -> Self {
        Self::Io {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}
