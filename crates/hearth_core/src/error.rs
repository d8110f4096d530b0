//! # Core Error Types
//!
//! Lookups in the core never fail: a missing entity, component or system is
//! reported as `None`. The variants below cover the few conditions that are
//! genuine misuse of the runtime.

use thiserror::Error;

use crate::engine::Phase;

/// Errors that can occur in the ECS runtime.
#[derive(Error, Debug)]
pub enum EcsError {
    /// A component was found under the requested name but holds a
    /// different concrete type than the caller asked for.
    #[error("component '{component}' is not a {expected}")]
    ComponentTypeMismatch {
        /// Name the component is stored under.
        component: String,
        /// Type name the caller tried to access it as.
        expected: &'static str,
    },

    /// A lifecycle operation was invoked in a phase that does not allow it.
    #[error("cannot {operation} while the engine is {phase}")]
    Lifecycle {
        /// The rejected operation (`setup`, `tick`, `teardown`, ...).
        operation: &'static str,
        /// The phase the engine was in.
        phase: Phase,
    },

    /// Engine configuration failed to parse or validate.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Engine configuration file could not be read.
    #[error("failed to read configuration file: {0}")]
    ConfigIo(#[from] std::io::Error),
}

/// Result type for ECS runtime operations.
pub type EcsResult<T> = Result<T, EcsError>;
