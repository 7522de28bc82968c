//! Engine errors and the halt signal.
//!
//! Every failure in the runtime is deterministic and fatal: there are no
//! retries. Two kinds of value travel up the dispatch paths:
//!
//! - [`EngineError`]: something is wrong with the project, an attribute, an
//!   action argument or the backend.
//! - [`Halt::Terminate`]: a clean shutdown was requested (the game object was
//!   destroyed, the window was closed). Not an error.
//!
//! Dispatch functions return [`HaltResult`], so `?` forwards both. Only the
//! main loop tells them apart.

use thiserror::Error;

/// A fatal engine error.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Project data is structurally invalid (bad duplicate index, missing key).
    #[error("malformed project: {0}")]
    MalformedProject(String),

    /// A blueprint or `Create object` names a type that isn't registered.
    #[error("unknown object type \"{0}\"")]
    UnknownObjectType(String),

    /// A required attribute is absent at activation time.
    #[error("{type_name}: missing \"{key}\" attribute")]
    MissingAttribute { type_name: String, key: String },

    /// An attribute is present but unusable.
    #[error("invalid \"{key}\" attribute: {reason}")]
    InvalidAttribute { key: String, reason: String },

    /// An action was invoked with a value of the wrong shape.
    #[error("invalid argument for \"{action}\": {reason}")]
    InvalidActionArgument { action: String, reason: String },

    /// Axis id outside the valid enumeration.
    #[error("unknown axis id {0}")]
    UnknownAxis(u8),

    /// Frame index outside the project's frame list.
    #[error("unknown frame {0}")]
    UnknownFrame(usize),

    /// The backend couldn't load an asset.
    #[error("asset \"{path}\": {reason}")]
    Asset { path: String, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl EngineError {
    /// Shorthand for an `InvalidActionArgument` error.
    pub fn invalid_argument(action: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidActionArgument {
            action: action.into(),
            reason: reason.into(),
        }
    }

    /// True for errors in the malformed-project class.
    #[must_use]
    pub fn is_malformed_project(&self) -> bool {
        matches!(
            self,
            Self::MalformedProject(_) | Self::UnknownObjectType(_) | Self::Json(_)
        )
    }
}

/// Why a dispatch path stopped early.
#[derive(Debug, Error)]
pub enum Halt {
    /// Clean shutdown requested.
    #[error("termination requested")]
    Terminate,

    /// A fatal error.
    #[error(transparent)]
    Fault(#[from] EngineError),
}

impl Halt {
    /// True if this is the termination signal.
    #[must_use]
    pub fn is_terminate(&self) -> bool {
        matches!(self, Halt::Terminate)
    }

    /// The contained error, if this is a fault.
    #[must_use]
    pub fn into_error(self) -> Option<EngineError> {
        match self {
            Halt::Terminate => None,
            Halt::Fault(e) => Some(e),
        }
    }
}

/// Result of any dispatch path that may halt the game.
pub type HaltResult<T> = Result<T, Halt>;
