use thiserror::Error;

/// Recoverable failures of a single conversation step.
///
/// None of these reach the user as an error: invalid input is answered with a
/// re-prompt and unexpected events are logged and dropped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlowError {
    #[error("unknown service `{0}`")]
    InvalidSelection(String),
    #[error("malformed location: {0}")]
    MalformedLocation(String),
    #[error("{event} is not expected while {state}")]
    UnexpectedEvent {
        state: &'static str,
        event: &'static str,
    },
}
