use thiserror::Error;

/// Data-integrity conditions raised by the world store.
///
/// These never reach a client verbatim; engines degrade them to a generic
/// user-visible error and the process keeps serving other sessions.
#[derive(Debug, Error)]
pub enum WorldError {
    /// Referenced room is not in the store.
    #[error("unknown room: {0}")]
    UnknownRoom(String),

    /// Referenced player is not in the registry.
    #[error("unknown player: {0}")]
    UnknownPlayer(String),

    /// Referenced item instance is not in the store.
    #[error("unknown item: {0}")]
    UnknownItem(String),

    /// An item instance names a template that was never registered.
    #[error("missing item template: {0}")]
    MissingTemplate(String),
}
