//! Error types for the ECS core and the frame pump.

use thiserror::Error;

/// Errors raised by the ECS core.
///
/// `AlreadyInitialized` is expected during registration and is swallowed by
/// [`World::add_entity`](crate::ecs::World::add_entity). The validation
/// variants are meant to fail a test, not to surface at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EcsError {
    #[error("entity not initialized")]
    NotInitialized,

    #[error("entity already initialized")]
    AlreadyInitialized,

    #[error("entity has no components")]
    NoComponents,

    #[error("component is not a reference, writes to it would be lost")]
    ComponentNotReference,

    #[error("world injector used before the system was registered")]
    Unbound,
}

/// Errors that stop a [`FramePump`](crate::pump::FramePump) run.
#[derive(Debug, Error)]
pub enum FrameError {
    #[error("update failed: {0}")]
    Update(String),

    #[error("frame capture failure: {0}")]
    Capture(#[from] image::ImageError),

    #[error("frame capture i/o failure: {0}")]
    Io(#[from] std::io::Error),
}
