use thiserror::Error;

/// Failures while loading a native gateway
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The native library or backend could not be loaded
    #[error("Failed to load native gateway: {0}")]
    LoadError(String),

    /// The backend loaded but refused to bring the input subsystem up
    #[error("Native input subsystem failed to initialize: {0}")]
    InitializationError(String),
}
