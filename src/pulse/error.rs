use super::VolumeError;

/// Errors that can occur while talking to the PulseAudio server
#[derive(thiserror::Error, Debug)]
pub enum PulseError {
    /// PulseAudio connection failed
    #[error("PulseAudio connection failed: {0}")]
    ConnectionFailed(String),

    /// PulseAudio operation failed
    #[error("PulseAudio operation failed: {0}")]
    OperationFailed(String),

    /// Server reports no default sink
    #[error("the server reports no default sink")]
    NoDefaultSink,

    /// Volume conversion failed
    #[error("volume conversion failed: {0}")]
    VolumeConversion(#[from] VolumeError),
}
