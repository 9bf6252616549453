use super::Volume;

/// Sink input index as assigned by the server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StreamIndex(pub u32);

/// Sink index as assigned by the server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeviceIndex(pub u32);

/// Playback stream (sink input) information
#[derive(Debug, Clone)]
pub struct StreamInfo {
    /// Stream index
    pub index: StreamIndex,
    /// Stream name
    pub name: String,
    /// Name of the client owning the stream, with the `application.name`
    /// proplist entry as fallback
    pub client_name: String,
    /// Sink this stream is connected to
    pub device_index: DeviceIndex,
    /// Stream volume
    pub volume: Volume,
    /// Whether the stream is muted
    pub muted: bool,
    /// Whether the stream is paused by its client
    pub corked: bool,
}

/// Output device (sink) information
#[derive(Debug, Clone)]
pub struct DeviceInfo {
    /// Device index
    pub index: DeviceIndex,
    /// Device name
    pub name: String,
    /// Human-readable device description
    pub description: String,
    /// Device volume
    pub volume: Volume,
}
