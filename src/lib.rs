//! smartvol - relative volume control for the sink input that matters.
//!
//! Adjusts the volume of a PulseAudio playback stream picked by matching
//! client names against prioritized regex patterns, optionally restricted
//! to streams currently producing audible output. Falls back to the default
//! sink on request and can report the change as a desktop notification.

/// One-shot orchestration of a volume adjustment.
pub mod app;

/// Command line surface.
pub mod cli;

/// Top-level error type.
pub mod error;

/// Desktop notifications over the session bus.
pub mod notify;

/// Synchronous PulseAudio client.
pub mod pulse;

/// Sink input filtering and selection.
pub mod selection;

/// Tracing setup.
pub mod tracing_config;

pub use error::Error;

/// Application name announced to PulseAudio and the notification daemon.
pub const APP_NAME: &str = "smartvol";
