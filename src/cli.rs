//! Command line surface.

use clap::Parser;

/// Change volume of the active PulseAudio sink input by a relative delta.
///
/// Sink inputs are prioritized by matching their client names against the
/// given regex patterns, in order. When nothing matches, the default sink
/// can be adjusted instead via `--default-to-sink`.
#[derive(Parser, Debug)]
#[command(name = "smartvol", version, about)]
pub struct Cli {
    /// Amount of volume to change as a float, e.g. -0.05 lowers volume by 5%
    #[arg(allow_hyphen_values = true)]
    pub volume_change: String,

    /// Regex patterns prioritizing sink inputs by client name, first pattern
    /// wins. Append "" to fall back to any remaining sink input.
    pub patterns: Vec<String>,

    /// Change volume of the default sink when no sink input was selected
    #[arg(long)]
    pub default_to_sink: bool,

    /// Only consider sink inputs currently producing audible output
    #[arg(long)]
    pub filter_active: bool,

    /// Go through the motions without changing any volume
    #[arg(long)]
    pub dry_run: bool,

    /// Log pattern matching and the resulting change
    #[arg(short, long)]
    pub verbose: bool,

    /// Show a desktop notification for the change
    #[arg(long)]
    pub notify: bool,

    /// Show the absolute volume in the notification and update it in place
    #[arg(long)]
    pub notify_absolute: bool,
}
