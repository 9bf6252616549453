//! One-shot orchestration: filter sink inputs, pick one, adjust its volume.

use std::time::Duration;

use regex::Regex;
use tracing::{debug, info, warn};

use crate::{
    APP_NAME,
    cli::Cli,
    error::Error,
    notify::{self, Notification},
    pulse::{DeviceInfo, PulseClient, StreamInfo, Volume},
    selection,
};

/// Sampling window used to decide whether a sink input is audible.
const PEAK_WINDOW: Duration = Duration::from_millis(90);

/// Runs one volume adjustment according to the parsed CLI arguments.
///
/// # Errors
/// Returns error on invalid patterns or failed PulseAudio communication.
/// Notification problems are logged, never fatal.
pub async fn run(cli: &Cli, volume_change: f64) -> Result<(), Error> {
    let patterns = compile_patterns(&cli.patterns)?;
    let mut client = PulseClient::connect(APP_NAME)?;

    let streams = client.playback_streams()?;
    let prioritized = selection::filter_by_patterns(streams, &patterns);

    let target = if cli.filter_active {
        selection::first_audible(&prioritized, |stream| {
            client
                .peak_sample(stream.index, PEAK_WINDOW)
                .map(|peak| peak > 0.0)
        })?
    } else {
        prioritized.into_iter().next()
    };

    match target {
        Some(stream) => adjust_stream(&mut client, &stream, volume_change, cli).await,
        None if cli.default_to_sink => {
            let device = client.default_output()?;
            adjust_device(&mut client, &device, volume_change, cli).await
        }
        None => {
            debug!("no sink input selected and sink fallback is disabled");
            Ok(())
        }
    }
}

/// Applies the delta to a sink input and reports the change.
async fn adjust_stream(
    client: &mut PulseClient,
    stream: &StreamInfo,
    volume_change: f64,
    cli: &Cli,
) -> Result<(), Error> {
    let volume = stream.volume.with_flat_delta(volume_change);
    if !cli.dry_run {
        client.set_stream_volume(stream.index, &volume)?;
    }
    info!(
        "changing sink input volume for {} by {:+.2} to {:.0}%",
        stream.client_name,
        volume_change,
        volume.value_flat() * 100.0
    );

    if cli.notify {
        let notification = Notification {
            summary: "Sink Input Volume".to_string(),
            body: notification_body(&stream.client_name, volume_change, &volume, cli),
            progress: Some(progress_hint(&volume)),
            id_file: cli
                .notify_absolute
                .then(|| notify::sink_input_id_file(stream.index)),
        };
        show(&notification).await;
    }
    Ok(())
}

/// Applies the delta to the default sink and reports the change.
async fn adjust_device(
    client: &mut PulseClient,
    device: &DeviceInfo,
    volume_change: f64,
    cli: &Cli,
) -> Result<(), Error> {
    let volume = device.volume.with_flat_delta(volume_change);
    if !cli.dry_run {
        client.set_device_volume(device.index, &volume)?;
    }
    info!(
        "changing sink volume for {} by {:+.2} to {:.0}%",
        device.description,
        volume_change,
        volume.value_flat() * 100.0
    );

    if cli.notify {
        let notification = Notification {
            summary: "Sink Volume".to_string(),
            body: notification_body(&device.description, volume_change, &volume, cli),
            progress: Some(progress_hint(&volume)),
            id_file: cli.notify_absolute.then(|| notify::sink_id_file(device.index)),
        };
        show(&notification).await;
    }
    Ok(())
}

fn compile_patterns(patterns: &[String]) -> Result<Vec<Regex>, Error> {
    patterns
        .iter()
        .map(|pattern| {
            Regex::new(pattern).map_err(|source| Error::Pattern {
                pattern: pattern.clone(),
                source,
            })
        })
        .collect()
}

/// Relative body shows the delta, absolute body the resulting volume.
fn notification_body(label: &str, volume_change: f64, volume: &Volume, cli: &Cli) -> String {
    if cli.notify_absolute {
        format!("{:.0}% for {label}", volume.value_flat() * 100.0)
    } else {
        format!("{volume_change:+.2} for {label}")
    }
}

/// Maps the 0.0..=2.0 working range onto the 0..=100 progress bar.
fn progress_hint(volume: &Volume) -> i32 {
    ((volume.value_flat() * 50.0).round() as i32).clamp(0, 100)
}

async fn show(notification: &Notification) {
    if let Err(e) = notify::send(notification).await {
        warn!("could not show notification, is a notification daemon running? ({e})");
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use clap::Parser;

    use super::*;

    fn cli(args: &[&str]) -> Cli {
        let mut full = vec!["smartvol", "0.05"];
        full.extend_from_slice(args);
        Cli::try_parse_from(full).unwrap()
    }

    #[test]
    fn relative_body_shows_signed_delta() {
        let volume = Volume::new(vec![1.05]);
        let body = notification_body("Firefox", -0.05, &volume, &cli(&[]));
        assert_eq!(body, "-0.05 for Firefox");
    }

    #[test]
    fn absolute_body_shows_resulting_percentage() {
        let volume = Volume::new(vec![1.05]);
        let body = notification_body("Firefox", -0.05, &volume, &cli(&["--notify-absolute"]));
        assert_eq!(body, "105% for Firefox");
    }

    #[test]
    fn progress_hint_scales_the_working_range() {
        assert_eq!(progress_hint(&Volume::new(vec![0.0])), 0);
        assert_eq!(progress_hint(&Volume::new(vec![1.0])), 50);
        assert_eq!(progress_hint(&Volume::new(vec![2.0])), 100);
        assert_eq!(progress_hint(&Volume::new(vec![4.0])), 100);
    }

    #[test]
    fn invalid_pattern_is_reported_with_its_source() {
        let error = compile_patterns(&["[".to_string()]).unwrap_err();
        assert!(matches!(error, Error::Pattern { pattern, .. } if pattern == "["));
    }

    #[test]
    fn valid_patterns_compile_in_order() {
        let patterns = compile_patterns(&["Firefox".to_string(), String::new()]).unwrap();
        assert_eq!(patterns.len(), 2);
        assert_eq!(patterns[0].as_str(), "Firefox");
    }
}
