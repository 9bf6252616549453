//! End-to-end selection behavior against a mocked peak probe.

#![allow(clippy::unwrap_used)]

use regex::Regex;
use smartvol::pulse::{DeviceIndex, StreamIndex, StreamInfo, Volume};
use smartvol::selection::{filter_by_patterns, first_audible};

fn stream(index: u32, client_name: &str, corked: bool) -> StreamInfo {
    StreamInfo {
        index: StreamIndex(index),
        name: format!("playback-{index}"),
        client_name: client_name.to_string(),
        device_index: DeviceIndex(0),
        volume: Volume::new(vec![1.0, 1.0]),
        muted: false,
        corked,
    }
}

fn patterns(raw: &[&str]) -> Vec<Regex> {
    raw.iter().map(|p| Regex::new(p).unwrap()).collect()
}

#[test]
fn prioritized_stream_wins_when_audible() {
    let streams = vec![
        stream(10, "Spotify", false),
        stream(11, "Firefox", false),
        stream(12, "mpv", false),
    ];
    let prioritized = filter_by_patterns(streams, &patterns(&["Firefox", ""]));

    // Everything is making noise; the pattern priority decides.
    let picked = first_audible(&prioritized, |_| Ok::<_, ()>(true))
        .unwrap()
        .unwrap();
    assert_eq!(picked.client_name, "Firefox");
}

#[test]
fn silent_priority_stream_yields_to_audible_catch_all() {
    let streams = vec![stream(10, "Spotify", false), stream(11, "Firefox", false)];
    let prioritized = filter_by_patterns(streams, &patterns(&["Firefox", ""]));

    let picked = first_audible(&prioritized, |s| Ok::<_, ()>(s.client_name == "Spotify"))
        .unwrap()
        .unwrap();
    assert_eq!(picked.client_name, "Spotify");
}

#[test]
fn corked_priority_stream_is_passed_over_without_probing() {
    let streams = vec![stream(10, "Firefox", true), stream(11, "Spotify", false)];
    let prioritized = filter_by_patterns(streams, &patterns(&["Firefox", "Spotify"]));

    let mut probes = 0;
    let picked = first_audible(&prioritized, |_| {
        probes += 1;
        Ok::<_, ()>(true)
    })
    .unwrap()
    .unwrap();
    assert_eq!(picked.client_name, "Spotify");
    assert_eq!(probes, 1);
}

#[test]
fn unmatched_streams_leave_no_target() {
    let streams = vec![stream(10, "Spotify", false)];
    let prioritized = filter_by_patterns(streams, &patterns(&["Firefox"]));
    assert!(prioritized.is_empty());
    assert!(
        first_audible(&prioritized, |_| Ok::<_, ()>(true))
            .unwrap()
            .is_none()
    );
}
