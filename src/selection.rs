//! Sink input selection: pattern-priority filtering and audibility scan.

use regex::Regex;
use tracing::debug;

use crate::pulse::StreamInfo;

/// Orders streams by pattern priority.
///
/// Patterns are applied in order; every remaining stream whose client name
/// matches at the start moves into the result. A matched stream leaves the
/// pool, so later patterns cannot claim it again. The result is therefore
/// ordered by pattern priority, stable within one pattern. An empty pattern
/// matches any client name and works as a trailing catch-all.
pub fn filter_by_patterns(streams: Vec<StreamInfo>, patterns: &[Regex]) -> Vec<StreamInfo> {
    let mut pool = streams;
    let mut prioritized = Vec::with_capacity(pool.len());

    for pattern in patterns {
        debug!("pattern: {:?}", pattern.as_str());
        let mut i = 0;
        while i < pool.len() {
            if matches_at_start(pattern, &pool[i].client_name) {
                let stream = pool.remove(i);
                debug!("  sink input matched: {}", stream.client_name);
                prioritized.push(stream);
            } else {
                debug!("  sink input skipped: {}", pool[i].client_name);
                i += 1;
            }
        }
    }

    prioritized
}

/// Returns the first stream in priority order that is currently audible.
///
/// Corked streams are skipped without probing. `probe` decides audibility
/// for the rest; its errors abort the scan.
///
/// # Errors
/// Propagates the first probe error.
pub fn first_audible<E, F>(streams: &[StreamInfo], mut probe: F) -> Result<Option<StreamInfo>, E>
where
    F: FnMut(&StreamInfo) -> Result<bool, E>,
{
    for stream in streams {
        if stream.corked {
            debug!("sink input {} is corked, skipping", stream.client_name);
            continue;
        }
        if probe(stream)? {
            return Ok(Some(stream.clone()));
        }
    }
    Ok(None)
}

/// `re.match` style anchoring: the match must begin at the first character.
fn matches_at_start(pattern: &Regex, name: &str) -> bool {
    pattern.find(name).is_some_and(|m| m.start() == 0)
}
