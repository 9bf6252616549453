use libpulse_binding::volume::{ChannelVolumes, Volume as PulseVolume};

/// Multi-channel volume where 1.0 is normal volume (100%).
///
/// Levels are clamped to 0.0..=4.0, PulseAudio's amplification ceiling.
#[derive(Debug, Clone, PartialEq)]
pub struct Volume {
    volumes: Vec<f64>,
}

/// Volume conversion errors
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum VolumeError {
    /// Channel count outside what the server can represent
    #[error("volume must have between 1 and 32 channels, got {0}")]
    InvalidChannelCount(usize),
}

impl Volume {
    /// Maximum representable level (400%)
    pub const MAX: f64 = 4.0;

    /// Creates a volume from per-channel levels, clamping each to 0.0..=4.0.
    pub fn new(volumes: Vec<f64>) -> Self {
        let volumes = volumes
            .into_iter()
            .map(|level| {
                if level > Self::MAX {
                    tracing::warn!("volume {level} clamped to maximum ({})", Self::MAX);
                } else if level < 0.0 {
                    tracing::warn!("negative volume {level} clamped to 0.0");
                }
                level.clamp(0.0, Self::MAX)
            })
            .collect();
        Self { volumes }
    }

    /// Average level across all channels.
    pub fn value_flat(&self) -> f64 {
        if self.volumes.is_empty() {
            0.0
        } else {
            self.volumes.iter().sum::<f64>() / self.volumes.len() as f64
        }
    }

    /// Returns a flat volume at the average level plus `delta`.
    ///
    /// Every channel of the result carries the same level; channel balance
    /// is intentionally discarded, matching a flat adjustment.
    pub fn with_flat_delta(&self, delta: f64) -> Self {
        let channels = self.volumes.len().max(1);
        Self::new(vec![self.value_flat() + delta; channels])
    }

    /// Number of channels.
    pub fn channels(&self) -> usize {
        self.volumes.len()
    }

    /// Per-channel levels.
    pub fn as_slice(&self) -> &[f64] {
        &self.volumes
    }
}

/// Converts server channel volumes into a [`Volume`].
pub(crate) fn from_pulse(channel_volumes: &ChannelVolumes) -> Volume {
    let normal = f64::from(PulseVolume::NORMAL.0);
    let volumes = (0..channel_volumes.len())
        .map(|channel| f64::from(channel_volumes.get()[usize::from(channel)].0) / normal)
        .collect();
    Volume::new(volumes)
}

/// Converts a [`Volume`] into server channel volumes.
///
/// The result is flat: every channel is set to the average level, which is
/// all the volume-setting paths of this tool ever write.
///
/// # Errors
/// Returns an error if the channel count cannot be represented.
pub(crate) fn to_pulse(volume: &Volume) -> Result<ChannelVolumes, VolumeError> {
    let channels = u8::try_from(volume.channels())
        .map_err(|_| VolumeError::InvalidChannelCount(volume.channels()))?;
    if channels == 0 {
        return Err(VolumeError::InvalidChannelCount(0));
    }

    let raw = (volume.value_flat() * f64::from(PulseVolume::NORMAL.0)) as u32;
    let mut channel_volumes = ChannelVolumes::default();
    channel_volumes.set(channels, PulseVolume(raw));
    Ok(channel_volumes)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn value_flat_averages_channels() {
        let volume = Volume::new(vec![0.5, 1.5]);
        assert!((volume.value_flat() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn value_flat_of_empty_volume_is_zero() {
        let volume = Volume::new(vec![]);
        assert_eq!(volume.value_flat(), 0.0);
    }

    #[test]
    fn new_clamps_out_of_range_levels() {
        let volume = Volume::new(vec![-0.3, 5.0]);
        assert_eq!(volume.as_slice(), &[0.0, Volume::MAX]);
    }

    #[test]
    fn with_flat_delta_raises_average() {
        let volume = Volume::new(vec![0.8, 1.2]).with_flat_delta(0.05);
        assert_eq!(volume.channels(), 2);
        assert!((volume.value_flat() - 1.05).abs() < 1e-9);
    }

    #[test]
    fn with_flat_delta_clamps_at_zero() {
        let volume = Volume::new(vec![0.1]).with_flat_delta(-0.5);
        assert_eq!(volume.as_slice(), &[0.0]);
    }

    #[test]
    fn pulse_roundtrip_keeps_flat_level() {
        let volume = Volume::new(vec![1.05, 1.05]);
        let channel_volumes = to_pulse(&volume).unwrap();
        let back = from_pulse(&channel_volumes);
        assert_eq!(back.channels(), 2);
        assert!((back.value_flat() - 1.05).abs() < 1e-4);
    }

    #[test]
    fn to_pulse_rejects_zero_channels() {
        let volume = Volume::new(vec![]);
        assert_eq!(
            to_pulse(&volume),
            Err(VolumeError::InvalidChannelCount(0))
        );
    }
}
