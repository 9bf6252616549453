use std::{
    thread,
    time::{Duration, Instant},
};

use libpulse_binding::{
    def::BufferAttr,
    sample::{Format, Spec},
    stream::{FlagSet as StreamFlags, PeekResult, State as StreamState, Stream},
};
use tracing::debug;

use super::{PulseClient, PulseError, StreamIndex, iterate};

/// Sample rate of the monitor stream. One fragment per sample keeps the
/// probe cheap while still delivering a couple of peaks inside the window.
const PEAK_RATE: u32 = 25;

/// Pause between non-blocking mainloop passes while sampling.
const POLL_INTERVAL: Duration = Duration::from_millis(5);

impl PulseClient {
    /// Probes the peak level of a sink input over the given window.
    ///
    /// Attaches a peak-detect monitor stream to the sink input, collects
    /// samples for `window` and returns the largest absolute sample seen.
    /// 0.0 means the stream produced no audible output during the window.
    ///
    /// # Errors
    /// Returns error if the monitor stream cannot be created or fails while
    /// sampling.
    pub fn peak_sample(
        &mut self,
        stream: StreamIndex,
        window: Duration,
    ) -> Result<f32, PulseError> {
        let spec = Spec {
            format: Format::F32le,
            channels: 1,
            rate: PEAK_RATE,
        };
        let mut monitor = Stream::new(&mut self.context, "peak detect", &spec, None)
            .ok_or_else(|| {
                PulseError::OperationFailed("monitor stream allocation failed".to_string())
            })?;

        monitor.set_monitor_stream(stream.0).map_err(|e| {
            PulseError::OperationFailed(format!(
                "attaching monitor to sink input {} failed: {e}",
                stream.0
            ))
        })?;

        let attr = BufferAttr {
            maxlength: u32::MAX,
            tlength: u32::MAX,
            prebuf: u32::MAX,
            minreq: u32::MAX,
            fragsize: 4,
        };
        monitor
            .connect_record(
                None,
                Some(&attr),
                StreamFlags::PEAK_DETECT
                    | StreamFlags::ADJUST_LATENCY
                    | StreamFlags::DONT_INHIBIT_AUTO_SUSPEND,
            )
            .map_err(|e| {
                PulseError::OperationFailed(format!("monitor stream connect failed: {e}"))
            })?;

        loop {
            iterate(&mut self.mainloop, true)?;
            match monitor.get_state() {
                StreamState::Ready => break,
                StreamState::Failed | StreamState::Terminated => {
                    return Err(PulseError::OperationFailed(
                        "monitor stream failed before becoming ready".to_string(),
                    ));
                }
                _ => {}
            }
        }

        // Non-blocking passes so a silent monitor source cannot stall the
        // probe past its window.
        let deadline = Instant::now() + window;
        let mut peak = 0.0f32;
        while Instant::now() < deadline {
            iterate(&mut self.mainloop, false)?;
            drain_peaks(&mut monitor, &mut peak)?;
            thread::sleep(POLL_INTERVAL);
        }

        let _ = monitor.disconnect();
        debug!("peak for sink input {}: {peak:.3}", stream.0);
        Ok(peak)
    }
}

/// Reads all buffered fragments from the monitor stream, folding the
/// largest absolute sample into `peak`.
fn drain_peaks(monitor: &mut Stream, peak: &mut f32) -> Result<(), PulseError> {
    loop {
        let fragment_read = match monitor
            .peek()
            .map_err(|e| PulseError::OperationFailed(format!("monitor read failed: {e}")))?
        {
            PeekResult::Empty => break,
            PeekResult::Hole(_) => true,
            PeekResult::Data(data) => {
                for sample in data.chunks_exact(4) {
                    let mut bytes = [0u8; 4];
                    bytes.copy_from_slice(sample);
                    *peak = peak.max(f32::from_le_bytes(bytes).abs());
                }
                true
            }
        };
        if fragment_read {
            monitor.discard().map_err(|e| {
                PulseError::OperationFailed(format!("monitor buffer discard failed: {e}"))
            })?;
        }
    }
    Ok(())
}
