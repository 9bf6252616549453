//! Synchronous PulseAudio client.
//!
//! Drives the standard (blocking) mainloop; every call runs the loop until
//! the underlying server operation completes. Sufficient for a one-shot
//! tool, no background monitoring involved.

/// Client error types
pub mod error;
/// Peak-sample probe for audibility detection
pub mod peak;
/// Stream and device records
pub mod types;
/// Volume levels and server conversions
pub mod volume;

pub use error::PulseError;
pub use types::{DeviceIndex, DeviceInfo, StreamIndex, StreamInfo};
pub use volume::{Volume, VolumeError};

use std::{
    cell::{Cell, RefCell},
    collections::HashMap,
    rc::Rc,
};

use libpulse_binding::{
    callbacks::ListResult,
    context::{Context, FlagSet as ContextFlags, State as ContextState},
    mainloop::standard::{IterateResult, Mainloop},
    operation::{Operation, State as OperationState},
};
use tracing::debug;

/// Connection to a PulseAudio server.
pub struct PulseClient {
    mainloop: Mainloop,
    context: Context,
}

impl PulseClient {
    /// Connects to the default server and waits for the context to become
    /// ready.
    ///
    /// # Errors
    /// Returns error if the connection cannot be established.
    pub fn connect(app_name: &str) -> Result<Self, PulseError> {
        let mut mainloop = Mainloop::new()
            .ok_or_else(|| PulseError::ConnectionFailed("mainloop allocation failed".to_string()))?;
        let mut context = Context::new(&mainloop, app_name)
            .ok_or_else(|| PulseError::ConnectionFailed("context allocation failed".to_string()))?;

        context
            .connect(None, ContextFlags::NOFLAGS, None)
            .map_err(|e| PulseError::ConnectionFailed(format!("connection failed: {e}")))?;

        loop {
            iterate(&mut mainloop, true)?;
            match context.get_state() {
                ContextState::Ready => break,
                ContextState::Failed | ContextState::Terminated => {
                    return Err(PulseError::ConnectionFailed(
                        "context failed before becoming ready".to_string(),
                    ));
                }
                _ => {}
            }
        }

        Ok(Self { mainloop, context })
    }

    /// Lists playback streams (sink inputs), with client names resolved.
    ///
    /// # Errors
    /// Returns error if the server-side listing fails.
    pub fn playback_streams(&mut self) -> Result<Vec<StreamInfo>, PulseError> {
        let clients = self.clients()?;

        let streams = Rc::new(RefCell::new(Vec::new()));
        let failed = Rc::new(Cell::new(false));
        let op = {
            let streams = Rc::clone(&streams);
            let failed = Rc::clone(&failed);
            self.context
                .introspect()
                .get_sink_input_info_list(move |result| match result {
                    ListResult::Item(info) => {
                        let client_name = info
                            .client
                            .and_then(|client| clients.get(&client).cloned())
                            .or_else(|| info.proplist.get_str("application.name"))
                            .unwrap_or_default();
                        streams.borrow_mut().push(StreamInfo {
                            index: StreamIndex(info.index),
                            name: info.name.as_ref().map(|s| s.to_string()).unwrap_or_default(),
                            client_name,
                            device_index: DeviceIndex(info.sink),
                            volume: volume::from_pulse(&info.volume),
                            muted: info.mute,
                            corked: info.corked,
                        });
                    }
                    ListResult::End => {}
                    ListResult::Error => failed.set(true),
                })
        };
        self.wait_for(op)?;

        if failed.get() {
            return Err(PulseError::OperationFailed(
                "sink input listing failed".to_string(),
            ));
        }
        let streams = streams.take();
        debug!("server reports {} sink inputs", streams.len());
        Ok(streams)
    }

    /// Looks up the default sink.
    ///
    /// # Errors
    /// Returns error if the server reports no default sink or the lookup
    /// fails.
    pub fn default_output(&mut self) -> Result<DeviceInfo, PulseError> {
        let default_sink = Rc::new(RefCell::new(None::<String>));
        let op = {
            let default_sink = Rc::clone(&default_sink);
            self.context.introspect().get_server_info(move |info| {
                *default_sink.borrow_mut() =
                    info.default_sink_name.as_ref().map(|s| s.to_string());
            })
        };
        self.wait_for(op)?;
        let sink_name = default_sink.take().ok_or(PulseError::NoDefaultSink)?;

        let device = Rc::new(RefCell::new(None::<DeviceInfo>));
        let failed = Rc::new(Cell::new(false));
        let op = {
            let device = Rc::clone(&device);
            let failed = Rc::clone(&failed);
            self.context
                .introspect()
                .get_sink_info_by_name(&sink_name, move |result| match result {
                    ListResult::Item(info) => {
                        *device.borrow_mut() = Some(DeviceInfo {
                            index: DeviceIndex(info.index),
                            name: info.name.as_ref().map(|s| s.to_string()).unwrap_or_default(),
                            description: info
                                .description
                                .as_ref()
                                .map(|s| s.to_string())
                                .unwrap_or_default(),
                            volume: volume::from_pulse(&info.volume),
                        });
                    }
                    ListResult::End => {}
                    ListResult::Error => failed.set(true),
                })
        };
        self.wait_for(op)?;

        if failed.get() {
            return Err(PulseError::OperationFailed(format!(
                "lookup of sink {sink_name} failed"
            )));
        }
        device
            .take()
            .ok_or_else(|| PulseError::OperationFailed(format!("sink {sink_name} not found")))
    }

    /// Sets the volume of a sink input.
    ///
    /// # Errors
    /// Returns error if the volume cannot be converted or the server rejects
    /// the change.
    pub fn set_stream_volume(
        &mut self,
        stream: StreamIndex,
        volume: &Volume,
    ) -> Result<(), PulseError> {
        let channel_volumes = volume::to_pulse(volume)?;
        let succeeded = Rc::new(Cell::new(false));
        let op = {
            let succeeded = Rc::clone(&succeeded);
            self.context.introspect().set_sink_input_volume(
                stream.0,
                &channel_volumes,
                Some(Box::new(move |success| succeeded.set(success))),
            )
        };
        self.wait_for(op)?;

        if succeeded.get() {
            Ok(())
        } else {
            Err(PulseError::OperationFailed(format!(
                "server rejected volume change for sink input {}",
                stream.0
            )))
        }
    }

    /// Sets the volume of a sink.
    ///
    /// # Errors
    /// Returns error if the volume cannot be converted or the server rejects
    /// the change.
    pub fn set_device_volume(
        &mut self,
        device: DeviceIndex,
        volume: &Volume,
    ) -> Result<(), PulseError> {
        let channel_volumes = volume::to_pulse(volume)?;
        let succeeded = Rc::new(Cell::new(false));
        let op = {
            let succeeded = Rc::clone(&succeeded);
            self.context.introspect().set_sink_volume_by_index(
                device.0,
                &channel_volumes,
                Some(Box::new(move |success| succeeded.set(success))),
            )
        };
        self.wait_for(op)?;

        if succeeded.get() {
            Ok(())
        } else {
            Err(PulseError::OperationFailed(format!(
                "server rejected volume change for sink {}",
                device.0
            )))
        }
    }

    /// Maps client indices to client names.
    fn clients(&mut self) -> Result<HashMap<u32, String>, PulseError> {
        let clients = Rc::new(RefCell::new(HashMap::new()));
        let failed = Rc::new(Cell::new(false));
        let op = {
            let clients = Rc::clone(&clients);
            let failed = Rc::clone(&failed);
            self.context
                .introspect()
                .get_client_info_list(move |result| match result {
                    ListResult::Item(client) => {
                        if let Some(name) = client.name.as_ref() {
                            clients.borrow_mut().insert(client.index, name.to_string());
                        }
                    }
                    ListResult::End => {}
                    ListResult::Error => failed.set(true),
                })
        };
        self.wait_for(op)?;

        if failed.get() {
            return Err(PulseError::OperationFailed(
                "client listing failed".to_string(),
            ));
        }
        Ok(clients.take())
    }

    /// Runs the mainloop until the given operation completes.
    fn wait_for<F: ?Sized>(&mut self, operation: Operation<F>) -> Result<(), PulseError> {
        loop {
            iterate(&mut self.mainloop, true)?;
            match operation.get_state() {
                OperationState::Done => return Ok(()),
                OperationState::Cancelled => {
                    return Err(PulseError::OperationFailed(
                        "operation cancelled by server".to_string(),
                    ));
                }
                OperationState::Running => {}
            }
        }
    }
}

impl Drop for PulseClient {
    fn drop(&mut self) {
        self.context.disconnect();
    }
}

/// Single mainloop iteration, surfacing loop termination as an error.
fn iterate(mainloop: &mut Mainloop, block: bool) -> Result<(), PulseError> {
    match mainloop.iterate(block) {
        IterateResult::Success(_) => Ok(()),
        IterateResult::Quit(_) => Err(PulseError::ConnectionFailed(
            "mainloop quit unexpectedly".to_string(),
        )),
        IterateResult::Err(e) => Err(PulseError::ConnectionFailed(format!(
            "mainloop iteration failed: {e}"
        ))),
    }
}
