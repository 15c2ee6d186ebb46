//! Capture session lifecycle
//!
//! [`SessionManager`] wraps a [`CaptureEngine`] and hands out at most one
//! [`CaptureSession`] at a time. Frames leave a session as [`Frame`] guards,
//! which give the underlying engine memory back when dropped.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::SystemTime;

use tracing::{info, trace};

use crate::capture::{CaptureEngine, Device, RawFrame};
use crate::error::{Error, Result};

pub struct SessionManager {
    engine: Arc<dyn CaptureEngine>,
    active: Arc<AtomicBool>,
}

impl SessionManager {
    pub fn new(engine: Arc<dyn CaptureEngine>) -> Self {
        Self {
            engine,
            active: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Lists capture devices. An engine error or an empty list is reported as
    /// [`Error::EngineUnavailable`].
    pub fn list_devices(&self) -> Result<Vec<Device>> {
        let devices = self
            .engine
            .list_devices()
            .map_err(|e| Error::EngineUnavailable(e.to_string()))?;

        if devices.is_empty() {
            return Err(Error::EngineUnavailable(
                "engine reported 0 network devices".to_string(),
            ));
        }

        info!(count = devices.len(), "listed capture devices");
        Ok(devices)
    }

    /// Starts capturing on `device`.
    ///
    /// Fails if a session from this manager is still active or the engine
    /// rejects the device; in both cases nothing is left running.
    pub fn start(&self, device: Device) -> Result<CaptureSession> {
        if self
            .active
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(Error::session_start(
                device.name,
                "another capture session is already active",
            ));
        }

        if let Err(e) = self.engine.start_session(&device.name) {
            self.active.store(false, Ordering::SeqCst);
            return Err(Error::session_start(device.name, e));
        }

        info!(device = %device.name, "capture session started");

        Ok(CaptureSession {
            engine: Arc::clone(&self.engine),
            device,
            active: AtomicBool::new(true),
            manager_active: Arc::clone(&self.active),
        })
    }

    pub fn has_active_session(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }
}

/// Handle for one running capture. Stops the engine when dropped.
pub struct CaptureSession {
    engine: Arc<dyn CaptureEngine>,
    device: Device,
    active: AtomicBool,
    manager_active: Arc<AtomicBool>,
}

impl CaptureSession {
    pub fn device(&self) -> &Device {
        &self.device
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    /// Takes the next buffered frame without blocking.
    pub fn poll_frame(&self) -> Option<Frame<'_>> {
        self.engine.next_frame().map(|raw| Frame {
            engine: self.engine.as_ref(),
            raw,
        })
    }

    /// Stops the capture. Calling it again is a no-op.
    pub fn stop(&self) {
        if self.active.swap(false, Ordering::SeqCst) {
            self.engine.stop_session();
            self.manager_active.store(false, Ordering::SeqCst);
            info!(device = %self.device.name, "capture session stopped");
        }
    }
}

impl Drop for CaptureSession {
    fn drop(&mut self) {
        self.stop();
    }
}

/// A captured frame on loan from the engine.
pub struct Frame<'s> {
    engine: &'s dyn CaptureEngine,
    raw: RawFrame,
}

impl Frame<'_> {
    pub fn data(&self) -> &[u8] {
        &self.raw.data
    }

    pub fn captured_len(&self) -> u32 {
        self.raw.captured_len
    }

    pub fn timestamp(&self) -> SystemTime {
        self.raw.timestamp
    }
}

impl Drop for Frame<'_> {
    fn drop(&mut self) {
        let raw = std::mem::take(&mut self.raw);
        trace!(len = raw.captured_len, "releasing frame");
        self.engine.release_frame(raw);
    }
}
