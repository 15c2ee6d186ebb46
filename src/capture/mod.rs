//! Capture engine contract
//!
//! The rest of the crate talks to packet capture only through [`CaptureEngine`]:
//! list devices, start a session, take the next frame if one is queued, hand the
//! frame back, stop. [`PcapEngine`] implements it on top of libpcap.

mod pcap_engine;

#[cfg(test)]
pub(crate) mod mock;

pub use pcap_engine::{CaptureConfig, PcapEngine};

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// A capture device as reported by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    pub name: String,
    pub description: String,
}

/// A frame owned by the engine's memory.
///
/// Every `RawFrame` returned by [`CaptureEngine::next_frame`] must go back
/// through [`CaptureEngine::release_frame`].
#[derive(Debug)]
pub struct RawFrame {
    pub data: Vec<u8>,
    pub captured_len: u32,
    pub timestamp: SystemTime,
}

impl Default for RawFrame {
    fn default() -> Self {
        Self {
            data: Vec::new(),
            captured_len: 0,
            timestamp: UNIX_EPOCH,
        }
    }
}

pub trait CaptureEngine: Send + Sync {
    /// Enumerate devices that can be captured on.
    fn list_devices(&self) -> Result<Vec<Device>, EngineError>;

    /// Begin capturing on the named device.
    fn start_session(&self, device_name: &str) -> Result<(), EngineError>;

    /// Stop capturing. Safe to call when nothing is running.
    fn stop_session(&self);

    /// Next queued frame, or `None` straight away if the queue is empty.
    fn next_frame(&self) -> Option<RawFrame>;

    /// Return a frame obtained from [`next_frame`](Self::next_frame).
    fn release_frame(&self, frame: RawFrame);
}
