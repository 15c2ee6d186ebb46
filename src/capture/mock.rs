//! In-memory capture engine for tests

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::SystemTime;

use super::{CaptureEngine, Device, RawFrame};
use crate::error::EngineError;

pub(crate) struct MockEngine {
    devices: Result<Vec<Device>, EngineError>,
    reject_start: bool,
    capturing: AtomicBool,
    frames: Mutex<VecDeque<Vec<u8>>>,
    started: Mutex<Vec<String>>,
    stop_calls: AtomicUsize,
    handed_out: AtomicUsize,
    released: AtomicUsize,
}

impl MockEngine {
    pub fn with_devices(devices: Vec<Device>) -> Self {
        Self {
            devices: Ok(devices),
            reject_start: false,
            capturing: AtomicBool::new(false),
            frames: Mutex::new(VecDeque::new()),
            started: Mutex::new(Vec::new()),
            stop_calls: AtomicUsize::new(0),
            handed_out: AtomicUsize::new(0),
            released: AtomicUsize::new(0),
        }
    }

    pub fn failing_enumeration(reason: &str) -> Self {
        Self {
            devices: Err(EngineError::Enumeration(reason.to_string())),
            ..Self::with_devices(Vec::new())
        }
    }

    pub fn rejecting_start(mut self) -> Self {
        self.reject_start = true;
        self
    }

    pub fn push_frame(&self, data: Vec<u8>) {
        self.frames.lock().unwrap().push_back(data);
    }

    pub fn is_capturing(&self) -> bool {
        self.capturing.load(Ordering::SeqCst)
    }

    pub fn started_devices(&self) -> Vec<String> {
        self.started.lock().unwrap().clone()
    }

    pub fn stop_calls(&self) -> usize {
        self.stop_calls.load(Ordering::SeqCst)
    }

    pub fn handed_out(&self) -> usize {
        self.handed_out.load(Ordering::SeqCst)
    }

    pub fn released(&self) -> usize {
        self.released.load(Ordering::SeqCst)
    }
}

pub(crate) fn device(name: &str, description: &str) -> Device {
    Device {
        name: name.to_string(),
        description: description.to_string(),
    }
}

impl CaptureEngine for MockEngine {
    fn list_devices(&self) -> Result<Vec<Device>, EngineError> {
        self.devices.clone()
    }

    fn start_session(&self, device_name: &str) -> Result<(), EngineError> {
        if self.reject_start {
            return Err(EngineError::Open {
                device: device_name.to_string(),
                reason: "permission denied".to_string(),
            });
        }
        if self.capturing.swap(true, Ordering::SeqCst) {
            return Err(EngineError::Busy);
        }
        self.started.lock().unwrap().push(device_name.to_string());
        Ok(())
    }

    fn stop_session(&self) {
        self.stop_calls.fetch_add(1, Ordering::SeqCst);
        self.capturing.store(false, Ordering::SeqCst);
    }

    fn next_frame(&self) -> Option<RawFrame> {
        let data = self.frames.lock().unwrap().pop_front()?;
        self.handed_out.fetch_add(1, Ordering::SeqCst);
        Some(RawFrame {
            captured_len: data.len() as u32,
            data,
            timestamp: SystemTime::now(),
        })
    }

    fn release_frame(&self, _frame: RawFrame) {
        self.released.fetch_add(1, Ordering::SeqCst);
    }
}
