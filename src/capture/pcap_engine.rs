//! libpcap-backed capture engine

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use pcap::{Active, Capture};
use tracing::{debug, error, info, warn};

use super::{CaptureEngine, Device, RawFrame};
use crate::error::EngineError;

/// Default snapshot length (maximum bytes per packet)
const DEFAULT_SNAPLEN: i32 = 65535;

/// Read timeout; bounds how long the capture thread takes to notice a stop.
const DEFAULT_TIMEOUT_MS: i32 = 100;

/// Released buffers kept around for reuse.
const MAX_POOLED_BUFFERS: usize = 256;

/// Configuration for a libpcap capture session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureConfig {
    /// Maximum bytes to capture per packet
    pub snaplen: i32,
    /// Read timeout in milliseconds
    pub timeout_ms: i32,
    /// Enable promiscuous mode
    pub promiscuous: bool,
    /// Deliver packets as soon as they arrive
    pub immediate_mode: bool,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            snaplen: DEFAULT_SNAPLEN,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            promiscuous: true,
            immediate_mode: true,
        }
    }
}

/// State shared between the engine handle and its capture thread.
#[derive(Default)]
struct Shared {
    capturing: AtomicBool,
    queue: Mutex<VecDeque<RawFrame>>,
    pool: Mutex<Vec<Vec<u8>>>,
}

impl Shared {
    fn take_buffer(&self) -> Vec<u8> {
        lock(&self.pool).pop().unwrap_or_default()
    }

    fn recycle(&self, mut buffer: Vec<u8>) {
        buffer.clear();
        let mut pool = lock(&self.pool);
        if pool.len() < MAX_POOLED_BUFFERS {
            pool.push(buffer);
        }
    }
}

/// Capture engine that runs libpcap on a dedicated thread and queues frames
/// for non-blocking retrieval.
pub struct PcapEngine {
    config: CaptureConfig,
    shared: Arc<Shared>,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl PcapEngine {
    pub fn new(config: CaptureConfig) -> Self {
        Self {
            config,
            shared: Arc::new(Shared::default()),
            worker: Mutex::new(None),
        }
    }

    fn open(&self, device_name: &str) -> Result<Capture<Active>, EngineError> {
        let open_error = |e: pcap::Error| EngineError::Open {
            device: device_name.to_string(),
            reason: e.to_string(),
        };

        debug!(device = device_name, config = ?self.config, "opening pcap capture");

        Capture::from_device(device_name)
            .map_err(open_error)?
            .promisc(self.config.promiscuous)
            .snaplen(self.config.snaplen)
            .timeout(self.config.timeout_ms)
            .immediate_mode(self.config.immediate_mode)
            .open()
            .map_err(open_error)
    }
}

impl CaptureEngine for PcapEngine {
    fn list_devices(&self) -> Result<Vec<Device>, EngineError> {
        let devices =
            pcap::Device::list().map_err(|e| EngineError::Enumeration(e.to_string()))?;

        Ok(devices
            .into_iter()
            .map(|d| Device {
                description: d.desc.unwrap_or_default(),
                name: d.name,
            })
            .collect())
    }

    fn start_session(&self, device_name: &str) -> Result<(), EngineError> {
        let mut worker = lock(&self.worker);

        if self.shared.capturing.load(Ordering::SeqCst) {
            return Err(EngineError::Busy);
        }

        // A previous thread exits within one read timeout of being stopped.
        if let Some(previous) = worker.take() {
            if previous.join().is_err() {
                warn!("previous capture thread panicked");
            }
        }

        let capture = self.open(device_name)?;
        self.shared.capturing.store(true, Ordering::SeqCst);

        let shared = Arc::clone(&self.shared);
        let spawned = thread::Builder::new()
            .name("pcap-capture".to_string())
            .spawn(move || capture_worker(capture, shared));

        match spawned {
            Ok(handle) => {
                *worker = Some(handle);
                info!(device = device_name, "capture thread launched");
                Ok(())
            }
            Err(e) => {
                self.shared.capturing.store(false, Ordering::SeqCst);
                Err(EngineError::Open {
                    device: device_name.to_string(),
                    reason: format!("could not spawn capture thread: {}", e),
                })
            }
        }
    }

    fn stop_session(&self) {
        if self.shared.capturing.swap(false, Ordering::SeqCst) {
            info!("capture stop requested");
        }
    }

    fn next_frame(&self) -> Option<RawFrame> {
        lock(&self.shared.queue).pop_front()
    }

    fn release_frame(&self, frame: RawFrame) {
        self.shared.recycle(frame.data);
    }
}

fn capture_worker(mut capture: Capture<Active>, shared: Arc<Shared>) {
    debug!("capture loop running");

    while shared.capturing.load(Ordering::SeqCst) {
        match capture.next_packet() {
            Ok(packet) => {
                let mut data = shared.take_buffer();
                data.extend_from_slice(packet.data);

                let frame = RawFrame {
                    data,
                    captured_len: packet.header.caplen,
                    timestamp: capture_time(
                        packet.header.ts.tv_sec as i64,
                        packet.header.ts.tv_usec as i64,
                    ),
                };

                lock(&shared.queue).push_back(frame);
            }
            Err(pcap::Error::TimeoutExpired) => continue,
            Err(e) => {
                error!(error = %e, "packet capture error, ending capture");
                break;
            }
        }
    }

    shared.capturing.store(false, Ordering::SeqCst);
    info!("capture loop finished");
}

fn capture_time(secs: i64, micros: i64) -> SystemTime {
    let total = secs.saturating_mul(1_000_000).saturating_add(micros);
    if total <= 0 {
        return UNIX_EPOCH;
    }
    UNIX_EPOCH + Duration::from_micros(total as u64)
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
