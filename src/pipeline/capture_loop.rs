use std::io;
use std::sync::mpsc::{SendError, SyncSender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use tracing::{debug, info, trace};

use super::backoff::{IdleBackoff, RealSleeper, Sleeper};
use super::session::CaptureSession;
use crate::packet::{summarize, PacketSummary};

/// Outcome of a single poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollStep {
    Delivered,
    Idle,
}

/// Takes at most one frame from the session, summarizes it, releases it and
/// forwards the summary. Blocks while the hand-off channel is full.
///
/// Fails only when the receiving side of the channel is gone.
pub fn poll_once(
    session: &CaptureSession,
    tx: &SyncSender<PacketSummary>,
) -> Result<PollStep, SendError<PacketSummary>> {
    let Some(frame) = session.poll_frame() else {
        return Ok(PollStep::Idle);
    };

    trace!(
        captured_len = frame.captured_len(),
        captured_at = ?frame.timestamp(),
        "polled frame"
    );
    let summary = summarize(frame.data());
    drop(frame);

    tx.send(summary)?;
    Ok(PollStep::Delivered)
}

/// Drains frames from `session` into `tx` until the receiver hangs up,
/// sleeping between empty polls. Returns the number of summaries delivered.
pub fn run_polling_loop(
    session: &CaptureSession,
    tx: SyncSender<PacketSummary>,
    mut backoff: IdleBackoff,
    sleeper: &dyn Sleeper,
) -> u64 {
    let mut delivered = 0u64;

    info!(device = %session.device().name, "polling loop started");

    loop {
        match poll_once(session, &tx) {
            Ok(PollStep::Delivered) => {
                delivered += 1;
                backoff.reset();
            }
            Ok(PollStep::Idle) => sleeper.sleep(backoff.next_delay()),
            Err(_) => {
                debug!("hand-off channel closed");
                break;
            }
        }
    }

    info!(delivered, "polling loop finished");
    delivered
} // run_polling_loop

/// Runs the polling loop on its own thread.
pub fn spawn_polling_loop(
    session: Arc<CaptureSession>,
    tx: SyncSender<PacketSummary>,
    backoff: IdleBackoff,
) -> io::Result<JoinHandle<u64>> {
    thread::Builder::new()
        .name("frame-poller".to_string())
        .spawn(move || run_polling_loop(&session, tx, backoff, &RealSleeper))
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc;
    use std::time::Duration;

    use super::*;
    use crate::capture::mock::{device, MockEngine};
    use crate::packet::fixtures::{arp_frame, tcp_frame, udp_frame};
    use crate::packet::Protocol;
    use crate::pipeline::backoff::MockSleeper;
    use crate::pipeline::session::SessionManager;

    fn started(engine: &Arc<MockEngine>) -> CaptureSession {
        SessionManager::new(engine.clone())
            .start(device("eth0", "test"))
            .unwrap()
    }

    #[test]
    fn test_poll_once_idle_when_no_frame() {
        let engine = Arc::new(MockEngine::with_devices(vec![device("eth0", "test")]));
        let session = started(&engine);
        let (tx, rx) = mpsc::sync_channel(4);

        assert_eq!(poll_once(&session, &tx).unwrap(), PollStep::Idle);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_poll_once_delivers_summary_and_releases() {
        let engine = Arc::new(MockEngine::with_devices(vec![device("eth0", "test")]));
        let session = started(&engine);
        let (tx, rx) = mpsc::sync_channel(4);
        engine.push_frame(tcp_frame(443, 50000));

        assert_eq!(poll_once(&session, &tx).unwrap(), PollStep::Delivered);
        assert_eq!(engine.released(), 1);

        let summary = rx.try_recv().unwrap();
        assert_eq!(summary.protocol, Protocol::Tcp);
        assert_eq!(summary.ports, Some((443, 50000)));
    }

    #[test]
    fn test_poll_once_releases_when_receiver_gone() {
        let engine = Arc::new(MockEngine::with_devices(vec![device("eth0", "test")]));
        let session = started(&engine);
        let (tx, rx) = mpsc::sync_channel(1);
        drop(rx);
        engine.push_frame(arp_frame());

        assert!(poll_once(&session, &tx).is_err());
        assert_eq!(engine.handed_out(), 1);
        assert_eq!(engine.released(), 1);
    }

    #[test]
    fn test_loop_preserves_order_and_exits_on_hangup() {
        let engine = Arc::new(MockEngine::with_devices(vec![device("eth0", "test")]));
        let session = Arc::new(started(&engine));

        let frames = vec![tcp_frame(1, 2), udp_frame(3, 4), arp_frame(), tcp_frame(5, 6)];
        for frame in &frames {
            engine.push_frame(frame.clone());
        }

        // Capacity 1 makes the loop wait on the receiver between items.
        let (tx, rx) = mpsc::sync_channel(1);
        let loop_session = Arc::clone(&session);
        let handle = thread::spawn(move || {
            let sleeper = MockSleeper::new();
            run_polling_loop(&loop_session, tx, IdleBackoff::default(), &sleeper)
        });

        let received: Vec<PacketSummary> = (0..frames.len())
            .map(|_| rx.recv_timeout(Duration::from_secs(5)).unwrap())
            .collect();

        let lengths: Vec<usize> = received.iter().map(|s| s.length).collect();
        let expected: Vec<usize> = frames.iter().map(Vec::len).collect();
        assert_eq!(lengths, expected);

        let protocols: Vec<Protocol> = received.iter().map(|s| s.protocol).collect();
        assert_eq!(
            protocols,
            vec![Protocol::Tcp, Protocol::Udp, Protocol::Other, Protocol::Tcp]
        );

        drop(rx);
        engine.push_frame(arp_frame());

        let delivered = handle.join().unwrap();
        assert_eq!(delivered, frames.len() as u64);
        assert_eq!(engine.handed_out(), frames.len() + 1);
        assert_eq!(engine.released(), engine.handed_out());
    }

    #[test]
    fn test_loop_sleeps_with_backoff_when_idle() {
        let engine = Arc::new(MockEngine::with_devices(vec![device("eth0", "test")]));
        let session = started(&engine);
        let (tx, rx) = mpsc::sync_channel(1);
        drop(rx);

        // Three idle polls, then a frame whose send fails and ends the loop.
        struct FeedAfter<'a> {
            inner: MockSleeper,
            engine: &'a MockEngine,
        }
        impl Sleeper for FeedAfter<'_> {
            fn sleep(&self, duration: Duration) {
                self.inner.sleep(duration);
                if self.inner.calls().len() == 3 {
                    self.engine.push_frame(udp_frame(1, 1));
                }
            }
        }

        let sleeper = FeedAfter {
            inner: MockSleeper::new(),
            engine: &engine,
        };
        let backoff = IdleBackoff::new(Duration::from_millis(10), Duration::from_millis(30));
        let delivered = run_polling_loop(&session, tx, backoff, &sleeper);

        assert_eq!(delivered, 0);
        assert_eq!(
            sleeper.inner.calls(),
            vec![
                Duration::from_millis(10),
                Duration::from_millis(20),
                Duration::from_millis(30),
            ]
        );
        assert_eq!(engine.released(), 1);
    }
}
