use std::fmt;
use std::net::IpAddr;

use chrono::{DateTime, Local};

use super::ethernet::decode_frame;

/// Wall-clock format used at the head of every display line.
pub const TIMESTAMP_FORMAT: &str = "%H:%M:%S%.6f";

const NO_ADDRESSES: &str = "Non-IP Packet";
const NO_TRANSPORT: &str = "Non-TCP/UDP";

#[derive(Hash, Eq, PartialEq, Debug, Clone, Copy)]
pub enum Protocol {
    Tcp,
    Udp,
    Other,
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Protocol::Tcp => write!(f, "TCP"),
            Protocol::Udp => write!(f, "UDP"),
            Protocol::Other => write!(f, "Other"),
        }
    }
}

/// One classified frame, ready for the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PacketSummary {
    pub timestamp: DateTime<Local>,
    pub protocol: Protocol,
    pub addresses: Option<(IpAddr, IpAddr)>,
    pub ports: Option<(u16, u16)>,
    pub length: usize,
    pub display_line: String,
}

/// Summarizes a raw Ethernet frame, stamped with the current local time.
///
/// Never fails: truncated or unrecognised frames come back as `Protocol::Other`
/// with placeholder text in the display line.
pub fn summarize(data: &[u8]) -> PacketSummary {
    summarize_at(data, Local::now())
}

/// Same as [`summarize`] with an explicit timestamp.
pub fn summarize_at(data: &[u8], timestamp: DateTime<Local>) -> PacketSummary {
    let headers = decode_frame(data);

    let (protocol, ports) = match headers.transport {
        Some(t) => (t.protocol, Some((t.src_port, t.dst_port))),
        None => (Protocol::Other, None),
    };

    let mut display_line = format!("{} |", timestamp.format(TIMESTAMP_FORMAT));

    match headers.addresses {
        Some((src, dst)) => display_line.push_str(&format!(" {} -> {} |", src, dst)),
        None => display_line.push_str(&format!(" {} |", NO_ADDRESSES)),
    }

    match ports {
        Some((src, dst)) => display_line.push_str(&format!(" {} | {} -> {} |", protocol, src, dst)),
        None => display_line.push_str(&format!(" {} |", NO_TRANSPORT)),
    }

    display_line.push_str(&format!(" Len: {}", data.len()));

    PacketSummary {
        timestamp,
        protocol,
        addresses: headers.addresses,
        ports,
        length: data.len(),
        display_line,
    }
}
