mod ethernet;
mod ipv4;
mod ipv6;
mod summary;
mod tcp;
mod udp;

pub use summary::{summarize, summarize_at, PacketSummary, Protocol, TIMESTAMP_FORMAT};

use std::net::IpAddr;

const IPPROTO_TCP: u8 = 6;
const IPPROTO_UDP: u8 = 17;

/// Headers recovered from a frame. Every field is optional: a frame that stops
/// short of a layer simply leaves that layer empty.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Headers {
    pub addresses: Option<(IpAddr, IpAddr)>,
    pub transport: Option<Transport>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Transport {
    pub protocol: Protocol,
    pub src_port: u16,
    pub dst_port: u16,
}

/// Dispatches an IP payload to the matching transport parser.
fn decode_transport(protocol: u8, segment: &[u8]) -> Option<Transport> {
    match protocol {
        IPPROTO_TCP => tcp::parse_tcp_header(segment),
        IPPROTO_UDP => udp::parse_udp_header(segment),
        _ => None,
    }
}

#[cfg(test)]
pub(crate) use summary::tests as fixtures;
