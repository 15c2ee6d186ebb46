use super::{Protocol, Transport};

const HEADER_LEN: usize = 8;

/// Parses a UDP header (8 bytes). Returns `None` if the datagram is truncated.
pub fn parse_udp_header(header: &[u8]) -> Option<Transport> {
    if header.len() < HEADER_LEN {
        return None;
    }

    Some(Transport {
        protocol: Protocol::Udp,
        src_port: u16::from_be_bytes([header[0], header[1]]),
        dst_port: u16::from_be_bytes([header[2], header[3]]),
    })
}
