use super::{Protocol, Transport};

const MIN_HEADER_LEN: usize = 20;

/// Parses the TCP header from the given byte slice.
///
/// # Arguments
/// * `header` - The TCP segment, starting at the source port
///
/// # Returns
/// * `Some(Transport)` with the port pair when a complete header is present
/// * `None` when the segment is truncated or its data offset is invalid
pub fn parse_tcp_header(header: &[u8]) -> Option<Transport> {
    if header.len() < MIN_HEADER_LEN {
        return None;
    }

    let data_offset = ((header[12] >> 4) as usize) * 4;
    if data_offset < MIN_HEADER_LEN || data_offset > header.len() {
        return None;
    }

    Some(Transport {
        protocol: Protocol::Tcp,
        src_port: u16::from_be_bytes([header[0], header[1]]),
        dst_port: u16::from_be_bytes([header[2], header[3]]),
    })
} // parse_tcp_header
