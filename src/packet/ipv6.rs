use std::net::{IpAddr, Ipv6Addr};

use super::{decode_transport, Headers};

const HEADER_LEN: usize = 40;

/// Decodes the fixed IPv6 header. Extension headers are not walked, so a
/// transport header behind one is reported as absent.
pub fn decode_ipv6(payload: &[u8]) -> Headers {
    if payload.len() < HEADER_LEN || payload[0] >> 4 != 6 {
        return Headers::default();
    }

    let mut src = [0u8; 16];
    src.copy_from_slice(&payload[8..24]);
    let mut dst = [0u8; 16];
    dst.copy_from_slice(&payload[24..40]);

    let next_header = payload[6];
    let payload_len = u16::from_be_bytes([payload[4], payload[5]]) as usize;
    let end = (HEADER_LEN + payload_len).min(payload.len());

    Headers {
        addresses: Some((
            IpAddr::V6(Ipv6Addr::from(src)),
            IpAddr::V6(Ipv6Addr::from(dst)),
        )),
        transport: decode_transport(next_header, &payload[HEADER_LEN..end]),
    }
}
