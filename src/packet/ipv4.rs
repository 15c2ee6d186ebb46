use std::net::{IpAddr, Ipv4Addr};

use super::{decode_transport, Headers};

const MIN_HEADER_LEN: usize = 20;

pub fn decode_ipv4(payload: &[u8]) -> Headers {
    if payload.len() < MIN_HEADER_LEN || payload[0] >> 4 != 4 {
        return Headers::default();
    }

    let ip_header_len = ((payload[0] & 0x0F) as usize) * 4;
    if ip_header_len < MIN_HEADER_LEN || payload.len() < ip_header_len {
        return Headers::default();
    }

    let src = Ipv4Addr::new(payload[12], payload[13], payload[14], payload[15]);
    let dst = Ipv4Addr::new(payload[16], payload[17], payload[18], payload[19]);
    let protocol = payload[9];

    // Ethernet pads short packets; trust total length when it fits.
    let total_len = u16::from_be_bytes([payload[2], payload[3]]) as usize;
    let end = if total_len >= ip_header_len && total_len <= payload.len() {
        total_len
    } else {
        payload.len()
    };

    // Non-first fragments carry no transport header.
    let fragment_offset = u16::from_be_bytes([payload[6], payload[7]]) & 0x1FFF;
    let transport = if fragment_offset == 0 {
        decode_transport(protocol, &payload[ip_header_len..end])
    } else {
        None
    };

    Headers {
        addresses: Some((IpAddr::V4(src), IpAddr::V4(dst))),
        transport,
    }
}
