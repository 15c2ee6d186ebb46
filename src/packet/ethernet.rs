use super::{ipv4, ipv6, Headers};

pub const ETHERNET_HEADER_LEN: usize = 14;

const ETHERTYPE_IPV4: u16 = 0x0800;
const ETHERTYPE_IPV6: u16 = 0x86DD;

/// Entry point for decoding Ethernet II frames.
///
/// Frames shorter than an Ethernet header, or carrying anything other than IP,
/// decode to empty `Headers`.
pub fn decode_frame(data: &[u8]) -> Headers {
    if data.len() < ETHERNET_HEADER_LEN {
        return Headers::default();
    }

    let ethertype = u16::from_be_bytes([data[12], data[13]]);
    let payload = &data[ETHERNET_HEADER_LEN..];

    match ethertype {
        ETHERTYPE_IPV4 => ipv4::decode_ipv4(payload),
        ETHERTYPE_IPV6 => ipv6::decode_ipv6(payload),
        _ => Headers::default(),
    }
}
