//! Big-endian pack/unpack helpers for the farbfeld wire format.
//!
//! All multi-byte fields in farbfeld (dimensions and channel samples) are
//! big-endian regardless of host byte order.

/// Read a big-endian u16 from two bytes.
#[inline(always)]
pub(crate) fn unpack_u16(bytes: [u8; 2]) -> u16 {
    u16::from_be_bytes(bytes)
}

/// Read a big-endian u32 from four bytes.
#[inline(always)]
pub(crate) fn unpack_u32(bytes: [u8; 4]) -> u32 {
    u32::from_be_bytes(bytes)
}

#[inline(always)]
pub(crate) fn pack_u16(value: u16) -> [u8; 2] {
    value.to_be_bytes()
}

#[inline(always)]
pub(crate) fn pack_u32(value: u32) -> [u8; 4] {
    value.to_be_bytes()
}

/// Decode one 8-byte RGBA record into its four raw 16-bit samples.
#[inline(always)]
pub(crate) fn unpack_record(record: &[u8]) -> [u16; 4] {
    let mut out = [0u16; 4];
    for (sample, pair) in out.iter_mut().zip(record.chunks_exact(2)) {
        *sample = unpack_u16([pair[0], pair[1]]);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn u16_is_big_endian() {
        assert_eq!(unpack_u16([0x12, 0x34]), 0x1234);
        assert_eq!(pack_u16(0x1234), [0x12, 0x34]);
        assert_eq!(pack_u16(0x8080), [0x80, 0x80]);
    }

    #[test]
    fn u32_is_big_endian() {
        assert_eq!(unpack_u32([0, 0, 0x01, 0x02]), 0x0102);
        assert_eq!(pack_u32(32), [0, 0, 0, 32]);
        assert_eq!(unpack_u32(pack_u32(0xDEAD_BEEF)), 0xDEAD_BEEF);
    }

    #[test]
    fn record_channel_order() {
        let record = [0xFF, 0xFF, 0x00, 0x01, 0x80, 0x00, 0x12, 0x34];
        assert_eq!(unpack_record(&record), [0xFFFF, 0x0001, 0x8000, 0x1234]);
    }
}
