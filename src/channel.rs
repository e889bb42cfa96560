use core::fmt::Debug;

/// Storage width of one channel value in a [`crate::FarbfeldImage`].
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChannelDepth {
    /// 8 bits per channel. Narrowed from the wire format, lossy.
    Eight,
    /// 16 bits per channel. Same precision as the wire format, lossless.
    Sixteen,
}

impl ChannelDepth {
    pub const fn bits(self) -> u32 {
        match self {
            Self::Eight => 8,
            Self::Sixteen => 16,
        }
    }

    /// Bytes per stored channel value.
    pub const fn bytes(self) -> usize {
        match self {
            Self::Eight => 1,
            Self::Sixteen => 2,
        }
    }
}

/// A channel representation an image can be decoded into.
///
/// Implemented for `u16` (lossless) and `u8` (reduced precision). The wire
/// conversions form a left inverse pair: `from_wire(to_wire(v)) == v` for
/// every stored value `v`.
///
/// | type  | `from_wire` | `to_wire` | `to_u8` | `from_u8`      |
/// |-------|-------------|-----------|---------|----------------|
/// | `u16` | identity    | identity  | `v >> 8`| `v << 8 \| v`  |
/// | `u8`  | `v >> 8`    | `v << 8`  | identity| identity       |
pub trait Channel: Copy + Default + Eq + Debug + Send + Sync + 'static {
    const DEPTH: ChannelDepth;

    /// Convert a raw 16-bit wire sample into this representation.
    fn from_wire(raw: u16) -> Self;

    /// Convert a stored value back into a 16-bit wire sample.
    fn to_wire(self) -> u16;

    /// Narrow to 8 bits for display bitmaps.
    fn to_u8(self) -> u8;

    /// Widen an 8-bit bitmap value into this representation.
    fn from_u8(value: u8) -> Self;
}

impl Channel for u16 {
    const DEPTH: ChannelDepth = ChannelDepth::Sixteen;

    #[inline(always)]
    fn from_wire(raw: u16) -> Self {
        raw
    }

    #[inline(always)]
    fn to_wire(self) -> u16 {
        self
    }

    #[inline(always)]
    fn to_u8(self) -> u8 {
        (self >> 8) as u8
    }

    /// Doubled-byte expansion, so 0xFF maps to 0xFFFF and 0x80 to 0x8080.
    #[inline(always)]
    fn from_u8(value: u8) -> Self {
        let v = u16::from(value);
        (v << 8) | v
    }
}

impl Channel for u8 {
    const DEPTH: ChannelDepth = ChannelDepth::Eight;

    #[inline(always)]
    fn from_wire(raw: u16) -> Self {
        (raw >> 8) as u8
    }

    #[inline(always)]
    fn to_wire(self) -> u16 {
        u16::from(self) << 8
    }

    #[inline(always)]
    fn to_u8(self) -> u8 {
        self
    }

    #[inline(always)]
    fn from_u8(value: u8) -> Self {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn u16_wire_is_identity() {
        for v in [0u16, 1, 0x00FF, 0x8080, 0xFFFE, 0xFFFF] {
            assert_eq!(u16::from_wire(v), v);
            assert_eq!(v.to_wire(), v);
        }
    }

    #[test]
    fn u8_narrows_by_256_and_expands_by_256() {
        assert_eq!(u8::from_wire(0xFFFF), 0xFF);
        assert_eq!(u8::from_wire(0x80FF), 0x80);
        assert_eq!(u8::from_wire(0x00FF), 0x00);
        assert_eq!(0xFFu8.to_wire(), 0xFF00);
        assert_eq!(0x80u8.to_wire(), 0x8000);
    }

    #[test]
    fn u8_wire_roundtrip_is_exact() {
        for v in 0..=u8::MAX {
            assert_eq!(u8::from_wire(v.to_wire()), v);
        }
    }

    #[test]
    fn doubled_byte_widening() {
        assert_eq!(u16::from_u8(255), 65535);
        assert_eq!(u16::from_u8(128), 32896);
        assert_eq!(u16::from_u8(0), 0);
        for v in 0..=u8::MAX {
            assert_eq!(u16::from_u8(v).to_u8(), v);
        }
    }

    #[test]
    fn depth_sizes() {
        assert_eq!(<u8 as Channel>::DEPTH.bytes(), 1);
        assert_eq!(<u16 as Channel>::DEPTH.bytes(), 2);
        assert_eq!(ChannelDepth::Sixteen.bits(), 16);
    }
}
