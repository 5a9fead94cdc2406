//! Width-carrying bit values.
//!
//! HUFF streams are interpreted most-significant-bit first at arbitrary,
//! non byte-aligned widths. [`BitValue`] keeps the number of meaningful bits
//! next to the bits themselves, so "how much of this window is left" is an
//! explicit quantity instead of shift bookkeeping spread over the decoder.
//!
//! # Example
//!
//! ```
//! use oxihuff_core::bits::BitValue;
//!
//! let high = BitValue::new(0b10, 2);
//! let low = BitValue::new(0b011, 3);
//! let joined = high.concat(low);
//!
//! assert_eq!(joined.value(), 0b10011);
//! assert_eq!(joined.width(), 5);
//! assert!(joined.msb());
//! assert_eq!(joined.to_string(), "0b10011");
//! ```

use std::fmt;

/// An immutable integer of a fixed bit width (0 to 64 bits).
///
/// The stored value is always masked to `width` bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BitValue {
    value: u64,
    width: u8,
}

impl BitValue {
    /// Largest supported width.
    pub const MAX_WIDTH: u8 = 64;

    /// Zero bits of information.
    pub const EMPTY: Self = Self { value: 0, width: 0 };

    /// The single bit `0`.
    pub const ZERO: Self = Self { value: 0, width: 1 };

    /// The single bit `1`.
    pub const ONE: Self = Self { value: 1, width: 1 };

    /// Create a bit value, keeping only the low `width` bits of `value`.
    ///
    /// Widths above [`Self::MAX_WIDTH`] are clamped.
    #[inline]
    pub const fn new(value: u64, width: u8) -> Self {
        let width = if width > Self::MAX_WIDTH {
            Self::MAX_WIDTH
        } else {
            width
        };
        Self {
            value: value & mask_for(width),
            width,
        }
    }

    /// The masked value.
    #[inline]
    pub const fn value(&self) -> u64 {
        self.value
    }

    /// Number of meaningful bits.
    #[inline]
    pub const fn width(&self) -> u8 {
        self.width
    }

    /// True when no bits remain.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width == 0
    }

    /// All-ones mask covering this value's width.
    #[inline]
    pub const fn mask(&self) -> u64 {
        mask_for(self.width)
    }

    /// Compare against another bit value.
    ///
    /// A shorter `other` never matches: it cannot satisfy every bit of this
    /// pattern. Otherwise the low `self.width()` bits are compared.
    pub fn matches(&self, other: &BitValue) -> bool {
        if other.width < self.width {
            return false;
        }
        (other.value ^ self.value) & self.mask() == 0
    }

    /// Compare against a plain integer under this value's mask.
    pub fn matches_raw(&self, value: u64) -> bool {
        (value ^ self.value) & self.mask() == 0
    }

    /// Append `low` after this value's bits.
    ///
    /// `self` becomes the more significant end. The resulting width is the
    /// sum of both widths, clamped to [`Self::MAX_WIDTH`].
    #[inline]
    pub fn concat(self, low: BitValue) -> BitValue {
        let width = self.width.saturating_add(low.width);
        debug_assert!(
            width <= Self::MAX_WIDTH,
            "concatenated width {width} exceeds {}",
            Self::MAX_WIDTH
        );
        let high = self.value.checked_shl(u32::from(low.width)).unwrap_or(0);
        BitValue::new(high | low.value, width)
    }

    /// The most significant bit within the width; false when empty.
    #[inline]
    pub fn msb(&self) -> bool {
        match self.width {
            0 => false,
            w => (self.value >> (w - 1)) & 1 != 0,
        }
    }

    /// Split off the most significant bit.
    ///
    /// Returns the bit and the remaining `width - 1` low bits. An empty value
    /// yields `(false, EMPTY)`.
    #[inline]
    pub fn split_msb(self) -> (bool, BitValue) {
        if self.width == 0 {
            return (false, Self::EMPTY);
        }
        (self.msb(), BitValue::new(self.value, self.width - 1))
    }

    /// Shift right by `n`, dropping `n` bits of width (never below zero).
    pub fn shr(self, n: u8) -> BitValue {
        let value = self.value.checked_shr(u32::from(n)).unwrap_or(0);
        BitValue::new(value, self.width.saturating_sub(n))
    }

    /// Shift left by `n`, adding `n` bits of width.
    pub fn shl(self, n: u8) -> BitValue {
        let value = self.value.checked_shl(u32::from(n)).unwrap_or(0);
        BitValue::new(value, self.width.saturating_add(n))
    }
}

/// Mask with the low `width` bits set.
#[inline]
const fn mask_for(width: u8) -> u64 {
    if width >= 64 {
        u64::MAX
    } else {
        (1u64 << width) - 1
    }
}

impl fmt::Display for BitValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("0b")?;
        for i in (0..self.width).rev() {
            f.write_str(if (self.value >> i) & 1 != 0 { "1" } else { "0" })?;
        }
        Ok(())
    }
}
