//! Bit-length primitive for radix keys
//!
//! Bucket assignment in a radix heap only needs one question answered about a
//! priority: how many bits does it take to write down? [`RadixKey`] exposes that
//! through two paths that must agree bit-for-bit:
//!
//! - [`RadixKey::bit_length`], backed by the `leading_zeros` intrinsic
//! - [`RadixKey::bit_length_portable`], a shift loop usable on any target
//!
//! The `portable-bit-length` cargo feature makes the heap use the loop.

use std::fmt::Debug;

/// Trait for keys that can be used in a radix heap.
///
/// Implemented for all unsigned integer types.
///
/// # Contract
///
/// - `BITS` must equal the number of bits in the type
/// - `bit_length(x)` is 0 for zero, otherwise one plus the index of the
///   highest set bit
/// - `bit_length` and `bit_length_portable` return the same value for every
///   input
pub trait RadixKey: Ord + Copy + Default + Debug {
    /// Number of bits in this key type
    const BITS: u32;

    /// The zero value of this type
    const ZERO: Self;

    /// Compute XOR of two keys (for finding the highest differing bit)
    fn bitxor(self, other: Self) -> Self;

    /// Shift right by one bit
    fn shr_one(self) -> Self;

    /// Number of significant bits, via the hardware leading-zero count
    fn bit_length(self) -> u32;

    /// Number of significant bits, via a shift loop
    #[inline]
    fn bit_length_portable(self) -> u32 {
        let mut rest = self;
        let mut length = 0;
        while rest != Self::ZERO {
            rest = rest.shr_one();
            length += 1;
        }
        length
    }
}

macro_rules! impl_radix_key {
    ($($t:ty),+) => {
        $(
            impl RadixKey for $t {
                const BITS: u32 = <$t>::BITS;
                const ZERO: Self = 0;

                #[inline]
                fn bitxor(self, other: Self) -> Self {
                    self ^ other
                }

                #[inline]
                fn shr_one(self) -> Self {
                    self >> 1
                }

                #[inline]
                fn bit_length(self) -> u32 {
                    <$t>::BITS - <$t>::leading_zeros(self)
                }
            }
        )+
    };
}

impl_radix_key!(u8, u16, u32, u64, u128, usize);

/// Bit length as used for bucket indexing.
///
/// Dispatches to the intrinsic or the loop depending on the
/// `portable-bit-length` feature.
#[inline]
pub(crate) fn msb_set<K: RadixKey>(key: K) -> usize {
    #[cfg(feature = "portable-bit-length")]
    {
        key.bit_length_portable() as usize
    }
    #[cfg(not(feature = "portable-bit-length"))]
    {
        key.bit_length() as usize
    }
}
