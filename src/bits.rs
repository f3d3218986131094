//! Bit-field helpers shared by both decoders and renderers.
//!
//! Bit 0 is the least significant bit of the word.

use num_traits::{PrimInt, Unsigned};

/// Extract `width` bits of `word` starting at bit `start`.
///
/// Works for both halfwords and words. Ranges reaching past the top of the
/// word are a caller bug and trip a debug assertion.
#[inline]
pub fn field<T>(word: T, start: u32, width: u32) -> u32
where
    T: PrimInt + Unsigned + Into<u32>,
{
    let bits = T::zero().count_zeros();
    debug_assert!(
        start + width <= bits,
        "bit range {start}+{width} exceeds {bits}-bit word"
    );
    if width == 0 {
        return 0;
    }
    let value: u32 = word.unsigned_shr(start).into();
    if width >= 32 {
        value
    } else {
        value & ((1u32 << width) - 1)
    }
}

/// Test a single bit.
#[inline]
pub fn bit<T>(word: T, index: u32) -> bool
where
    T: PrimInt + Unsigned + Into<u32>,
{
    field(word, index, 1) != 0
}

/// Sign-extend the low `width` bits of `value` (two's complement).
#[inline]
pub fn sign_extend(value: u32, width: u32) -> i32 {
    debug_assert!((1..=32).contains(&width), "sign width {width} out of range");
    let s = 32 - width;
    ((value << s) as i32) >> s
}

/// 32-bit rotate right; `amount` is taken modulo 32.
#[inline]
pub fn rotate_right(value: u32, amount: u32) -> u32 {
    value.rotate_right(amount % 32)
}
