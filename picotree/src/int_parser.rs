// SPDX-License-Identifier: Apache-2.0

//! Checked base-10 conversion for number tokens.

/// Integer type stored in leaf nodes, selected by the `int8`, `int32` or
/// `int64` feature.
#[cfg(feature = "int8")]
pub type Integer = i8;
/// Integer type stored in leaf nodes, selected by the `int8`, `int32` or
/// `int64` feature.
#[cfg(feature = "int32")]
pub type Integer = i32;
/// Integer type stored in leaf nodes, selected by the `int8`, `int32` or
/// `int64` feature.
#[cfg(feature = "int64")]
pub type Integer = i64;

/// Reasons a scanned number span is rejected.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum IntegerError {
    /// Nothing to convert.
    Empty,
    /// A lone `+` or `-`.
    SignOnly,
    /// A sign character after the first position, or any other non-digit.
    InvalidDigit,
    /// The value does not fit in [`Integer`].
    Overflow,
}

/// Converts an ASCII decimal span with an optional leading sign.
///
/// Never panics. Negative values accumulate downwards so `Integer::MIN`
/// round-trips without overflowing.
pub const fn from_ascii(src: &[u8]) -> Result<Integer, IntegerError> {
    let (negative, mut digits) = match src {
        [] => return Err(IntegerError::Empty),
        [b'-', rest @ ..] => (true, rest),
        [b'+', rest @ ..] => (false, rest),
        _ => (false, src),
    };
    if digits.is_empty() {
        return Err(IntegerError::SignOnly);
    }

    let mut value: Integer = 0;
    while let [byte, rest @ ..] = digits {
        if !byte.is_ascii_digit() {
            return Err(IntegerError::InvalidDigit);
        }
        let digit = (*byte - b'0') as Integer;
        value = match value.checked_mul(10) {
            Some(v) => v,
            None => return Err(IntegerError::Overflow),
        };
        let next = if negative {
            value.checked_sub(digit)
        } else {
            value.checked_add(digit)
        };
        value = match next {
            Some(v) => v,
            None => return Err(IntegerError::Overflow),
        };
        digits = rest;
    }
    Ok(value)
}
