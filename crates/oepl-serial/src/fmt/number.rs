// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Integer to digit string conversion.

/// Enough for a 32-bit value in base 10 plus a sign.
const MAX_DIGITS: usize = 12;

/// Digits of an unsigned value, built right to left in a stack buffer.
pub(crate) struct Digits {
    buf: [u8; MAX_DIGITS],
    start: usize,
}

impl Digits {
    /// Convert `value` in `radix` (10 or 16).
    ///
    /// Hex letters are uppercase when `upper` is set.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "remainder is always below the radix"
    )]
    pub(crate) fn new(value: u32, radix: u32, upper: bool) -> Self {
        let mut digits = Self {
            buf: [0; MAX_DIGITS],
            start: MAX_DIGITS,
        };
        if value == 0 {
            digits.push(b'0');
            return digits;
        }

        let letters = if upper { b'A' } else { b'a' };
        let mut rest = value;
        while rest != 0 {
            let digit = (rest % radix) as u8;
            digits.push(if digit < 10 {
                b'0' + digit
            } else {
                letters + (digit - 10)
            });
            rest /= radix;
        }
        digits
    }

    /// Prepend a minus sign.
    pub(crate) fn push_sign(&mut self) {
        self.push(b'-');
    }

    fn push(&mut self, byte: u8) {
        self.start -= 1;
        self.buf[self.start] = byte;
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        &self.buf[self.start..]
    }
}
