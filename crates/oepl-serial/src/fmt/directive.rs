// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Format string scanner.
//!
//! Splits a format string into literal runs and `%` directives:
//!
//! ```text
//! %%                    literal percent, no flags
//! %[-][0...][width]c    c in s d u x X c
//! ```
//!
//! Scanning stops for good at the first directive it cannot parse (an
//! unknown conversion letter or a trailing `%`); the rest of the format
//! string is never rendered.

/// Conversion letter of a directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Conversion {
    /// `%%`
    Percent,
    /// `%s`
    Str,
    /// `%d`
    Signed,
    /// `%u`
    Unsigned,
    /// `%x`
    HexLower,
    /// `%X`
    HexUpper,
    /// `%c`
    Char,
}

impl Conversion {
    const fn from_letter(letter: u8) -> Option<Self> {
        match letter {
            b's' => Some(Self::Str),
            b'd' => Some(Self::Signed),
            b'u' => Some(Self::Unsigned),
            b'x' => Some(Self::HexLower),
            b'X' => Some(Self::HexUpper),
            b'c' => Some(Self::Char),
            _ => None,
        }
    }

    /// The letter as written in the format string.
    pub(crate) const fn letter(self) -> char {
        match self {
            Self::Percent => '%',
            Self::Str => 's',
            Self::Signed => 'd',
            Self::Unsigned => 'u',
            Self::HexLower => 'x',
            Self::HexUpper => 'X',
            Self::Char => 'c',
        }
    }
}

/// Flags and width of a directive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Spec {
    /// `-`: pad after the content instead of before.
    pub left: bool,
    /// `0`: pad with zeros instead of spaces.
    pub zero: bool,
    /// Minimum field width, 0 for none.
    pub width: usize,
}

/// A piece of a scanned format string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Segment<'a> {
    /// Bytes copied to the output unchanged.
    Literal(&'a [u8]),
    /// A directive to render.
    Directive(Spec, Conversion),
}

/// Iterator over the segments of a format string.
pub(crate) struct Segments<'a> {
    rest: &'a [u8],
}

impl<'a> Segments<'a> {
    pub(crate) const fn new(format: &'a str) -> Self {
        Self {
            rest: format.as_bytes(),
        }
    }

    fn advance(&mut self, len: usize) {
        self.rest = &self.rest[len..];
    }

    fn directive(&mut self) -> Option<Segment<'a>> {
        let bytes = self.rest;
        let mut pos = 1;

        if bytes.get(pos) == Some(&b'%') {
            self.advance(pos + 1);
            return Some(Segment::Directive(Spec::default(), Conversion::Percent));
        }

        let mut spec = Spec::default();
        if bytes.get(pos) == Some(&b'-') {
            spec.left = true;
            pos += 1;
        }
        while bytes.get(pos) == Some(&b'0') {
            spec.zero = true;
            pos += 1;
        }
        while let Some(&digit) = bytes.get(pos).filter(|byte| byte.is_ascii_digit()) {
            spec.width = spec
                .width
                .saturating_mul(10)
                .saturating_add(usize::from(digit - b'0'));
            pos += 1;
        }

        let Some(conversion) = bytes.get(pos).copied().and_then(Conversion::from_letter) else {
            self.rest = &[];
            return None;
        };
        self.advance(pos + 1);
        Some(Segment::Directive(spec, conversion))
    }
}

impl<'a> Iterator for Segments<'a> {
    type Item = Segment<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if *self.rest.first()? == b'%' {
            return self.directive();
        }
        let len = self
            .rest
            .iter()
            .position(|&byte| byte == b'%')
            .unwrap_or(self.rest.len());
        let (literal, rest) = self.rest.split_at(len);
        self.rest = rest;
        Some(Segment::Literal(literal))
    }
}
