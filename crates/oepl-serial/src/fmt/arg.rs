// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Format arguments.

/// One argument consumed by a directive.
///
/// Numeric kinds are interchangeable: `%d`, `%u`, `%x`, `%X` and `%c`
/// reinterpret whatever 32-bit word they are given. Only `%s` needs a
/// string argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arg<'a> {
    /// Signed integer.
    Int(i32),
    /// Unsigned integer.
    Uint(u32),
    /// Single byte-sized character.
    Char(u8),
    /// String; `None` renders as `(null)`.
    Str(Option<&'a str>),
}

impl Arg<'_> {
    /// The argument as a raw 32-bit word, or `None` for strings.
    #[expect(
        clippy::cast_sign_loss,
        reason = "directives reinterpret the argument word, like a C vararg"
    )]
    pub(crate) const fn word(self) -> Option<u32> {
        match self {
            Self::Int(value) => Some(value as u32),
            Self::Uint(value) => Some(value),
            Self::Char(value) => Some(value as u32),
            Self::Str(_) => None,
        }
    }
}

impl From<i32> for Arg<'_> {
    fn from(value: i32) -> Self {
        Self::Int(value)
    }
}

impl From<i16> for Arg<'_> {
    fn from(value: i16) -> Self {
        Self::Int(i32::from(value))
    }
}

impl From<i8> for Arg<'_> {
    fn from(value: i8) -> Self {
        Self::Int(i32::from(value))
    }
}

impl From<u32> for Arg<'_> {
    fn from(value: u32) -> Self {
        Self::Uint(value)
    }
}

impl From<u16> for Arg<'_> {
    fn from(value: u16) -> Self {
        Self::Uint(u32::from(value))
    }
}

impl From<u8> for Arg<'_> {
    fn from(value: u8) -> Self {
        Self::Uint(u32::from(value))
    }
}

impl From<char> for Arg<'_> {
    /// Narrowed to its low byte.
    fn from(value: char) -> Self {
        Self::Char(value as u8)
    }
}

impl<'a> From<&'a str> for Arg<'a> {
    fn from(value: &'a str) -> Self {
        Self::Str(Some(value))
    }
}

impl<'a> From<Option<&'a str>> for Arg<'a> {
    fn from(value: Option<&'a str>) -> Self {
        Self::Str(value)
    }
}
