// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Allocation-free `printf`-style formatter.
//!
//! Renders a format string and an argument list into a [`Sink`]: either a
//! caller buffer, which is `0`-terminated after the content, or straight
//! into the serial transport. Directives:
//!
//! | directive           | renders                                      |
//! |---------------------|----------------------------------------------|
//! | `%%`                | a literal `%`                                |
//! | `%[-][0][width]s`   | a string, `(null)` for `None`                |
//! | `%[-][0][width]d`   | signed decimal                               |
//! | `%[-][0][width]u`   | unsigned decimal                             |
//! | `%[-][0][width]x/X` | hexadecimal, lower or upper case letters     |
//! | `%[-][0][width]c`   | one byte                                     |
//!
//! `-` pads on the right with spaces, `0` pads on the left with zeros. An
//! unknown directive ends rendering silently, dropping the rest of the
//! format string.

#[cfg(test)]
mod directive_test;

mod arg;
mod directive;
mod dump;
mod number;
mod sink;

pub use arg::Arg;
pub use dump::{dump, print_array, sprint_array};

use crate::uart::{RawWrite, TransportError};
use directive::{Conversion, Segment, Segments, Spec};
use number::Digits;
use sink::{BufferSink, Emit, TransportSink};

/// Where rendered characters go.
pub enum Sink<'a> {
    /// A caller buffer. Content plus the `0` terminator must fit.
    Buffer(&'a mut [u8]),
    /// The serial line.
    Transport(&'a mut dyn RawWrite),
}

/// Errors reported while rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatError {
    /// The buffer sink ran out of room for content plus terminator.
    BufferOverflow {
        /// Capacity of the buffer.
        capacity: usize,
    },
    /// A directive found no argument left.
    MissingArgument {
        /// Zero-based position of the missing argument.
        index: usize,
    },
    /// A string was given to a numeric directive, or the other way round.
    ArgumentMismatch {
        /// Zero-based position of the argument.
        index: usize,
        /// Conversion letter of the directive.
        directive: char,
    },
    /// The transport rejected the output.
    Transport(TransportError),
}

impl From<TransportError> for FormatError {
    fn from(err: TransportError) -> Self {
        Self::Transport(err)
    }
}

impl core::fmt::Display for FormatError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::BufferOverflow { capacity } => {
                write!(f, "output does not fit in {capacity} byte buffer")
            }
            Self::MissingArgument { index } => write!(f, "missing argument {index}"),
            Self::ArgumentMismatch { index, directive } => {
                write!(f, "argument {index} does not match %{directive}")
            }
            Self::Transport(err) => write!(f, "transport: {err}"),
        }
    }
}

/// Render `format` with `args` into `sink`.
///
/// Returns the number of characters produced, not counting the buffer
/// terminator.
pub fn render(sink: Sink<'_>, format: &str, args: &[Arg<'_>]) -> Result<usize, FormatError> {
    drive(sink, |out| render_into(out, format, args))
}

/// Render to the serial line, discarding the character count.
pub fn print(out: &mut dyn RawWrite, format: &str, args: &[Arg<'_>]) -> Result<(), FormatError> {
    render(Sink::Transport(out), format, args).map(|_| ())
}

/// Render into `buf`, returning the character count.
pub fn sprint(buf: &mut [u8], format: &str, args: &[Arg<'_>]) -> Result<usize, FormatError> {
    render(Sink::Buffer(buf), format, args)
}

/// Resolve the sink once, run `body` against it, then terminate or flush.
fn drive(
    sink: Sink<'_>,
    body: impl FnOnce(&mut dyn Emit) -> Result<usize, FormatError>,
) -> Result<usize, FormatError> {
    match sink {
        Sink::Buffer(buf) => {
            let mut out = BufferSink::new(buf);
            let rendered = body(&mut out);
            let terminated = out.terminate();
            let count = rendered?;
            terminated?;
            Ok(count)
        }
        Sink::Transport(transport) => {
            let mut out = TransportSink::new(transport);
            let rendered = body(&mut out);
            let flushed = out.flush();
            let count = rendered?;
            flushed?;
            Ok(count)
        }
    }
}

/// Left-to-right cursor over the argument list.
struct Args<'a, 'b> {
    args: &'b [Arg<'a>],
    next: usize,
}

impl<'a> Args<'a, '_> {
    fn pop(&mut self) -> Result<(usize, Arg<'a>), FormatError> {
        let index = self.next;
        let arg = *self
            .args
            .get(index)
            .ok_or(FormatError::MissingArgument { index })?;
        self.next += 1;
        Ok((index, arg))
    }

    fn next_word(&mut self, conversion: Conversion) -> Result<u32, FormatError> {
        let (index, arg) = self.pop()?;
        arg.word().ok_or(FormatError::ArgumentMismatch {
            index,
            directive: conversion.letter(),
        })
    }

    fn next_str(&mut self) -> Result<&'a str, FormatError> {
        match self.pop()? {
            (_, Arg::Str(value)) => Ok(value.unwrap_or("(null)")),
            (index, _) => Err(FormatError::ArgumentMismatch {
                index,
                directive: Conversion::Str.letter(),
            }),
        }
    }
}

pub(crate) fn render_into(
    out: &mut dyn Emit,
    format: &str,
    args: &[Arg<'_>],
) -> Result<usize, FormatError> {
    let mut args = Args { args, next: 0 };
    let mut count = 0;

    for segment in Segments::new(format) {
        count += match segment {
            Segment::Literal(bytes) => {
                out.emit_all(bytes)?;
                bytes.len()
            }
            Segment::Directive(spec, conversion) => {
                render_directive(out, spec, conversion, &mut args)?
            }
        };
    }

    Ok(count)
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "%c narrows its argument to one byte"
)]
fn render_directive(
    out: &mut dyn Emit,
    spec: Spec,
    conversion: Conversion,
    args: &mut Args<'_, '_>,
) -> Result<usize, FormatError> {
    match conversion {
        Conversion::Percent => {
            out.emit(b'%')?;
            Ok(1)
        }
        Conversion::Str => {
            let value = args.next_str()?;
            pad(out, value.as_bytes(), spec)
        }
        Conversion::Char => {
            let byte = [args.next_word(conversion)? as u8];
            // A NUL character has no content, only padding.
            let content = if byte[0] == 0 { &byte[..0] } else { &byte[..] };
            pad(out, content, spec)
        }
        Conversion::Signed => render_int(out, args.next_word(conversion)?, 10, true, false, spec),
        Conversion::Unsigned => {
            render_int(out, args.next_word(conversion)?, 10, false, false, spec)
        }
        Conversion::HexLower => {
            render_int(out, args.next_word(conversion)?, 16, false, false, spec)
        }
        Conversion::HexUpper => render_int(out, args.next_word(conversion)?, 16, false, true, spec),
    }
}

#[expect(
    clippy::cast_possible_wrap,
    reason = "%d reinterprets the argument word as signed"
)]
fn render_int(
    out: &mut dyn Emit,
    word: u32,
    radix: u32,
    signed: bool,
    upper: bool,
    spec: Spec,
) -> Result<usize, FormatError> {
    let value = word as i32;
    let negative = signed && value < 0;
    let magnitude = if negative { value.unsigned_abs() } else { word };
    let mut digits = Digits::new(magnitude, radix, upper);

    let mut spec = spec;
    let mut count = 0;
    if negative {
        if spec.width > 0 && spec.zero {
            // Sign goes in front of the zero padding.
            out.emit(b'-')?;
            count += 1;
            spec.width -= 1;
        } else {
            digits.push_sign();
        }
    }

    Ok(count + pad(out, digits.as_bytes(), spec)?)
}

/// Emit `content` padded to the directive's width.
fn pad(out: &mut dyn Emit, content: &[u8], spec: Spec) -> Result<usize, FormatError> {
    let fill = spec.width.saturating_sub(content.len());
    if spec.left {
        out.emit_all(content)?;
        out.emit_repeat(b' ', fill)?;
    } else {
        out.emit_repeat(if spec.zero { b'0' } else { b' ' }, fill)?;
        out.emit_all(content)?;
    }
    Ok(content.len() + fill)
}
