// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Byte array dumps: `{A:FF:1 }`.

use super::sink::Emit;
use super::{Arg, FormatError, Sink, drive, render_into};
use crate::uart::RawWrite;

/// Render `data` as `{b0:b1:...:bN }` followed by a newline.
///
/// Each byte goes through `%X` without width, so single-digit values carry
/// no leading zero. The last byte is followed by a space instead of a colon.
pub fn dump(sink: Sink<'_>, data: &[u8]) -> Result<usize, FormatError> {
    drive(sink, |out| dump_into(out, data))
}

/// Dump `data` to the serial line.
pub fn print_array(out: &mut dyn RawWrite, data: &[u8]) -> Result<(), FormatError> {
    dump(Sink::Transport(out), data).map(|_| ())
}

/// Dump `data` into `buf`, returning the character count.
pub fn sprint_array(buf: &mut [u8], data: &[u8]) -> Result<usize, FormatError> {
    dump(Sink::Buffer(buf), data)
}

fn dump_into(out: &mut dyn Emit, data: &[u8]) -> Result<usize, FormatError> {
    let mut count = render_into(out, "{", &[])?;
    for (index, &byte) in data.iter().enumerate() {
        let separator = if index + 1 < data.len() { ":" } else { " " };
        count += render_into(out, "%X%s", &[Arg::from(byte), Arg::from(separator)])?;
    }
    count += render_into(out, "}\n", &[])?;
    Ok(count)
}
