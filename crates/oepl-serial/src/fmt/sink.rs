// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Character sinks the render engine writes into.

use super::FormatError;
use crate::uart::RawWrite;

/// Bytes collected before a transport write.
const CHUNK_SIZE: usize = 32;

/// Byte-at-a-time output of the render engine.
pub(crate) trait Emit {
    fn emit(&mut self, byte: u8) -> Result<(), FormatError>;

    fn emit_all(&mut self, bytes: &[u8]) -> Result<(), FormatError> {
        for &byte in bytes {
            self.emit(byte)?;
        }
        Ok(())
    }

    fn emit_repeat(&mut self, byte: u8, count: usize) -> Result<(), FormatError> {
        for _ in 0..count {
            self.emit(byte)?;
        }
        Ok(())
    }
}

/// Writes into a caller buffer, always leaving room for the terminator.
pub(crate) struct BufferSink<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> BufferSink<'a> {
    pub(crate) const fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Write the `0` terminator after the last content byte.
    pub(crate) fn terminate(&mut self) -> Result<(), FormatError> {
        let capacity = self.buf.len();
        let slot = self
            .buf
            .get_mut(self.pos)
            .ok_or(FormatError::BufferOverflow { capacity })?;
        *slot = 0;
        Ok(())
    }
}

impl Emit for BufferSink<'_> {
    fn emit(&mut self, byte: u8) -> Result<(), FormatError> {
        if self.pos + 1 >= self.buf.len() {
            return Err(FormatError::BufferOverflow {
                capacity: self.buf.len(),
            });
        }
        self.buf[self.pos] = byte;
        self.pos += 1;
        Ok(())
    }
}

/// Forwards bytes to the transport in order, batched into small chunks.
pub(crate) struct TransportSink<'a> {
    out: &'a mut dyn RawWrite,
    chunk: [u8; CHUNK_SIZE],
    len: usize,
}

impl<'a> TransportSink<'a> {
    pub(crate) fn new(out: &'a mut dyn RawWrite) -> Self {
        Self {
            out,
            chunk: [0; CHUNK_SIZE],
            len: 0,
        }
    }

    /// Write out whatever is still batched.
    pub(crate) fn flush(&mut self) -> Result<(), FormatError> {
        if self.len > 0 {
            let len = core::mem::take(&mut self.len);
            self.out.raw_write(&self.chunk[..len])?;
        }
        Ok(())
    }
}

impl Emit for TransportSink<'_> {
    fn emit(&mut self, byte: u8) -> Result<(), FormatError> {
        if self.len == CHUNK_SIZE {
            self.flush()?;
        }
        self.chunk[self.len] = byte;
        self.len += 1;
        Ok(())
    }
}
