// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! UART transport for the station serial line.
//!
//! The vendor driver is reached only through [`UartHal`], so the transport
//! state machine runs unchanged against real hardware or the in-memory
//! [`MockUart`] used by tests:
//! - `receiver` - receive buffer and the re-arm/completion state machine
//! - `transport` - single-owner transport: open with retry, write, receive
//! - `shared` - interrupt-safe transport for a `static`, also usable as the
//!   global logger
//! - `mock` - testing mock backed by `Vec`s

#[cfg(test)]
mod mod_test;
#[cfg(test)]
mod receiver_test;

#[cfg(any(test, feature = "std"))]
mod mock;
mod receiver;
mod shared;
mod transport;

#[cfg(any(test, feature = "std"))]
pub use mock::{MockHandle, MockUart};
pub use receiver::Receiver;
pub use shared::SharedTransport;
pub use transport::Transport;

use crate::config::UartConfig;

/// Status code reported by the hardware layer for a failed operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HalStatus(pub i16);

impl core::fmt::Display for HalStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "hardware status {}", self.0)
    }
}

/// Vendor UART primitives the transport is built on.
///
/// The driver is entered from the foreground and from the receive-completion
/// interrupt, so every primitive takes `&self`.
pub trait UartHal {
    /// Opened channel handle.
    type Handle: Copy;

    /// Open the channel. Returns `None` while the hardware is not ready.
    fn open(&self, config: &UartConfig) -> Option<Self::Handle>;

    /// Issue an asynchronous receive request for up to `len` bytes.
    ///
    /// Must not block. The result is delivered later through the
    /// transport's completion handler.
    fn read(&self, handle: Self::Handle, len: usize) -> Result<(), HalStatus>;

    /// Transmit `bytes`, blocking until the hardware accepts them.
    ///
    /// Returns the number of bytes written.
    fn write(&self, handle: Self::Handle, bytes: &[u8]) -> usize;

    /// Busy-wait for `ms` milliseconds.
    fn delay_ms(&self, ms: u32);
}

/// Outcome of a receive request, as delivered to the completion handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadCompletion<'a> {
    /// The request finished; the slice holds the bytes that arrived.
    Success(&'a [u8]),
    /// The request failed with the given status.
    Failure(HalStatus),
}

/// Raw byte output, the write path used by the formatter's transport sink.
pub trait RawWrite {
    /// Write all of `bytes`.
    ///
    /// Returns the number of bytes accepted.
    fn raw_write(&mut self, bytes: &[u8]) -> Result<usize, TransportError>;
}

/// Errors reported by the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportError {
    /// The channel has not been opened yet.
    NotOpen,
    /// The hardware stayed unavailable for the whole retry budget.
    OpenFailed {
        /// Number of open attempts made.
        attempts: u32,
    },
    /// A receive request is already outstanding.
    ReadPending,
    /// The hardware refused the receive request.
    ReadRejected(HalStatus),
    /// The hardware accepted fewer bytes than requested.
    ShortWrite {
        /// Bytes accepted.
        written: usize,
        /// Bytes requested.
        requested: usize,
    },
    /// The receive state is borrowed further up the stack.
    Unavailable,
    /// Another logger has already been registered.
    LoggerInstalled,
}

impl core::fmt::Display for TransportError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NotOpen => write!(f, "uart channel not open"),
            Self::OpenFailed { attempts } => {
                write!(f, "uart channel failed to open after {attempts} attempts")
            }
            Self::ReadPending => write!(f, "receive request already outstanding"),
            Self::ReadRejected(status) => write!(f, "receive request rejected: {status}"),
            Self::ShortWrite { written, requested } => {
                write!(f, "short write: {written} of {requested} bytes")
            }
            Self::Unavailable => write!(f, "receive state unavailable"),
            Self::LoggerInstalled => write!(f, "a logger is already registered"),
        }
    }
}
