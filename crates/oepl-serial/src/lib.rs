// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! # oepl-serial
//!
//! Serial output and input for tag/station firmware.
//!
//! This crate provides:
//! - An allocation-free `printf`-style formatter rendering into caller
//!   buffers or straight onto the UART ([`fmt`])
//! - A callback-driven UART transport with a 256-byte receive buffer that
//!   re-arms itself after failed reads ([`uart`])
//! - An interrupt-safe shared transport that can also serve as the `log`
//!   backend
//!
//! The vendor UART driver is consumed through the [`uart::UartHal`] trait,
//! so everything here runs on the host against [`uart::MockUart`].
//!
//! ## `no_std` Support
//!
//! The crate is `no_std` unless testing or the `std` feature is enabled.
//! Firmware depends on it with `default-features = false` and supplies a
//! `critical-section` implementation.

#![cfg_attr(not(any(test, feature = "std")), no_std)]

#[cfg(any(test, feature = "std"))]
extern crate std;


pub mod config;
pub mod fmt;
pub mod uart;

pub use config::{RetryPolicy, UartConfig};
pub use fmt::{Arg, FormatError, Sink, print, render, sprint};
pub use uart::{
    RawWrite, ReadCompletion, Receiver, SharedTransport, Transport, TransportError, UartHal,
};

/// Crate version for runtime queries.
///
/// Uses `OEPL_SERIAL_VERSION` from the build environment when set, falling
/// back to the package version.
pub const VERSION: &str = match option_env!("OEPL_SERIAL_VERSION") {
    Some(v) => v,
    None => env!("CARGO_PKG_VERSION"),
};

/// Formatted write to the serial line.
///
/// ```ignore
/// uprint!(&mut transport, "ch %d lqi %02X\n", channel, lqi)?;
/// ```
#[macro_export]
macro_rules! uprint {
    ($out:expr, $format:expr $(, $arg:expr)* $(,)?) => {
        $crate::fmt::print($out, $format, &[$($crate::fmt::Arg::from($arg)),*])
    };
}

/// Formatted write into a byte buffer, returning the character count.
///
/// ```ignore
/// let len = usprint!(&mut buf, "%s:%u", name, value)?;
/// ```
#[macro_export]
macro_rules! usprint {
    ($buf:expr, $format:expr $(, $arg:expr)* $(,)?) => {
        $crate::fmt::sprint($buf, $format, &[$($crate::fmt::Arg::from($arg)),*])
    };
}
