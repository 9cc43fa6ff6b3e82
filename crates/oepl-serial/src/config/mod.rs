// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Compile-time serial configuration.
//!
//! The station driver runs the UART with a single fixed configuration. The
//! values here are handed to the hardware layer when the channel is opened
//! and are not meant to change at runtime.

#[cfg(test)]
mod config_test;

/// Line rate of the station UART.
pub const BAUD_RATE: u32 = 115_200;

/// Capacity of the receive buffer, and the length of every read request.
pub const RX_BUFFER_SIZE: usize = 256;

/// How the hardware layer reports read results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadMode {
    /// The read call blocks until data arrives.
    Blocking,
    /// The read call returns at once; completion is signalled through the
    /// registered completion handler.
    Callback,
}

/// When a pending read is allowed to complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadReturnMode {
    /// Only once the full requested length has arrived.
    Full,
    /// As soon as some data has arrived and the line goes idle.
    Partial,
}

/// Parameters passed to the hardware open primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UartConfig {
    /// Baud rate.
    pub baud_rate: u32,
    /// Read completion delivery.
    pub read_mode: ReadMode,
    /// Read completion threshold.
    pub read_return_mode: ReadReturnMode,
}

impl UartConfig {
    /// The station configuration: 115200 baud, callback reads, partial returns.
    pub const DEFAULT: Self = Self {
        baud_rate: BAUD_RATE,
        read_mode: ReadMode::Callback,
        read_return_mode: ReadReturnMode::Partial,
    };
}

impl Default for UartConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Retry behaviour while waiting for the UART to open.
///
/// Backoff doubles after every failed attempt, starting at
/// `initial_backoff_ms` and saturating at `max_backoff_ms`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Give up after this many failed attempts. `None` retries forever.
    pub max_attempts: Option<u32>,
    /// Delay after the first failed attempt.
    pub initial_backoff_ms: u32,
    /// Upper bound for the delay between attempts.
    pub max_backoff_ms: u32,
}

impl RetryPolicy {
    /// Bounded retry used unless the firmware asks otherwise.
    pub const DEFAULT: Self = Self {
        max_attempts: Some(50),
        initial_backoff_ms: 1,
        max_backoff_ms: 32,
    };

    /// Spin on the open primitive until it succeeds, without delay.
    ///
    /// Blocks startup forever if the hardware never comes up.
    pub const UNBOUNDED: Self = Self {
        max_attempts: None,
        initial_backoff_ms: 0,
        max_backoff_ms: 0,
    };

    /// Delay to wait after the given failed attempt (1-based).
    #[must_use]
    pub const fn backoff_ms(&self, attempt: u32) -> u32 {
        if attempt == 0 || self.initial_backoff_ms == 0 {
            return 0;
        }
        let shift = attempt - 1;
        let delay = if shift >= u32::BITS {
            u32::MAX
        } else {
            match self.initial_backoff_ms.checked_mul(1 << shift) {
                Some(delay) => delay,
                None => u32::MAX,
            }
        };
        if delay > self.max_backoff_ms {
            self.max_backoff_ms
        } else {
            delay
        }
    }

    /// Whether another attempt is allowed after `failed` failures.
    #[must_use]
    pub const fn allows_retry(&self, failed: u32) -> bool {
        match self.max_attempts {
            Some(max) => failed < max,
            None => true,
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::DEFAULT
    }
}
