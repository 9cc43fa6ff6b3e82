// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Single-owner transport: open with retry, write, receive.

use super::{RawWrite, ReadCompletion, Receiver, TransportError, UartHal};
use crate::config::{RetryPolicy, UartConfig};

/// Open the channel, retrying according to `retry`.
///
/// Delays between attempts go through the hardware layer, so this must not
/// run inside a critical section.
pub(super) fn open_channel<H: UartHal>(
    hal: &H,
    retry: RetryPolicy,
) -> Result<H::Handle, TransportError> {
    let config = UartConfig::DEFAULT;
    let mut failed: u32 = 0;
    loop {
        if let Some(handle) = hal.open(&config) {
            log::debug!(
                "uart open at {} baud after {} failed attempts",
                config.baud_rate,
                failed
            );
            return Ok(handle);
        }

        failed = failed.saturating_add(1);
        if !retry.allows_retry(failed) {
            log::error!("uart open gave up after {failed} attempts");
            return Err(TransportError::OpenFailed { attempts: failed });
        }

        let delay = retry.backoff_ms(failed);
        if delay > 0 {
            log::trace!("uart open attempt {failed} failed, retrying in {delay} ms");
            hal.delay_ms(delay);
        }
    }
}

/// A single duplex serial channel on top of a [`UartHal`].
///
/// Completions are fed in through
/// [`on_read_complete`](Self::on_read_complete). After a successful one the
/// consumer takes the data and calls [`rearm_read`](Self::rearm_read);
/// failed ones are re-issued immediately.
///
/// Use [`SharedTransport`](super::SharedTransport) when the completion
/// arrives in interrupt context.
pub struct Transport<H: UartHal> {
    hal: H,
    handle: Option<H::Handle>,
    retry: RetryPolicy,
    rx: Receiver,
}

impl<H: UartHal> Transport<H> {
    /// Create a closed transport using the default retry policy.
    #[must_use]
    pub const fn new(hal: H) -> Self {
        Self::with_retry_policy(hal, RetryPolicy::DEFAULT)
    }

    /// Create a closed transport with an explicit retry policy.
    #[must_use]
    pub const fn with_retry_policy(hal: H, retry: RetryPolicy) -> Self {
        Self {
            hal,
            handle: None,
            retry,
            rx: Receiver::new(),
        }
    }

    /// Open the channel and issue the first receive request.
    ///
    /// Does nothing once both have succeeded. A channel that opened but
    /// whose first receive request was rejected is not reopened; the
    /// request is issued again.
    pub fn open(&mut self) -> Result<(), TransportError> {
        let handle = match self.handle {
            Some(handle) => handle,
            None => {
                let handle = open_channel(&self.hal, self.retry)?;
                self.handle = Some(handle);
                handle
            }
        };
        self.rx.arm_first(&self.hal, handle)
    }

    /// Whether the channel has been opened.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.handle.is_some()
    }

    /// Transmit `bytes` synchronously.
    ///
    /// Returns the number of bytes the hardware reports as written.
    pub fn write(&self, bytes: &[u8]) -> Result<usize, TransportError> {
        let handle = self.handle.ok_or(TransportError::NotOpen)?;
        Ok(self.hal.write(handle, bytes))
    }

    /// Issue a full-capacity receive request.
    ///
    /// Fails with [`TransportError::ReadPending`] if a request is still
    /// outstanding.
    pub fn rearm_read(&mut self) -> Result<(), TransportError> {
        let handle = self.handle.ok_or(TransportError::NotOpen)?;
        self.rx.rearm(&self.hal, handle)
    }

    /// Completion handler for the outstanding receive request.
    pub fn on_read_complete(&mut self, completion: ReadCompletion<'_>) {
        if let ReadCompletion::Failure(status) = completion {
            log::trace!("uart read failed ({status}), re-arming");
        }
        if let Err(err) = self.rx.complete(&self.hal, self.handle, completion) {
            log::warn!("uart re-arm after failed read: {err}");
        }
    }

    /// Receive-side state.
    #[must_use]
    pub const fn receiver(&self) -> &Receiver {
        &self.rx
    }

    /// Length of the last successful transfer.
    #[must_use]
    pub const fn completed_len(&self) -> usize {
        self.rx.completed_len()
    }

    /// Bytes of the last successful transfer.
    #[must_use]
    pub fn received(&self) -> &[u8] {
        self.rx.received()
    }

    /// Whether a receive request is outstanding.
    #[must_use]
    pub const fn is_read_pending(&self) -> bool {
        self.rx.is_pending()
    }

    /// Retry policy used by [`open`](Self::open).
    #[must_use]
    pub const fn retry_policy(&self) -> RetryPolicy {
        self.retry
    }

    /// The underlying hardware layer.
    #[must_use]
    pub const fn hal(&self) -> &H {
        &self.hal
    }
}

/// Reject a write that the hardware did not take in full.
pub(super) const fn check_written(
    written: usize,
    requested: usize,
) -> Result<usize, TransportError> {
    if written < requested {
        return Err(TransportError::ShortWrite { written, requested });
    }
    Ok(written)
}

impl<H: UartHal> RawWrite for Transport<H> {
    fn raw_write(&mut self, bytes: &[u8]) -> Result<usize, TransportError> {
        check_written(self.write(bytes)?, bytes.len())
    }
}

impl<H: UartHal> core::fmt::Write for Transport<H> {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        self.raw_write(s.as_bytes())
            .map(|_| ())
            .map_err(|_| core::fmt::Error)
    }
}
