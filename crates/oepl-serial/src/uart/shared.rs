// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Interrupt-safe transport for a `static`.
//!
//! The foreground and the receive-completion interrupt share one
//! `static SharedTransport`. Only the receive state sits behind the
//! critical section: completions, re-arms and reads of the received bytes
//! hold it for a copy or a non-blocking request. Transmits copy the channel
//! handle out and run with interrupts enabled, so a blocking write never
//! holds off the completion interrupt.
//!
//! The same static doubles as the `log` backend, writing records to the
//! serial line.

use core::cell::{Cell, RefCell};
use core::fmt::Write as _;

use critical_section::Mutex;

use super::transport::{check_written, open_channel};
use super::{RawWrite, ReadCompletion, Receiver, TransportError, UartHal};
use crate::config::RetryPolicy;

/// A transport shared between the foreground and interrupt context.
pub struct SharedTransport<H: UartHal> {
    hal: H,
    retry: RetryPolicy,
    handle: Mutex<Cell<Option<H::Handle>>>,
    rx: Mutex<RefCell<Receiver>>,
}

impl<H: UartHal> SharedTransport<H> {
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
            retry,
            handle: Mutex::new(Cell::new(None)),
            rx: Mutex::new(RefCell::new(Receiver::new())),
        }
    }

    fn handle(&self) -> Option<H::Handle> {
        critical_section::with(|cs| self.handle.borrow(cs).get())
    }

    /// Run `f` on the receive state inside a critical section.
    ///
    /// Fails with [`TransportError::Unavailable`] if the state is already
    /// borrowed further up the stack.
    fn with_rx<R>(
        &self,
        f: impl FnOnce(&mut Receiver) -> Result<R, TransportError>,
    ) -> Result<R, TransportError> {
        critical_section::with(|cs| {
            let mut rx = self
                .rx
                .borrow(cs)
                .try_borrow_mut()
                .map_err(|_| TransportError::Unavailable)?;
            f(&mut rx)
        })
    }

    /// Open the channel and issue the first receive request.
    ///
    /// Retries run outside any critical section. Does nothing once both
    /// have succeeded.
    pub fn open(&self) -> Result<(), TransportError> {
        let handle = match self.handle() {
            Some(handle) => handle,
            None => {
                let opened = open_channel(&self.hal, self.retry)?;
                critical_section::with(|cs| {
                    let slot = self.handle.borrow(cs);
                    let handle = slot.get().unwrap_or(opened);
                    slot.set(Some(handle));
                    handle
                })
            }
        };
        self.with_rx(|rx| rx.arm_first(&self.hal, handle))
    }

    /// Whether the channel has been opened.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.handle().is_some()
    }

    /// Transmit `bytes` synchronously, with interrupts enabled.
    ///
    /// Returns the number of bytes the hardware reports as written.
    pub fn write(&self, bytes: &[u8]) -> Result<usize, TransportError> {
        let handle = self.handle().ok_or(TransportError::NotOpen)?;
        Ok(self.hal.write(handle, bytes))
    }

    /// Issue a full-capacity receive request.
    pub fn rearm_read(&self) -> Result<(), TransportError> {
        let handle = self.handle().ok_or(TransportError::NotOpen)?;
        self.with_rx(|rx| rx.rearm(&self.hal, handle))
    }

    /// Entry point for the hardware's receive-completion callback.
    ///
    /// A failed re-arm is logged once the critical section is released.
    pub fn on_read_complete(&self, completion: ReadCompletion<'_>) -> Result<(), TransportError> {
        let handle = self.handle();
        let rearmed = self.with_rx(|rx| Ok(rx.complete(&self.hal, handle, completion)))?;
        if let ReadCompletion::Failure(status) = completion {
            log::trace!("uart read failed ({status}), re-arming");
        }
        if let Err(err) = rearmed {
            log::warn!("uart re-arm after failed read: {err}");
        }
        Ok(())
    }

    /// Inspect the receive state inside a critical section.
    ///
    /// Keep `f` short: it runs with interrupts masked.
    pub fn receiver<R>(&self, f: impl FnOnce(&Receiver) -> R) -> Result<R, TransportError> {
        self.with_rx(|rx| Ok(f(rx)))
    }

    /// Copy the last received bytes into `out`, then issue the next receive
    /// request.
    ///
    /// Returns the number of bytes copied, at most `out.len()`.
    pub fn take_received(&self, out: &mut [u8]) -> Result<usize, TransportError> {
        let handle = self.handle().ok_or(TransportError::NotOpen)?;
        self.with_rx(|rx| {
            let data = rx.received();
            let len = data.len().min(out.len());
            out[..len].copy_from_slice(&data[..len]);
            rx.rearm(&self.hal, handle)?;
            Ok(len)
        })
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

impl<H: UartHal> RawWrite for &SharedTransport<H> {
    fn raw_write(&mut self, bytes: &[u8]) -> Result<usize, TransportError> {
        check_written(self.write(bytes)?, bytes.len())
    }
}

impl<H: UartHal> core::fmt::Write for &SharedTransport<H> {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        self.raw_write(s.as_bytes())
            .map(|_| ())
            .map_err(|_| core::fmt::Error)
    }
}

impl<H> SharedTransport<H>
where
    H: UartHal + Send + Sync + 'static,
    H::Handle: Send,
{
    /// Register this transport as the global `log` backend.
    pub fn init_logger(&'static self, level: log::LevelFilter) -> Result<(), TransportError> {
        log::set_logger(self).map_err(|_| TransportError::LoggerInstalled)?;
        log::set_max_level(level);
        Ok(())
    }
}

impl<H> log::Log for SharedTransport<H>
where
    H: UartHal + Send + Sync,
    H::Handle: Send,
{
    fn enabled(&self, metadata: &log::Metadata<'_>) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let mut line = self;
        // The line is the only place a failure could be reported, so records
        // written before `open` or cut short by the hardware are lost.
        let _ = writeln!(
            line,
            "[{}] {}: {}",
            record.level(),
            record.target(),
            record.args()
        );
    }

    fn flush(&self) {}
}
