// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Receive buffer and the re-arm/completion state machine.
//!
//! Exactly one receive request is outstanding at a time. Completions:
//! - on success the received bytes are copied and their length recorded;
//!   **no** new request is issued until the consumer re-arms
//! - on failure the request is re-issued immediately
//!
//! Nothing here logs or blocks, so the state can be driven from interrupt
//! context while a critical section is held.

use super::{ReadCompletion, TransportError, UartHal};
use crate::config::RX_BUFFER_SIZE;

/// Receive-side state of a transport.
pub struct Receiver {
    buf: [u8; RX_BUFFER_SIZE],
    completed: usize,
    pending: bool,
    armed: bool,
}

impl Receiver {
    pub(crate) const fn new() -> Self {
        Self {
            buf: [0; RX_BUFFER_SIZE],
            completed: 0,
            pending: false,
            armed: false,
        }
    }

    /// Bytes of the last successful transfer.
    #[must_use]
    pub fn received(&self) -> &[u8] {
        &self.buf[..self.completed]
    }

    /// Length of the last successful transfer.
    #[must_use]
    pub const fn completed_len(&self) -> usize {
        self.completed
    }

    /// Whether a receive request is outstanding.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending
    }

    /// Issue a full-capacity receive request.
    pub(crate) fn rearm<H: UartHal>(
        &mut self,
        hal: &H,
        handle: H::Handle,
    ) -> Result<(), TransportError> {
        if self.pending {
            return Err(TransportError::ReadPending);
        }
        hal.read(handle, RX_BUFFER_SIZE)
            .map_err(TransportError::ReadRejected)?;
        self.pending = true;
        self.armed = true;
        Ok(())
    }

    /// Issue the first receive request unless one was ever accepted.
    pub(crate) fn arm_first<H: UartHal>(
        &mut self,
        hal: &H,
        handle: H::Handle,
    ) -> Result<(), TransportError> {
        if self.armed {
            return Ok(());
        }
        self.rearm(hal, handle)
    }

    /// Apply a completion. Returns the error of a failed re-arm.
    pub(crate) fn complete<H: UartHal>(
        &mut self,
        hal: &H,
        handle: Option<H::Handle>,
        completion: ReadCompletion<'_>,
    ) -> Result<(), TransportError> {
        self.pending = false;
        match completion {
            ReadCompletion::Success(data) => {
                let len = data.len().min(RX_BUFFER_SIZE);
                self.buf[..len].copy_from_slice(&data[..len]);
                self.completed = len;
                Ok(())
            }
            ReadCompletion::Failure(_) => {
                let handle = handle.ok_or(TransportError::NotOpen)?;
                self.rearm(hal, handle)
            }
        }
    }
}
