// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Mock UART hardware for testing.
//!
//! Records every primitive the transport calls and lets tests script open
//! failures, rejected reads and short writes, so the transport state machine
//! can be verified without hardware. State sits behind a `Mutex`, so a mock
//! can live in a `static` next to a [`SharedTransport`](super::SharedTransport).

use super::{HalStatus, UartHal};
use crate::config::UartConfig;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::vec::Vec;

/// Handle returned by [`MockUart::open`](UartHal::open).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockHandle {
    /// Sequence number of the successful open.
    pub id: u32,
}

#[derive(Debug, Default)]
struct MockState {
    /// Remaining opens that return `None`.
    open_failures: u32,
    /// Status returned by the next reads, consumed front to back.
    read_rejections: Vec<HalStatus>,
    /// Cap on bytes accepted per write call.
    write_limit: Option<usize>,
    open_calls: u32,
    configs: Vec<UartConfig>,
    reads: Vec<usize>,
    writes: usize,
    output: Vec<u8>,
    delays: Vec<u32>,
}

/// Mock UART backed by in-memory buffers.
#[derive(Debug, Default)]
pub struct MockUart {
    state: Mutex<MockState>,
}

impl MockUart {
    /// Create a mock whose channel opens on the first attempt.
    #[must_use]
    pub const fn new() -> Self {
        Self::failing_opens(0)
    }

    /// Create a mock whose first `failures` open attempts return `None`.
    #[must_use]
    pub const fn failing_opens(failures: u32) -> Self {
        Self {
            state: Mutex::new(MockState {
                open_failures: failures,
                read_rejections: Vec::new(),
                write_limit: None,
                open_calls: 0,
                configs: Vec::new(),
                reads: Vec::new(),
                writes: 0,
                output: Vec::new(),
                delays: Vec::new(),
            }),
        }
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Make the next read request fail with `status`.
    pub fn reject_next_read(&self, status: HalStatus) {
        self.state().read_rejections.push(status);
    }

    /// Accept at most `limit` bytes per write call.
    pub fn limit_writes(&self, limit: usize) {
        self.state().write_limit = Some(limit);
    }

    /// Number of times the open primitive was called.
    #[must_use]
    pub fn open_calls(&self) -> u32 {
        self.state().open_calls
    }

    /// Configurations passed to the open primitive.
    #[must_use]
    pub fn configs(&self) -> Vec<UartConfig> {
        self.state().configs.clone()
    }

    /// Lengths of the accepted read requests, in order.
    #[must_use]
    pub fn reads(&self) -> Vec<usize> {
        self.state().reads.clone()
    }

    /// Number of write calls.
    #[must_use]
    pub fn writes(&self) -> usize {
        self.state().writes
    }

    /// Bytes written so far.
    #[must_use]
    pub fn output(&self) -> Vec<u8> {
        self.state().output.clone()
    }

    /// Clear the output buffer and write counter.
    pub fn clear_output(&self) {
        let mut state = self.state();
        state.output.clear();
        state.writes = 0;
    }

    /// Delays requested through `delay_ms`, in order.
    #[must_use]
    pub fn delays(&self) -> Vec<u32> {
        self.state().delays.clone()
    }
}

impl UartHal for MockUart {
    type Handle = MockHandle;

    fn open(&self, config: &UartConfig) -> Option<MockHandle> {
        let mut state = self.state();
        state.open_calls += 1;
        state.configs.push(*config);
        if state.open_failures > 0 {
            state.open_failures -= 1;
            return None;
        }
        Some(MockHandle {
            id: state.open_calls,
        })
    }

    fn read(&self, _handle: MockHandle, len: usize) -> Result<(), HalStatus> {
        let mut state = self.state();
        if state.read_rejections.is_empty() {
            state.reads.push(len);
            Ok(())
        } else {
            Err(state.read_rejections.remove(0))
        }
    }

    fn write(&self, _handle: MockHandle, bytes: &[u8]) -> usize {
        let mut state = self.state();
        state.writes += 1;
        let len = state
            .write_limit
            .map_or(bytes.len(), |limit| bytes.len().min(limit));
        state.output.extend_from_slice(&bytes[..len]);
        len
    }

    fn delay_ms(&self, ms: u32) {
        self.state().delays.push(ms);
    }
}
