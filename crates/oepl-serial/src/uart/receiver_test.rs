// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::{HalStatus, MockHandle, MockUart, ReadCompletion, Receiver, TransportError};
use crate::config::RX_BUFFER_SIZE;

const HANDLE: MockHandle = MockHandle { id: 1 };

#[test]
fn new_receiver_is_idle() {
    let rx = Receiver::new();
    assert!(!rx.is_pending());
    assert_eq!(rx.completed_len(), 0);
    assert!(rx.received().is_empty());
}

#[test]
fn arm_first_only_once() {
    let uart = MockUart::new();
    let mut rx = Receiver::new();
    rx.arm_first(&uart, HANDLE).unwrap();
    rx.complete(&uart, Some(HANDLE), ReadCompletion::Success(b"a"))
        .unwrap();
    rx.arm_first(&uart, HANDLE).unwrap();
    assert!(!rx.is_pending());
    assert_eq!(uart.reads(), &[RX_BUFFER_SIZE]);
}

#[test]
fn rejected_first_request_is_not_armed() {
    let uart = MockUart::new();
    uart.reject_next_read(HalStatus(-2));
    let mut rx = Receiver::new();
    assert_eq!(
        rx.arm_first(&uart, HANDLE),
        Err(TransportError::ReadRejected(HalStatus(-2)))
    );
    rx.arm_first(&uart, HANDLE).unwrap();
    assert!(rx.is_pending());
}

#[test]
fn rearm_while_pending() {
    let uart = MockUart::new();
    let mut rx = Receiver::new();
    rx.rearm(&uart, HANDLE).unwrap();
    assert_eq!(rx.rearm(&uart, HANDLE), Err(TransportError::ReadPending));
}

#[test]
fn failure_reports_rejected_rearm() {
    let uart = MockUart::new();
    let mut rx = Receiver::new();
    rx.rearm(&uart, HANDLE).unwrap();
    uart.reject_next_read(HalStatus(-6));
    assert_eq!(
        rx.complete(&uart, Some(HANDLE), ReadCompletion::Failure(HalStatus(-1))),
        Err(TransportError::ReadRejected(HalStatus(-6)))
    );
    assert!(!rx.is_pending());
}

#[test]
fn failure_without_handle_cannot_rearm() {
    let uart = MockUart::new();
    let mut rx = Receiver::new();
    assert_eq!(
        rx.complete::<MockUart>(&uart, None, ReadCompletion::Failure(HalStatus(-1))),
        Err(TransportError::NotOpen)
    );
    assert!(uart.reads().is_empty());
}

#[test]
fn success_replaces_previous_transfer() {
    let uart = MockUart::new();
    let mut rx = Receiver::new();
    rx.complete(&uart, Some(HANDLE), ReadCompletion::Success(b"first"))
        .unwrap();
    rx.complete(&uart, Some(HANDLE), ReadCompletion::Success(b"2nd"))
        .unwrap();
    assert_eq!(rx.received(), b"2nd");
}
