// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Tests for the UART interface and mock.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::{HalStatus, MockHandle, MockUart, TransportError, UartHal};
use crate::config::UartConfig;

#[test]
fn mock_uart_opens_first_time() {
    let uart = MockUart::new();
    let handle = uart.open(&UartConfig::DEFAULT);
    assert_eq!(handle, Some(MockHandle { id: 1 }));
    assert_eq!(uart.open_calls(), 1);
    assert_eq!(uart.configs(), &[UartConfig::DEFAULT]);
}

#[test]
fn mock_uart_scripted_open_failures() {
    let uart = MockUart::failing_opens(2);
    assert_eq!(uart.open(&UartConfig::DEFAULT), None);
    assert_eq!(uart.open(&UartConfig::DEFAULT), None);
    assert_eq!(uart.open(&UartConfig::DEFAULT), Some(MockHandle { id: 3 }));
}

#[test]
fn mock_uart_records_reads() {
    let uart = MockUart::new();
    let handle = uart.open(&UartConfig::DEFAULT).unwrap();
    uart.read(handle, 256).unwrap();
    uart.read(handle, 16).unwrap();
    assert_eq!(uart.reads(), &[256, 16]);
}

#[test]
fn mock_uart_rejects_scripted_read() {
    let uart = MockUart::new();
    let handle = uart.open(&UartConfig::DEFAULT).unwrap();
    uart.reject_next_read(HalStatus(-3));
    assert_eq!(uart.read(handle, 256), Err(HalStatus(-3)));
    assert!(uart.reads().is_empty());
    assert_eq!(uart.read(handle, 256), Ok(()));
}

#[test]
fn mock_uart_write_and_limit() {
    let uart = MockUart::new();
    let handle = uart.open(&UartConfig::DEFAULT).unwrap();
    assert_eq!(uart.write(handle, b"Hi"), 2);
    uart.limit_writes(1);
    assert_eq!(uart.write(handle, b"!!"), 1);
    assert_eq!(uart.output(), b"Hi!");
    assert_eq!(uart.writes(), 2);

    uart.clear_output();
    assert!(uart.output().is_empty());
    assert_eq!(uart.writes(), 0);
}

#[test]
fn mock_uart_records_delays() {
    let uart = MockUart::new();
    uart.delay_ms(4);
    uart.delay_ms(8);
    assert_eq!(uart.delays(), &[4, 8]);
}

#[test]
fn hal_status_display() {
    assert_eq!(format!("{}", HalStatus(-1)), "hardware status -1");
}

#[test]
fn transport_error_display() {
    assert_eq!(format!("{}", TransportError::NotOpen), "uart channel not open");
    assert_eq!(
        format!("{}", TransportError::OpenFailed { attempts: 3 }),
        "uart channel failed to open after 3 attempts"
    );
    assert_eq!(
        format!("{}", TransportError::Unavailable),
        "receive state unavailable"
    );
    assert_eq!(
        format!("{}", TransportError::ReadRejected(HalStatus(-2))),
        "receive request rejected: hardware status -2"
    );
    assert_eq!(
        format!(
            "{}",
            TransportError::ShortWrite {
                written: 1,
                requested: 4
            }
        ),
        "short write: 1 of 4 bytes"
    );
}
