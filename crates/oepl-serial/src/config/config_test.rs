// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Tests for the serial configuration.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;

#[test]
fn default_config_matches_station_uart() {
    let config = UartConfig::default();
    assert_eq!(config.baud_rate, 115_200);
    assert_eq!(config.read_mode, ReadMode::Callback);
    assert_eq!(config.read_return_mode, ReadReturnMode::Partial);
}

#[test]
fn rx_buffer_is_256_bytes() {
    assert_eq!(RX_BUFFER_SIZE, 256);
}

#[test]
fn backoff_doubles_until_capped() {
    let policy = RetryPolicy {
        max_attempts: Some(10),
        initial_backoff_ms: 2,
        max_backoff_ms: 20,
    };
    assert_eq!(policy.backoff_ms(0), 0);
    assert_eq!(policy.backoff_ms(1), 2);
    assert_eq!(policy.backoff_ms(2), 4);
    assert_eq!(policy.backoff_ms(3), 8);
    assert_eq!(policy.backoff_ms(4), 16);
    assert_eq!(policy.backoff_ms(5), 20);
    assert_eq!(policy.backoff_ms(40), 20);
}

#[test]
fn backoff_saturates_on_overflow() {
    let policy = RetryPolicy {
        max_attempts: None,
        initial_backoff_ms: 1000,
        max_backoff_ms: u32::MAX,
    };
    assert_eq!(policy.backoff_ms(30), u32::MAX);
    assert_eq!(policy.backoff_ms(u32::MAX), u32::MAX);
}

#[test]
fn unbounded_policy_never_waits_or_gives_up() {
    let policy = RetryPolicy::UNBOUNDED;
    assert_eq!(policy.backoff_ms(1), 0);
    assert_eq!(policy.backoff_ms(1000), 0);
    assert!(policy.allows_retry(u32::MAX));
}

#[test]
fn bounded_policy_stops_at_max_attempts() {
    let policy = RetryPolicy {
        max_attempts: Some(3),
        ..RetryPolicy::DEFAULT
    };
    assert!(policy.allows_retry(0));
    assert!(policy.allows_retry(2));
    assert!(!policy.allows_retry(3));
}
