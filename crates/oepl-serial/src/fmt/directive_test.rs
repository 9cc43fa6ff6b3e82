// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::vec::Vec;

use super::directive::{Conversion, Segment, Segments, Spec};

fn scan(format: &str) -> Vec<Segment<'_>> {
    Segments::new(format).collect()
}

const fn spec(left: bool, zero: bool, width: usize) -> Spec {
    Spec { left, zero, width }
}

#[test]
fn plain_literal() {
    assert_eq!(scan("abc"), [Segment::Literal(b"abc")]);
    assert!(scan("").is_empty());
}

#[test]
fn literals_around_directives() {
    assert_eq!(
        scan("a%db"),
        [
            Segment::Literal(b"a"),
            Segment::Directive(Spec::default(), Conversion::Signed),
            Segment::Literal(b"b"),
        ]
    );
}

#[test]
fn every_conversion_letter() {
    let conversions: Vec<Conversion> = scan("%s%d%u%x%X%c%%")
        .into_iter()
        .map(|segment| match segment {
            Segment::Directive(_, conversion) => conversion,
            Segment::Literal(bytes) => panic!("unexpected literal {bytes:?}"),
        })
        .collect();
    assert_eq!(
        conversions,
        [
            Conversion::Str,
            Conversion::Signed,
            Conversion::Unsigned,
            Conversion::HexLower,
            Conversion::HexUpper,
            Conversion::Char,
            Conversion::Percent,
        ]
    );
}

#[test]
fn flags_and_width() {
    assert_eq!(
        scan("%-12s"),
        [Segment::Directive(spec(true, false, 12), Conversion::Str)]
    );
    assert_eq!(
        scan("%08X"),
        [Segment::Directive(spec(false, true, 8), Conversion::HexUpper)]
    );
    assert_eq!(
        scan("%-05d"),
        [Segment::Directive(spec(true, true, 5), Conversion::Signed)]
    );
    assert_eq!(
        scan("%0007u"),
        [Segment::Directive(spec(false, true, 7), Conversion::Unsigned)]
    );
}

#[test]
fn zero_after_width_digit_is_part_of_width() {
    assert_eq!(
        scan("%10d"),
        [Segment::Directive(spec(false, false, 10), Conversion::Signed)]
    );
}

#[test]
fn huge_width_saturates() {
    let segments = scan("%99999999999999999999999d");
    assert_eq!(
        segments,
        [Segment::Directive(spec(false, false, usize::MAX), Conversion::Signed)]
    );
}

#[test]
fn unknown_letter_stops_scanning() {
    assert_eq!(scan("ab%qcd%d"), [Segment::Literal(b"ab")]);
}

#[test]
fn flagged_percent_is_unknown() {
    assert_eq!(scan("x%-%y"), [Segment::Literal(b"x")]);
}

#[test]
fn trailing_percent_stops_scanning() {
    assert_eq!(scan("ab%"), [Segment::Literal(b"ab")]);
    assert!(scan("%-").is_empty());
}

#[test]
fn scanning_stays_stopped() {
    let mut segments = Segments::new("%z%d");
    assert_eq!(segments.next(), None);
    assert_eq!(segments.next(), None);
}

#[test]
fn conversion_letters_round_trip() {
    for letter in [b's', b'd', b'u', b'x', b'X', b'c'] {
        let format = [b'%', letter];
        let format = core::str::from_utf8(&format).unwrap();
        let [Segment::Directive(_, conversion)] = scan(format)[..] else {
            panic!("expected one directive for {format}");
        };
        assert_eq!(conversion.letter(), char::from(letter));
    }
    assert_eq!(Conversion::Percent.letter(), '%');
}
