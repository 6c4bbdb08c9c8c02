// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use billed::format::{
    DateStyle, format_date, format_status, parse_bill_date, try_format_date,
};
use billed::models::BillStatus;
use chrono::NaiveDate;

#[test]
fn iso_style_keeps_sortable_shape() {
    assert_eq!(format_date("2004-04-04", DateStyle::Iso), "2004-04-04");
    assert_eq!(
        format_date("2004-04-04T08:30:00+02:00", DateStyle::Iso),
        "2004-04-04"
    );
}

#[test]
fn french_short_matches_display_format() {
    assert_eq!(
        try_format_date("2004-04-04", DateStyle::FrenchShort).unwrap(),
        "4 Avr. 04"
    );
    assert_eq!(
        try_format_date("2022-12-25", DateStyle::FrenchShort).unwrap(),
        "25 Déc. 22"
    );
}

#[test]
fn malformed_date_comes_back_untouched() {
    assert!(try_format_date("not a date", DateStyle::Iso).is_err());
    assert_eq!(format_date("not a date", DateStyle::Iso), "not a date");
    assert_eq!(format_date("2004-13-45", DateStyle::FrenchShort), "2004-13-45");
}

#[test]
fn timestamps_reduce_to_day() {
    assert_eq!(
        parse_bill_date("2003-03-03T10:15:00Z"),
        NaiveDate::from_ymd_opt(2003, 3, 3)
    );
    assert_eq!(
        parse_bill_date("2003-03-03T10:15:00.250"),
        NaiveDate::from_ymd_opt(2003, 3, 3)
    );
    assert_eq!(parse_bill_date(""), None);
}

#[test]
fn status_labels_and_passthrough() {
    assert_eq!(format_status(&BillStatus::Pending), "En attente");
    assert_eq!(format_status(&BillStatus::Accepted), "Accepté");
    assert_eq!(format_status(&BillStatus::Refused), "Refusé");
    assert_eq!(
        format_status(&BillStatus::from("archived")),
        "archived"
    );
}

#[test]
fn date_style_parses_cli_spellings() {
    assert_eq!("ISO".parse::<DateStyle>().unwrap(), DateStyle::Iso);
    assert_eq!(
        "french-short".parse::<DateStyle>().unwrap(),
        DateStyle::FrenchShort
    );
    assert!("long".parse::<DateStyle>().is_err());
}
