// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::FormatError;
use crate::models::BillStatus;
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateStyle {
    /// `2004-04-04`
    #[default]
    Iso,
    /// `4 Avr. 04`
    FrenchShort,
}

impl FromStr for DateStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "iso" => Ok(DateStyle::Iso),
            "french_short" | "french-short" | "fr" => Ok(DateStyle::FrenchShort),
            other => Err(format!("Unknown date style '{}' (use iso|french-short)", other)),
        }
    }
}

const FR_MONTHS: [&str; 12] = [
    "Jan", "Fév", "Mar", "Avr", "Mai", "Jui", "Jui", "Aoû", "Sep", "Oct", "Nov", "Déc",
];

/// Parses the stored date into a comparable value. Accepts plain dates,
/// RFC 3339 timestamps and naive `T`-separated timestamps.
pub fn parse_bill_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(d);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|dt| dt.date())
}

pub fn try_format_date(raw: &str, style: DateStyle) -> Result<String, FormatError> {
    let d = parse_bill_date(raw).ok_or_else(|| FormatError {
        raw: raw.to_string(),
    })?;
    Ok(match style {
        DateStyle::Iso => d.format("%Y-%m-%d").to_string(),
        DateStyle::FrenchShort => format!(
            "{} {}. {:02}",
            d.day(),
            FR_MONTHS[d.month0() as usize],
            d.year().rem_euclid(100)
        ),
    })
}

/// Display date; malformed input comes back untouched so the row still renders.
pub fn format_date(raw: &str, style: DateStyle) -> String {
    try_format_date(raw, style).unwrap_or_else(|_| raw.to_string())
}

pub fn format_status(status: &BillStatus) -> String {
    match status {
        BillStatus::Pending => "En attente".to_string(),
        BillStatus::Accepted => "Accepté".to_string(),
        BillStatus::Refused => "Refusé".to_string(),
        BillStatus::Other(s) => s.clone(),
    }
}

