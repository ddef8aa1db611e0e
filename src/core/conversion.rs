//! Conversion rates against user-entered quote counts
//!
//! Direction: reservations over quotes. Per instance that is `total / quotes`
//! and `confirmed / quotes`; globally `confirmed / global quotes`. A zero
//! denominator always yields `0.00`.

use crate::types::{GlobalTotals, InstanceStats};
use serde::{Serialize, Serializer};
use std::fmt;

/// A percentage with exactly two decimals, stored as hundredths of a percent
/// (`2500` is `25.00%`). Rounding is half-up on the exact integer ratio.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ConversionRate {
    hundredths: u64,
}

impl ConversionRate {
    pub const ZERO: ConversionRate = ConversionRate { hundredths: 0 };

    pub fn from_hundredths(hundredths: u64) -> Self {
        Self { hundredths }
    }

    pub fn hundredths(&self) -> u64 {
        self.hundredths
    }

    pub fn as_f64(&self) -> f64 {
        self.hundredths as f64 / 100.0
    }
}

impl fmt::Display for ConversionRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.hundredths / 100, self.hundredths % 100)
    }
}

impl Serialize for ConversionRate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_f64())
    }
}

/// `numerator / denominator * 100`, rounded to two decimals.
pub fn conversion_rate(numerator: u64, denominator: u64) -> ConversionRate {
    if denominator == 0 {
        return ConversionRate::ZERO;
    }
    let scaled = u128::from(numerator) * 10_000;
    let denominator = u128::from(denominator);
    let hundredths = (scaled * 2 + denominator) / (denominator * 2);
    ConversionRate::from_hundredths(u64::try_from(hundredths).unwrap_or(u64::MAX))
}

/// The two ratios shown for an instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct InstanceConversion {
    pub quotes: u64,
    /// total / quotes
    pub total_rate: ConversionRate,
    /// confirmed / quotes
    pub confirmed_rate: ConversionRate,
}

impl InstanceConversion {
    pub fn new(stats: &InstanceStats, quotes: u64) -> Self {
        Self {
            quotes,
            total_rate: conversion_rate(stats.total, quotes),
            confirmed_rate: conversion_rate(stats.confirmed, quotes),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GlobalConversion {
    pub quotes: u64,
    pub confirmed: u64,
    /// confirmed / quotes
    pub rate: ConversionRate,
}

impl GlobalConversion {
    pub fn new(totals: &GlobalTotals, quotes: u64) -> Self {
        Self {
            quotes,
            confirmed: totals.confirmed,
            rate: conversion_rate(totals.confirmed, quotes),
        }
    }
}

/// Lenient integer parsing for quote inputs.
///
/// Leading whitespace and a sign are accepted, then the leading run of digits
/// is taken (`"12 quotes"` -> 12). No digits, or a negative value, gives 0.
/// Values past `u64::MAX` saturate.
pub fn parse_quote_input(input: &str) -> u64 {
    let trimmed = input.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits: &str = {
        let end = rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len());
        &rest[..end]
    };
    if digits.is_empty() || negative {
        return 0;
    }

    digits.bytes().fold(0u64, |acc, b| {
        acc.saturating_mul(10).saturating_add(u64::from(b - b'0'))
    })
}
