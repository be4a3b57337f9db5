//! Interactive date/time entry and `ctime`-style rendering.
//!
//! The console asks for six fixed-width digit groups in order. Each group is
//! validated on its own (digits only), then the whole date is checked as a
//! calendar date and converted to Unix seconds. Entered values are UTC.

use core::fmt::Write;

use chrono::{DateTime, NaiveDate};
use heapless::String;

use crate::error::ConsoleError;

/// One digit group of the date entry dialogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateField {
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
}

impl DateField {
    /// Entry order.
    pub const ALL: [DateField; 6] = [
        DateField::Year,
        DateField::Month,
        DateField::Day,
        DateField::Hour,
        DateField::Minute,
        DateField::Second,
    ];

    /// Number of digits the console reads for this field.
    pub fn width(self) -> usize {
        match self {
            Self::Year => 4,
            _ => 2,
        }
    }

    pub fn prompt(self) -> &'static str {
        match self {
            Self::Year => "\r\nType four digits for the current year (YYYY): ",
            Self::Month => "Type two digits for the current month (01-12): ",
            Self::Day => "Type two digits for the current day (01-31): ",
            Self::Hour => "Type two digits for the current hour (00-23): ",
            Self::Minute => "Type two digits for the current minutes (00-59): ",
            Self::Second => "Type two digits for the current seconds (00-59): ",
        }
    }
}

/// Decode one fixed-width group of ASCII digits.
pub fn parse_digits(bytes: &[u8]) -> Result<u32, ConsoleError> {
    bytes.iter().try_fold(0u32, |acc, &b| {
        if b.is_ascii_digit() {
            Ok(acc * 10 + u32::from(b - b'0'))
        } else {
            Err(ConsoleError::NotADigit)
        }
    })
}

/// Calendar fields as typed on the console.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateTimeEntry {
    pub year: u32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
}

impl DateTimeEntry {
    pub fn set(&mut self, field: DateField, value: u32) {
        match field {
            DateField::Year => self.year = value,
            DateField::Month => self.month = value,
            DateField::Day => self.day = value,
            DateField::Hour => self.hour = value,
            DateField::Minute => self.minute = value,
            DateField::Second => self.second = value,
        }
    }

    /// Parse the concatenated digit groups, `YYYYMMDDhhmmss`.
    pub fn parse(input: &[u8]) -> Result<Self, ConsoleError> {
        let total: usize = DateField::ALL.iter().map(|f| f.width()).sum();
        if input.len() != total {
            return Err(ConsoleError::InvalidDateTime);
        }
        let mut entry = Self::default();
        let mut rest = input;
        for field in DateField::ALL {
            let (group, tail) = rest.split_at(field.width());
            entry.set(field, parse_digits(group)?);
            rest = tail;
        }
        Ok(entry)
    }

    /// Seconds since the Unix epoch, or an error for impossible dates
    /// (month 13, February 30th, hour 24, ...).
    pub fn to_epoch(&self) -> Result<i64, ConsoleError> {
        let year = i32::try_from(self.year).map_err(|_| ConsoleError::InvalidDateTime)?;
        NaiveDate::from_ymd_opt(year, self.month, self.day)
            .and_then(|d| d.and_hms_opt(self.hour, self.minute, self.second))
            .map(|dt| dt.and_utc().timestamp())
            .ok_or(ConsoleError::InvalidDateTime)
    }
}

/// `Www Mmm dd hh:mm:ss yyyy`, without the trailing newline.
pub fn format_ctime(epoch_secs: i64) -> String<32> {
    let mut out = String::new();
    match DateTime::from_timestamp(epoch_secs, 0) {
        Some(dt) => {
            let _ = write!(out, "{}", dt.format("%a %b %e %H:%M:%S %Y"));
        }
        None => {
            let _ = out.push_str("??? ??? ?? ??:??:?? ????");
        }
    }
    out
}
