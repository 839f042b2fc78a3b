use std::fmt::Display;

use chrono::{DateTime, Datelike, Local, NaiveDate, TimeZone};

pub const DEFAULT_DATETIME_FORMAT: &str = "%Y-%m-%d %H-%M";

/// Year offsets from the current year, end exclusive.
pub const DEFAULT_YEAR_RANGE: (i32, i32) = (-5, 2);

/// One `(value, label)` option of a select list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    pub value: String,
    pub label: String,
}

impl Choice {
    fn same(text: String) -> Self {
        Self {
            label: text.clone(),
            value: text,
        }
    }

    fn blank(label: &str) -> Self {
        Self {
            value: String::new(),
            label: label.to_string(),
        }
    }
}

/// `"01"` through `"12"`, preceded by an empty-valued choice when
/// `blank_label` is given.
pub fn month_choices(blank_label: Option<&str>) -> Vec<Choice> {
    with_blank(
        blank_label,
        (1..=12).map(|m| Choice::same(format!("{m:02}"))),
    )
}

/// Years `today.year() + start_offset` up to, not including,
/// `today.year() + end_offset`.
pub fn year_choices(
    today: NaiveDate,
    start_offset: i32,
    end_offset: i32,
    blank_label: Option<&str>,
) -> Vec<Choice> {
    let year = today.year();
    let (first, last) = (year.saturating_add(start_offset), year.saturating_add(end_offset));
    with_blank(
        blank_label,
        (first..last).map(|y| Choice::same(y.to_string())),
    )
}

fn with_blank(blank_label: Option<&str>, choices: impl Iterator<Item = Choice>) -> Vec<Choice> {
    blank_label
        .filter(|l| !l.is_empty())
        .map(Choice::blank)
        .into_iter()
        .chain(choices)
        .collect()
}

/// Zero-pad a month to two digits. Empty input stays empty.
pub fn fmt_month(month: &str) -> String {
    if month.is_empty() {
        return String::new();
    }
    format!("{month:0>2}")
}

/// Format `d` with `fmt`, or [`DEFAULT_DATETIME_FORMAT`] when `fmt` is
/// empty. A missing datetime renders as the empty string.
pub fn fmt_datetime<Tz>(d: Option<&DateTime<Tz>>, fmt: &str) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let Some(d) = d else {
        return String::new();
    };
    let fmt = if fmt.is_empty() {
        DEFAULT_DATETIME_FORMAT
    } else {
        fmt
    };
    d.format(fmt).to_string()
}

/// [`fmt_datetime`] after converting to the local timezone.
pub fn fmt_local_datetime<Tz: TimeZone>(d: Option<&DateTime<Tz>>, fmt: &str) -> String {
    let local = d.map(|d| d.with_timezone(&Local));
    fmt_datetime(local.as_ref(), fmt)
}
