//! Display helpers for listing pages: grouped numbers, byte sizes, month and
//! year choice lists.

mod date;
mod filesize;
mod num;

pub use date::{
    Choice, DEFAULT_DATETIME_FORMAT, DEFAULT_YEAR_RANGE, fmt_datetime, fmt_local_datetime,
    fmt_month, month_choices, year_choices,
};
pub use filesize::{format_filesize, format_filesize_str};
pub use num::{fmt_num, group_thousands};
