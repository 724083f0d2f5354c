use crate::error::{AppError, AppResult};
use chrono::{Datelike, Months, NaiveDate};
use regex::Regex;
use std::sync::LazyLock;

static MONTH_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{2})-(\d{4})$").expect("month pattern is valid"));

/// 解析 "MM-YYYY" 为当月 1 日
pub fn parse_month(field: &str, value: &str) -> AppResult<NaiveDate> {
    let invalid = || {
        AppError::InvalidDateFormat(format!(
            "invalid {field} format: expected MM-YYYY, got {value:?}"
        ))
    };

    let caps = MONTH_PATTERN.captures(value).ok_or_else(invalid)?;
    let month: u32 = caps[1].parse().map_err(|_| invalid())?;
    let year: i32 = caps[2].parse().map_err(|_| invalid())?;

    NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)
}

/// 格式化为 "MM-YYYY"，日信息被丢弃
pub fn format_month(date: NaiveDate) -> String {
    format!("{:02}-{:04}", date.month(), date.year())
}

/// Half-open query window `[start, end)` covering whole calendar months.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl MonthWindow {
    /// The end month is advanced by one so that it is fully covered.
    pub fn parse(start: &str, end: &str) -> AppResult<Self> {
        let start = parse_month("start_date", start)?;
        let end = parse_month("end_date", end)?;
        let end = end.checked_add_months(Months::new(1)).ok_or_else(|| {
            AppError::InvalidDateFormat("end_date is out of the supported range".to_string())
        })?;

        Ok(Self { start, end })
    }
}
