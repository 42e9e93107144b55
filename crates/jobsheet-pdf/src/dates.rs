//! Date renderings written into date fields.

use jiff::civil::Date;

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateStyle {
    /// `19th,10`
    DayMonth,
    /// `October 19th, 2026`
    Long,
    /// `2026-10-19`
    Iso,
}

impl DateStyle {
    pub fn format(self, date: Date) -> String {
        match self {
            DateStyle::DayMonth => format!("{},{:02}", ordinal(date.day()), date.month()),
            DateStyle::Long => format!(
                "{} {}, {}",
                MONTHS[(date.month() - 1) as usize],
                ordinal(date.day()),
                date.year()
            ),
            DateStyle::Iso => format!(
                "{:04}-{:02}-{:02}",
                date.year(),
                date.month(),
                date.day()
            ),
        }
    }
}

/// Day of month with its English ordinal suffix.
pub fn ordinal(day: i8) -> String {
    let suffix = match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{day}{suffix}")
}
