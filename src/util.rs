// src/util.rs
//
// Date-key helpers. The timesheet page is addressed by a YYYYMMDD key,
// so everything here produces that shape.

use chrono::{Datelike, Days, Local, NaiveDate, Weekday};
use log::warn;

pub fn today() -> String {
    Local::now().format("%Y%m%d").to_string()
}

/// Normalize a date argument to YYYYMMDD. Accepts YYYYMMDD and
/// YYYY-MM-DD; anything else falls back to today with a warning, so a
/// typo still yields a run instead of nothing.
pub fn query_date(arg: Option<&str>) -> String {
    let Some(raw) = arg else {
        return today();
    };
    let clean = raw.replace('-', "");
    if clean.len() == 8 && clean.bytes().all(|b| b.is_ascii_digit()) {
        return clean;
    }
    warn!("bad date argument '{raw}', using today (expected YYYYMMDD or YYYY-MM-DD)");
    today()
}

/// The Friday belonging to `d`'s week: weekdays map forward to that
/// week's Friday, Saturday and Sunday map back to the one just past.
pub fn friday_of_week(d: NaiveDate) -> NaiveDate {
    match d.weekday() {
        Weekday::Sun => d - Days::new(2),
        Weekday::Sat => d - Days::new(1),
        w => d + Days::new(4 - w.num_days_from_monday() as u64),
    }
}

/// YYYYMMDD key of the current week's Friday, for weekly-total runs.
pub fn this_friday() -> String {
    friday_of_week(Local::now().date_naive())
        .format("%Y%m%d")
        .to_string()
}
