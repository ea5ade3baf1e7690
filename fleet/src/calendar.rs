//! Maintenance calendar: month grids and rescheduling.

use chrono::{Datelike, Days, NaiveDate};

use crate::schema::Asset;
use crate::{Error, Result};

/// One cell of the month grid.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarDay {
    pub date: NaiveDate,
    /// False for the leading/trailing days of neighbouring months.
    pub in_month: bool,
    /// Assets whose next maintenance falls on this date.
    pub asset_ids: Vec<String>,
}

/// A month laid out as Sunday-first weeks.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthView {
    pub year: i32,
    pub month: u32,
    pub weeks: Vec<Vec<CalendarDay>>,
}

impl MonthView {
    pub fn day(&self, date: NaiveDate) -> Option<&CalendarDay> {
        self.weeks.iter().flatten().find(|d| d.date == date)
    }

    /// Days inside the month that have maintenance scheduled.
    pub fn scheduled_days(&self) -> impl Iterator<Item = &CalendarDay> {
        self.weeks
            .iter()
            .flatten()
            .filter(|d| d.in_month && !d.asset_ids.is_empty())
    }
}

/// Parse `YYYY-MM`.
pub fn parse_month(s: &str) -> Result<(i32, u32)> {
    let invalid = || Error::InvalidInput(format!("expected YYYY-MM, got '{}'", s));
    let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
    let year: i32 = year.parse().map_err(|_| invalid())?;
    let month: u32 = month.parse().map_err(|_| invalid())?;
    if !(1..=12).contains(&month) {
        return Err(invalid());
    }
    Ok((year, month))
}

/// Build the grid for a month, placing assets on their next maintenance date.
pub fn month_view(year: i32, month: u32, assets: &[Asset]) -> Result<MonthView> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| Error::InvalidInput(format!("invalid month {}-{:02}", year, month)))?;
    let next_first = first
        .checked_add_months(chrono::Months::new(1))
        .ok_or_else(|| Error::InvalidInput(format!("month out of range {}-{:02}", year, month)))?;
    let last = next_first.pred_opt().unwrap_or(first);

    let lead = u64::from(first.weekday().num_days_from_sunday());
    let trail = u64::from(6 - last.weekday().num_days_from_sunday());
    let grid_start = first.checked_sub_days(Days::new(lead)).unwrap_or(first);
    let grid_end = last.checked_add_days(Days::new(trail)).unwrap_or(last);

    let mut weeks = Vec::new();
    let mut week = Vec::with_capacity(7);
    for date in grid_start.iter_days().take_while(|d| *d <= grid_end) {
        let asset_ids = assets
            .iter()
            .filter(|a| a.next_maintenance == Some(date))
            .map(|a| a.id.clone())
            .collect();
        week.push(CalendarDay {
            date,
            in_month: date.month() == month && date.year() == year,
            asset_ids,
        });
        if week.len() == 7 {
            weeks.push(std::mem::replace(&mut week, Vec::with_capacity(7)));
        }
    }

    Ok(MonthView { year, month, weeks })
}

/// Move an asset's next maintenance to `date`. Dates before `today` are rejected.
pub fn reschedule(asset: &Asset, date: NaiveDate, today: NaiveDate) -> Result<Asset> {
    if date < today {
        return Err(Error::InvalidInput(format!(
            "cannot schedule {} in the past ({} is before {})",
            asset.id, date, today
        )));
    }

    let mut updated = asset.clone();
    updated.next_maintenance = Some(date);
    log::info!(
        "rescheduled {} from {:?} to {}",
        asset.id,
        asset.next_maintenance,
        date
    );
    Ok(updated)
}
