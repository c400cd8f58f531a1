//! In-season queries over [`SeasonWindow`] values.

use chrono::{Datelike, NaiveDate};

use crate::domain::season::SeasonWindow;

/// Anything that carries a season window and can be filtered by month.
pub trait Seasonal {
    fn season(&self) -> &SeasonWindow;
}

impl Seasonal for SeasonWindow {
    fn season(&self) -> &SeasonWindow {
        self
    }
}

/// Whether `month` (1..=12) falls inside the window. Year-round windows are
/// always in season; wrap and split ranges are both honored.
pub fn is_in_season(window: &SeasonWindow, month: u8) -> bool {
    if window.is_year_round {
        return true;
    }

    if month_in_range(month, window.start_month, window.end_month) {
        return true;
    }

    if window.is_split_season {
        if let (Some(start), Some(end)) = (window.second_start, window.second_end) {
            return month_in_range(month, start, end);
        }
    }

    false
}

/// Convenience over a calendar date.
pub fn is_in_season_on(window: &SeasonWindow, date: NaiveDate) -> bool {
    is_in_season(window, date.month() as u8)
}

/// Stable filter: keeps the items in season for `month`, in input order.
pub fn filter_in_season<T: Seasonal>(items: &[T], month: u8) -> Vec<&T> {
    items.iter().filter(|item| is_in_season(item.season(), month)).collect()
}

fn month_in_range(month: u8, start: u8, end: u8) -> bool {
    if !(1..=12).contains(&month) {
        return false;
    }
    if start <= end {
        start <= month && month <= end
    } else {
        // Wraps the December -> January boundary.
        month >= start || month <= end
    }
}
