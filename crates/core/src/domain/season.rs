use serde::{Deserialize, Serialize};

/// A seasonal availability window over 1-indexed calendar months.
///
/// `start_month > end_month` is a valid window that wraps the December to
/// January boundary. A split season carries a second, independently
/// wrap-capable range.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonWindow {
    pub start_month: u8,
    pub end_month: u8,
    #[serde(default)]
    pub is_year_round: bool,
    #[serde(default)]
    pub is_split_season: bool,
    #[serde(default)]
    pub second_start: Option<u8>,
    #[serde(default)]
    pub second_end: Option<u8>,
}

impl SeasonWindow {
    pub fn year_round() -> Self {
        Self {
            start_month: 1,
            end_month: 12,
            is_year_round: true,
            is_split_season: false,
            second_start: None,
            second_end: None,
        }
    }

    pub fn months(start_month: u8, end_month: u8) -> Self {
        Self {
            start_month,
            end_month,
            is_year_round: false,
            is_split_season: false,
            second_start: None,
            second_end: None,
        }
    }

    pub fn split(start_month: u8, end_month: u8, second_start: u8, second_end: u8) -> Self {
        Self {
            start_month,
            end_month,
            is_year_round: false,
            is_split_season: true,
            second_start: Some(second_start),
            second_end: Some(second_end),
        }
    }

    /// Whether the primary range crosses the year boundary.
    pub fn wraps(&self) -> bool {
        !self.is_year_round && self.start_month > self.end_month
    }

    /// Structural validity: months in 1..=12 and split bounds present when
    /// the split flag is set.
    pub fn is_valid(&self) -> bool {
        let month_ok = |m: u8| (1..=12).contains(&m);
        if !month_ok(self.start_month) || !month_ok(self.end_month) {
            return false;
        }
        if self.is_split_season {
            match (self.second_start, self.second_end) {
                (Some(start), Some(end)) => month_ok(start) && month_ok(end),
                _ => false,
            }
        } else {
            true
        }
    }
}
