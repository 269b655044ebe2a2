//! Market segment identity.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::constants::OVERALL_LABEL;

/// Part of the day a basket was rung up in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeBin {
    Morning,
    Midday,
    Afternoon,
    Evening,
    Night,
}

impl TimeBin {
    pub const ALL: [TimeBin; 5] = [
        TimeBin::Morning,
        TimeBin::Midday,
        TimeBin::Afternoon,
        TimeBin::Evening,
        TimeBin::Night,
    ];

    /// 6–10 morning, 11–13 midday, 14–17 afternoon, 18–21 evening, else night.
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            6..=10 => Self::Morning,
            11..=13 => Self::Midday,
            14..=17 => Self::Afternoon,
            18..=21 => Self::Evening,
            _ => Self::Night,
        }
    }

    /// Lowercase name, as serialized.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Morning => "morning",
            Self::Midday => "midday",
            Self::Afternoon => "afternoon",
            Self::Evening => "evening",
            Self::Night => "night",
        }
    }
}

impl fmt::Display for TimeBin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeBin {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "morning" => Ok(Self::Morning),
            "midday" => Ok(Self::Midday),
            "afternoon" => Ok(Self::Afternoon),
            "evening" => Ok(Self::Evening),
            "night" => Ok(Self::Night),
            other => Err(format!("unknown time bin: {other}")),
        }
    }
}

/// Weekday or weekend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayType {
    Weekday,
    Weekend,
}

impl DayType {
    /// Saturday and Sunday are weekend.
    pub fn from_date(date: NaiveDate) -> Self {
        match date.weekday() {
            Weekday::Sat | Weekday::Sun => Self::Weekend,
            _ => Self::Weekday,
        }
    }

    /// Lowercase name, as serialized.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Weekday => "weekday",
            Self::Weekend => "weekend",
        }
    }
}

impl fmt::Display for DayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DayType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "weekday" => Ok(Self::Weekday),
            "weekend" => Ok(Self::Weekend),
            other => Err(format!("unknown day type: {other}")),
        }
    }
}

/// A market segment along up to five orthogonal dimensions.
///
/// The all-unset value is the unsegmented population ("Overall"). Contexts
/// are immutable once built and usable as map keys.
#[derive(
    Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Context {
    store_id: Option<String>,
    time_bin: Option<TimeBin>,
    day_type: Option<DayType>,
    quarter: Option<u8>,
    festival: Option<String>,
}

impl Context {
    /// The unsegmented population.
    pub fn overall() -> Self {
        Self::default()
    }

    pub fn with_store(mut self, store_id: impl Into<String>) -> Self {
        self.store_id = non_empty(store_id.into());
        self
    }

    pub fn with_time_bin(mut self, time_bin: TimeBin) -> Self {
        self.time_bin = Some(time_bin);
        self
    }

    pub fn with_day_type(mut self, day_type: DayType) -> Self {
        self.day_type = Some(day_type);
        self
    }

    /// Quarters outside 1..=4 leave the dimension unset.
    pub fn with_quarter(mut self, quarter: u8) -> Self {
        self.quarter = valid_quarter(quarter);
        self
    }

    pub fn with_festival(mut self, festival: impl Into<String>) -> Self {
        self.festival = non_empty(festival.into());
        self
    }

    /// Store dimension, if set.
    pub fn store_id(&self) -> Option<&str> {
        self.store_id.as_deref()
    }

    /// Time-of-day dimension, if set.
    pub fn time_bin(&self) -> Option<TimeBin> {
        self.time_bin
    }

    /// Weekday/weekend dimension, if set.
    pub fn day_type(&self) -> Option<DayType> {
        self.day_type
    }

    /// Calendar quarter in 1..=4, if set.
    pub fn quarter(&self) -> Option<u8> {
        self.quarter
    }

    /// Festival dimension, if set.
    pub fn festival(&self) -> Option<&str> {
        self.festival.as_deref()
    }

    /// Number of dimensions set.
    pub fn depth(&self) -> usize {
        usize::from(self.store_id.is_some())
            + usize::from(self.time_bin.is_some())
            + usize::from(self.day_type.is_some())
            + usize::from(self.quarter.is_some())
            + usize::from(self.festival.is_some())
    }

    /// No dimension set.
    pub fn is_overall(&self) -> bool {
        self.depth() == 0
    }

    /// Human-readable label.
    ///
    /// Priority: store, festival, time bin, day type, quarter. The quarter is
    /// dropped when a festival is present.
    pub fn label(&self) -> String {
        let mut parts: Vec<String> = Vec::with_capacity(4);
        if let Some(store) = &self.store_id {
            parts.push(format!("Store {store}"));
        }
        if let Some(festival) = &self.festival {
            parts.push(title_case(festival));
        }
        if let Some(bin) = self.time_bin {
            parts.push(title_case(bin.as_str()));
        }
        if let Some(day) = self.day_type {
            parts.push(title_case(day.as_str()));
        }
        if let (Some(q), None) = (self.quarter.and_then(valid_quarter), &self.festival) {
            parts.push(format!("Q{q}"));
        }

        if parts.is_empty() {
            OVERALL_LABEL.to_string()
        } else {
            parts.join(" + ")
        }
    }
}

/// `Some(quarter)` for a calendar quarter in 1..=4, `None` otherwise.
pub fn valid_quarter(quarter: u8) -> Option<u8> {
    (1..=4).contains(&quarter).then_some(quarter)
}

impl fmt::Display for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Uppercase the first letter of every alphabetic run, lowercase the rest.
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_word_start = true;
    for ch in s.chars() {
        if ch.is_alphabetic() {
            if at_word_start {
                out.extend(ch.to_uppercase());
            } else {
                out.extend(ch.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(ch);
            at_word_start = true;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_bin_boundaries() {
        assert_eq!(TimeBin::from_hour(5), TimeBin::Night);
        assert_eq!(TimeBin::from_hour(6), TimeBin::Morning);
        assert_eq!(TimeBin::from_hour(10), TimeBin::Morning);
        assert_eq!(TimeBin::from_hour(11), TimeBin::Midday);
        assert_eq!(TimeBin::from_hour(14), TimeBin::Afternoon);
        assert_eq!(TimeBin::from_hour(21), TimeBin::Evening);
        assert_eq!(TimeBin::from_hour(22), TimeBin::Night);
    }

    #[test]
    fn title_case_handles_separators() {
        assert_eq!(title_case("diwali"), "Diwali");
        assert_eq!(title_case("eid_ul_fitr"), "Eid_Ul_Fitr");
        assert_eq!(title_case("NEW YEAR"), "New Year");
    }

    #[test]
    fn empty_store_is_unset() {
        assert!(Context::overall().with_store("  ").is_overall());
    }
}
