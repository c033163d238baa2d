//! Calendar context for a reading: day pillar, month branch, void branches.
//!
//! The day pillar follows the unbroken sixty-day cycle from a Gregorian
//! date, changing at civil midnight. The month branch depends on solar terms
//! and is always supplied by the caller.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::branch::{Branch, StemBranch};

/// Days from 0001-01-01 (CE day 1) to 2000-01-01, a 戊午 day.
const EPOCH_DAYS_FROM_CE: i64 = 730_120;
const EPOCH_CYCLE_INDEX: i64 = 54;

/// Day and month the reading is taken under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarContext {
    /// Day stem-branch (日辰).
    pub day: StemBranch,
    /// Month branch (月建).
    pub month: Branch,
    /// The two void branches (旬空) of the day's ten-day week.
    pub void: [Branch; 2],
}

impl CalendarContext {
    /// Build a context, deriving the void branches from the day.
    pub fn new(day: StemBranch, month: Branch) -> Self {
        Self {
            day,
            month,
            void: void_branches(day),
        }
    }

    /// Build a context for a Gregorian date.
    pub fn from_date(date: NaiveDate, month: Branch) -> Self {
        Self::new(day_pillar(date), month)
    }

    /// Replace the derived void branches.
    pub fn with_void(mut self, void: [Branch; 2]) -> Self {
        self.void = void;
        self
    }

    /// Returns true if `branch` is void today.
    pub fn is_void(&self, branch: Branch) -> bool {
        self.void.contains(&branch)
    }
}

impl std::fmt::Display for CalendarContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}月 {}日 (空亡 {}{})",
            self.month, self.day, self.void[0], self.void[1]
        )
    }
}

/// Sexagenary day pillar for a date.
pub fn day_pillar(date: NaiveDate) -> StemBranch {
    let offset = i64::from(date.num_days_from_ce()) - EPOCH_DAYS_FROM_CE;
    let index = (EPOCH_CYCLE_INDEX + offset).rem_euclid(60);
    StemBranch::from_cycle(index as usize)
}

/// The two branches left out of the day's ten-day week.
pub fn void_branches(day: StemBranch) -> [Branch; 2] {
    let start = Branch::from_index(day.branch.index() + 12 - day.stem.index());
    [start.offset(10), start.offset(11)]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn millennium_is_wu_wu() {
        assert_eq!(day_pillar(date(2000, 1, 1)).to_string(), "戊午");
        assert_eq!(day_pillar(date(2000, 1, 2)).to_string(), "己未");
    }

    #[test]
    fn cycle_runs_backwards_too() {
        assert_eq!(day_pillar(date(1900, 1, 1)).to_string(), "甲戌");
        assert_eq!(day_pillar(date(1999, 12, 31)).to_string(), "丁巳");
    }

    #[test]
    fn sixty_day_period() {
        let d = date(2024, 2, 10);
        assert_eq!(day_pillar(d), day_pillar(d + chrono::Days::new(60)));
    }

    #[test]
    fn void_of_each_week() {
        let void = |s: &str| void_branches(s.parse().unwrap());
        assert_eq!(void("甲子"), [Branch::Xu, Branch::Hai]);
        assert_eq!(void("丙寅"), [Branch::Xu, Branch::Hai]);
        assert_eq!(void("甲戌"), [Branch::Shen, Branch::You]);
        assert_eq!(void("癸亥"), [Branch::Zi, Branch::Chou]);
    }

    #[test]
    fn override_void() {
        let ctx = CalendarContext::new("甲子".parse().unwrap(), Branch::Yin)
            .with_void([Branch::Zi, Branch::Chou]);
        assert!(ctx.is_void(Branch::Zi));
        assert!(!ctx.is_void(Branch::Xu));
    }
}
