//! Inputs to a reading.

use ly_core::{CalendarContext, Cast};
use serde::{Deserialize, Serialize};

use crate::category::{Category, Gender};

/// Everything a reading depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisContext {
    /// The cast lines.
    pub cast: Cast,
    /// Day, month and void branches.
    pub calendar: CalendarContext,
    /// What the querent asks about.
    pub category: Category,
    /// Querent gender, only consulted for marriage.
    pub gender: Option<Gender>,
}

impl AnalysisContext {
    /// Context with no gender.
    pub fn new(cast: Cast, calendar: CalendarContext, category: Category) -> Self {
        Self {
            cast,
            calendar,
            category,
            gender: None,
        }
    }

    /// Set the querent gender.
    pub fn with_gender(mut self, gender: Gender) -> Self {
        self.gender = Some(gender);
        self
    }
}
