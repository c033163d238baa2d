//! Relation between a hidden spirit (伏神) and the line concealing it (飞神).

use ly_core::{CalendarContext, Relation, StemBranch};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// A rule bearing on a concealed governing kinship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConcealmentFactor {
    /// 飞生伏: the concealing line generates the hidden spirit.
    ConcealingGenerates,
    /// 飞克伏: the concealing line controls the hidden spirit.
    ConcealingControls,
    /// 伏生飞: the hidden spirit drains itself into the concealing line.
    HiddenGenerates,
    /// 伏克飞: the hidden spirit controls the concealing line.
    HiddenControls,
    /// The hidden spirit's branch is void.
    HiddenVoid,
    /// The hidden spirit's branch is clashed by the month.
    HiddenMonthClash,
}

impl ConcealmentFactor {
    /// Signed weight of the rule.
    pub fn delta(self) -> i32 {
        match self {
            Self::ConcealingGenerates => 2,
            Self::ConcealingControls => -2,
            Self::HiddenGenerates => -1,
            Self::HiddenControls => 1,
            Self::HiddenVoid => -2,
            Self::HiddenMonthClash => -4,
        }
    }
}

/// The relational total for a hidden governing kinship.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Concealment {
    /// The visible line on top.
    pub concealing: StemBranch,
    /// The hidden spirit underneath.
    pub hidden: StemBranch,
    /// Rules that fired, in evaluation order.
    pub factors: Vec<ConcealmentFactor>,
    /// Sum of the factor weights.
    pub total: i32,
}

impl Concealment {
    /// Evaluate the pair against the calendar.
    ///
    /// The concealing line acting on the hidden spirit is checked first; only
    /// when it does neither does the reverse direction count.
    pub fn evaluate(
        concealing: StemBranch,
        hidden: StemBranch,
        calendar: &CalendarContext,
    ) -> Self {
        let mut factors = Vec::new();
        match concealing.element().relation(hidden.element()) {
            Relation::Generates => factors.push(ConcealmentFactor::ConcealingGenerates),
            Relation::Controls => factors.push(ConcealmentFactor::ConcealingControls),
            _ => match hidden.element().relation(concealing.element()) {
                Relation::Generates => factors.push(ConcealmentFactor::HiddenGenerates),
                Relation::Controls => factors.push(ConcealmentFactor::HiddenControls),
                _ => {}
            },
        }
        if calendar.is_void(hidden.branch) {
            factors.push(ConcealmentFactor::HiddenVoid);
        }
        if calendar.month.clashes(hidden.branch) {
            factors.push(ConcealmentFactor::HiddenMonthClash);
        }
        for factor in &factors {
            trace!(?factor, delta = factor.delta(), "concealment factor");
        }

        let total = factors.iter().map(|f| f.delta()).sum();
        debug!(%concealing, %hidden, total, "concealment evaluated");
        Self {
            concealing,
            hidden,
            factors,
            total,
        }
    }
}
