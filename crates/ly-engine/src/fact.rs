//! The ordered narrative of a reading.
//!
//! Facts are data; [`crate::render`] turns them into text.

use ly_core::{HiddenSpirit, StemBranch};
use serde::{Deserialize, Serialize};

use crate::bureau::BureauReport;
use crate::category::Target;
use crate::hidden::ConcealmentFactor;
use crate::judgment::{Judgment, Level, Timing, Verdict};
use crate::report::{LineReport, MovingLineNote};
use crate::selection::SelectionRule;
use crate::strength::Contribution;

/// Which adjustment moved the verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// The hidden-spirit relation.
    Concealment,
    /// Bureau influence.
    Bureau,
}

/// One step of a reading, in the order it was reached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Fact {
    /// What the question targets.
    Target(Target),
    /// The governing line and why it was chosen.
    Selected {
        /// Position of the visible line.
        index: usize,
        /// Selection rule.
        rule: SelectionRule,
        /// The visible line.
        stem_branch: StemBranch,
        /// The hidden spirit standing in, if concealed.
        hidden: Option<HiddenSpirit>,
    },
    /// A fired strength rule.
    Contribution(Contribution),
    /// Strength score and its level.
    Score {
        /// Sum of the contributions.
        score: i32,
        /// Level implied by the score.
        level: Level,
    },
    /// A hidden-spirit relation rule.
    Concealment(ConcealmentFactor),
    /// Total of the hidden-spirit relation rules.
    ConcealmentTotal(i32),
    /// A verdict moved by an adjustment.
    Adjusted {
        /// The adjustment.
        phase: Phase,
        /// Verdict before.
        from: Verdict,
        /// Verdict after.
        to: Verdict,
    },
    /// Per-line report.
    Line(LineReport),
    /// A moving line's note.
    MovingLine(MovingLineNote),
    /// A formed bureau.
    Bureau(BureauReport),
    /// Sum of all bureau scores.
    BureauTotal(i32),
    /// Final judgment.
    Judgment(Judgment),
    /// Timing estimate.
    Timing(Timing),
}
