//! Strength levels, verdict adjustments, judgment and timing.

use ly_core::Element;
use serde::{Deserialize, Serialize};

/// Coarse strength of the governing line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Level {
    /// 强
    Strong,
    /// 中平
    Neutral,
    /// 弱
    Weak,
}

impl Level {
    /// Level for a signed score.
    pub fn from_score(score: i32) -> Self {
        match score.signum() {
            1 => Self::Strong,
            0 => Self::Neutral,
            _ => Self::Weak,
        }
    }
}

/// Reason a verdict was moved away from its scored level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cause {
    /// 飞神生助: lifted by the concealing line.
    SupportedByConcealing,
    /// 飞神克制: held down by the concealing line.
    SuppressedByConcealing,
    /// 合局生助: lifted by a bureau.
    BureauSupport,
    /// 合局克制: held down by a bureau.
    BureauSuppression,
}

/// Strength level with the adjustment that produced it, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    /// The level.
    pub level: Level,
    /// Set when an adjustment annotated the level.
    pub cause: Option<Cause>,
}

impl Verdict {
    /// An unannotated verdict.
    pub fn plain(level: Level) -> Self {
        Self { level, cause: None }
    }

    fn annotated(level: Level, cause: Cause) -> Self {
        Self {
            level,
            cause: Some(cause),
        }
    }

    /// Apply the hidden-spirit relation total.
    ///
    /// At +2 or more Weak lifts to Neutral and Neutral to Strong; at -2 or
    /// less Strong drops to Neutral and Neutral to Weak. An annotated
    /// verdict is left alone.
    pub fn adjust_for_concealment(self, total: i32) -> Self {
        if self.cause.is_some() {
            return self;
        }
        match (self.level, total) {
            (Level::Weak, t) if t >= 2 => {
                Self::annotated(Level::Neutral, Cause::SupportedByConcealing)
            }
            (Level::Neutral, t) if t >= 2 => Self::plain(Level::Strong),
            (Level::Strong, t) if t <= -2 => {
                Self::annotated(Level::Neutral, Cause::SuppressedByConcealing)
            }
            (Level::Neutral, t) if t <= -2 => Self::plain(Level::Weak),
            _ => self,
        }
    }

    /// Apply the bureau influence total.
    ///
    /// At +3 or more Weak and Neutral both become Strong; at -3 or less
    /// Strong and Neutral both become Weak. An annotated verdict is left
    /// alone.
    pub fn adjust_for_bureaus(self, total: i32) -> Self {
        if self.cause.is_some() {
            return self;
        }
        match (self.level, total) {
            (Level::Weak, t) if t >= 3 => Self::annotated(Level::Strong, Cause::BureauSupport),
            (Level::Neutral, t) if t >= 3 => Self::plain(Level::Strong),
            (Level::Strong, t) if t <= -3 => Self::annotated(Level::Weak, Cause::BureauSuppression),
            (Level::Neutral, t) if t <= -3 => Self::plain(Level::Weak),
            _ => self,
        }
    }
}

/// Final auspiciousness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Judgment {
    /// 吉
    Auspicious,
    /// 平
    Neutral,
    /// 凶
    Inauspicious,
}

impl Judgment {
    /// Judgment for a verdict, by level alone.
    pub fn of(verdict: Verdict) -> Self {
        match verdict.level {
            Level::Strong => Self::Auspicious,
            Level::Neutral => Self::Neutral,
            Level::Weak => Self::Inauspicious,
        }
    }
}

/// When the matter is expected to manifest: a day or month of the
/// governing element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timing {
    /// Element of the governing line.
    pub element: Element,
}
