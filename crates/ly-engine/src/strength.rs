//! Strength scoring of a single line against the calendar.
//!
//! Every rule that fires becomes a typed [`Contribution`]. The score is the
//! sum of their deltas, and its sign gives the [`Level`].

use ly_core::{
    Branch, CalendarContext, Element, Punishment, Relation, StemBranch, Vitality,
};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::judgment::Level;

/// How a moving line relates to the line it turns into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Transformation {
    /// 化进神: advances along its branch chain.
    Advancing,
    /// 化退神: retreats along its branch chain.
    Retreating,
    /// 回头生: the transformed line generates the original.
    GeneratedBack,
    /// 回头克: the transformed line controls the original.
    ControlledBack,
    /// 化泄: the original generates the transformed line.
    Draining,
    /// 化克: the original controls the transformed line.
    Controlling,
    /// 比和: same element without adjacency.
    Kindred,
}

impl Transformation {
    /// Classify a change, checking adjacency before element relations.
    pub fn of(original: Branch, transformed: Branch) -> Self {
        if original.is_advancing(transformed) {
            return Self::Advancing;
        }
        if original.is_retreating(transformed) {
            return Self::Retreating;
        }
        Self::by_element(original.element(), transformed.element())
    }

    /// Classify a change by element relation only.
    pub fn by_element(original: Element, transformed: Element) -> Self {
        match transformed.relation(original) {
            Relation::Generates => Self::GeneratedBack,
            Relation::Controls => Self::ControlledBack,
            Relation::GeneratedBy => Self::Draining,
            Relation::None => Self::Controlling,
            Relation::Same => Self::Kindred,
        }
    }

    /// Score this change contributes to the original line.
    pub fn delta(self) -> i32 {
        match self {
            Self::Advancing | Self::GeneratedBack => 3,
            Self::Retreating | Self::ControlledBack => -5,
            Self::Draining => -2,
            Self::Controlling | Self::Kindred => 0,
        }
    }
}

/// A scoring rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Factor {
    /// Standing against the month element.
    MonthVitality(Vitality),
    /// Standing against the day element.
    DayVitality(Vitality),
    /// A moving line's change.
    Transformation(Transformation),
    /// 月破: clashed by the month branch.
    MonthClash,
    /// 月合: combined with the month branch.
    MonthCombination(Element),
    /// 日合: combined with the day branch.
    DayCombination(Element),
    /// 日害: harmed by the day branch.
    DayHarm,
    /// 日刑: punished by the day branch.
    DayPunishment(Punishment),
    /// 旬空: void in the day's week.
    Void,
    /// 暗动: a static, month-strong line clashed by the day.
    LatentActivation,
    /// 日破: a static line clashed by the day without month support.
    DayBroken,
    /// 日冲: a moving line clashed by the day.
    DayClash,
}

/// One fired rule and its signed weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contribution {
    /// The rule.
    pub factor: Factor,
    /// Signed score.
    pub delta: i32,
}

/// A line as scored: its stem-branch, whether it moves, and what it turns into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineState {
    /// The line's stem-branch.
    pub stem_branch: StemBranch,
    /// Whether the line moves.
    pub moving: bool,
    /// The transformed line's stem-branch, for moving lines.
    pub transformed: Option<StemBranch>,
}

/// Result of scoring a line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assessment {
    /// Rules that fired, in evaluation order.
    pub contributions: Vec<Contribution>,
    /// Sum of all deltas.
    pub score: i32,
    /// Level implied by the score.
    pub level: Level,
}

impl Assessment {
    /// The contribution for a factor, if it fired.
    pub fn find(&self, matches: impl Fn(&Factor) -> bool) -> Option<&Contribution> {
        self.contributions.iter().find(|c| matches(&c.factor))
    }
}

/// Returns true if a line's element is Prosperous or Supported in the month.
pub fn is_month_strong(element: Element, calendar: &CalendarContext) -> bool {
    Vitality::of(element, calendar.month.element()).is_strong()
}

/// Score a line against the calendar.
pub fn assess(state: &LineState, calendar: &CalendarContext) -> Assessment {
    let branch = state.stem_branch.branch;
    let element = branch.element();
    let month = calendar.month;
    let day = calendar.day.branch;
    let mut contributions = Vec::new();
    let mut push = |factor: Factor, delta: i32| {
        trace!(?factor, delta, "strength contribution");
        contributions.push(Contribution { factor, delta });
    };

    let month_vitality = Vitality::of(element, month.element());
    push(
        Factor::MonthVitality(month_vitality),
        if month_vitality.is_strong() { 2 } else { 0 },
    );
    let day_vitality = Vitality::of(element, day.element());
    push(
        Factor::DayVitality(day_vitality),
        if day_vitality.is_strong() { 2 } else { 0 },
    );

    if let (true, Some(transformed)) = (state.moving, state.transformed) {
        let change = Transformation::of(branch, transformed.branch);
        push(Factor::Transformation(change), change.delta());
    }

    if month.clashes(branch) {
        push(Factor::MonthClash, -4);
    }
    if let Some(element) = month.combination(branch) {
        push(Factor::MonthCombination(element), 2);
    }
    if let Some(element) = day.combination(branch) {
        push(Factor::DayCombination(element), 2);
    }
    if day.harms(branch) {
        push(Factor::DayHarm, -1);
    }
    if let Some(punishment) = day.punishment(branch) {
        push(Factor::DayPunishment(punishment), -1);
    }
    if calendar.is_void(branch) {
        push(Factor::Void, -1);
    }
    if day.clashes(branch) {
        match (state.moving, month_vitality.is_strong()) {
            (false, true) => push(Factor::LatentActivation, 1),
            (false, false) => push(Factor::DayBroken, -3),
            (true, _) => push(Factor::DayClash, -1),
        }
    }

    let score = contributions.iter().map(|c| c.delta).sum();
    Assessment {
        contributions,
        score,
        level: Level::from_score(score),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn calendar(day: &str, month: Branch) -> CalendarContext {
        CalendarContext::new(day.parse().unwrap(), month)
    }

    fn static_line(sb: &str) -> LineState {
        LineState {
            stem_branch: sb.parse().unwrap(),
            moving: false,
            transformed: None,
        }
    }

    fn moving_line(sb: &str, into: &str) -> LineState {
        LineState {
            stem_branch: sb.parse().unwrap(),
            moving: true,
            transformed: Some(into.parse().unwrap()),
        }
    }

    #[test]
    fn month_clash_makes_neutral_weak() {
        // 子 under a 午 month and 丙寅 day: no support, only the clash.
        let assessment = assess(&static_line("丙子"), &calendar("丙寅", Branch::Wu));
        assert_eq!(assessment.score, -4);
        assert_eq!(assessment.level, Level::Weak);
        assert!(assessment.find(|f| *f == Factor::MonthClash).is_some());
    }

    #[test]
    fn month_and_day_support() {
        // 寅 Wood in a 亥 (Water) month on a 甲寅 day.
        let assessment = assess(&static_line("戊寅"), &calendar("甲寅", Branch::Hai));
        let deltas: Vec<_> = assessment.contributions.iter().map(|c| c.delta).collect();
        // Month supports (+2), day prospers (+2), 寅亥 combine with the month (+2).
        assert_eq!(deltas, vec![2, 2, 2]);
        assert_eq!(assessment.level, Level::Strong);
    }

    #[test]
    fn latent_activation_and_day_broken() {
        // 申 Metal, 酉 month is strong, 寅 day clashes.
        let latent = assess(&static_line("戊申"), &calendar("甲寅", Branch::You));
        assert!(latent.find(|f| *f == Factor::LatentActivation).is_some());
        assert!(latent.find(|f| *f == Factor::DayBroken).is_none());

        // Same clash under a 午 month: Metal is trapped, the line is broken.
        let broken = assess(&static_line("戊申"), &calendar("甲寅", Branch::Wu));
        assert!(broken.find(|f| *f == Factor::DayBroken).is_some());
    }

    #[test]
    fn moving_line_clashed_by_day() {
        let assessment = assess(&moving_line("戊申", "丁酉"), &calendar("甲寅", Branch::Wu));
        assert!(assessment.find(|f| *f == Factor::DayClash).is_some());
        assert_eq!(
            assessment
                .find(|f| matches!(f, Factor::Transformation(_)))
                .map(|c| (c.factor, c.delta)),
            Some((Factor::Transformation(Transformation::Advancing), 3))
        );
    }

    #[test]
    fn transformations() {
        assert_eq!(Transformation::of(Branch::Hai, Branch::Zi), Transformation::Advancing);
        assert_eq!(Transformation::of(Branch::Zi, Branch::Hai), Transformation::Retreating);
        assert_eq!(Transformation::of(Branch::Xu, Branch::Chou), Transformation::Advancing);
        assert_eq!(Transformation::of(Branch::Wu, Branch::Yin), Transformation::GeneratedBack);
        assert_eq!(Transformation::of(Branch::Yin, Branch::Shen), Transformation::ControlledBack);
        assert_eq!(Transformation::of(Branch::Yin, Branch::Si), Transformation::Draining);
        assert_eq!(Transformation::of(Branch::Yin, Branch::Chen), Transformation::Controlling);
        assert_eq!(Transformation::Draining.delta(), -2);
    }

    #[test]
    fn void_costs_one() {
        // 甲子 week leaves 戌亥 void.
        let assessment = assess(&static_line("丙戌"), &calendar("甲子", Branch::Mao));
        assert!(assessment.find(|f| *f == Factor::Void).is_some());
    }
}
