//! Governing-line (用神) selection.
//!
//! A single visible line of the target kinship is taken as is. When several
//! qualify, the first rule that picks one wins: holds World, moves, sits on
//! the month branch, sits on the day branch, holds Response, and finally the
//! lowest line. A kinship with no visible line falls back to the lowest
//! hidden spirit carrying it.

use ly_core::{CalendarContext, Cast, HexagramChart, HiddenSpirit, Kinship, LineInfo, StemBranch};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::category::Target;
use crate::error::{EngineError, EngineResult};

/// Why a line was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SelectionRule {
    /// Only one visible line carries the kinship.
    Sole,
    /// Holds the World marker.
    HoldsWorld,
    /// Is a moving line.
    Moving,
    /// Sits on the month branch.
    MonthBranch,
    /// Sits on the day branch.
    DayBranch,
    /// Holds the Response marker.
    HoldsResponse,
    /// Lowest of the remaining candidates.
    Lowest,
    /// The World line, read directly.
    WorldLine,
    /// Concealed beneath a visible line.
    Hidden,
}

/// The chosen governing line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoverningLine {
    /// Position, 0 at the bottom.
    pub index: usize,
    /// The visible line at that position.
    pub line: LineInfo,
    /// The hidden spirit standing in for the kinship, if it is concealed.
    pub hidden: Option<HiddenSpirit>,
    /// Rule that made the choice.
    pub rule: SelectionRule,
}

impl GoverningLine {
    /// Stem-branch that stands for the governing kinship: the hidden spirit's
    /// when concealed, otherwise the visible line's.
    pub fn stem_branch(&self) -> StemBranch {
        self.hidden.map_or(self.line.stem_branch, |h| h.stem_branch)
    }

    /// Returns true if the governing kinship is concealed.
    pub fn is_hidden(&self) -> bool {
        self.hidden.is_some()
    }
}

/// Candidate rules in priority order, applied when several lines qualify.
type Rule = (SelectionRule, fn(&LineInfo, &Cast, &CalendarContext) -> bool);

const RULES: [Rule; 5] = [
    (SelectionRule::HoldsWorld, holds_world),
    (SelectionRule::Moving, is_moving),
    (SelectionRule::MonthBranch, on_month),
    (SelectionRule::DayBranch, on_day),
    (SelectionRule::HoldsResponse, holds_response),
];

fn holds_world(line: &LineInfo, _: &Cast, _: &CalendarContext) -> bool {
    line.is_world()
}

fn is_moving(line: &LineInfo, cast: &Cast, _: &CalendarContext) -> bool {
    cast.changed[line.index]
}

fn on_month(line: &LineInfo, _: &Cast, calendar: &CalendarContext) -> bool {
    line.branch() == calendar.month
}

fn on_day(line: &LineInfo, _: &Cast, calendar: &CalendarContext) -> bool {
    line.branch() == calendar.day.branch
}

fn holds_response(line: &LineInfo, _: &Cast, _: &CalendarContext) -> bool {
    line.is_response()
}

/// Choose the governing line for `target` in the original chart.
pub fn select(
    chart: &HexagramChart,
    target: Target,
    cast: &Cast,
    calendar: &CalendarContext,
) -> EngineResult<GoverningLine> {
    let kinship = match target {
        Target::WorldLine => {
            let world = *chart.world();
            return Ok(chosen(world, None, SelectionRule::WorldLine));
        }
        Target::Kinship(kinship) => kinship,
    };

    let candidates: Vec<&LineInfo> = chart.lines_of(kinship).collect();
    match candidates.as_slice() {
        [] => select_hidden(chart, kinship),
        [only] => Ok(chosen(**only, None, SelectionRule::Sole)),
        _ => {
            let (line, rule) = RULES
                .iter()
                .find_map(|(rule, holds)| {
                    candidates
                        .iter()
                        .find(|line| holds(line, cast, calendar))
                        .map(|line| (**line, *rule))
                })
                .unwrap_or((*candidates[0], SelectionRule::Lowest));
            Ok(chosen(line, None, rule))
        }
    }
}

fn select_hidden(chart: &HexagramChart, kinship: Kinship) -> EngineResult<GoverningLine> {
    let line = chart
        .hidden_of(kinship)
        .ok_or(EngineError::YongShenAbsent(kinship))?;
    Ok(chosen(*line, line.hidden, SelectionRule::Hidden))
}

fn chosen(line: LineInfo, hidden: Option<HiddenSpirit>, rule: SelectionRule) -> GoverningLine {
    debug!(index = line.index, ?rule, hidden = hidden.is_some(), "governing line selected");
    GoverningLine {
        index: line.index,
        line,
        hidden,
        rule,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ly_core::{Branch, Hexagram, Stem};

    fn setup(bits: &str, moving: &[usize], day: &str, month: Branch) -> (HexagramChart, Cast, CalendarContext) {
        let hexagram: Hexagram = bits.parse().unwrap();
        let mut changed = [false; 6];
        for i in moving {
            changed[*i] = true;
        }
        let chart = HexagramChart::annotate(hexagram, Stem::Jia).unwrap();
        let calendar = CalendarContext::new(day.parse().unwrap(), month);
        (chart, Cast::new(hexagram, changed), calendar)
    }

    #[test]
    fn world_holder_beats_moving_line() {
        // 震为雷: Wealth on 辰 (Response, index 2) and 戌 (World, index 5).
        let (chart, cast, cal) = setup("100100", &[2], "甲子", Branch::Wu);
        let target = Target::Kinship(Kinship::Wealth);
        let chosen = select(&chart, target, &cast, &cal).unwrap();
        assert_eq!(chosen.index, 5);
        assert_eq!(chosen.rule, SelectionRule::HoldsWorld);
    }

    #[test]
    fn moving_line_beats_lower_line() {
        // 山地剥: Wealth on 卯 (index 2) and 寅 (index 5), neither holds World.
        let (chart, cast, cal) = setup("000001", &[5], "甲子", Branch::Wu);
        let chosen = select(&chart, Target::Kinship(Kinship::Wealth), &cast, &cal).unwrap();
        assert_eq!(chosen.index, 5);
        assert_eq!(chosen.rule, SelectionRule::Moving);
    }

    #[test]
    fn month_then_day_branch() {
        let (chart, cast, cal) = setup("000001", &[], "甲子", Branch::Yin);
        let chosen = select(&chart, Target::Kinship(Kinship::Wealth), &cast, &cal).unwrap();
        assert_eq!((chosen.index, chosen.rule), (5, SelectionRule::MonthBranch));

        let (chart, cast, cal) = setup("000001", &[], "丁卯", Branch::Wu);
        let chosen = select(&chart, Target::Kinship(Kinship::Wealth), &cast, &cal).unwrap();
        assert_eq!((chosen.index, chosen.rule), (2, SelectionRule::DayBranch));
    }

    #[test]
    fn fallback_takes_lowest() {
        let (chart, cast, cal) = setup("000001", &[], "甲子", Branch::Wu);
        let chosen = select(&chart, Target::Kinship(Kinship::Wealth), &cast, &cal).unwrap();
        assert_eq!(chosen.index, 2);
        assert_eq!(chosen.rule, SelectionRule::Lowest);
    }

    #[test]
    fn sole_candidate() {
        // 山水蒙: Officer Ghost only on 子 (index 4).
        let (chart, cast, cal) = setup("010001", &[], "甲子", Branch::Wu);
        let chosen = select(&chart, Target::Kinship(Kinship::OfficerGhost), &cast, &cal).unwrap();
        assert_eq!((chosen.index, chosen.rule), (4, SelectionRule::Sole));
        assert!(!chosen.is_hidden());
    }

    #[test]
    fn hidden_spirit_stands_in() {
        let (chart, cast, cal) = setup("010001", &[], "甲子", Branch::Wu);
        let chosen = select(&chart, Target::Kinship(Kinship::Wealth), &cast, &cal).unwrap();
        assert_eq!(chosen.index, 3);
        assert_eq!(chosen.rule, SelectionRule::Hidden);
        assert_eq!(chosen.stem_branch().to_string(), "己酉");
        assert_eq!(chosen.line.stem_branch.to_string(), "丙戌");
    }

    #[test]
    fn world_line_target() {
        let (chart, cast, cal) = setup("010001", &[], "甲子", Branch::Wu);
        let chosen = select(&chart, Target::WorldLine, &cast, &cal).unwrap();
        assert_eq!((chosen.index, chosen.rule), (3, SelectionRule::WorldLine));
    }
}
