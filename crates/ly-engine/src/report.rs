//! Per-line reports and moving-line notes.
//!
//! These carry no score. They record every relation a reader looks for on
//! each line so the narrative can show its working.

use ly_core::{
    Branch, CalendarContext, Cast, Element, HexagramChart, HiddenSpirit, Kinship, LifeStage,
    LineInfo, Punishment, Relation, StemBranch, Vitality,
};
use serde::{Deserialize, Serialize};

use crate::hidden::ConcealmentFactor;
use crate::strength::{Transformation, is_month_strong};

/// A line measured against the month branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MonthStanding {
    /// 值月建: the line sits on the month branch.
    OnMonth,
    /// 月建生
    Generated,
    /// 月建克
    Controlled,
    /// Otherwise, its seasonal vitality.
    Vitality(Vitality),
}

impl MonthStanding {
    /// Standing of `branch` under `month`.
    pub fn of(branch: Branch, month: Branch) -> Self {
        let (line, month_element) = (branch.element(), month.element());
        if branch == month {
            Self::OnMonth
        } else if month_element.is_generating(line) {
            Self::Generated
        } else if month_element.is_controlling(line) {
            Self::Controlled
        } else {
            Self::Vitality(Vitality::of(line, month_element))
        }
    }
}

/// A line measured against the day branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DayStanding {
    /// 临日辰
    OnDay,
    /// 日辰生
    Generated,
    /// 日辰克
    Controlled,
    /// 日辰冲
    Clashed,
    /// No direct relation.
    Indifferent,
}

impl DayStanding {
    /// Standing of `branch` on a day with branch `day`.
    pub fn of(branch: Branch, day: Branch) -> Self {
        let (line, day_element) = (branch.element(), day.element());
        if branch == day {
            Self::OnDay
        } else if day_element.is_generating(line) {
            Self::Generated
        } else if day_element.is_controlling(line) {
            Self::Controlled
        } else if day.clashes(branch) {
            Self::Clashed
        } else {
            Self::Indifferent
        }
    }
}

/// Advancing or retreating change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Step {
    /// 进神
    Advancing,
    /// 退神
    Retreating,
}

impl Step {
    /// The step from `original` to `transformed`, if they are adjacent.
    pub fn of(original: Branch, transformed: Branch) -> Option<Self> {
        if original.is_advancing(transformed) {
            Some(Self::Advancing)
        } else if original.is_retreating(transformed) {
            Some(Self::Retreating)
        } else {
            None
        }
    }
}

/// What a moving line turns into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Change {
    /// The transformed line.
    pub into: StemBranch,
    /// Kinship of the transformed line.
    pub kinship: Kinship,
    /// Element relation between the two lines.
    pub relation: Transformation,
    /// Adjacency along the branch chain.
    pub step: Option<Step>,
    /// Transformed line against the month.
    pub month: MonthStanding,
    /// Transformed line against the day.
    pub day: DayStanding,
}

/// One relation another line holds with the reported line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Interaction {
    /// The two branches clash.
    Clash,
    /// A moving line generates this one.
    Generates,
    /// A moving line controls this one.
    Controls,
    /// A moving line combines with this one.
    Combination(Element),
    /// A moving line harms this one.
    Harm,
    /// A moving line punishes this one.
    Punishment(Punishment),
}

/// An interaction and the line it comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineInteraction {
    /// Index of the other line.
    pub other: usize,
    /// The relation.
    pub kind: Interaction,
}

/// Relations between a hidden spirit and its concealing line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HiddenNote {
    /// The hidden spirit.
    pub spirit: HiddenSpirit,
    /// The month element controls it.
    pub month_controls: bool,
    /// The day element controls it.
    pub day_controls: bool,
    /// Element relations in both directions.
    pub relations: Vec<ConcealmentFactor>,
    /// Its branch is void.
    pub void: bool,
}

/// Everything notable about one line of the original chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineReport {
    /// Position, 0 at the bottom.
    pub index: usize,
    /// Stem-branch of the line.
    pub stem_branch: StemBranch,
    /// Kinship of the line.
    pub kinship: Kinship,
    /// Against the month.
    pub month: MonthStanding,
    /// Against the day.
    pub day: DayStanding,
    /// 日破: clashed by the day without month support.
    pub day_broken: bool,
    /// 月合
    pub month_combination: Option<Element>,
    /// 日合
    pub day_combination: Option<Element>,
    /// 日刑
    pub day_punishment: Option<Punishment>,
    /// 日害
    pub day_harm: bool,
    /// The change, for a moving line.
    pub change: Option<Change>,
    /// Relations with the other lines, top down.
    pub interactions: Vec<LineInteraction>,
    /// Hidden spirit beneath this line.
    pub hidden: Option<HiddenNote>,
    /// Life stage of the line's element on the day branch.
    pub stage: LifeStage,
}

/// Build the report for one line.
pub fn line_report(
    index: usize,
    original: &HexagramChart,
    transformed: &HexagramChart,
    cast: &Cast,
    calendar: &CalendarContext,
) -> LineReport {
    let line = &original.lines[index];
    let branch = line.branch();
    let month = calendar.month;
    let day = calendar.day.branch;

    let change = cast.changed[index].then(|| describe_change(line, &transformed.lines[index], calendar));
    let hidden = line
        .hidden
        .map(|spirit| hidden_note(line.stem_branch, spirit, calendar));

    LineReport {
        index,
        stem_branch: line.stem_branch,
        kinship: line.kinship,
        month: MonthStanding::of(branch, month),
        day: DayStanding::of(branch, day),
        day_broken: day.clashes(branch) && !is_month_strong(branch.element(), calendar),
        month_combination: branch.combination(month),
        day_combination: branch.combination(day),
        day_punishment: branch.punishment(day),
        day_harm: branch.harms(day),
        change,
        interactions: interactions(line, original, cast),
        hidden,
        stage: LifeStage::of(branch.element(), day),
    }
}

fn describe_change(line: &LineInfo, into: &LineInfo, calendar: &CalendarContext) -> Change {
    Change {
        into: into.stem_branch,
        kinship: into.kinship,
        relation: Transformation::by_element(line.element(), into.element()),
        step: Step::of(line.branch(), into.branch()),
        month: MonthStanding::of(into.branch(), calendar.month),
        day: DayStanding::of(into.branch(), calendar.day.branch),
    }
}

fn interactions(line: &LineInfo, chart: &HexagramChart, cast: &Cast) -> Vec<LineInteraction> {
    let branch = line.branch();
    let mut found = Vec::new();
    for other in chart.lines.iter().rev().filter(|o| o.index != line.index) {
        let mut push = |kind| {
            found.push(LineInteraction {
                other: other.index,
                kind,
            })
        };
        if branch.clashes(other.branch()) {
            push(Interaction::Clash);
        }
        if !cast.changed[other.index] {
            continue;
        }
        match other.element().relation(line.element()) {
            Relation::Generates => push(Interaction::Generates),
            Relation::Controls => push(Interaction::Controls),
            _ => {}
        }
        if let Some(element) = branch.combination(other.branch()) {
            push(Interaction::Combination(element));
        }
        if branch.harms(other.branch()) {
            push(Interaction::Harm);
        }
        if let Some(punishment) = branch.punishment(other.branch()) {
            push(Interaction::Punishment(punishment));
        }
    }
    found
}

fn hidden_note(concealing: StemBranch, spirit: HiddenSpirit, calendar: &CalendarContext) -> HiddenNote {
    let (fei, fu) = (concealing.element(), spirit.stem_branch.element());
    let mut relations = Vec::new();
    match fei.relation(fu) {
        Relation::Generates => relations.push(ConcealmentFactor::ConcealingGenerates),
        Relation::Controls => relations.push(ConcealmentFactor::ConcealingControls),
        _ => {}
    }
    match fu.relation(fei) {
        Relation::Generates => relations.push(ConcealmentFactor::HiddenGenerates),
        Relation::Controls => relations.push(ConcealmentFactor::HiddenControls),
        _ => {}
    }
    HiddenNote {
        spirit,
        month_controls: calendar.month.element().is_controlling(fu),
        day_controls: calendar.day.branch.element().is_controlling(fu),
        relations,
        void: calendar.is_void(spirit.stem_branch.branch),
    }
}

/// Whether a moving line helps or hurts the governing element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Effect {
    /// 原神: generates the governing element.
    Supports,
    /// 忌神: controls the governing element.
    Opposes,
    /// No direct relation.
    Indifferent,
}

/// A moving line, its change, and its bearing on the governing element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovingLineNote {
    /// Position, 0 at the bottom.
    pub index: usize,
    /// The moving line.
    pub stem_branch: StemBranch,
    /// Its kinship.
    pub kinship: Kinship,
    /// What it turns into.
    pub change: Change,
    /// Bearing on the governing element; `None` for the governing line itself.
    pub effect: Option<Effect>,
}

/// Notes for every moving line, bottom first.
pub fn moving_line_notes(
    original: &HexagramChart,
    transformed: &HexagramChart,
    cast: &Cast,
    calendar: &CalendarContext,
    governing_index: usize,
    governing_element: Element,
) -> Vec<MovingLineNote> {
    cast.moving_lines()
        .map(|index| {
            let line = &original.lines[index];
            let effect = (index != governing_index).then(|| {
                match line.element().relation(governing_element) {
                    Relation::Generates => Effect::Supports,
                    Relation::Controls => Effect::Opposes,
                    _ => Effect::Indifferent,
                }
            });
            MovingLineNote {
                index,
                stem_branch: line.stem_branch,
                kinship: line.kinship,
                change: describe_change(line, &transformed.lines[index], calendar),
                effect,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ly_core::{Hexagram, Stem};

    fn charts(bits: &str, moving: &[usize]) -> (HexagramChart, HexagramChart, Cast) {
        let hexagram: Hexagram = bits.parse().unwrap();
        let mut changed = [false; 6];
        for i in moving {
            changed[*i] = true;
        }
        let cast = Cast::new(hexagram, changed);
        let original = HexagramChart::annotate(hexagram, Stem::Jia).unwrap();
        let transformed =
            HexagramChart::annotate_transformed(cast.transformed, Stem::Jia, original.kinship_element)
                .unwrap();
        (original, transformed, cast)
    }

    #[test]
    fn standings() {
        assert_eq!(MonthStanding::of(Branch::Zi, Branch::Zi), MonthStanding::OnMonth);
        assert_eq!(MonthStanding::of(Branch::Zi, Branch::Shen), MonthStanding::Generated);
        assert_eq!(MonthStanding::of(Branch::Zi, Branch::Chen), MonthStanding::Controlled);
        assert_eq!(
            MonthStanding::of(Branch::Zi, Branch::Yin),
            MonthStanding::Vitality(Vitality::Resting)
        );
        // Fire controls Metal before the clash is looked at.
        assert_eq!(DayStanding::of(Branch::Shen, Branch::Wu), DayStanding::Controlled);
        assert_eq!(DayStanding::of(Branch::Chen, Branch::Xu), DayStanding::Clashed);
        assert_eq!(DayStanding::of(Branch::Zi, Branch::Yin), DayStanding::Indifferent);
    }

    #[test]
    fn steps() {
        assert_eq!(Step::of(Branch::Yin, Branch::Mao), Some(Step::Advancing));
        assert_eq!(Step::of(Branch::Chou, Branch::Xu), Some(Step::Retreating));
        assert_eq!(Step::of(Branch::Zi, Branch::Wu), None);
    }

    #[test]
    fn report_for_moving_line() {
        // 乾为天, bottom line 甲子 turns into 辛丑 under a 午 month on a 甲寅 day.
        let (original, transformed, cast) = charts("111111", &[0]);
        let calendar = CalendarContext::new("甲寅".parse().unwrap(), Branch::Wu);
        let report = line_report(0, &original, &transformed, &cast, &calendar);

        assert_eq!(report.month, MonthStanding::Vitality(Vitality::Trapped));
        // 子 meets 午: the month clashes but no day clash, so not broken.
        assert!(!report.day_broken);
        let change = report.change.unwrap();
        assert_eq!(change.into.to_string(), "辛丑");
        assert_eq!(change.relation, Transformation::ControlledBack);
        assert_eq!(change.step, None);
        // 子 and 午 (line 3) clash.
        assert!(report.interactions.contains(&LineInteraction {
            other: 3,
            kind: Interaction::Clash
        }));
    }

    #[test]
    fn moving_lines_act_on_others() {
        // 乾为天 with 壬申 (index 4) moving: Metal generates the 甲子 line.
        let (original, transformed, cast) = charts("111111", &[4]);
        let calendar = CalendarContext::new("甲寅".parse().unwrap(), Branch::Wu);
        let report = line_report(0, &original, &transformed, &cast, &calendar);
        assert!(report.interactions.contains(&LineInteraction {
            other: 4,
            kind: Interaction::Generates
        }));
        assert!(report.change.is_none());
    }

    #[test]
    fn hidden_note_relations() {
        // 山水蒙: 己酉 Wealth beneath 丙戌 at index 3. 甲子 week voids 戌亥.
        let (original, transformed, cast) = charts("010001", &[]);
        let calendar = CalendarContext::new("甲子".parse().unwrap(), Branch::Wu);
        let report = line_report(3, &original, &transformed, &cast, &calendar);
        let note = report.hidden.unwrap();
        assert_eq!(note.relations, vec![ConcealmentFactor::ConcealingGenerates]);
        assert!(note.month_controls);
        assert!(!note.void);
    }

    #[test]
    fn moving_line_effects() {
        // 乾为天: 甲子 (index 0) and 壬申 (index 4) move; the governing line is 壬申.
        let (original, transformed, cast) = charts("111111", &[0, 4]);
        let calendar = CalendarContext::new("甲寅".parse().unwrap(), Branch::Wu);
        let notes = moving_line_notes(&original, &transformed, &cast, &calendar, 4, Element::Metal);
        assert_eq!(notes.len(), 2);
        // Water drains Metal rather than opposing it.
        assert_eq!(notes[0].effect, Some(Effect::Indifferent));
        assert_eq!(notes[1].effect, None);
    }
}
