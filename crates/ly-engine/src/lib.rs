//! Liu Yao (六爻) reading engine.
//!
//! [`analyze`] takes a cast and its calendar context through the whole
//! reading: both charts are annotated, the governing line is selected for
//! the question, its strength is scored against month, day and change, a
//! concealed governing kinship is weighed against the line hiding it, and
//! three-branch bureaus may push the verdict further. Every step is
//! recorded as a typed [`Fact`]; [`render`] turns facts into text and
//! [`decorate`] attaches commentary from a [`ly_corpus::Corpus`].

pub mod bureau;
pub mod category;
pub mod config;
pub mod context;
pub mod decorate;
pub mod error;
pub mod fact;
pub mod hidden;
pub mod judgment;
pub mod render;
pub mod report;
pub mod selection;
pub mod strength;

pub use bureau::{BureauReport, Force};
pub use category::{Category, Gender, Target};
pub use config::AnalysisConfig;
pub use context::AnalysisContext;
pub use decorate::{Decoration, decorate};
pub use error::{EngineError, EngineResult};
pub use fact::{Fact, Phase};
pub use hidden::Concealment;
pub use judgment::{Cause, Judgment, Level, Timing, Verdict};
pub use selection::{GoverningLine, SelectionRule};
pub use strength::{Assessment, Contribution, Factor, LineState};

use ly_core::HexagramChart;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// A complete reading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// What the question targets.
    pub target: Target,
    /// The governing line.
    pub governing: GoverningLine,
    /// The original chart (本卦).
    pub original: HexagramChart,
    /// The transformed chart (变卦).
    pub transformed: HexagramChart,
    /// Strength of the governing line.
    pub assessment: Assessment,
    /// Hidden-spirit relation, when the governing kinship is concealed.
    pub concealment: Option<Concealment>,
    /// Formed bureaus.
    pub bureaus: Vec<BureauReport>,
    /// Sum of bureau scores.
    pub bureau_total: i32,
    /// Final strength verdict.
    pub verdict: Verdict,
    /// Final judgment.
    pub judgment: Judgment,
    /// Timing estimate.
    pub timing: Timing,
    /// Every step of the reading, in order.
    pub facts: Vec<Fact>,
}

/// Run a full reading with the default configuration.
pub fn analyze(ctx: &AnalysisContext) -> EngineResult<AnalysisResult> {
    analyze_with(ctx, &AnalysisConfig::default())
}

/// Run a full reading.
pub fn analyze_with(ctx: &AnalysisContext, config: &AnalysisConfig) -> EngineResult<AnalysisResult> {
    let AnalysisContext {
        cast,
        calendar,
        category,
        gender,
    } = *ctx;
    let day_stem = calendar.day.stem;
    let original = HexagramChart::annotate(cast.original, day_stem)?;
    let transformed =
        HexagramChart::annotate_transformed(cast.transformed, day_stem, original.kinship_element)?;
    debug!(original = %original.name, transformed = %transformed.name, %calendar, "charts annotated");

    let target = category.target(gender);
    let governing = selection::select(&original, target, &cast, &calendar)?;
    let mut facts = vec![
        Fact::Target(target),
        Fact::Selected {
            index: governing.index,
            rule: governing.rule,
            stem_branch: governing.line.stem_branch,
            hidden: governing.hidden,
        },
    ];

    let moving = cast.changed[governing.index];
    let state = LineState {
        stem_branch: governing.stem_branch(),
        moving,
        transformed: moving.then(|| transformed.lines[governing.index].stem_branch),
    };
    let assessment = strength::assess(&state, &calendar);
    debug!(score = assessment.score, level = ?assessment.level, "governing line scored");
    facts.extend(assessment.contributions.iter().copied().map(Fact::Contribution));
    facts.push(Fact::Score {
        score: assessment.score,
        level: assessment.level,
    });

    let mut verdict = Verdict::plain(assessment.level);
    let concealment = governing
        .hidden
        .map(|h| Concealment::evaluate(governing.line.stem_branch, h.stem_branch, &calendar));
    if let Some(concealment) = &concealment {
        facts.extend(concealment.factors.iter().copied().map(Fact::Concealment));
        facts.push(Fact::ConcealmentTotal(concealment.total));
        let adjusted = verdict.adjust_for_concealment(concealment.total);
        verdict = record(&mut facts, Phase::Concealment, verdict, adjusted);
    }

    if config.line_reports {
        for index in (0..6).rev() {
            let line = report::line_report(index, &original, &transformed, &cast, &calendar);
            facts.push(Fact::Line(line));
        }
    }
    if config.moving_line_notes {
        let notes = report::moving_line_notes(
            &original,
            &transformed,
            &cast,
            &calendar,
            governing.index,
            governing.line.stem_branch.element(),
        );
        facts.extend(notes.into_iter().map(Fact::MovingLine));
    }

    let pool = bureau::pool(&original, &transformed, &cast, &calendar);
    // Bureaus and timing bear on the visible line, even over a hidden spirit.
    let bureaus = bureau::detect(&pool, governing.line.stem_branch);
    let bureau_total = bureau::total(&bureaus);
    if !bureaus.is_empty() {
        facts.extend(bureaus.iter().copied().map(Fact::Bureau));
        facts.push(Fact::BureauTotal(bureau_total));
    }
    let adjusted = verdict.adjust_for_bureaus(bureau_total);
    verdict = record(&mut facts, Phase::Bureau, verdict, adjusted);

    let judgment = Judgment::of(verdict);
    let timing = Timing {
        element: governing.line.stem_branch.element(),
    };
    facts.push(Fact::Judgment(judgment));
    facts.push(Fact::Timing(timing));
    info!(
        hexagram = %original.name,
        category = %category,
        level = ?verdict.level,
        judgment = ?judgment,
        "reading complete"
    );

    Ok(AnalysisResult {
        target,
        governing,
        original,
        transformed,
        assessment,
        concealment,
        bureaus,
        bureau_total,
        verdict,
        judgment,
        timing,
        facts,
    })
}

fn record(facts: &mut Vec<Fact>, phase: Phase, from: Verdict, to: Verdict) -> Verdict {
    if from != to {
        debug!(?phase, from = ?from.level, to = ?to.level, "verdict adjusted");
        facts.push(Fact::Adjusted { phase, from, to });
    }
    to
}

#[cfg(test)]
mod tests {
    use super::*;
    use ly_core::{Branch, CalendarContext, Cast, Hexagram, Kinship, StemBranch};
    use proptest::prelude::*;

    fn context(bits: &str, moving: &[usize], day: &str, month: Branch, category: Category) -> AnalysisContext {
        let hexagram: Hexagram = bits.parse().unwrap();
        let mut changed = [false; 6];
        for i in moving {
            changed[*i] = true;
        }
        let calendar = CalendarContext::new(day.parse().unwrap(), month);
        AnalysisContext::new(Cast::new(hexagram, changed), calendar, category)
    }

    #[test]
    fn hidden_wealth_reading() {
        // 山水蒙 has no Wealth line; 己酉 hides beneath 丙戌.
        let ctx = context("010001", &[], "甲寅", Branch::Chen, Category::Wealth);
        let result = analyze(&ctx).unwrap();

        assert_eq!(result.target, Target::Kinship(Kinship::Wealth));
        assert_eq!(result.governing.rule, SelectionRule::Hidden);
        assert_eq!(result.governing.stem_branch().to_string(), "己酉");
        // 辰 month supports Metal (+2) and combines with 酉 (+2).
        assert_eq!(result.assessment.score, 4);
        assert_eq!(result.concealment.as_ref().map(|c| c.total), Some(2));
        assert_eq!(result.verdict, Verdict::plain(Level::Strong));
        assert_eq!(result.judgment, Judgment::Auspicious);
        // Timing follows the concealing 丙戌.
        assert_eq!(result.timing.element, ly_core::Element::Earth);
        assert!(result.bureaus.is_empty());
        assert!(matches!(result.facts[0], Fact::Target(_)));
        assert!(matches!(result.facts[1], Fact::Selected { index: 3, .. }));
    }

    #[test]
    fn concealing_line_lifts_a_weak_hidden_spirit() {
        // 丁卯 clashes 酉 in a 午 month: day-broken (-3).
        let ctx = context("010001", &[], "丁卯", Branch::Wu, Category::Wealth);
        let result = analyze(&ctx).unwrap();

        assert_eq!(result.assessment.score, -3);
        assert_eq!(
            result.verdict,
            Verdict {
                level: Level::Neutral,
                cause: Some(Cause::SupportedByConcealing)
            }
        );
        assert_eq!(result.judgment, Judgment::Neutral);
        assert!(result.facts.contains(&Fact::Adjusted {
            phase: Phase::Concealment,
            from: Verdict::plain(Level::Weak),
            to: result.verdict,
        }));
    }

    #[test]
    fn bureau_bears_on_the_concealing_line() {
        // 寅 午 戌 all move; 己酉 hides beneath the moving 丙戌.
        let ctx = context("010001", &[0, 2, 3], "甲子", Branch::Chen, Category::Wealth);
        let result = analyze(&ctx).unwrap();

        assert!(result.governing.is_hidden());
        assert_eq!(result.governing.line.stem_branch.to_string(), "丙戌");
        assert_eq!(result.bureaus.len(), 1);
        let fire = &result.bureaus[0];
        assert_eq!(fire.bureau.branches, [Branch::Yin, Branch::Wu, Branch::Xu]);
        assert_eq!(fire.force, bureau::Force::Substantial);
        // Against 己酉 this Fire triad would control Metal (-4).
        assert_eq!(fire.bearing, bureau::Bearing::ContainsGoverning);
        assert_eq!(fire.delta, 4);
        assert_eq!(result.bureau_total, 4);
        assert_eq!(result.timing.element, ly_core::Element::Earth);
    }

    #[test]
    fn world_holder_governs() {
        let ctx = context("100100", &[2], "甲子", Branch::Wu, Category::Wealth);
        let result = analyze(&ctx).unwrap();
        assert_eq!(result.governing.index, 5);
        assert_eq!(result.governing.rule, SelectionRule::HoldsWorld);
    }

    #[test]
    fn health_reads_the_world_line() {
        let ctx = context("010001", &[], "甲子", Branch::Wu, Category::Health);
        let result = analyze(&ctx).unwrap();
        assert_eq!(result.target, Target::WorldLine);
        assert_eq!(result.governing.index, 3);
    }

    #[test]
    fn marriage_follows_gender() {
        let ctx = context("010001", &[], "甲子", Branch::Wu, Category::Marriage)
            .with_gender(Gender::Female);
        let result = analyze(&ctx).unwrap();
        assert_eq!(result.target, Target::Kinship(Kinship::OfficerGhost));
        assert_eq!(result.governing.index, 4);
    }

    #[test]
    fn line_reports_follow_config() {
        let ctx = context("111111", &[0, 4], "甲寅", Branch::Wu, Category::Career);
        let full = analyze(&ctx).unwrap();
        let lines = full.facts.iter().filter(|f| matches!(f, Fact::Line(_))).count();
        let notes = full.facts.iter().filter(|f| matches!(f, Fact::MovingLine(_))).count();
        assert_eq!((lines, notes), (6, 2));

        let brief = analyze_with(&ctx, &AnalysisConfig::brief()).unwrap();
        assert!(!brief.facts.iter().any(|f| matches!(f, Fact::Line(_) | Fact::MovingLine(_))));
        assert_eq!(brief.verdict, full.verdict);
    }

    #[test]
    fn line_reports_run_top_down() {
        let ctx = context("111111", &[], "甲寅", Branch::Wu, Category::Career);
        let result = analyze(&ctx).unwrap();
        let order: Vec<usize> = result
            .facts
            .iter()
            .filter_map(|f| match f {
                Fact::Line(report) => Some(report.index),
                _ => None,
            })
            .collect();
        assert_eq!(order, vec![5, 4, 3, 2, 1, 0]);
    }

    #[test]
    fn result_serializes() {
        let ctx = context("010001", &[1], "甲子", Branch::Wu, Category::Study);
        let result = analyze(&ctx).unwrap();
        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("\"judgment\""));
        let back: AnalysisResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back, result);
    }

    fn bits(value: u8) -> [bool; 6] {
        std::array::from_fn(|i| value >> i & 1 == 1)
    }

    proptest! {
        #[test]
        fn every_reading_resolves(
            hexagram in 0u8..64,
            changed in 0u8..64,
            category in 0usize..10,
            day in 0usize..60,
            month in 0usize..12,
        ) {
            let calendar = CalendarContext::new(StemBranch::from_cycle(day), Branch::from_index(month));
            let cast = Cast::new(Hexagram(bits(hexagram)), bits(changed));
            let ctx = AnalysisContext::new(cast, calendar, Category::ALL[category]);
            let first = analyze(&ctx);
            prop_assert!(first.is_ok());
            prop_assert_eq!(first, analyze(&ctx));
        }

        #[test]
        fn month_clash_never_leaves_a_neutral_line_strong(
            day in 0usize..60,
            month in 0usize..12,
            line in 0usize..60,
        ) {
            let calendar = CalendarContext::new(StemBranch::from_cycle(day), Branch::from_index(month));
            let state = LineState {
                stem_branch: StemBranch::from_cycle(line),
                moving: false,
                transformed: None,
            };
            let assessment = strength::assess(&state, &calendar);
            let rest: i32 = assessment
                .contributions
                .iter()
                .filter(|c| c.factor != Factor::MonthClash)
                .map(|c| c.delta)
                .sum();
            if rest == 0 && assessment.find(|f| *f == Factor::MonthClash).is_some() {
                prop_assert_eq!(assessment.level, Level::Weak);
            }
            prop_assert_eq!(assessment.level, Level::from_score(assessment.score));
        }
    }
}
