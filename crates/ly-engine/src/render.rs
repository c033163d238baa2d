//! Text rendering of reading facts.
//!
//! Everything here is `Display`; nothing feeds back into scoring.

use std::fmt;

use ly_core::cast::line_name;
use ly_core::{BureauKind, Punishment, Vitality};

use crate::bureau::{Activity, BureauReport, Force, PoolEntry, Source};
use crate::fact::{Fact, Phase};
use crate::hidden::ConcealmentFactor;
use crate::judgment::{Cause, Judgment, Level, Timing, Verdict};
use crate::report::{
    Change, DayStanding, Effect, Interaction, LineInteraction, LineReport, MonthStanding,
    MovingLineNote, Step,
};
use crate::selection::SelectionRule;
use crate::strength::{Contribution, Factor, Transformation};

/// Render each fact on its own line.
pub fn narrative(facts: &[Fact]) -> Vec<String> {
    facts.iter().map(ToString::to_string).collect()
}

fn vitality(v: Vitality) -> &'static str {
    match v {
        Vitality::Prosperous => "旺",
        Vitality::Supported => "相",
        Vitality::Resting => "休",
        Vitality::Trapped => "囚",
        Vitality::Dead => "死",
    }
}

fn punishment(p: Punishment) -> &'static str {
    match p {
        Punishment::Ungrateful => "无恩之刑",
        Punishment::Bullying => "恃势之刑",
        Punishment::Rude => "无礼之刑",
        Punishment::SelfInflicted => "自刑",
    }
}

impl fmt::Display for SelectionRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sole => write!(f, "独现"),
            Self::HoldsWorld => write!(f, "持世"),
            Self::Moving => write!(f, "发动"),
            Self::MonthBranch => write!(f, "临月建"),
            Self::DayBranch => write!(f, "临日辰"),
            Self::HoldsResponse => write!(f, "持应"),
            Self::Lowest => write!(f, "取下爻"),
            Self::WorldLine => write!(f, "取世爻"),
            Self::Hidden => write!(f, "伏藏"),
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Strong => write!(f, "强"),
            Self::Neutral => write!(f, "中平"),
            Self::Weak => write!(f, "弱"),
        }
    }
}

impl fmt::Display for Cause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SupportedByConcealing => write!(f, "飞神生助"),
            Self::SuppressedByConcealing => write!(f, "飞神克制"),
            Self::BureauSupport => write!(f, "合局生助"),
            Self::BureauSuppression => write!(f, "合局克制"),
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.level)?;
        if let Some(cause) = self.cause {
            write!(f, " ({cause})")?;
        }
        Ok(())
    }
}

impl fmt::Display for Judgment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auspicious => write!(f, "吉"),
            Self::Neutral => write!(f, "平"),
            Self::Inauspicious => write!(f, "凶"),
        }
    }
}

impl fmt::Display for Timing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let e = self.element.glyph();
        write!(f, "事件可能应验于{e}日/{e}月")
    }
}

impl fmt::Display for Transformation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Advancing => write!(f, "化进神"),
            Self::Retreating => write!(f, "化退神"),
            Self::GeneratedBack => write!(f, "化回头生"),
            Self::ControlledBack => write!(f, "化回头克"),
            Self::Draining => write!(f, "化泄气"),
            Self::Controlling => write!(f, "化克"),
            Self::Kindred => write!(f, "化比和"),
        }
    }
}

impl fmt::Display for Factor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MonthVitality(v) => write!(f, "月上{}", vitality(*v)),
            Self::DayVitality(v) => write!(f, "日上{}", vitality(*v)),
            Self::Transformation(t) => write!(f, "{t}"),
            Self::MonthClash => write!(f, "月破"),
            Self::MonthCombination(e) => write!(f, "月合({})", e.glyph()),
            Self::DayCombination(e) => write!(f, "日合({})", e.glyph()),
            Self::DayHarm => write!(f, "日害"),
            Self::DayPunishment(p) => write!(f, "日{}", punishment(*p)),
            Self::Void => write!(f, "旬空"),
            Self::LatentActivation => write!(f, "暗动"),
            Self::DayBroken => write!(f, "日破"),
            Self::DayClash => write!(f, "日冲"),
        }
    }
}

impl fmt::Display for Contribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:+}", self.factor, self.delta)
    }
}

impl fmt::Display for ConcealmentFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConcealingGenerates => write!(f, "飞生伏"),
            Self::ConcealingControls => write!(f, "飞克伏"),
            Self::HiddenGenerates => write!(f, "伏生飞"),
            Self::HiddenControls => write!(f, "伏克飞"),
            Self::HiddenVoid => write!(f, "伏神旬空"),
            Self::HiddenMonthClash => write!(f, "伏神月破"),
        }
    }
}

impl fmt::Display for MonthStanding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OnMonth => write!(f, "值月建"),
            Self::Generated => write!(f, "月建生"),
            Self::Controlled => write!(f, "月建克"),
            Self::Vitality(v) => write!(f, "月上{}", vitality(*v)),
        }
    }
}

impl fmt::Display for DayStanding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OnDay => write!(f, "临日辰"),
            Self::Generated => write!(f, "日辰生"),
            Self::Controlled => write!(f, "日辰克"),
            Self::Clashed => write!(f, "日辰冲"),
            Self::Indifferent => write!(f, "日辰无生克"),
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Advancing => write!(f, "化进神"),
            Self::Retreating => write!(f, "化退神"),
        }
    }
}

impl fmt::Display for LineInteraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let other = line_name(self.other);
        match self.kind {
            Interaction::Clash => write!(f, "冲{other}"),
            Interaction::Generates => write!(f, "{other}生"),
            Interaction::Controls => write!(f, "{other}克"),
            Interaction::Combination(e) => write!(f, "{other}合({})", e.glyph()),
            Interaction::Harm => write!(f, "{other}害"),
            Interaction::Punishment(p) => write!(f, "{other}{}", punishment(p)),
        }
    }
}

fn write_change(f: &mut fmt::Formatter<'_>, change: &Change) -> fmt::Result {
    write!(f, " {}", change.relation)?;
    if let Some(step) = change.step {
        write!(f, " {step}")?;
    }
    Ok(())
}

impl fmt::Display for LineReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}：{}{}{} {}",
            line_name(self.index),
            self.kinship.glyph(),
            self.stem_branch,
            self.stem_branch.element().glyph(),
            self.month
        )?;
        if self.day != DayStanding::Indifferent {
            write!(f, " {}", self.day)?;
        }
        if self.day_broken {
            write!(f, " 日破")?;
        }
        if let Some(e) = self.month_combination {
            write!(f, " 月合({})", e.glyph())?;
        }
        if let Some(e) = self.day_combination {
            write!(f, " 日合({})", e.glyph())?;
        }
        if let Some(p) = self.day_punishment {
            write!(f, " 日{}", punishment(p))?;
        }
        if self.day_harm {
            write!(f, " 日害")?;
        }
        if let Some(change) = &self.change {
            write_change(f, change)?;
        }
        for interaction in &self.interactions {
            write!(f, " {interaction}")?;
        }
        write!(f, " 日上{}", self.stage.glyph())?;

        if let Some(change) = &self.change {
            write!(
                f,
                "\n  变爻→{}{}{}",
                change.kinship.glyph(),
                change.into,
                change.into.element().glyph()
            )?;
            if matches!(change.month, MonthStanding::OnMonth | MonthStanding::Generated) {
                write!(f, " {}", change.month)?;
            }
            if matches!(change.day, DayStanding::OnDay | DayStanding::Generated) {
                write!(f, " {}", change.day)?;
            }
        }
        if let Some(hidden) = &self.hidden {
            write!(f, "\n  伏神→{}", hidden.spirit)?;
            if hidden.month_controls {
                write!(f, " 月建克")?;
            }
            if hidden.day_controls {
                write!(f, " 日辰克")?;
            }
            for relation in &hidden.relations {
                write!(f, " {relation}")?;
            }
            if hidden.void {
                write!(f, " 旬空")?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Supports => write!(f, "生用神 (原神) 吉"),
            Self::Opposes => write!(f, "克用神 (忌神) 凶"),
            Self::Indifferent => write!(f, "与用神无直接生克"),
        }
    }
}

impl fmt::Display for MovingLineNote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "动爻 {} {}{}{} 化 {}{}{}",
            line_name(self.index),
            self.kinship.glyph(),
            self.stem_branch,
            self.stem_branch.element().glyph(),
            self.change.kinship.glyph(),
            self.change.into,
            self.change.into.element().glyph()
        )?;
        write_change(f, &self.change)?;
        if let Some(effect) = self.effect {
            write!(f, "，{effect}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Force {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Substantial => write!(f, "成局"),
            Self::Reinforcement => write!(f, "助势"),
        }
    }
}

impl fmt::Display for PoolEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.branch)?;
        match self.source {
            Source::Day => write!(f, "(日辰)"),
            Source::Month => write!(f, "(月建)"),
            Source::Line(i) => match self.activity {
                Activity::Latent => write!(f, "({}暗动)", line_name(i)),
                Activity::Moving => write!(f, "({}动)", line_name(i)),
                _ => write!(f, "({})", line_name(i)),
            },
            Source::Transformed(i) => write!(f, "({}变)", line_name(i)),
        }
    }
}

impl fmt::Display for BureauReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.bureau.kind {
            BureauKind::Triad => "三合",
            BureauKind::SeasonalTrio => "三会",
        };
        let [a, b, c] = self.bureau.branches;
        write!(
            f,
            "{a}{b}{c}{kind}{}局 {} {:+}：",
            self.bureau.element.glyph(),
            self.force,
            self.delta
        )?;
        for (i, member) in self.members.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{member}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Concealment => write!(f, "飞伏"),
            Self::Bureau => write!(f, "合局"),
        }
    }
}

impl fmt::Display for Fact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Target(target) => write!(f, "用神：{target}"),
            Self::Selected {
                index,
                rule,
                stem_branch,
                hidden,
            } => {
                write!(f, "取{}{}（{rule}）", line_name(*index), stem_branch)?;
                if let Some(h) = hidden {
                    write!(f, "，{h}")?;
                }
                Ok(())
            }
            Self::Contribution(c) => write!(f, "  {c}"),
            Self::Score { score, level } => write!(f, "旺衰得分 {score:+}，{level}"),
            Self::Concealment(c) => write!(f, "  {c} {:+}", c.delta()),
            Self::ConcealmentTotal(total) => write!(f, "飞伏合计 {total:+}"),
            Self::Adjusted { phase, from, to } => write!(f, "{phase}调整：{from} → {to}"),
            Self::Line(report) => write!(f, "{report}"),
            Self::MovingLine(note) => write!(f, "{note}"),
            Self::Bureau(report) => write!(f, "{report}"),
            Self::BureauTotal(total) => write!(f, "合局合计 {total:+}"),
            Self::Judgment(j) => write!(f, "断：{j}"),
            Self::Timing(t) => write!(f, "{t}"),
        }
    }
}
