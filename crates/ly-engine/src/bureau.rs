//! Three-branch bureau (三合 / 三会) detection.
//!
//! Branches are pooled from the day, the month, the visible lines and the
//! transformed lines. A bureau whose three branches are all present counts
//! only when active members take part: enough moving members make it
//! substantial, fewer make it a reinforcement.

use ly_core::branch::{SEASONAL_TRIOS, TRIADS};
use ly_core::{
    Branch, BureauKind, CalendarContext, Cast, Element, HexagramChart, StemBranch,
    ThreeBranchBureau,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::strength::is_month_strong;

/// Where a pooled branch comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Source {
    /// The day branch.
    Day,
    /// The month branch.
    Month,
    /// A visible line, by index.
    Line(usize),
    /// A transformed line, by index.
    Transformed(usize),
}

/// How a pooled branch takes part in a bureau.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Activity {
    /// Day or month.
    Calendar,
    /// A moving line.
    Moving,
    /// A static line activated by a day clash (暗动).
    Latent,
    /// A static line.
    Static,
    /// A transformed line.
    Transformed,
}

impl Activity {
    fn is_active(self) -> bool {
        matches!(self, Self::Moving | Self::Latent)
    }
}

/// One branch in the pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolEntry {
    /// The branch.
    pub branch: Branch,
    /// Where it comes from.
    pub source: Source,
    /// How it takes part.
    pub activity: Activity,
}

/// Strength of a formed bureau.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Force {
    /// 成局: the bureau is fully formed.
    Substantial,
    /// 助势: the bureau only lends momentum.
    Reinforcement,
}

/// How the bureau element bears on the governing line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Bearing {
    /// The governing branch is one of the members.
    ContainsGoverning,
    /// Bureau element equals the governing element.
    SameElement,
    /// Bureau element generates the governing element.
    Generates,
    /// Bureau element controls the governing element.
    Controls,
    /// No bearing.
    Unrelated,
}

/// A detected bureau and its score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BureauReport {
    /// The bureau.
    pub bureau: ThreeBranchBureau,
    /// The pool entry standing for each member, in bureau order.
    pub members: [PoolEntry; 3],
    /// Substantial or reinforcement.
    pub force: Force,
    /// Bearing on the governing line.
    pub bearing: Bearing,
    /// Signed score.
    pub delta: i32,
}

/// Build the branch pool.
///
/// Order: day, month, then each visible line followed by its transformed
/// line when it moves.
pub fn pool(
    original: &HexagramChart,
    transformed: &HexagramChart,
    cast: &Cast,
    calendar: &CalendarContext,
) -> Vec<PoolEntry> {
    let mut entries = vec![
        PoolEntry {
            branch: calendar.day.branch,
            source: Source::Day,
            activity: Activity::Calendar,
        },
        PoolEntry {
            branch: calendar.month,
            source: Source::Month,
            activity: Activity::Calendar,
        },
    ];
    for line in &original.lines {
        let branch = line.branch();
        let moving = cast.changed[line.index];
        let activity = if moving {
            Activity::Moving
        } else if is_month_strong(branch.element(), calendar) && calendar.day.branch.clashes(branch)
        {
            Activity::Latent
        } else {
            Activity::Static
        };
        entries.push(PoolEntry {
            branch,
            source: Source::Line(line.index),
            activity,
        });
        if moving {
            entries.push(PoolEntry {
                branch: transformed.lines[line.index].branch(),
                source: Source::Transformed(line.index),
                activity: Activity::Transformed,
            });
        }
    }
    entries
}

/// Detect every triad and trio in the pool and score it against the
/// governing stem-branch.
pub fn detect(pool: &[PoolEntry], governing: StemBranch) -> Vec<BureauReport> {
    TRIADS
        .iter()
        .chain(SEASONAL_TRIOS.iter())
        .filter_map(|bureau| {
            let report = evaluate(bureau, pool, governing)?;
            debug!(
                element = %report.bureau.element,
                kind = %report.bureau.kind,
                force = ?report.force,
                delta = report.delta,
                "bureau formed"
            );
            Some(report)
        })
        .collect()
}

/// Sum of all bureau scores.
pub fn total(reports: &[BureauReport]) -> i32 {
    reports.iter().map(|r| r.delta).sum()
}

/// The first pool entry carrying `branch` stands for it.
fn member(pool: &[PoolEntry], branch: Branch) -> Option<PoolEntry> {
    pool.iter().find(|e| e.branch == branch).copied()
}

fn evaluate(
    bureau: &ThreeBranchBureau,
    pool: &[PoolEntry],
    governing: StemBranch,
) -> Option<BureauReport> {
    let [a, b, c] = bureau.branches;
    let members = [member(pool, a)?, member(pool, b)?, member(pool, c)?];

    let count = |pred: fn(Activity) -> bool| members.iter().filter(|m| pred(m.activity)).count();
    let active = count(Activity::is_active);
    let calendar = count(|a| a == Activity::Calendar);
    let changed = count(|a| a == Activity::Transformed);

    let substantial = active == 3
        || (active == 2 && calendar >= 1)
        || (active == 1 && changed >= 1 && calendar >= 1);
    let force = if substantial {
        Force::Substantial
    } else if active > 0 || changed > 0 {
        Force::Reinforcement
    } else {
        return None;
    };

    let (bearing, delta) = score(bureau, force, governing);
    Some(BureauReport {
        bureau: *bureau,
        members,
        force,
        bearing,
        delta,
    })
}

fn score(bureau: &ThreeBranchBureau, force: Force, governing: StemBranch) -> (Bearing, i32) {
    let target = governing.element();
    let trio = bureau.kind == BureauKind::SeasonalTrio;
    let bearing = if bureau.branches.contains(&governing.branch) {
        Bearing::ContainsGoverning
    } else if bureau.element == target {
        Bearing::SameElement
    } else if bureau.element.is_generating(target) {
        Bearing::Generates
    } else if bureau.element.is_controlling(target) {
        Bearing::Controls
    } else {
        Bearing::Unrelated
    };

    let delta = match (force, bearing) {
        (Force::Substantial, Bearing::ContainsGoverning) => {
            if trio {
                5
            } else {
                4
            }
        }
        (Force::Substantial, Bearing::SameElement) => 3,
        (Force::Substantial, Bearing::Generates) => 2,
        (Force::Substantial, Bearing::Controls) => {
            if trio {
                -5
            } else {
                -4
            }
        }
        (Force::Reinforcement, _) => reinforcement(bureau.element, target),
        (_, Bearing::Unrelated) => 0,
    };
    (bearing, delta)
}

fn reinforcement(bureau: Element, target: Element) -> i32 {
    if bureau == target || bureau.is_generating(target) {
        1
    } else {
        0
    }
}
