//! Annotated hexagram charts (排盘).
//!
//! A chart lays the Na Jia stem-branches over the six lines and labels each
//! with its kinship, six-spirit and World/Response marker. Kinships absent
//! from the hexagram are looked up in the palace's pure hexagram and attached
//! as hidden spirits (伏神) beneath the visible line at the same position.

use serde::{Deserialize, Serialize};

use crate::branch::{Branch, Stem, StemBranch};
use crate::cast::{Hexagram, line_name};
use crate::element::Element;
use crate::error::CoreResult;
use crate::kinship::Kinship;
use crate::najia;
use crate::palace::{self, Placement};
use crate::spirit::Spirit;

/// World (世) or Response (应).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Marker {
    /// 世: the querent.
    World,
    /// 应: the other party.
    Response,
}

impl std::fmt::Display for Marker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::World => write!(f, "世"),
            Self::Response => write!(f, "应"),
        }
    }
}

/// A kinship concealed beneath a visible line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HiddenSpirit {
    /// Kinship missing from the visible lines.
    pub kinship: Kinship,
    /// Stem-branch of the pure-hexagram line it comes from.
    pub stem_branch: StemBranch,
}

impl std::fmt::Display for HiddenSpirit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "伏{}{}{}",
            self.kinship.glyph(),
            self.stem_branch,
            self.stem_branch.element().glyph()
        )
    }
}

/// One annotated line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineInfo {
    /// Position, 0 at the bottom.
    pub index: usize,
    /// Polarity.
    pub yang: bool,
    /// Na Jia stem-branch.
    pub stem_branch: StemBranch,
    /// Kinship against the palace element.
    pub kinship: Kinship,
    /// World or Response, if the line holds either.
    pub marker: Option<Marker>,
    /// Six-spirit for the day.
    pub spirit: Spirit,
    /// Hidden spirit beneath this line.
    pub hidden: Option<HiddenSpirit>,
}

impl LineInfo {
    /// Branch of the line.
    pub fn branch(&self) -> Branch {
        self.stem_branch.branch
    }

    /// Element of the line.
    pub fn element(&self) -> Element {
        self.stem_branch.element()
    }

    /// Returns true if the line holds World.
    pub fn is_world(&self) -> bool {
        self.marker == Some(Marker::World)
    }

    /// Returns true if the line holds Response.
    pub fn is_response(&self) -> bool {
        self.marker == Some(Marker::Response)
    }
}

impl std::fmt::Display for LineInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} {}{}{} {}",
            line_name(self.index),
            self.spirit,
            self.kinship.glyph(),
            self.stem_branch,
            self.element().glyph(),
            if self.yang { "—" } else { "- -" }
        )?;
        if let Some(marker) = self.marker {
            write!(f, " {marker}")?;
        }
        if let Some(hidden) = self.hidden {
            write!(f, " {hidden}")?;
        }
        Ok(())
    }
}

/// A fully annotated hexagram.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HexagramChart {
    /// The lines as cast.
    pub hexagram: Hexagram,
    /// Hexagram name, e.g. 山水蒙.
    pub name: String,
    /// Palace and position of this hexagram.
    pub placement: Placement,
    /// Element kinships were computed against.
    pub kinship_element: Element,
    /// Lines, bottom first.
    pub lines: [LineInfo; 6],
}

impl HexagramChart {
    /// Annotate an original hexagram, resolving hidden spirits.
    pub fn annotate(hexagram: Hexagram, day: Stem) -> CoreResult<Self> {
        let (name, placement) = palace::locate(&hexagram)?;
        let mut chart = Self::build(hexagram, name, placement, placement.element(), day);
        chart.attach_hidden_spirits();
        Ok(chart)
    }

    /// Annotate a transformed hexagram.
    ///
    /// Kinship is taken against the original hexagram's palace element, while
    /// World and Response follow the transformed hexagram's own placement.
    /// Transformed charts carry no hidden spirits.
    pub fn annotate_transformed(
        hexagram: Hexagram,
        day: Stem,
        original_element: Element,
    ) -> CoreResult<Self> {
        let (name, placement) = palace::locate(&hexagram)?;
        Ok(Self::build(hexagram, name, placement, original_element, day))
    }

    fn build(
        hexagram: Hexagram,
        name: &str,
        placement: Placement,
        kinship_element: Element,
        day: Stem,
    ) -> Self {
        let stem_branches = najia::assign(&hexagram);
        let spirits = Spirit::sequence(day);
        let (world, response) = (placement.world_index(), placement.response_index());
        let lines = std::array::from_fn(|index| {
            let stem_branch = stem_branches[index];
            let marker = if index == world {
                Some(Marker::World)
            } else if index == response {
                Some(Marker::Response)
            } else {
                None
            };
            LineInfo {
                index,
                yang: hexagram.is_yang(index),
                stem_branch,
                kinship: Kinship::of(kinship_element, stem_branch.element()),
                marker,
                spirit: spirits[index],
                hidden: None,
            }
        });
        Self {
            hexagram,
            name: name.to_string(),
            placement,
            kinship_element,
            lines,
        }
    }

    fn attach_hidden_spirits(&mut self) {
        let missing = self.missing_kinships();
        if missing.is_empty() {
            return;
        }
        let pure = najia::assign(&palace::pure_hexagram(self.placement.palace));
        for (line, stem_branch) in self.lines.iter_mut().zip(pure) {
            let kinship = Kinship::of(self.kinship_element, stem_branch.element());
            if missing.contains(&kinship) {
                line.hidden = Some(HiddenSpirit {
                    kinship,
                    stem_branch,
                });
            }
        }
    }

    /// Kinships with no visible line, in [`Kinship::ALL`] order.
    pub fn missing_kinships(&self) -> Vec<Kinship> {
        Kinship::ALL
            .into_iter()
            .filter(|k| self.lines.iter().all(|line| line.kinship != *k))
            .collect()
    }

    /// The World line.
    pub fn world(&self) -> &LineInfo {
        &self.lines[self.placement.world_index()]
    }

    /// The Response line.
    pub fn response(&self) -> &LineInfo {
        &self.lines[self.placement.response_index()]
    }

    /// Visible lines of a kinship, bottom first.
    pub fn lines_of(&self, kinship: Kinship) -> impl Iterator<Item = &LineInfo> {
        self.lines.iter().filter(move |line| line.kinship == kinship)
    }

    /// Lowest line carrying a hidden spirit of this kinship.
    pub fn hidden_of(&self, kinship: Kinship) -> Option<&LineInfo> {
        self.lines
            .iter()
            .find(|line| line.hidden.is_some_and(|h| h.kinship == kinship))
    }

    /// Body branch (卦身) of the hexagram.
    pub fn body_branch(&self) -> Option<Branch> {
        let world = self.world();
        palace::body_branch(world.index + 1, world.yang)
    }
}

impl std::fmt::Display for HexagramChart {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.name, self.placement)?;
        for line in self.lines.iter().rev() {
            write!(f, "\n{line}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chart(bits: &str, day: Stem) -> HexagramChart {
        HexagramChart::annotate(bits.parse().unwrap(), day).unwrap()
    }

    #[test]
    fn meng_chart() {
        let chart = chart("010001", Stem::Jia);
        assert_eq!(chart.kinship_element, Element::Fire);
        assert_eq!(chart.world().index, 3);
        assert_eq!(chart.response().index, 0);
        assert_eq!(chart.lines[0].kinship, Kinship::Parents);
        assert_eq!(chart.lines[3].kinship, Kinship::Offspring);
        assert_eq!(chart.missing_kinships(), vec![Kinship::Wealth]);
        let hidden = chart.hidden_of(Kinship::Wealth).unwrap();
        assert_eq!(hidden.index, 3);
        assert_eq!(hidden.hidden.unwrap().stem_branch.to_string(), "己酉");
    }

    #[test]
    fn meng_renders_top_down() {
        insta::assert_snapshot!(chart("010001", Stem::Jia).to_string(), @r"
        山水蒙 离宫 四世
        上爻 玄武 父母丙寅木 —
        五爻 白虎 官鬼丙子水 - -
        四爻 螣蛇 子孙丙戌土 - - 世 伏妻财己酉金
        三爻 勾陈 兄弟戊午火 - -
        二爻 朱雀 子孙戊辰土 —
        初爻 青龙 父母戊寅木 - - 应
        ");
    }

    #[test]
    fn gou_hides_wealth_under_second_line() {
        let chart = chart("011111", Stem::Jia);
        assert_eq!(chart.placement.palace, crate::trigram::Trigram::Qian);
        let hidden = chart.lines[1].hidden.unwrap();
        assert_eq!(hidden.kinship, Kinship::Wealth);
        assert_eq!(hidden.stem_branch.to_string(), "甲寅");
    }

    #[test]
    fn pure_hexagram_has_every_kinship() {
        for t in crate::trigram::Trigram::ALL {
            let chart = HexagramChart::annotate(palace::pure_hexagram(t), Stem::Bing).unwrap();
            assert!(chart.missing_kinships().is_empty(), "{}", chart.name);
            assert!(chart.lines.iter().all(|l| l.hidden.is_none()));
        }
    }

    #[test]
    fn transformed_uses_original_palace_element() {
        let original = chart("111111", Stem::Jia);
        let transformed = HexagramChart::annotate_transformed(
            "000000".parse().unwrap(),
            Stem::Jia,
            original.kinship_element,
        )
        .unwrap();
        assert_eq!(transformed.name, "坤为地");
        assert_eq!(transformed.lines[0].stem_branch.to_string(), "乙未");
        assert_eq!(transformed.lines[0].kinship, Kinship::Parents);
        assert_eq!(transformed.world().index, 5);
        assert!(transformed.lines.iter().all(|l| l.hidden.is_none()));
    }

    #[test]
    fn chart_survives_json() {
        let original = chart("010001", Stem::Jia);
        let json = serde_json::to_string(&original).unwrap();
        assert!(json.contains("\"name\":\"山水蒙\""));
        let back: HexagramChart = serde_json::from_str(&json).unwrap();
        assert_eq!(back, original);
        assert_eq!(back.lines[3].hidden.unwrap().stem_branch.to_string(), "己酉");
    }

    #[test]
    fn body_branch_of_meng() {
        // World on line 4, yin: counted from 午.
        assert_eq!(chart("010001", Stem::Jia).body_branch(), Some(Branch::You));
    }
}
