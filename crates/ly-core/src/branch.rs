//! Heavenly stems, earthly branches, and the relations between branches.
//!
//! Branch relations are fixed tables: six clashes (冲), six combinations (合)
//! each yielding an element, punishments (刑), six harms (害), the four
//! triads (三合) and four seasonal trios (三会), plus the advancing (进神)
//! adjacency used to grade a moving line's transformation.

use serde::{Deserialize, Serialize};

use crate::element::Element;
use crate::error::{CoreError, CoreResult};

/// One of the ten heavenly stems (天干).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Stem {
    /// 甲
    Jia,
    /// 乙
    Yi,
    /// 丙
    Bing,
    /// 丁
    Ding,
    /// 戊
    Wu,
    /// 己
    Ji,
    /// 庚
    Geng,
    /// 辛
    Xin,
    /// 壬
    Ren,
    /// 癸
    Gui,
}

impl Stem {
    /// All stems in cycle order.
    pub const ALL: [Self; 10] = [
        Self::Jia,
        Self::Yi,
        Self::Bing,
        Self::Ding,
        Self::Wu,
        Self::Ji,
        Self::Geng,
        Self::Xin,
        Self::Ren,
        Self::Gui,
    ];

    const GLYPHS: [&'static str; 10] = ["甲", "乙", "丙", "丁", "戊", "己", "庚", "辛", "壬", "癸"];
    const PINYIN: [&'static str; 10] = [
        "jia", "yi", "bing", "ding", "wu", "ji", "geng", "xin", "ren", "gui",
    ];

    /// Position in the ten-stem cycle (甲 = 0).
    pub fn index(self) -> usize {
        self as usize
    }

    /// Stem at the given cycle position (taken modulo 10).
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % 10]
    }

    /// Chinese glyph for the stem.
    pub fn glyph(self) -> &'static str {
        Self::GLYPHS[self.index()]
    }

    /// Element ruled by the stem.
    pub fn element(self) -> Element {
        match self {
            Self::Jia | Self::Yi => Element::Wood,
            Self::Bing | Self::Ding => Element::Fire,
            Self::Wu | Self::Ji => Element::Earth,
            Self::Geng | Self::Xin => Element::Metal,
            Self::Ren | Self::Gui => Element::Water,
        }
    }
}

impl std::str::FromStr for Stem {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        let s = s.trim();
        let lower = s.to_lowercase();
        Self::GLYPHS
            .iter()
            .position(|g| *g == s)
            .or_else(|| Self::PINYIN.iter().position(|p| *p == lower))
            .map(Self::from_index)
            .ok_or_else(|| CoreError::InvalidStem(s.to_string()))
    }
}

impl std::fmt::Display for Stem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.glyph())
    }
}

/// One of the twelve earthly branches (地支).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Branch {
    /// 子
    Zi,
    /// 丑
    Chou,
    /// 寅
    Yin,
    /// 卯
    Mao,
    /// 辰
    Chen,
    /// 巳
    Si,
    /// 午
    Wu,
    /// 未
    Wei,
    /// 申
    Shen,
    /// 酉
    You,
    /// 戌
    Xu,
    /// 亥
    Hai,
}

/// Kind of two-branch punishment (刑).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Punishment {
    /// 无恩之刑 among 寅, 巳 and 申.
    Ungrateful,
    /// 恃势之刑 among 丑, 戌 and 未.
    Bullying,
    /// 无礼之刑 between 子 and 卯.
    Rude,
    /// 自刑 of 辰, 午, 酉 or 亥 meeting itself.
    SelfInflicted,
}

impl std::fmt::Display for Punishment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ungrateful => write!(f, "ungrateful punishment"),
            Self::Bullying => write!(f, "bullying punishment"),
            Self::Rude => write!(f, "rude punishment"),
            Self::SelfInflicted => write!(f, "self punishment"),
        }
    }
}

impl Branch {
    /// All branches in cycle order.
    pub const ALL: [Self; 12] = [
        Self::Zi,
        Self::Chou,
        Self::Yin,
        Self::Mao,
        Self::Chen,
        Self::Si,
        Self::Wu,
        Self::Wei,
        Self::Shen,
        Self::You,
        Self::Xu,
        Self::Hai,
    ];

    const GLYPHS: [&'static str; 12] = [
        "子", "丑", "寅", "卯", "辰", "巳", "午", "未", "申", "酉", "戌", "亥",
    ];
    const PINYIN: [&'static str; 12] = [
        "zi", "chou", "yin", "mao", "chen", "si", "wu", "wei", "shen", "you", "xu", "hai",
    ];

    /// Position in the twelve-branch cycle (子 = 0).
    pub fn index(self) -> usize {
        self as usize
    }

    /// Branch at the given cycle position (taken modulo 12).
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % 12]
    }

    /// The branch `steps` positions further along the cycle.
    pub fn offset(self, steps: usize) -> Self {
        Self::from_index(self.index() + steps)
    }

    /// Chinese glyph for the branch.
    pub fn glyph(self) -> &'static str {
        Self::GLYPHS[self.index()]
    }

    /// Element carried by the branch.
    pub fn element(self) -> Element {
        match self {
            Self::Hai | Self::Zi => Element::Water,
            Self::Yin | Self::Mao => Element::Wood,
            Self::Si | Self::Wu => Element::Fire,
            Self::Shen | Self::You => Element::Metal,
            Self::Chen | Self::Xu | Self::Chou | Self::Wei => Element::Earth,
        }
    }

    /// The branch directly opposite on the cycle.
    pub fn opposite(self) -> Self {
        self.offset(6)
    }

    /// Returns true if the two branches clash (六冲).
    pub fn clashes(self, other: Self) -> bool {
        self.opposite() == other
    }

    /// Element produced if the two branches combine (六合).
    pub fn combination(self, other: Self) -> Option<Element> {
        use Branch::*;
        match (self, other) {
            (Zi, Chou) | (Chou, Zi) => Some(Element::Earth),
            (Yin, Hai) | (Hai, Yin) => Some(Element::Wood),
            (Mao, Xu) | (Xu, Mao) => Some(Element::Fire),
            (Chen, You) | (You, Chen) => Some(Element::Metal),
            (Si, Shen) | (Shen, Si) => Some(Element::Water),
            (Wu, Wei) | (Wei, Wu) => Some(Element::Earth),
            _ => None,
        }
    }

    /// Punishment between the two branches, if any.
    pub fn punishment(self, other: Self) -> Option<Punishment> {
        use Branch::*;
        match (self, other) {
            (Yin, Si) | (Si, Yin) | (Si, Shen) | (Shen, Si) | (Yin, Shen) | (Shen, Yin) => {
                Some(Punishment::Ungrateful)
            }
            (Chou, Xu) | (Xu, Chou) | (Xu, Wei) | (Wei, Xu) | (Chou, Wei) | (Wei, Chou) => {
                Some(Punishment::Bullying)
            }
            (Zi, Mao) | (Mao, Zi) => Some(Punishment::Rude),
            (Chen, Chen) | (Wu, Wu) | (You, You) | (Hai, Hai) => Some(Punishment::SelfInflicted),
            _ => None,
        }
    }

    /// Returns true if the two branches harm each other (六害).
    pub fn harms(self, other: Self) -> bool {
        use Branch::*;
        matches!(
            (self, other),
            (Zi, Wei)
                | (Wei, Zi)
                | (Chou, Wu)
                | (Wu, Chou)
                | (Yin, Si)
                | (Si, Yin)
                | (Mao, Chen)
                | (Chen, Mao)
                | (Shen, Hai)
                | (Hai, Shen)
                | (You, Xu)
                | (Xu, You)
        )
    }

    /// The branch this one advances to (进神).
    ///
    /// Earth follows the 丑 → 辰 → 未 → 戌 → 丑 chain.
    pub fn advance(self) -> Option<Self> {
        use Branch::*;
        match self {
            Hai => Some(Zi),
            Yin => Some(Mao),
            Si => Some(Wu),
            Shen => Some(You),
            Chou => Some(Chen),
            Chen => Some(Wei),
            Wei => Some(Xu),
            Xu => Some(Chou),
            _ => None,
        }
    }

    /// Returns true if changing from `self` into `to` advances.
    pub fn is_advancing(self, to: Self) -> bool {
        self.advance() == Some(to)
    }

    /// Returns true if changing from `self` into `to` retreats (退神).
    pub fn is_retreating(self, to: Self) -> bool {
        to.advance() == Some(self)
    }
}

impl std::str::FromStr for Branch {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        let s = s.trim();
        let lower = s.to_lowercase();
        Self::GLYPHS
            .iter()
            .position(|g| *g == s)
            .or_else(|| Self::PINYIN.iter().position(|p| *p == lower))
            .map(Self::from_index)
            .ok_or_else(|| CoreError::InvalidBranch(s.to_string()))
    }
}

impl std::fmt::Display for Branch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.glyph())
    }
}

/// A sexagenary stem-branch pair such as 甲子.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StemBranch {
    /// The heavenly stem.
    pub stem: Stem,
    /// The earthly branch.
    pub branch: Branch,
}

impl StemBranch {
    /// Pair a stem with a branch without checking parity.
    pub const fn new(stem: Stem, branch: Branch) -> Self {
        Self { stem, branch }
    }

    /// Pair a stem with a branch, rejecting pairs outside the sixty cycle.
    pub fn checked(stem: Stem, branch: Branch) -> CoreResult<Self> {
        if stem.index() % 2 == branch.index() % 2 {
            Ok(Self { stem, branch })
        } else {
            Err(CoreError::InvalidStemBranch(format!("{stem}{branch}")))
        }
    }

    /// The pair at the given position of the sixty cycle (甲子 = 0).
    pub fn from_cycle(index: usize) -> Self {
        Self::new(Stem::from_index(index), Branch::from_index(index))
    }

    /// Position in the sixty cycle.
    pub fn cycle_index(self) -> usize {
        (0..60)
            .find(|n| n % 10 == self.stem.index() && n % 12 == self.branch.index())
            .unwrap_or(0)
    }

    /// Element of the branch, which governs a line.
    pub fn element(self) -> Element {
        self.branch.element()
    }
}

impl std::str::FromStr for StemBranch {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        let s = s.trim();
        let mut chars = s.chars();
        match (chars.next(), chars.next(), chars.next()) {
            (Some(stem), Some(branch), None) => Self::checked(
                stem.to_string().parse()?,
                branch.to_string().parse()?,
            ),
            _ => {
                let (stem, branch) = s
                    .split_once(['-', ' '])
                    .ok_or_else(|| CoreError::InvalidStemBranch(s.to_string()))?;
                Self::checked(stem.parse()?, branch.parse()?)
            }
        }
    }
}

impl std::fmt::Display for StemBranch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.stem, self.branch)
    }
}

/// Kind of three-branch bureau.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BureauKind {
    /// 三合: birth, peak and tomb of an element.
    Triad,
    /// 三会: the three branches of one season.
    SeasonalTrio,
}

impl std::fmt::Display for BureauKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Triad => write!(f, "triad"),
            Self::SeasonalTrio => write!(f, "seasonal trio"),
        }
    }
}

/// Three branches that together form an element bureau.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreeBranchBureau {
    /// Triad or seasonal trio.
    pub kind: BureauKind,
    /// The required branches.
    pub branches: [Branch; 3],
    /// The element the bureau produces.
    pub element: Element,
}

/// The four triads (三合).
pub const TRIADS: [ThreeBranchBureau; 4] = [
    ThreeBranchBureau {
        kind: BureauKind::Triad,
        branches: [Branch::Shen, Branch::Zi, Branch::Chen],
        element: Element::Water,
    },
    ThreeBranchBureau {
        kind: BureauKind::Triad,
        branches: [Branch::Hai, Branch::Mao, Branch::Wei],
        element: Element::Wood,
    },
    ThreeBranchBureau {
        kind: BureauKind::Triad,
        branches: [Branch::Yin, Branch::Wu, Branch::Xu],
        element: Element::Fire,
    },
    ThreeBranchBureau {
        kind: BureauKind::Triad,
        branches: [Branch::Si, Branch::You, Branch::Chou],
        element: Element::Metal,
    },
];

/// The four seasonal trios (三会).
pub const SEASONAL_TRIOS: [ThreeBranchBureau; 4] = [
    ThreeBranchBureau {
        kind: BureauKind::SeasonalTrio,
        branches: [Branch::Hai, Branch::Zi, Branch::Chou],
        element: Element::Water,
    },
    ThreeBranchBureau {
        kind: BureauKind::SeasonalTrio,
        branches: [Branch::Yin, Branch::Mao, Branch::Chen],
        element: Element::Wood,
    },
    ThreeBranchBureau {
        kind: BureauKind::SeasonalTrio,
        branches: [Branch::Si, Branch::Wu, Branch::Wei],
        element: Element::Fire,
    },
    ThreeBranchBureau {
        kind: BureauKind::SeasonalTrio,
        branches: [Branch::Shen, Branch::You, Branch::Xu],
        element: Element::Metal,
    },
];

impl ThreeBranchBureau {
    /// Element of the bureau formed by `branches`, if all three members of
    /// any triad or trio are present. Triads are checked first.
    pub fn formed_by(branches: &[Branch]) -> Option<Self> {
        TRIADS
            .iter()
            .chain(SEASONAL_TRIOS.iter())
            .find(|b| b.branches.iter().all(|m| branches.contains(m)))
            .copied()
    }
}
