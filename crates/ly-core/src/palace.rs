//! The eight palaces (八宫).
//!
//! Each palace is headed by a doubled trigram and holds eight hexagrams in
//! a fixed order: the pure hexagram, five successive changes, then the
//! wandering-soul and returning-soul hexagrams. The palace position decides
//! which lines hold World (世) and Response (应).

use serde::{Deserialize, Serialize};

use crate::branch::Branch;
use crate::cast::Hexagram;
use crate::element::Element;
use crate::error::{CoreError, CoreResult};
use crate::trigram::Trigram;

/// Bit pattern (bottom first) and name, per palace in palace order.
const TABLE: [[(&str, &str); 8]; 8] = [
    [
        ("111111", "乾为天"),
        ("011111", "天风姤"),
        ("001111", "天山遁"),
        ("000111", "天地否"),
        ("000011", "风地观"),
        ("000001", "山地剥"),
        ("000101", "火地晋"),
        ("111101", "火天大有"),
    ],
    [
        ("110110", "兑为泽"),
        ("010110", "泽水困"),
        ("000110", "泽地萃"),
        ("001110", "泽山咸"),
        ("001010", "水山蹇"),
        ("001000", "地山谦"),
        ("001100", "雷山小过"),
        ("110100", "雷泽归妹"),
    ],
    [
        ("101101", "离为火"),
        ("001101", "火山旅"),
        ("011101", "火风鼎"),
        ("010101", "火水未济"),
        ("010001", "山水蒙"),
        ("010011", "风水涣"),
        ("010111", "天水讼"),
        ("101111", "天火同人"),
    ],
    [
        ("100100", "震为雷"),
        ("000100", "雷地豫"),
        ("010100", "雷水解"),
        ("011100", "雷风恒"),
        ("011000", "地风升"),
        ("011010", "水风井"),
        ("011110", "泽风大过"),
        ("100110", "泽雷随"),
    ],
    [
        ("011011", "巽为风"),
        ("111011", "风天小畜"),
        ("101011", "风火家人"),
        ("100011", "风雷益"),
        ("100111", "天雷无妄"),
        ("100101", "火雷噬嗑"),
        ("100001", "山雷颐"),
        ("011001", "山风蛊"),
    ],
    [
        ("010010", "坎为水"),
        ("110010", "水泽节"),
        ("100010", "水雷屯"),
        ("101010", "水火既济"),
        ("101110", "泽火革"),
        ("101100", "雷火丰"),
        ("101000", "地火明夷"),
        ("010000", "地水师"),
    ],
    [
        ("001001", "艮为山"),
        ("101001", "山火贲"),
        ("111001", "山天大畜"),
        ("110001", "山泽损"),
        ("110101", "火泽睽"),
        ("110111", "天泽履"),
        ("110011", "风泽中孚"),
        ("001011", "风山渐"),
    ],
    [
        ("000000", "坤为地"),
        ("100000", "地雷复"),
        ("110000", "地泽临"),
        ("111000", "地天泰"),
        ("111100", "雷天大壮"),
        ("111110", "泽天夬"),
        ("111010", "水天需"),
        ("000010", "水地比"),
    ],
];

/// World and Response lines (1-based) per palace position.
const WORLD_RESPONSE: [(usize, usize); 8] = [
    (6, 3),
    (1, 4),
    (2, 5),
    (3, 6),
    (4, 1),
    (5, 2),
    (4, 1),
    (3, 6),
];

/// Named stage of a hexagram within its palace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PalacePosition {
    /// 本宫: the pure hexagram.
    Pure,
    /// 一世 … 五世: the n-th successive change.
    Change(u8),
    /// 游魂
    WanderingSoul,
    /// 归魂
    ReturningSoul,
}

impl PalacePosition {
    /// Stage for a position 0–7.
    pub fn from_index(position: usize) -> Self {
        match position {
            0 => Self::Pure,
            6 => Self::WanderingSoul,
            7 => Self::ReturningSoul,
            n => Self::Change(n.min(5) as u8),
        }
    }
}

impl std::fmt::Display for PalacePosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pure => write!(f, "本宫"),
            Self::Change(n) => {
                let digit = ["一", "二", "三", "四", "五"]
                    .get(usize::from(*n).saturating_sub(1))
                    .copied()
                    .unwrap_or("");
                write!(f, "{digit}世")
            }
            Self::WanderingSoul => write!(f, "游魂"),
            Self::ReturningSoul => write!(f, "归魂"),
        }
    }
}

/// Where a hexagram sits in the eight palaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Placement {
    /// Head trigram of the palace.
    pub palace: Trigram,
    /// Position 0–7 within the palace.
    pub position: usize,
}

impl Placement {
    /// Element of the palace, which anchors kinship.
    pub fn element(&self) -> Element {
        self.palace.element()
    }

    /// World and Response lines, 1-based.
    pub fn world_response(&self) -> (usize, usize) {
        WORLD_RESPONSE[self.position % 8]
    }

    /// Index (0-based) of the World line.
    pub fn world_index(&self) -> usize {
        self.world_response().0 - 1
    }

    /// Index (0-based) of the Response line.
    pub fn response_index(&self) -> usize {
        self.world_response().1 - 1
    }

    /// Named stage within the palace.
    pub fn stage(&self) -> PalacePosition {
        PalacePosition::from_index(self.position)
    }
}

impl std::fmt::Display for Placement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}宫 {}", self.palace, self.stage())
    }
}

/// Name and placement of a hexagram.
pub fn locate(hexagram: &Hexagram) -> CoreResult<(&'static str, Placement)> {
    let bits = hexagram.to_string();
    entries()
        .find(|(entry_bits, _, _)| *entry_bits == bits)
        .map(|(_, name, placement)| (name, placement))
        .ok_or(CoreError::UnresolvedPalace(bits))
}

/// Name of a hexagram, e.g. 山水蒙.
pub fn name_of(hexagram: &Hexagram) -> CoreResult<&'static str> {
    locate(hexagram).map(|(name, _)| name)
}

/// Placement of a hexagram given by name.
pub fn placement_of_name(name: &str) -> CoreResult<Placement> {
    entries()
        .find(|(_, entry_name, _)| *entry_name == name)
        .map(|(_, _, placement)| placement)
        .ok_or_else(|| CoreError::UnresolvedPalace(name.to_string()))
}

/// Hexagram for a name, if the name is in the table.
pub fn hexagram_of_name(name: &str) -> Option<Hexagram> {
    entries()
        .find(|(_, entry_name, _)| *entry_name == name)
        .and_then(|(bits, _, _)| bits.parse().ok())
}

/// All 64 hexagram names in palace order.
pub fn names() -> impl Iterator<Item = &'static str> {
    entries().map(|(_, name, _)| name)
}

/// The head hexagram of a palace: its trigram doubled.
pub fn pure_hexagram(palace: Trigram) -> Hexagram {
    Hexagram::from_trigrams(palace, palace)
}

/// Body branch (卦身) for a World line (1-based) and its polarity.
///
/// Counting starts at 子 on line 1 for a yang World line and at 午 for a
/// yin one, moving up one branch per line.
pub fn body_branch(world_line: usize, yang: bool) -> Option<Branch> {
    if !(1..=6).contains(&world_line) {
        return None;
    }
    let start = if yang { Branch::Zi } else { Branch::Wu };
    Some(start.offset(world_line - 1))
}

fn entries() -> impl Iterator<Item = (&'static str, &'static str, Placement)> {
    Trigram::ALL.into_iter().flat_map(|palace| {
        TABLE[palace.index()]
            .into_iter()
            .enumerate()
            .map(move |(position, (bits, name))| (bits, name, Placement { palace, position }))
    })
}
