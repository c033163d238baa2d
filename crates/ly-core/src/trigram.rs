//! The eight trigrams (八卦).
//!
//! Variants are listed in palace order, which is also descending order of
//! their bottom-to-top bit pattern read as a binary number.

use serde::{Deserialize, Serialize};

use crate::element::Element;

/// One of the eight trigrams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Trigram {
    /// 乾 ☰
    Qian,
    /// 兑 ☱
    Dui,
    /// 离 ☲
    Li,
    /// 震 ☳
    Zhen,
    /// 巽 ☴
    Xun,
    /// 坎 ☵
    Kan,
    /// 艮 ☶
    Gen,
    /// 坤 ☷
    Kun,
}

impl Trigram {
    /// All trigrams in palace order.
    pub const ALL: [Self; 8] = [
        Self::Qian,
        Self::Dui,
        Self::Li,
        Self::Zhen,
        Self::Xun,
        Self::Kan,
        Self::Gen,
        Self::Kun,
    ];

    /// Position in palace order (乾 = 0, 坤 = 7).
    pub fn index(self) -> usize {
        self as usize
    }

    /// Trigram for three lines, bottom first.
    pub fn from_bits(bits: [bool; 3]) -> Self {
        let value = usize::from(bits[0]) * 4 + usize::from(bits[1]) * 2 + usize::from(bits[2]);
        Self::ALL[7 - value]
    }

    /// The three lines, bottom first, `true` meaning yang.
    pub fn bits(self) -> [bool; 3] {
        let value = 7 - self.index();
        [value & 4 != 0, value & 2 != 0, value & 1 != 0]
    }

    /// Element ruled by the trigram.
    pub fn element(self) -> Element {
        match self {
            Self::Qian | Self::Dui => Element::Metal,
            Self::Li => Element::Fire,
            Self::Zhen | Self::Xun => Element::Wood,
            Self::Kan => Element::Water,
            Self::Gen | Self::Kun => Element::Earth,
        }
    }

    /// Chinese name.
    pub fn name(self) -> &'static str {
        ["乾", "兑", "离", "震", "巽", "坎", "艮", "坤"][self.index()]
    }

    /// Unicode trigram symbol.
    pub fn symbol(self) -> &'static str {
        ["☰", "☱", "☲", "☳", "☴", "☵", "☶", "☷"][self.index()]
    }

    /// The natural image: heaven, lake, fire, thunder, wind, water, mountain, earth.
    pub fn nature(self) -> &'static str {
        ["天", "泽", "火", "雷", "风", "水", "山", "地"][self.index()]
    }
}

impl std::fmt::Display for Trigram {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bit_patterns() {
        assert_eq!(Trigram::from_bits([true, true, true]), Trigram::Qian);
        assert_eq!(Trigram::from_bits([false, false, false]), Trigram::Kun);
        assert_eq!(Trigram::from_bits([true, false, false]), Trigram::Zhen);
        assert_eq!(Trigram::from_bits([false, true, true]), Trigram::Xun);
        assert_eq!(Trigram::from_bits([false, true, false]), Trigram::Kan);
        assert_eq!(Trigram::from_bits([true, false, true]), Trigram::Li);
        assert_eq!(Trigram::from_bits([false, false, true]), Trigram::Gen);
        assert_eq!(Trigram::from_bits([true, true, false]), Trigram::Dui);
    }

    #[test]
    fn bits_round_trip() {
        for t in Trigram::ALL {
            assert_eq!(Trigram::from_bits(t.bits()), t);
        }
    }

    #[test]
    fn elements() {
        assert_eq!(Trigram::Dui.element(), Element::Metal);
        assert_eq!(Trigram::Xun.element(), Element::Wood);
        assert_eq!(Trigram::Gen.element(), Element::Earth);
        assert_eq!(Trigram::Kan.nature(), "水");
    }
}
