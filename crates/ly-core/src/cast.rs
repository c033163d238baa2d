//! Coin-toss casting and hexagrams.
//!
//! Each line is cast with three coins. The number of heads decides the line:
//! one head is a static yang line, two heads a static yin line, three heads
//! an old yang line that moves to yin, and no heads an old yin line that
//! moves to yang. Six lines, bottom first, make the original hexagram; the
//! moving lines flipped make the transformed one.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::trigram::Trigram;

/// Three coin outcomes for one line, `true` meaning heads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineCast(pub [bool; 3]);

impl LineCast {
    /// Number of heads among the three coins.
    pub fn heads(self) -> usize {
        self.0.iter().filter(|h| **h).count()
    }

    /// The line this toss produces.
    pub fn kind(self) -> LineKind {
        LineKind::from_heads(self.heads())
    }
}

impl std::str::FromStr for LineCast {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        let s = s.trim();
        let coins = parse_digits::<3>(s).ok_or_else(|| CoreError::InvalidLineCast(s.to_string()))?;
        Ok(Self(coins))
    }
}

impl std::fmt::Display for LineCast {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for coin in self.0 {
            write!(f, "{}", u8::from(coin))?;
        }
        Ok(())
    }
}

/// The four kinds of cast line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LineKind {
    /// 少阳: static yang.
    YoungYang,
    /// 少阴: static yin.
    YoungYin,
    /// 老阳: yang moving to yin.
    OldYang,
    /// 老阴: yin moving to yang.
    OldYin,
}

impl LineKind {
    /// Line produced by a toss with the given number of heads.
    pub fn from_heads(heads: usize) -> Self {
        match heads {
            0 => Self::OldYin,
            1 => Self::YoungYang,
            2 => Self::YoungYin,
            _ => Self::OldYang,
        }
    }

    /// Returns true for yang lines in the original hexagram.
    pub fn is_yang(self) -> bool {
        matches!(self, Self::YoungYang | Self::OldYang)
    }

    /// Returns true for old lines, which move.
    pub fn is_moving(self) -> bool {
        matches!(self, Self::OldYang | Self::OldYin)
    }

    /// Traditional mark: `—` yang, `- -` yin, `○` and `×` for moving lines.
    pub fn mark(self) -> &'static str {
        match self {
            Self::YoungYang => "—",
            Self::YoungYin => "- -",
            Self::OldYang => "—○",
            Self::OldYin => "- -×",
        }
    }
}

impl std::fmt::Display for LineKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::YoungYang => write!(f, "Young Yang"),
            Self::YoungYin => write!(f, "Young Yin"),
            Self::OldYang => write!(f, "Old Yang"),
            Self::OldYin => write!(f, "Old Yin"),
        }
    }
}

/// Six lines, index 0 at the bottom, `true` meaning yang.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Hexagram(pub [bool; 6]);

impl Hexagram {
    /// Build a hexagram from an inner (lower) and outer (upper) trigram.
    pub fn from_trigrams(inner: Trigram, outer: Trigram) -> Self {
        let [a, b, c] = inner.bits();
        let [d, e, g] = outer.bits();
        Self([a, b, c, d, e, g])
    }

    /// Returns true if the line at `index` is yang.
    pub fn is_yang(&self, index: usize) -> bool {
        self.0[index]
    }

    /// Lower trigram (lines 1–3).
    pub fn inner(&self) -> Trigram {
        Trigram::from_bits([self.0[0], self.0[1], self.0[2]])
    }

    /// Upper trigram (lines 4–6).
    pub fn outer(&self) -> Trigram {
        Trigram::from_bits([self.0[3], self.0[4], self.0[5]])
    }

    /// This hexagram with every flagged line flipped.
    pub fn flipped(&self, changed: &[bool; 6]) -> Self {
        let mut bits = self.0;
        for (bit, flip) in bits.iter_mut().zip(changed) {
            if *flip {
                *bit = !*bit;
            }
        }
        Self(bits)
    }
}

impl std::str::FromStr for Hexagram {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        let s = s.trim();
        parse_digits::<6>(s)
            .map(Self)
            .ok_or_else(|| CoreError::InvalidHexagram(s.to_string()))
    }
}

impl std::fmt::Display for Hexagram {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for line in self.0 {
            write!(f, "{}", u8::from(line))?;
        }
        Ok(())
    }
}

/// A complete cast: original hexagram, transformed hexagram and moving lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cast {
    /// 本卦.
    pub original: Hexagram,
    /// 变卦: the original with every moving line flipped.
    pub transformed: Hexagram,
    /// Which lines moved.
    pub changed: [bool; 6],
}

impl Cast {
    /// Build a cast from an original hexagram and its moving lines.
    pub fn new(original: Hexagram, changed: [bool; 6]) -> Self {
        Self {
            original,
            transformed: original.flipped(&changed),
            changed,
        }
    }

    /// Build a cast from six line kinds, bottom first.
    pub fn from_lines(lines: [LineKind; 6]) -> Self {
        let original = Hexagram(lines.map(LineKind::is_yang));
        Self::new(original, lines.map(LineKind::is_moving))
    }

    /// Build a cast from six coin tosses, bottom first.
    pub fn from_tosses(tosses: [LineCast; 6]) -> Self {
        Self::from_lines(tosses.map(LineCast::kind))
    }

    /// Returns true if any line moved.
    pub fn has_moving_lines(&self) -> bool {
        self.changed.iter().any(|c| *c)
    }

    /// Indices of the moving lines, bottom first.
    pub fn moving_lines(&self) -> impl Iterator<Item = usize> + '_ {
        (0..6).filter(|i| self.changed[*i])
    }

    /// Kind of the line at `index`.
    pub fn line_kind(&self, index: usize) -> LineKind {
        match (self.original.is_yang(index), self.changed[index]) {
            (true, false) => LineKind::YoungYang,
            (false, false) => LineKind::YoungYin,
            (true, true) => LineKind::OldYang,
            (false, true) => LineKind::OldYin,
        }
    }
}

/// Position name of a line: 初爻, 二爻 … 上爻.
pub fn line_name(index: usize) -> &'static str {
    const NAMES: [&str; 6] = ["初爻", "二爻", "三爻", "四爻", "五爻", "上爻"];
    NAMES.get(index).copied().unwrap_or("")
}

/// Classical line name used by the commentaries: 初九, 六二 … 上六.
///
/// Yang lines are numbered nine and yin lines six. The first and top lines
/// put the position first; the middle four put the number first.
pub fn classic_line_name(index: usize, yang: bool) -> String {
    const POSITIONS: [&str; 6] = ["初", "二", "三", "四", "五", "上"];
    let Some(position) = POSITIONS.get(index) else {
        return String::new();
    };
    let number = if yang { "九" } else { "六" };
    if index == 0 || index == 5 {
        format!("{position}{number}")
    } else {
        format!("{number}{position}")
    }
}

fn parse_digits<const N: usize>(s: &str) -> Option<[bool; N]> {
    let mut out = [false; N];
    let mut chars = s.chars();
    for slot in out.iter_mut() {
        *slot = match chars.next()? {
            '0' => false,
            '1' => true,
            _ => return None,
        };
    }
    match chars.next() {
        None => Some(out),
        Some(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toss(s: &str) -> LineCast {
        s.parse().unwrap()
    }

    #[test]
    fn heads_decide_line_kind() {
        assert_eq!(toss("100").kind(), LineKind::YoungYang);
        assert_eq!(toss("110").kind(), LineKind::YoungYin);
        assert_eq!(toss("111").kind(), LineKind::OldYang);
        assert_eq!(toss("000").kind(), LineKind::OldYin);
    }

    #[test]
    fn six_old_yang_lines() {
        let cast = Cast::from_tosses([toss("111"); 6]);
        assert_eq!(cast.original.to_string(), "111111");
        assert_eq!(cast.changed, [true; 6]);
        assert_eq!(cast.transformed.to_string(), "000000");
    }

    #[test]
    fn six_old_yin_lines() {
        let cast = Cast::from_tosses([toss("000"); 6]);
        assert_eq!(cast.original.to_string(), "000000");
        assert_eq!(cast.changed, [true; 6]);
        assert_eq!(cast.transformed.to_string(), "111111");
    }

    #[test]
    fn static_lines_do_not_transform() {
        let cast = Cast::from_tosses([
            toss("100"),
            toss("110"),
            toss("010"),
            toss("011"),
            toss("001"),
            toss("101"),
        ]);
        assert_eq!(cast.original.to_string(), "101010");
        assert_eq!(cast.original, cast.transformed);
        assert!(!cast.has_moving_lines());
    }

    #[test]
    fn mixed_cast() {
        let cast = Cast::from_lines([
            LineKind::OldYin,
            LineKind::YoungYang,
            LineKind::YoungYin,
            LineKind::OldYang,
            LineKind::YoungYang,
            LineKind::YoungYin,
        ]);
        assert_eq!(cast.original.to_string(), "010110");
        assert_eq!(cast.transformed.to_string(), "110010");
        assert_eq!(cast.moving_lines().collect::<Vec<_>>(), vec![0, 3]);
        assert_eq!(cast.line_kind(0), LineKind::OldYin);
        assert_eq!(cast.line_kind(3), LineKind::OldYang);
    }

    #[test]
    fn hexagram_parse_rejects_bad_input() {
        assert!("01010".parse::<Hexagram>().is_err());
        assert!("0101011".parse::<Hexagram>().is_err());
        assert!("01a101".parse::<Hexagram>().is_err());
        assert_eq!(
            "12".parse::<Hexagram>(),
            Err(CoreError::InvalidHexagram("12".to_string()))
        );
    }

    #[test]
    fn line_cast_parse_rejects_bad_input() {
        assert!("11".parse::<LineCast>().is_err());
        assert!("1101".parse::<LineCast>().is_err());
        assert!("1x0".parse::<LineCast>().is_err());
    }

    #[test]
    fn classic_line_names() {
        assert_eq!(classic_line_name(0, true), "初九");
        assert_eq!(classic_line_name(1, false), "六二");
        assert_eq!(classic_line_name(4, true), "九五");
        assert_eq!(classic_line_name(5, false), "上六");
        assert_eq!(classic_line_name(6, false), "");
        assert_eq!(line_name(3), "四爻");
    }
}
