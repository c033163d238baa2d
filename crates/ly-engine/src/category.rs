//! Question categories and the governing kinship (用神) each one targets.

use ly_core::Kinship;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// What the querent asks about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// 求官: career and office.
    Career,
    /// 求财: money and goods.
    Wealth,
    /// 婚姻: marriage.
    Marriage,
    /// 学业: study and documents.
    Study,
    /// 平安: safety.
    Safety,
    /// 健康: the querent's own health.
    Health,
    /// 兄弟: siblings and peers.
    Siblings,
    /// 父母: parents and elders.
    Parents,
    /// 子女: children.
    Children,
    /// 综合: unspecified, read from the querent.
    General,
}

impl Category {
    /// All categories.
    pub const ALL: [Self; 10] = [
        Self::Career,
        Self::Wealth,
        Self::Marriage,
        Self::Study,
        Self::Safety,
        Self::Health,
        Self::Siblings,
        Self::Parents,
        Self::Children,
        Self::General,
    ];

    /// What this category targets. Gender only matters for marriage.
    pub fn target(self, gender: Option<Gender>) -> Target {
        match self {
            Self::Career => Target::Kinship(Kinship::OfficerGhost),
            Self::Wealth => Target::Kinship(Kinship::Wealth),
            Self::Marriage => match gender {
                Some(Gender::Female) => Target::Kinship(Kinship::OfficerGhost),
                _ => Target::Kinship(Kinship::Wealth),
            },
            Self::Study | Self::Parents => Target::Kinship(Kinship::Parents),
            Self::Safety | Self::Children => Target::Kinship(Kinship::Offspring),
            Self::Siblings => Target::Kinship(Kinship::Siblings),
            Self::Health | Self::General => Target::WorldLine,
        }
    }

    /// Chinese label.
    pub fn glyph(self) -> &'static str {
        match self {
            Self::Career => "求官",
            Self::Wealth => "求财",
            Self::Marriage => "婚姻",
            Self::Study => "学业",
            Self::Safety => "平安",
            Self::Health => "健康",
            Self::Siblings => "兄弟",
            Self::Parents => "父母",
            Self::Children => "子女",
            Self::General => "综合",
        }
    }
}

impl std::str::FromStr for Category {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.to_string().eq_ignore_ascii_case(trimmed) || c.glyph() == trimmed)
            .ok_or_else(|| EngineError::InvalidCategory(trimmed.to_string()))
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Career => write!(f, "career"),
            Self::Wealth => write!(f, "wealth"),
            Self::Marriage => write!(f, "marriage"),
            Self::Study => write!(f, "study"),
            Self::Safety => write!(f, "safety"),
            Self::Health => write!(f, "health"),
            Self::Siblings => write!(f, "siblings"),
            Self::Parents => write!(f, "parents"),
            Self::Children => write!(f, "children"),
            Self::General => write!(f, "general"),
        }
    }
}

/// Querent gender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    /// 男
    Male,
    /// 女
    Female,
}

impl std::str::FromStr for Gender {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "male" | "m" | "男" => Ok(Self::Male),
            "female" | "f" | "女" => Ok(Self::Female),
            _ => Err(EngineError::InvalidGender(s.trim().to_string())),
        }
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Male => write!(f, "male"),
            Self::Female => write!(f, "female"),
        }
    }
}

/// The governing kinship, or the World line itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Target {
    /// Search the chart for lines of this kinship.
    Kinship(Kinship),
    /// Read the World line directly.
    WorldLine,
}

impl std::fmt::Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Kinship(k) => write!(f, "{}", k.glyph()),
            Self::WorldLine => write!(f, "世爻"),
        }
    }
}
