//! The twelve life stages (十二长生).
//!
//! Each element is born at a fixed branch and passes through the twelve
//! stages in branch order. Earth and Water share the 申 origin.

use serde::{Deserialize, Serialize};

use crate::branch::Branch;
use crate::element::Element;

/// One of the twelve life stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LifeStage {
    /// 长生
    Birth,
    /// 沐浴
    Bath,
    /// 冠带
    Capping,
    /// 临官
    Office,
    /// 帝旺
    Peak,
    /// 衰
    Decline,
    /// 病
    Sickness,
    /// 死
    Death,
    /// 墓
    Tomb,
    /// 绝
    Extinction,
    /// 胎
    Conception,
    /// 养
    Nurture,
}

impl LifeStage {
    /// All stages in order.
    pub const ALL: [Self; 12] = [
        Self::Birth,
        Self::Bath,
        Self::Capping,
        Self::Office,
        Self::Peak,
        Self::Decline,
        Self::Sickness,
        Self::Death,
        Self::Tomb,
        Self::Extinction,
        Self::Conception,
        Self::Nurture,
    ];

    /// Branch where an element is born.
    pub fn origin(element: Element) -> Branch {
        match element {
            Element::Wood => Branch::Hai,
            Element::Fire => Branch::Yin,
            Element::Earth | Element::Water => Branch::Shen,
            Element::Metal => Branch::Si,
        }
    }

    /// Stage of `element` at `branch`.
    pub fn of(element: Element, branch: Branch) -> Self {
        let start = Self::origin(element).index();
        Self::ALL[(branch.index() + 12 - start) % 12]
    }

    /// Tomb, Extinction and Death mark a line as spent.
    pub fn is_spent(self) -> bool {
        matches!(self, Self::Tomb | Self::Extinction | Self::Death)
    }

    /// Chinese name.
    pub fn glyph(self) -> &'static str {
        [
            "长生", "沐浴", "冠带", "临官", "帝旺", "衰", "病", "死", "墓", "绝", "胎", "养",
        ][self as usize]
    }
}

impl std::fmt::Display for LifeStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.glyph())
    }
}
