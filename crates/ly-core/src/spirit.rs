//! The six spirits (六神), placed by the day stem.

use serde::{Deserialize, Serialize};

use crate::branch::Stem;

/// One of the six spirits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Spirit {
    /// 青龙
    AzureDragon,
    /// 朱雀
    VermilionBird,
    /// 勾陈
    HookChen,
    /// 螣蛇
    FlyingSnake,
    /// 白虎
    WhiteTiger,
    /// 玄武
    BlackTortoise,
}

impl Spirit {
    /// All spirits in placement order.
    pub const ALL: [Self; 6] = [
        Self::AzureDragon,
        Self::VermilionBird,
        Self::HookChen,
        Self::FlyingSnake,
        Self::WhiteTiger,
        Self::BlackTortoise,
    ];

    /// Spirit on the bottom line for a day stem.
    pub fn first_for(day: Stem) -> Self {
        match day {
            Stem::Jia | Stem::Yi => Self::AzureDragon,
            Stem::Bing | Stem::Ding => Self::VermilionBird,
            Stem::Wu => Self::HookChen,
            Stem::Ji => Self::FlyingSnake,
            Stem::Geng | Stem::Xin => Self::WhiteTiger,
            Stem::Ren | Stem::Gui => Self::BlackTortoise,
        }
    }

    /// Spirits for the six lines, bottom first.
    pub fn sequence(day: Stem) -> [Self; 6] {
        let start = Self::first_for(day) as usize;
        std::array::from_fn(|i| Self::ALL[(start + i) % 6])
    }

    /// Chinese name.
    pub fn glyph(self) -> &'static str {
        match self {
            Self::AzureDragon => "青龙",
            Self::VermilionBird => "朱雀",
            Self::HookChen => "勾陈",
            Self::FlyingSnake => "螣蛇",
            Self::WhiteTiger => "白虎",
            Self::BlackTortoise => "玄武",
        }
    }
}

impl std::fmt::Display for Spirit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.glyph())
    }
}
