//! Auspicious and baleful stars (神煞).
//!
//! Stars are located on branches from the day stem, the triad group of the
//! day branch, or the month branch. They decorate a chart and never enter
//! scoring.

use serde::{Deserialize, Serialize};

use crate::branch::{Branch, Stem, StemBranch, TRIADS};
use crate::element::Element;

/// One of the tabulated stars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Star {
    /// 贵人
    Nobleman,
    /// 禄神
    Prosperity,
    /// 羊刃
    GoatBlade,
    /// 文昌
    Scholar,
    /// 驿马
    TravelingHorse,
    /// 桃花
    PeachBlossom,
    /// 劫煞
    Robbery,
    /// 华盖
    Canopy,
    /// 将星
    General,
    /// 谋星
    Plotting,
    /// 天喜
    HeavenlyJoy,
    /// 灾煞
    Calamity,
}

impl Star {
    /// All stars in table order.
    pub const ALL: [Self; 12] = [
        Self::Nobleman,
        Self::Prosperity,
        Self::GoatBlade,
        Self::Scholar,
        Self::TravelingHorse,
        Self::PeachBlossom,
        Self::Robbery,
        Self::Canopy,
        Self::General,
        Self::Plotting,
        Self::HeavenlyJoy,
        Self::Calamity,
    ];

    /// Chinese name.
    pub fn glyph(self) -> &'static str {
        [
            "贵人", "禄神", "羊刃", "文昌", "驿马", "桃花", "劫煞", "华盖", "将星", "谋星", "天喜",
            "灾煞",
        ][self as usize]
    }

    /// Branches holding this star for the given day and month.
    pub fn locations(self, day: StemBranch, month: Branch) -> Vec<Branch> {
        use Branch::*;
        let stem = day.stem;
        let group = triad_element(day.branch);
        let by_group = |water, fire, metal, wood| match group {
            Element::Water => water,
            Element::Fire => fire,
            Element::Metal => metal,
            _ => wood,
        };
        match self {
            Self::Nobleman => match stem {
                Stem::Jia | Stem::Wu | Stem::Geng => vec![Chou, Wei],
                Stem::Yi | Stem::Ji => vec![Zi, Shen],
                Stem::Bing | Stem::Ding => vec![Hai, You],
                Stem::Ren | Stem::Gui => vec![Mao, Si],
                Stem::Xin => vec![Wu, Yin],
            },
            Self::Prosperity => vec![prosperity(stem)],
            Self::GoatBlade => vec![match stem {
                Stem::Jia => Mao,
                Stem::Yi => Chen,
                Stem::Bing | Stem::Wu => Wu,
                Stem::Ding | Stem::Ji => Wei,
                Stem::Geng => You,
                Stem::Xin => Xu,
                Stem::Ren => Zi,
                Stem::Gui => Chou,
            }],
            Self::Scholar => vec![match stem {
                Stem::Jia => Si,
                Stem::Yi => Wu,
                Stem::Bing | Stem::Wu => Shen,
                Stem::Ding | Stem::Ji => You,
                Stem::Geng => Hai,
                Stem::Xin => Zi,
                Stem::Ren => Yin,
                Stem::Gui => Mao,
            }],
            Self::TravelingHorse => vec![by_group(Yin, Shen, Hai, Si)],
            Self::PeachBlossom => vec![by_group(You, Mao, Wu, Zi)],
            Self::Robbery => vec![by_group(Si, Hai, Yin, Shen)],
            Self::Canopy => vec![by_group(Chen, Xu, Chou, Wei)],
            Self::General => vec![by_group(Zi, Wu, You, Mao)],
            Self::Plotting => vec![by_group(Xu, Chen, Wei, Chou)],
            Self::HeavenlyJoy => vec![month.offset(8)],
            Self::Calamity => vec![by_group(Wu, Zi, Mao, You)],
        }
    }
}

impl std::fmt::Display for Star {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.glyph())
    }
}

/// Stars sitting on `branch` for the given day and month, in table order.
pub fn stars_at(day: StemBranch, month: Branch, branch: Branch) -> Vec<Star> {
    Star::ALL
        .into_iter()
        .filter(|star| star.locations(day, month).contains(&branch))
        .collect()
}

/// Every star with the branches it occupies, in table order.
pub fn star_map(day: StemBranch, month: Branch) -> Vec<(Star, Vec<Branch>)> {
    Star::ALL
        .into_iter()
        .map(|star| {
            let mut branches = star.locations(day, month);
            branches.sort_by_key(|b| b.index());
            (star, branches)
        })
        .collect()
}

fn prosperity(stem: Stem) -> Branch {
    match stem {
        Stem::Jia => Branch::Yin,
        Stem::Yi => Branch::Mao,
        Stem::Bing | Stem::Wu => Branch::Si,
        Stem::Ding | Stem::Ji => Branch::Wu,
        Stem::Geng => Branch::Shen,
        Stem::Xin => Branch::You,
        Stem::Ren => Branch::Hai,
        Stem::Gui => Branch::Zi,
    }
}

fn triad_element(branch: Branch) -> Element {
    TRIADS
        .iter()
        .find(|t| t.branches.contains(&branch))
        .map_or(Element::Wood, |t| t.element)
}
