//! The five elements (五行) and their generative and destructive cycles.
//!
//! Generation runs Metal → Water → Wood → Fire → Earth → Metal; control runs
//! Metal → Wood → Earth → Water → Fire → Metal. Both cycles are directional:
//! `a.relation(b)` describes what `a` does to `b`, never the reverse.

use serde::{Deserialize, Serialize};

/// One of the five elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Element {
    /// 金
    Metal,
    /// 水
    Water,
    /// 木
    Wood,
    /// 火
    Fire,
    /// 土
    Earth,
}

impl Element {
    /// All elements in generative order starting from Metal.
    pub const ALL: [Self; 5] = [
        Self::Metal,
        Self::Water,
        Self::Wood,
        Self::Fire,
        Self::Earth,
    ];

    /// The element this one generates.
    pub fn generates(self) -> Self {
        match self {
            Self::Metal => Self::Water,
            Self::Water => Self::Wood,
            Self::Wood => Self::Fire,
            Self::Fire => Self::Earth,
            Self::Earth => Self::Metal,
        }
    }

    /// The element this one controls.
    pub fn controls(self) -> Self {
        match self {
            Self::Metal => Self::Wood,
            Self::Wood => Self::Earth,
            Self::Earth => Self::Water,
            Self::Water => Self::Fire,
            Self::Fire => Self::Metal,
        }
    }

    /// Returns true if `self` generates `other`.
    pub fn is_generating(self, other: Self) -> bool {
        self.generates() == other
    }

    /// Returns true if `self` controls `other`.
    pub fn is_controlling(self, other: Self) -> bool {
        self.controls() == other
    }

    /// What `self` does to `other`.
    pub fn relation(self, other: Self) -> Relation {
        if self == other {
            Relation::Same
        } else if self.is_generating(other) {
            Relation::Generates
        } else if self.is_controlling(other) {
            Relation::Controls
        } else if other.is_generating(self) {
            Relation::GeneratedBy
        } else {
            Relation::None
        }
    }

    /// Chinese glyph for the element.
    pub fn glyph(self) -> &'static str {
        match self {
            Self::Metal => "金",
            Self::Water => "水",
            Self::Wood => "木",
            Self::Fire => "火",
            Self::Earth => "土",
        }
    }
}

impl std::fmt::Display for Element {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Metal => write!(f, "Metal"),
            Self::Water => write!(f, "Water"),
            Self::Wood => write!(f, "Wood"),
            Self::Fire => write!(f, "Fire"),
            Self::Earth => write!(f, "Earth"),
        }
    }
}

/// Directional relation between two elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Relation {
    /// Both elements are equal.
    Same,
    /// The first element generates the second.
    Generates,
    /// The first element controls the second.
    Controls,
    /// The second element generates the first.
    GeneratedBy,
    /// The second element controls the first.
    None,
}

/// Seasonal standing of an element measured against a month or day element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Vitality {
    /// 旺: same element as the reference.
    Prosperous,
    /// 相: generated by the reference.
    Supported,
    /// 休: generates the reference.
    Resting,
    /// 囚: controls the reference.
    Trapped,
    /// 死: controlled by the reference.
    Dead,
}

impl Vitality {
    /// Grade `subject` against `reference`.
    pub fn of(subject: Element, reference: Element) -> Self {
        match subject.relation(reference) {
            Relation::Same => Self::Prosperous,
            Relation::GeneratedBy => Self::Supported,
            Relation::Generates => Self::Resting,
            Relation::Controls => Self::Trapped,
            Relation::None => Self::Dead,
        }
    }

    /// Prosperous and Supported count as strong.
    pub fn is_strong(self) -> bool {
        matches!(self, Self::Prosperous | Self::Supported)
    }
}

impl std::fmt::Display for Vitality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Prosperous => write!(f, "Prosperous"),
            Self::Supported => write!(f, "Supported"),
            Self::Resting => write!(f, "Resting"),
            Self::Trapped => write!(f, "Trapped"),
            Self::Dead => write!(f, "Dead"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn element() -> impl Strategy<Value = Element> {
        prop::sample::select(Element::ALL.to_vec())
    }

    #[test]
    fn generative_cycle_closes() {
        let mut e = Element::Metal;
        for _ in 0..5 {
            e = e.generates();
        }
        assert_eq!(e, Element::Metal);
    }

    #[test]
    fn destructive_cycle_order() {
        assert_eq!(Element::Metal.controls(), Element::Wood);
        assert_eq!(Element::Wood.controls(), Element::Earth);
        assert_eq!(Element::Earth.controls(), Element::Water);
        assert_eq!(Element::Water.controls(), Element::Fire);
        assert_eq!(Element::Fire.controls(), Element::Metal);
    }

    #[test]
    fn relation_is_directional() {
        assert_eq!(Element::Fire.relation(Element::Metal), Relation::Controls);
        assert_eq!(Element::Metal.relation(Element::Fire), Relation::None);
        assert_eq!(Element::Earth.relation(Element::Metal), Relation::Generates);
        assert_eq!(Element::Metal.relation(Element::Earth), Relation::GeneratedBy);
    }

    #[test]
    fn vitality_grades() {
        assert_eq!(Vitality::of(Element::Wood, Element::Wood), Vitality::Prosperous);
        assert_eq!(Vitality::of(Element::Wood, Element::Water), Vitality::Supported);
        assert_eq!(Vitality::of(Element::Wood, Element::Fire), Vitality::Resting);
        assert_eq!(Vitality::of(Element::Wood, Element::Earth), Vitality::Trapped);
        assert_eq!(Vitality::of(Element::Wood, Element::Metal), Vitality::Dead);
        assert!(Vitality::Supported.is_strong());
        assert!(!Vitality::Resting.is_strong());
    }

    proptest! {
        #[test]
        fn every_pair_has_exactly_one_relation(a in element(), b in element()) {
            let forward = a.relation(b);
            let backward = b.relation(a);
            let expected_backward = match forward {
                Relation::Same => Relation::Same,
                Relation::Generates => Relation::GeneratedBy,
                Relation::GeneratedBy => Relation::Generates,
                Relation::Controls => Relation::None,
                Relation::None => Relation::Controls,
            };
            prop_assert_eq!(backward, expected_backward);
        }
    }
}
