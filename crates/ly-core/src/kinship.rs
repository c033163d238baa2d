//! The five kinships (六亲), derived from the palace element.

use serde::{Deserialize, Serialize};

use crate::element::{Element, Relation};

/// Relation of a line's element to its palace element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Kinship {
    /// 父母: generates the palace.
    Parents,
    /// 兄弟: same element as the palace.
    Siblings,
    /// 官鬼: controls the palace.
    OfficerGhost,
    /// 妻财: controlled by the palace.
    Wealth,
    /// 子孙: generated by the palace.
    Offspring,
}

impl Kinship {
    /// All kinships.
    pub const ALL: [Self; 5] = [
        Self::Parents,
        Self::Siblings,
        Self::OfficerGhost,
        Self::Wealth,
        Self::Offspring,
    ];

    /// Kinship of a line element under a palace element.
    pub fn of(palace: Element, line: Element) -> Self {
        match palace.relation(line) {
            Relation::Same => Self::Siblings,
            Relation::Generates => Self::Offspring,
            Relation::GeneratedBy => Self::Parents,
            Relation::Controls => Self::Wealth,
            Relation::None => Self::OfficerGhost,
        }
    }

    /// Chinese label.
    pub fn glyph(self) -> &'static str {
        match self {
            Self::Parents => "父母",
            Self::Siblings => "兄弟",
            Self::OfficerGhost => "官鬼",
            Self::Wealth => "妻财",
            Self::Offspring => "子孙",
        }
    }

    /// Parse a Chinese label or an English name.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL.into_iter().find(|k| {
            k.glyph() == s
                || k.to_string().eq_ignore_ascii_case(s)
                || k.to_string().replace(' ', "-").eq_ignore_ascii_case(s)
        })
    }
}

impl std::fmt::Display for Kinship {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parents => write!(f, "Parents"),
            Self::Siblings => write!(f, "Siblings"),
            Self::OfficerGhost => write!(f, "Officer Ghost"),
            Self::Wealth => write!(f, "Wealth"),
            Self::Offspring => write!(f, "Offspring"),
        }
    }
}

/// Kinship of a line element under a palace element.
pub fn kinship(palace: Element, line: Element) -> Kinship {
    Kinship::of(palace, line)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fire_palace() {
        assert_eq!(kinship(Element::Fire, Element::Fire), Kinship::Siblings);
        assert_eq!(kinship(Element::Fire, Element::Earth), Kinship::Offspring);
        assert_eq!(kinship(Element::Fire, Element::Wood), Kinship::Parents);
        assert_eq!(kinship(Element::Fire, Element::Metal), Kinship::Wealth);
        assert_eq!(kinship(Element::Fire, Element::Water), Kinship::OfficerGhost);
    }

    #[test]
    fn each_palace_sees_all_five() {
        for palace in Element::ALL {
            let mut seen: Vec<_> = Element::ALL.iter().map(|e| kinship(palace, *e)).collect();
            seen.sort();
            seen.dedup();
            assert_eq!(seen.len(), 5);
        }
    }

    #[test]
    fn parse_labels() {
        assert_eq!(Kinship::parse("官鬼"), Some(Kinship::OfficerGhost));
        assert_eq!(Kinship::parse("officer-ghost"), Some(Kinship::OfficerGhost));
        assert_eq!(Kinship::parse("wealth"), Some(Kinship::Wealth));
        assert_eq!(Kinship::parse("cousins"), None);
    }
}
