//! Indexed hexagram and line texts.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Suffix the corpus appends to a moving-line heading.
pub(crate) const MOVING_SUFFIX: &str = "爻动";

/// Commentary for one hexagram.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HexagramText {
    /// Full name, e.g. 坤为地.
    pub name: String,
    /// Palace stage label from the heading, e.g. 本宫卦.
    pub alias: String,
    /// Unicode hexagram symbol.
    pub symbol: String,
    /// Judgment text (卦辞).
    pub judgment: String,
    /// Core image (核心意象).
    pub core_meaning: String,
    /// Note on the World line (世爻).
    pub world_line: String,
    /// Moving-line texts keyed by heading, e.g. 初六爻动.
    pub lines: BTreeMap<String, LineText>,
}

impl HexagramText {
    /// Text for a moving line by classical name, with or without `爻动`.
    pub fn line(&self, name: &str) -> Option<&LineText> {
        let name = name.trim();
        if name.ends_with(MOVING_SUFFIX) {
            self.lines.get(name)
        } else {
            self.lines.get(&format!("{name}{MOVING_SUFFIX}"))
        }
    }
}

/// Commentary for one moving line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineText {
    /// Position 1–6 as numbered in the corpus.
    pub index: usize,
    /// Heading name, e.g. 初六爻动.
    pub name: String,
    /// Line text (本爻辞).
    pub text: String,
    /// Name of the hexagram the line changes into.
    pub transformed_name: String,
    /// Judgment text of the transformed hexagram (变卦辞).
    pub transformed_text: String,
    /// What the moving line means (爻动含义).
    pub meaning: String,
}

impl LineText {
    /// Classical name without the `爻动` suffix.
    pub fn short_name(&self) -> &str {
        self.name.strip_suffix(MOVING_SUFFIX).unwrap_or(&self.name)
    }
}
