//! Commentary attached to a finished reading.
//!
//! Decoration never changes the reading. Missing texts stay `None`.

use ly_core::cast::classic_line_name;
use ly_corpus::{Corpus, HexagramText, LineText};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::AnalysisResult;

/// Commentary for one moving line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineDecoration {
    /// Position, 0 at the bottom.
    pub index: usize,
    /// Classical name, e.g. 初六.
    pub name: String,
    /// The corpus text, if found.
    pub text: Option<LineText>,
}

/// Commentary for a reading.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decoration {
    /// Text of the original hexagram.
    pub original: Option<HexagramText>,
    /// Text of the transformed hexagram, when any line moves.
    pub transformed: Option<HexagramText>,
    /// Texts of the moving lines, bottom first.
    pub lines: Vec<LineDecoration>,
}

/// Look up the commentary for a reading.
pub fn decorate(result: &AnalysisResult, corpus: &impl Corpus) -> Decoration {
    let original = &result.original;
    let moving: Vec<usize> = (0..6)
        .filter(|i| original.hexagram.0[*i] != result.transformed.hexagram.0[*i])
        .collect();

    let lines: Vec<LineDecoration> = moving
        .iter()
        .map(|&index| {
            let name = classic_line_name(index, original.lines[index].yang);
            let text = corpus.line(&original.name, &name).cloned();
            LineDecoration { index, name, text }
        })
        .collect();
    let transformed = if moving.is_empty() {
        None
    } else {
        corpus.hexagram(&result.transformed.name).cloned()
    };

    let decoration = Decoration {
        original: corpus.hexagram(&original.name).cloned(),
        transformed,
        lines,
    };
    debug!(
        hexagram = %original.name,
        found = decoration.original.is_some(),
        lines = decoration.lines.iter().filter(|l| l.text.is_some()).count(),
        "reading decorated"
    );
    decoration
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AnalysisContext, Category, analyze};
    use ly_core::{Branch, CalendarContext, Cast};
    use ly_corpus::{CorpusIndex, EmptyCorpus};

    const SAMPLE: &str = "\
#### **一、本宫卦：坤为地 ䷁（双重柔顺，厚德载物）**
+ **卦辞**：元亨，利牝马之贞。
1. **初六爻动（变地雷复 ䷗）**
   - **本爻辞**：履霜，坚冰至。
   - **爻动含义**：见微知著。
#### **二、一世卦：地雷复 ䷗（一阳来复）**
+ **卦辞**：亨。出入无疾，朋来无咎。
";

    fn kun_reading() -> AnalysisResult {
        let mut changed = [false; 6];
        changed[0] = true;
        let cast = Cast::new("000000".parse().unwrap(), changed);
        let calendar = CalendarContext::new("甲子".parse().unwrap(), Branch::Wu);
        analyze(&AnalysisContext::new(cast, calendar, Category::General)).unwrap()
    }

    #[test]
    fn finds_hexagram_and_line_texts() {
        let corpus = CorpusIndex::parse(SAMPLE).unwrap();
        let decoration = decorate(&kun_reading(), &corpus);

        assert_eq!(decoration.original.map(|t| t.name), Some("坤为地".to_string()));
        assert_eq!(decoration.transformed.map(|t| t.name), Some("地雷复".to_string()));
        assert_eq!(decoration.lines.len(), 1);
        assert_eq!(decoration.lines[0].name, "初六");
        assert_eq!(
            decoration.lines[0].text.as_ref().map(|t| t.text.as_str()),
            Some("履霜，坚冰至。")
        );
    }

    #[test]
    fn misses_leave_fields_empty() {
        let decoration = decorate(&kun_reading(), &EmptyCorpus);
        assert!(decoration.original.is_none());
        assert!(decoration.transformed.is_none());
        assert_eq!(decoration.lines.len(), 1);
        assert!(decoration.lines[0].text.is_none());
    }
}
