//! Markdown corpus indexer.
//!
//! The recognised layout, one hexagram per heading:
//!
//! ```text
//! #### **一、本宫卦：坤为地 ䷁（双重柔顺，厚德载物）**
//! + **卦辞**：元亨，利牝马之贞。
//! + **世爻**：上六
//! 1. **初六爻动（变地雷复 ䷗）**
//!    - **本爻辞**：履霜，坚冰至。
//!    - **变卦辞**：亨。出入无疾，朋来无咎。
//!    - **爻动含义**：见微知著，防患未然。
//! ```
//!
//! Lines that match nothing are skipped, so prose between entries is fine.

use std::collections::BTreeMap;
use std::path::Path;

use regex::Regex;
use tracing::{debug, trace};

use crate::Corpus;
use crate::error::{CorpusError, CorpusResult};
use crate::text::{HexagramText, LineText};

struct Patterns {
    title: Regex,
    property: Regex,
    line_block: Regex,
    line_detail: Regex,
}

impl Patterns {
    fn new() -> CorpusResult<Self> {
        Ok(Self {
            title: Regex::new(r"####\s*\*?\s*([^：]+)：\s*([^（\s]+)\s*(\S*)\s*（([^）]+)")?,
            property: Regex::new(r"[\+\*]\s*\*\*([^\*]+)\*\*：\s*(.+)")?,
            line_block: Regex::new(r"(\d+)\.\s*\*\*([^爻]+爻动)\s*（变([^）]+)")?,
            line_detail: Regex::new(r"[->\*]\s*\*\*([^\*]+)\*\*：\s*(.+)")?,
        })
    }
}

/// Name-keyed index of a parsed corpus.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CorpusIndex {
    entries: BTreeMap<String, HexagramText>,
}

impl CorpusIndex {
    /// Parse a Markdown corpus.
    ///
    /// Fails with [`CorpusError::Empty`] when no hexagram heading is found.
    pub fn parse(markdown: &str) -> CorpusResult<Self> {
        let patterns = Patterns::new()?;
        let mut builder = Builder::default();

        for raw in markdown.lines() {
            let line = raw.trim();

            if let Some(caps) = patterns.title.captures(line) {
                let name = clean(&caps[2]);
                trace!(hexagram = %name, "corpus heading");
                builder.start_hexagram(HexagramText {
                    name,
                    alias: clean(&caps[1]),
                    symbol: caps[3].trim().to_string(),
                    core_meaning: caps[4].trim().to_string(),
                    ..HexagramText::default()
                });
                continue;
            }

            if line.is_empty() || line.starts_with("---") || line.starts_with("###") {
                continue;
            }
            let Some(current) = builder.current.as_mut() else {
                continue;
            };

            if let Some(caps) = patterns.property.captures(line) {
                let value = caps[2].trim().to_string();
                let known = match caps[1].trim() {
                    "卦辞" => {
                        current.judgment = value;
                        true
                    }
                    "世爻" => {
                        current.world_line = value;
                        true
                    }
                    "核心意象" => {
                        if current.core_meaning.is_empty() {
                            current.core_meaning = value;
                        }
                        true
                    }
                    _ => false,
                };
                if known {
                    continue;
                }
            }

            if let Some(caps) = patterns.line_block.captures(line) {
                builder.flush_line();
                builder.line = Some(LineText {
                    index: caps[1].parse().unwrap_or(0),
                    name: caps[2].trim().to_string(),
                    transformed_name: caps[3]
                        .split_whitespace()
                        .next()
                        .unwrap_or_default()
                        .to_string(),
                    ..LineText::default()
                });
                continue;
            }

            if let (Some(pending), Some(caps)) =
                (builder.line.as_mut(), patterns.line_detail.captures(line))
            {
                let value = caps[2].trim().to_string();
                match caps[1].trim() {
                    "本爻辞" => pending.text = value,
                    "变卦辞" => pending.transformed_text = value,
                    "爻动含义" => {
                        pending.meaning = value;
                        builder.flush_line();
                    }
                    _ => {}
                }
            }
        }

        let entries = builder.finish();
        if entries.is_empty() {
            return Err(CorpusError::Empty);
        }
        debug!(hexagrams = entries.len(), "indexed corpus");
        Ok(Self { entries })
    }

    /// Read and parse a corpus file.
    pub fn load(path: impl AsRef<Path>) -> CorpusResult<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading corpus");
        let markdown = std::fs::read_to_string(path)?;
        Self::parse(&markdown)
    }

    /// Number of indexed hexagrams.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is indexed.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Indexed hexagram names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl Corpus for CorpusIndex {
    fn hexagram(&self, name: &str) -> Option<&HexagramText> {
        self.entries.get(name.trim())
    }
}

#[derive(Default)]
struct Builder {
    entries: BTreeMap<String, HexagramText>,
    current: Option<HexagramText>,
    line: Option<LineText>,
}

impl Builder {
    fn start_hexagram(&mut self, text: HexagramText) {
        self.flush_line();
        if let Some(done) = self.current.replace(text) {
            self.entries.insert(done.name.clone(), done);
        }
    }

    fn flush_line(&mut self) {
        if let (Some(current), Some(line)) = (self.current.as_mut(), self.line.take()) {
            current.lines.insert(line.name.clone(), line);
        }
    }

    fn finish(mut self) -> BTreeMap<String, HexagramText> {
        self.flush_line();
        if let Some(done) = self.current.take() {
            self.entries.insert(done.name.clone(), done);
        }
        self.entries
    }
}

fn clean(s: &str) -> String {
    s.trim().trim_matches('*').trim().to_string()
}
