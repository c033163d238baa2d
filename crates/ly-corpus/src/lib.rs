//! Commentary corpus for hexagram and line texts.
//!
//! The corpus is a Markdown document with one `####` heading per hexagram,
//! bullet properties for the judgment text and core image, and numbered
//! blocks for each moving line. [`CorpusIndex`] parses it once into a
//! name-keyed index; the [`Corpus`] trait is the lookup seam the engine
//! decorates readings through.

pub mod error;
pub mod index;
pub mod text;

pub use error::{CorpusError, CorpusResult};
pub use index::CorpusIndex;
pub use text::{HexagramText, LineText};

/// Read-only lookup of hexagram and line texts.
///
/// Misses are `None`; a missing text never fails a reading.
pub trait Corpus {
    /// Text for a hexagram by its full name, e.g. `坤为地`.
    fn hexagram(&self, name: &str) -> Option<&HexagramText>;

    /// Text for a moving line, by classical name (`初六` or `初六爻动`).
    fn line(&self, hexagram: &str, line: &str) -> Option<&LineText> {
        self.hexagram(hexagram)?.line(line)
    }

    /// Hexagram text plus an optional line text in one call.
    fn lookup(&self, hexagram: &str, line: Option<&str>) -> Option<(&HexagramText, Option<&LineText>)> {
        let text = self.hexagram(hexagram)?;
        Some((text, line.and_then(|l| text.line(l))))
    }
}

/// A corpus with no entries.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyCorpus;

impl Corpus for EmptyCorpus {
    fn hexagram(&self, _name: &str) -> Option<&HexagramText> {
        None
    }
}
