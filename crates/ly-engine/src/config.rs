//! Analysis configuration.

use serde::{Deserialize, Serialize};

/// Controls which narrative sections a reading emits.
///
/// Scoring never depends on these switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Emit the per-line report for all six lines.
    pub line_reports: bool,
    /// Emit a note for every moving line.
    pub moving_line_notes: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            line_reports: true,
            moving_line_notes: true,
        }
    }
}

impl AnalysisConfig {
    /// Toggle per-line reports.
    pub fn with_line_reports(mut self, enabled: bool) -> Self {
        self.line_reports = enabled;
        self
    }

    /// Toggle moving-line notes.
    pub fn with_moving_line_notes(mut self, enabled: bool) -> Self {
        self.moving_line_notes = enabled;
        self
    }

    /// Scores and judgment only.
    pub fn brief() -> Self {
        Self::default()
            .with_line_reports(false)
            .with_moving_line_notes(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let cfg = AnalysisConfig::default();
        assert!(cfg.line_reports);
        assert!(cfg.moving_line_notes);
    }

    #[test]
    fn builder_methods() {
        let cfg = AnalysisConfig::default().with_line_reports(false);
        assert!(!cfg.line_reports);
        assert!(cfg.moving_line_notes);
        assert_eq!(
            AnalysisConfig::brief(),
            AnalysisConfig {
                line_reports: false,
                moving_line_notes: false
            }
        );
    }
}
