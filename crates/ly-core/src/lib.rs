//! Core tables and derivations for Liu Yao (六爻) readings.
//!
//! Provides the five-element algebra, stems and branches with their clash,
//! combination, punishment and harm relations, coin-toss casting, the Na Jia
//! stem-branch assignment, the eight palaces, and annotated hexagram charts
//! with kinship labels, World/Response markers and hidden spirits. Also ships
//! the secondary tables that decorate a chart: six spirits, twelve life
//! stages, stars, and a small calendar helper.
//!
//! Everything here is pure: tables are constant data and every function is
//! deterministic in its inputs.

pub mod branch;
pub mod calendar;
pub mod cast;
pub mod chart;
pub mod element;
pub mod error;
pub mod kinship;
pub mod najia;
pub mod palace;
pub mod spirit;
pub mod stage;
pub mod stars;
pub mod trigram;

pub use branch::{
    Branch, BureauKind, Punishment, SEASONAL_TRIOS, Stem, StemBranch, TRIADS, ThreeBranchBureau,
};
pub use calendar::CalendarContext;
pub use cast::{Cast, Hexagram, LineCast, LineKind};
pub use chart::{HexagramChart, HiddenSpirit, LineInfo, Marker};
pub use element::{Element, Relation, Vitality};
pub use error::{CoreError, CoreResult};
pub use kinship::Kinship;
pub use palace::{PalacePosition, Placement};
pub use spirit::Spirit;
pub use stage::LifeStage;
pub use stars::Star;
pub use trigram::Trigram;
