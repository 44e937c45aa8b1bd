//! The design rule check engine.
//!
//! A pipeline of independent check passes driven by a coordinator: the
//! path generator turns board objects into polygon sets, the copper-paths
//! cache shares heavy per-layer copper between passes, and every finding
//! is delivered to the host as a typed [`DrcMessage`] while the run is in
//! flight.

pub mod cache;
pub mod engine;
pub mod generator;
pub mod messages;
pub mod settings;

pub use cache::CopperPathsCache;
pub use engine::{
    BoardDesignRuleCheck, CancelToken, DrcObserver, DrcOutcome, NullObserver,
};
pub use generator::{BoardPathGenerator, NetSignalSet};
pub use messages::{DrcMessage, DrcMessageKind, Severity};
pub use settings::{AllowedSlots, DrcSettings};
