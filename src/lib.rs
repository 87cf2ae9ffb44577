#![forbid(unsafe_code)]
//! Rota : génération de plannings de rotation par quarts (sans BD).
//!
//! - Répartition round-robin sur les quarts de base, rotation hebdomadaire.
//! - Jours de repos : rotation, repos au changement de quart, plafond de dimanches.
//! - Réparation gloutonne de la couverture minimale ; les manques sont rapportés.
//! - Export JSON/CSV et rendu des avertissements en dehors du cœur.

pub mod config;
pub mod io;
pub mod model;
pub mod pattern;
pub mod scheduler;
pub mod warnings;

pub use config::{load_config, RosterConfig};
pub use model::{
    Assignment, DaySlot, RosterGrid, RosterParameters, ShiftId, Worker, WorkerId, SUNDAY,
};
pub use pattern::{PatternTable, WorkPattern};
pub use scheduler::{
    audit, build, BuildError, Conflict, ConflictKind, CoverageRepairer, CoverageShortfall,
    FeasibilityReport, RestRuleEngine, RestRuleSoftViolation, RosterBuilder, RotationAssigner,
    RuleOptions,
};
pub use warnings::{prepare_warnings, TextWarnings, WarningRenderer};
