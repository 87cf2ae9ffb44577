use crate::model::{DaySlot, ShiftId, WorkerId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;

/// Options des règles de repos
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleOptions {
    pub max_consecutive_sundays: u32,
}

impl Default for RuleOptions {
    fn default() -> Self {
        Self {
            max_consecutive_sundays: 2,
        }
    }
}

impl RuleOptions {
    pub fn validate(&self) -> Result<(), BuildError> {
        if self.max_consecutive_sundays == 0 {
            return Err(BuildError::invalid("max_consecutive_sundays", "must be > 0"));
        }
        Ok(())
    }
}

/// Créneau resté sous le minimum après réparation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverageShortfall {
    pub slot: DaySlot,
    pub shift: ShiftId,
    pub required: u32,
    pub shortfall: u32,
}

/// Quota hebdomadaire réduit faute de place pour le jour de repos.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestRuleSoftViolation {
    pub worker: usize,
    pub week: u32,
    pub requested: u32,
    pub granted: u32,
}

/// Anomalies non bloquantes d'une génération.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeasibilityReport {
    #[serde(default)]
    pub shortfalls: Vec<CoverageShortfall>,
    #[serde(default)]
    pub rest_violations: Vec<RestRuleSoftViolation>,
}

impl FeasibilityReport {
    pub fn is_empty(&self) -> bool {
        self.shortfalls.is_empty() && self.rest_violations.is_empty()
    }

    pub fn total_shortfall(&self) -> u64 {
        self.shortfalls.iter().map(|s| u64::from(s.shortfall)).sum()
    }

    /// Index des opérateurs ayant au moins une violation de repos.
    pub fn workers_with_violations(&self) -> BTreeSet<usize> {
        self.rest_violations.iter().map(|v| v.worker).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConflictKind {
    WeeklyShiftMismatch { expected: ShiftId, found: ShiftId },
    SundayCapExceeded { run: u32 },
    Undercovered { shift: ShiftId, shortfall: u32 },
    WorkOutsideCoveredDays,
}

#[derive(Debug, Clone)]
pub struct Conflict {
    pub worker: Option<WorkerId>,
    pub slot: DaySlot,
    pub kind: ConflictKind,
}

#[derive(Error, Debug)]
pub enum BuildError {
    #[error("invalid parameter {field}: {reason}")]
    InvalidParameter { field: &'static str, reason: String },
    #[error("insufficient workers: {workers} available, {required} required")]
    InsufficientWorkers { workers: u32, required: u64 },
}

impl BuildError {
    pub(crate) fn invalid<R: Into<String>>(field: &'static str, reason: R) -> Self {
        Self::InvalidParameter {
            field,
            reason: reason.into(),
        }
    }
}
