mod audit;
mod coverage;
mod rest;
mod rotation;
mod types;
mod util;

pub use coverage::CoverageRepairer;
pub use rest::RestRuleEngine;
pub use rotation::RotationAssigner;
pub use types::{
    BuildError, Conflict, ConflictKind, CoverageShortfall, FeasibilityReport,
    RestRuleSoftViolation, RuleOptions,
};

use crate::model::{RosterGrid, RosterParameters};
use crate::pattern::{PatternTable, WorkPattern};
use tracing::{debug, info};

/// RosterBuilder : enchaîne rotation → repos → réparation de couverture.
///
/// Chaque appel à [`RosterBuilder::build`] construit sa propre grille ; le
/// builder ne garde aucun état entre deux générations.
#[derive(Debug, Clone, Default)]
pub struct RosterBuilder {
    patterns: PatternTable,
    rules: RuleOptions,
}

impl RosterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_patterns(mut self, patterns: PatternTable) -> Self {
        self.patterns = patterns;
        self
    }

    pub fn with_rules(mut self, rules: RuleOptions) -> Self {
        self.rules = rules;
        self
    }

    pub fn patterns(&self) -> &PatternTable {
        &self.patterns
    }
    pub fn rules(&self) -> RuleOptions {
        self.rules
    }

    /// Motif retenu : celui des paramètres, sinon celui de la table.
    pub fn work_pattern(&self, params: &RosterParameters) -> WorkPattern {
        match &params.work_pattern {
            Some(p) => p.clone(),
            None => self.patterns.pattern_for(params.shift_hours, params.weeks),
        }
    }

    /// Les erreurs de paramètres ou d'effectif arrêtent tout avant la
    /// création de la grille ; le reste est remonté dans le rapport.
    pub fn build(
        &self,
        params: &RosterParameters,
    ) -> Result<(RosterGrid, FeasibilityReport), BuildError> {
        params.validate()?;
        self.rules.validate()?;

        let workers = RotationAssigner::new(params.shift_count, params.min_operators_per_shift)
            .assign(params.worker_count)?;
        let pattern = self.work_pattern(params);
        debug!(workers = workers.len(), %pattern, "workers bucketed");

        let days_covered = params.days_covered_per_week as u8;
        let grid = RosterGrid::new(workers, params.weeks, params.shift_count, days_covered);

        let (grid, rest_violations) =
            RestRuleEngine::new(days_covered, self.rules).apply(grid, &pattern);
        let (grid, shortfalls) =
            CoverageRepairer::new(params.min_operators_per_shift, self.rules).repair(grid);

        let report = FeasibilityReport {
            shortfalls,
            rest_violations,
        };
        info!(
            workers = params.worker_count,
            weeks = params.weeks,
            shortfalls = report.shortfalls.len(),
            rest_violations = report.rest_violations.len(),
            "roster built"
        );
        Ok((grid, report))
    }

    /// Contrôle une grille existante avec les règles de ce builder.
    pub fn audit(&self, grid: &RosterGrid, min_operators_per_shift: u32) -> Vec<Conflict> {
        audit::audit(grid, min_operators_per_shift, self.rules)
    }
}

/// Génération avec la table de motifs et les règles par défaut.
pub fn build(params: &RosterParameters) -> Result<(RosterGrid, FeasibilityReport), BuildError> {
    RosterBuilder::new().build(params)
}

/// Contrôle d'une grille avec les règles données.
pub fn audit(grid: &RosterGrid, min_operators_per_shift: u32, rules: RuleOptions) -> Vec<Conflict> {
    audit::audit(grid, min_operators_per_shift, rules)
}
