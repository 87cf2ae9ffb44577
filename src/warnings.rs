use crate::model::{RosterGrid, Worker};
use crate::scheduler::{CoverageShortfall, FeasibilityReport, RestRuleSoftViolation};

/// Permet de customiser le rendu des avertissements (console, mail, etc.).
pub trait WarningRenderer {
    fn shortfall(&self, shortfall: &CoverageShortfall) -> String;
    fn rest_violation(&self, worker: &Worker, violation: &RestRuleSoftViolation) -> String;
}

/// Rendu texte d'une ligne par anomalie.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextWarnings;

impl WarningRenderer for TextWarnings {
    fn shortfall(&self, s: &CoverageShortfall) -> String {
        format!(
            "{slot}: shift {shift} has {have}/{need} operators ({missing} missing)",
            slot = s.slot,
            shift = s.shift,
            have = s.required.saturating_sub(s.shortfall),
            need = s.required,
            missing = s.shortfall,
        )
    }

    fn rest_violation(&self, worker: &Worker, v: &RestRuleSoftViolation) -> String {
        format!(
            "{id}, week {week}: {requested} work days requested, only {granted} fit around the weekly rest day",
            id = worker.id,
            week = v.week + 1,
            requested = v.requested,
            granted = v.granted,
        )
    }
}

/// Prépare les avertissements d'un rapport : couverture d'abord, puis repos.
pub fn prepare_warnings(
    grid: &RosterGrid,
    report: &FeasibilityReport,
    renderer: &dyn WarningRenderer,
) -> Vec<String> {
    let mut out: Vec<String> = report
        .shortfalls
        .iter()
        .map(|s| renderer.shortfall(s))
        .collect();
    out.extend(report.rest_violations.iter().filter_map(|v| {
        grid.workers()
            .get(v.worker)
            .map(|worker| renderer.rest_violation(worker, v))
    }));
    out
}
