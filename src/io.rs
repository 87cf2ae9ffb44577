use crate::model::{Assignment, DaySlot, RosterGrid, RosterParameters};
use crate::scheduler::{FeasibilityReport, RuleOptions};
use anyhow::{bail, Context};
use chrono::{DateTime, Duration, NaiveDate, Utc};
use csv::WriterBuilder;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use uuid::Uuid;

/// Document exporté : paramètres, grille et rapport d'une génération.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterDocument {
    pub id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub parameters: RosterParameters,
    #[serde(default)]
    pub rules: RuleOptions,
    pub grid: RosterGrid,
    pub report: FeasibilityReport,
}

impl RosterDocument {
    pub fn new(
        parameters: RosterParameters,
        rules: RuleOptions,
        grid: RosterGrid,
        report: FeasibilityReport,
        generated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            generated_at,
            parameters,
            rules,
            grid,
            report,
        }
    }
}

/// Export JSON du document, de manière atomique (fichier temporaire + rename).
pub fn export_roster_json<P: AsRef<Path>>(path: P, doc: &RosterDocument) -> anyhow::Result<()> {
    let path = path.as_ref();
    let json = serde_json::to_vec_pretty(doc)?;
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir).with_context(|| "creating temp file")?;
    tmp.write_all(&json)?;
    tmp.flush()?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).with_context(|| "atomic rename")?;
    Ok(())
}

pub fn load_roster_json<P: AsRef<Path>>(path: P) -> anyhow::Result<RosterDocument> {
    let path = path.as_ref();
    let data = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let doc: RosterDocument = serde_json::from_slice(&data)
        .with_context(|| format!("parsing roster {}", path.display()))?;
    if !doc.grid.is_well_formed() {
        bail!("roster grid in {} is inconsistent", path.display());
    }
    Ok(doc)
}

/// En-têtes CSV : `worker,base_shift` puis un jour par colonne
/// (`W1-Mon`..., ou la date calendaire si `start` est fourni).
pub fn grid_headers(grid: &RosterGrid, start: Option<NaiveDate>) -> Vec<String> {
    let mut headers = vec!["worker".to_string(), "base_shift".to_string()];
    for slot in grid.slots() {
        headers.push(day_header(slot, start));
    }
    headers
}

fn day_header(slot: DaySlot, start: Option<NaiveDate>) -> String {
    match start {
        Some(date) => {
            let offset = i64::from(slot.week) * 7 + i64::from(slot.day);
            (date + Duration::days(offset)).format("%Y-%m-%d").to_string()
        }
        None => match slot.weekday() {
            Some(wd) => format!("W{}-{}", slot.week + 1, wd),
            None => format!("W{}-D{}", slot.week + 1, slot.day),
        },
    }
}

/// Export CSV de la grille : une ligne par opérateur, `-` pour le repos.
pub fn export_grid_csv<P: AsRef<Path>>(
    path: P,
    grid: &RosterGrid,
    start: Option<NaiveDate>,
) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().has_headers(true).from_path(path)?;
    w.write_record(grid_headers(grid, start))?;
    let mut buf = itoa::Buffer::new();
    for worker in grid.workers() {
        let mut row = Vec::with_capacity(2 + grid.slots().count());
        row.push(worker.id.as_str().to_string());
        row.push(buf.format(worker.base_shift.get()).to_string());
        for slot in grid.slots() {
            match grid.get(worker.index, slot) {
                Assignment::Working(s) => row.push(buf.format(s.get()).to_string()),
                Assignment::Resting => row.push("-".to_string()),
            }
        }
        w.write_record(&row)?;
    }
    w.flush()?;
    Ok(())
}

/// Export CSV du rapport : header `kind,worker,week,day,shift,expected,actual`
pub fn export_report_csv<P: AsRef<Path>>(
    path: P,
    grid: &RosterGrid,
    report: &FeasibilityReport,
) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().has_headers(true).from_path(path)?;
    w.write_record(["kind", "worker", "week", "day", "shift", "expected", "actual"])?;
    let mut num = itoa::Buffer::new();
    for s in &report.shortfalls {
        let week = num.format(s.slot.week + 1).to_string();
        let day = s
            .slot
            .weekday()
            .map(|wd| wd.to_string())
            .unwrap_or_default();
        let shift = num.format(s.shift.get()).to_string();
        let expected = num.format(s.required).to_string();
        let actual = num.format(s.required.saturating_sub(s.shortfall)).to_string();
        w.write_record([
            "shortfall",
            "",
            week.as_str(),
            day.as_str(),
            shift.as_str(),
            expected.as_str(),
            actual.as_str(),
        ])?;
    }
    for v in &report.rest_violations {
        let worker = grid
            .workers()
            .get(v.worker)
            .map(|wk| wk.id.as_str())
            .unwrap_or("");
        let week = num.format(v.week + 1).to_string();
        let expected = num.format(v.requested).to_string();
        let actual = num.format(v.granted).to_string();
        w.write_record([
            "rest",
            worker,
            week.as_str(),
            "",
            "",
            expected.as_str(),
            actual.as_str(),
        ])?;
    }
    w.flush()?;
    Ok(())
}
