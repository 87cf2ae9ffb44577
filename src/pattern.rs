use crate::model::DAYS_PER_WEEK;
use crate::scheduler::BuildError;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Moyenne hebdomadaire visée par les motifs calculés (heures).
pub const DEFAULT_AVERAGE_WEEKLY_HOURS: u32 = 42;

/// Nombre de jours travaillés visé pour chaque semaine du cycle.
///
/// Un motif plus court que l'horizon se répète : la semaine `w` utilise
/// l'entrée `w mod len`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkPattern(Vec<u32>);

impl WorkPattern {
    pub fn new(days: Vec<u32>) -> Result<Self, BuildError> {
        let pattern = Self(days);
        pattern.validate()?;
        Ok(pattern)
    }

    pub fn days(&self) -> &[u32] {
        &self.0
    }

    pub fn validate(&self) -> Result<(), BuildError> {
        if self.0.is_empty() {
            return Err(BuildError::invalid(
                "work_pattern",
                "must contain at least one week",
            ));
        }
        if let Some(bad) = self.0.iter().find(|d| **d > u32::from(DAYS_PER_WEEK)) {
            return Err(BuildError::invalid(
                "work_pattern",
                format!("{bad} days in a week is more than 7"),
            ));
        }
        Ok(())
    }

    pub fn target_for_week(&self, week: u32) -> u32 {
        if self.0.is_empty() {
            return 0;
        }
        self.0[week as usize % self.0.len()]
    }

    /// Motif déplié sur `weeks` semaines.
    pub fn expand(&self, weeks: u32) -> Vec<u32> {
        (0..weeks).map(|w| self.target_for_week(w)).collect()
    }
}

impl FromStr for WorkPattern {
    type Err = BuildError;

    /// `"6,5,5,5"`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let days = s
            .split(',')
            .map(str::trim)
            .filter(|chunk| !chunk.is_empty())
            .map(|chunk| {
                chunk.parse::<u32>().map_err(|_| {
                    BuildError::invalid("work_pattern", format!("not a day count: {chunk}"))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(days)
    }
}

impl fmt::Display for WorkPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for d in &self.0 {
            if !first {
                f.write_str(",")?;
            }
            write!(f, "{d}")?;
            first = false;
        }
        Ok(())
    }
}

/// Table des motifs par défaut, indexée par durée de quart (heures).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternTable {
    #[serde(default = "default_average")]
    pub average_weekly_hours: u32,
    #[serde(default)]
    pub patterns: BTreeMap<u32, WorkPattern>,
}

fn default_average() -> u32 {
    DEFAULT_AVERAGE_WEEKLY_HOURS
}

impl Default for PatternTable {
    fn default() -> Self {
        let mut patterns = BTreeMap::new();
        patterns.insert(8, WorkPattern(vec![6, 5, 5, 5]));
        patterns.insert(12, WorkPattern(vec![4, 3, 4, 3]));
        Self {
            average_weekly_hours: DEFAULT_AVERAGE_WEEKLY_HOURS,
            patterns,
        }
    }
}

impl PatternTable {
    /// Table sans entrée : tout passe par le calcul de moyenne.
    pub fn empty(average_weekly_hours: u32) -> Self {
        Self {
            average_weekly_hours,
            patterns: BTreeMap::new(),
        }
    }

    pub fn insert(&mut self, shift_hours: u32, pattern: WorkPattern) -> Option<WorkPattern> {
        self.patterns.insert(shift_hours, pattern)
    }

    pub fn get(&self, shift_hours: u32) -> Option<&WorkPattern> {
        self.patterns.get(&shift_hours)
    }

    pub fn validate(&self) -> Result<()> {
        if self.average_weekly_hours == 0 {
            anyhow::bail!("average_weekly_hours must be > 0");
        }
        for (hours, pattern) in &self.patterns {
            if *hours == 0 {
                anyhow::bail!("pattern keyed by 0 hours");
            }
            pattern
                .validate()
                .with_context(|| format!("pattern for {hours}h shifts"))?;
        }
        Ok(())
    }

    /// Motif de la table pour `shift_hours`, sinon motif calculé sur `weeks`.
    pub fn pattern_for(&self, shift_hours: u32, weeks: u32) -> WorkPattern {
        match self.get(shift_hours) {
            Some(p) => p.clone(),
            None => self.averaged(shift_hours, weeks),
        }
    }

    /// Répartit `round(moyenne × semaines / heures)` jours sur l'horizon,
    /// les premières semaines prenant le reste.
    pub fn averaged(&self, shift_hours: u32, weeks: u32) -> WorkPattern {
        let weeks = weeks.max(1);
        let hours = u64::from(shift_hours.max(1));
        let total = (u64::from(self.average_weekly_hours) * u64::from(weeks) + hours / 2) / hours;
        let base = total / u64::from(weeks);
        let extra = total % u64::from(weeks);
        let days = (0..u64::from(weeks))
            .map(|w| {
                let d = base + u64::from(w < extra);
                d.min(u64::from(DAYS_PER_WEEK)) as u32
            })
            .collect();
        WorkPattern(days)
    }
}

pub fn load_patterns_from_file<P: AsRef<Path>>(path: P) -> Result<PatternTable> {
    let path = path.as_ref();
    let data = fs::read(path).with_context(|| format!("reading patterns {}", path.display()))?;
    let table: PatternTable = serde_json::from_slice(&data)
        .with_context(|| format!("parsing patterns {}", path.display()))?;
    table.validate()?;
    Ok(table)
}

pub fn export_patterns_json<P: AsRef<Path>>(path: P, table: &PatternTable) -> Result<()> {
    table.validate()?;
    let json = serde_json::to_string_pretty(table)?;
    fs::write(path, json)?;
    Ok(())
}
