use crate::model::RosterParameters;
use crate::pattern::PatternTable;
use crate::scheduler::{RosterBuilder, RuleOptions};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Fichier de configuration JSON d'une génération.
///
/// ```json
/// { "parameters": { "worker_count": 18, "shift_count": 3, "shift_hours": 8,
///                   "min_operators_per_shift": 3, "weeks": 4,
///                   "days_covered_per_week": 7 },
///   "rules": { "max_consecutive_sundays": 2 } }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterConfig {
    pub parameters: RosterParameters,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patterns: Option<PatternTable>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rules: Option<RuleOptions>,
}

impl RosterConfig {
    pub fn new(parameters: RosterParameters) -> Self {
        Self {
            parameters,
            patterns: None,
            rules: None,
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.parameters.validate()?;
        if let Some(patterns) = &self.patterns {
            patterns.validate()?;
        }
        if let Some(rules) = &self.rules {
            rules.validate()?;
        }
        Ok(())
    }

    /// Builder portant la table et les règles du fichier (défauts sinon).
    pub fn builder(&self) -> RosterBuilder {
        RosterBuilder::new()
            .with_patterns(self.patterns.clone().unwrap_or_default())
            .with_rules(self.rules.unwrap_or_default())
    }
}

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<RosterConfig> {
    let path = path.as_ref();
    let data = fs::read(path).with_context(|| format!("reading config {}", path.display()))?;
    let config: RosterConfig = serde_json::from_slice(&data)
        .with_context(|| format!("parsing config {}", path.display()))?;
    config
        .validate()
        .with_context(|| format!("validating config {}", path.display()))?;
    Ok(config)
}
