use crate::pattern::WorkPattern;
use crate::scheduler::BuildError;
use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Nombre de cases par semaine dans la grille (lundi..dimanche).
pub const DAYS_PER_WEEK: u8 = 7;
/// Index du dimanche (0 = lundi).
pub const SUNDAY: u8 = 6;

const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

pub const MAX_WORKERS: u32 = 10_000;
pub const MAX_WEEKS: u32 = 520;
pub const MAX_SHIFT_HOURS: u32 = 24;

/// Identifiant fort pour un opérateur
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WorkerId(String);

impl WorkerId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    /// `OP1`, `OP2`, ... à partir d'un index 0-based.
    pub fn from_index(index: usize) -> Self {
        Self(format!("OP{}", index + 1))
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WorkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

/// Identifiant de quart (0..shift_count-1)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShiftId(u32);

impl ShiftId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }
    pub fn get(self) -> u32 {
        self.0
    }

    /// Quart effectif de la semaine `week` : `(base + week) mod shift_count`.
    pub fn rotated(self, week: u32, shift_count: u32) -> ShiftId {
        if shift_count == 0 {
            return self;
        }
        Self((self.0 % shift_count + week % shift_count) % shift_count)
    }
}

impl fmt::Display for ShiftId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opérateur du planning, avec son quart de base figé pour toute la durée du roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Worker {
    pub id: WorkerId,
    pub index: usize,
    pub base_shift: ShiftId,
}

impl Worker {
    pub fn weekly_shift(&self, week: u32, shift_count: u32) -> ShiftId {
        self.base_shift.rotated(week, shift_count)
    }
}

/// Jour du planning : (semaine, jour de la semaine), 0 = lundi.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DaySlot {
    pub week: u32,
    pub day: u8,
}

impl DaySlot {
    pub fn new(week: u32, day: u8) -> Self {
        Self { week, day }
    }
    pub fn is_sunday(&self) -> bool {
        self.day == SUNDAY
    }
    pub fn weekday(&self) -> Option<Weekday> {
        WEEKDAYS.get(usize::from(self.day)).copied()
    }
}

impl fmt::Display for DaySlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.weekday() {
            Some(wd) => write!(f, "week {} {}", self.week + 1, wd),
            None => write!(f, "week {} day {}", self.week + 1, self.day),
        }
    }
}

/// Affectation d'un opérateur pour un jour donné.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Assignment {
    #[default]
    Resting,
    Working(ShiftId),
}

impl Assignment {
    pub fn is_working(&self) -> bool {
        matches!(self, Assignment::Working(_))
    }
    pub fn is_resting(&self) -> bool {
        matches!(self, Assignment::Resting)
    }
    pub fn shift(&self) -> Option<ShiftId> {
        match self {
            Assignment::Working(s) => Some(*s),
            Assignment::Resting => None,
        }
    }
}

/// Grille complète opérateur × jour.
///
/// Une seule case par (opérateur, semaine, jour) : deux quarts le même jour
/// ne sont pas représentables. Les jours au-delà de `days_covered` restent
/// dans la grille (toujours en repos après génération).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterGrid {
    workers: Vec<Worker>,
    weeks: u32,
    shift_count: u32,
    days_covered: u8,
    cells: Vec<Assignment>,
}

impl RosterGrid {
    /// Grille vide : repos partout.
    pub fn new(workers: Vec<Worker>, weeks: u32, shift_count: u32, days_covered: u8) -> Self {
        let len = workers.len() * weeks as usize * usize::from(DAYS_PER_WEEK);
        Self {
            workers,
            weeks,
            shift_count,
            days_covered: days_covered.min(DAYS_PER_WEEK),
            cells: vec![Assignment::Resting; len],
        }
    }

    pub fn workers(&self) -> &[Worker] {
        &self.workers
    }
    pub fn weeks(&self) -> u32 {
        self.weeks
    }
    pub fn shift_count(&self) -> u32 {
        self.shift_count
    }
    pub fn days_covered(&self) -> u8 {
        self.days_covered
    }

    /// Vrai si la grille (ex. rechargée depuis un fichier) est cohérente.
    pub fn is_well_formed(&self) -> bool {
        let expected = self.workers.len() * self.weeks as usize * usize::from(DAYS_PER_WEEK);
        self.cells.len() == expected
            && self.days_covered >= 1
            && self.days_covered <= DAYS_PER_WEEK
            && self.shift_count > 0
            && self
                .workers
                .iter()
                .enumerate()
                .all(|(i, w)| w.index == i && w.base_shift.get() < self.shift_count)
    }

    fn offset(&self, worker: usize, slot: DaySlot) -> usize {
        (worker * self.weeks as usize + slot.week as usize) * usize::from(DAYS_PER_WEEK)
            + usize::from(slot.day)
    }

    /// # Panics
    /// Si `worker` ou `slot` sont hors de la grille.
    pub fn get(&self, worker: usize, slot: DaySlot) -> Assignment {
        self.cells[self.offset(worker, slot)]
    }

    /// # Panics
    /// Si `worker` ou `slot` sont hors de la grille.
    pub fn set(&mut self, worker: usize, slot: DaySlot, value: Assignment) {
        let at = self.offset(worker, slot);
        self.cells[at] = value;
    }

    pub fn weekly_shift(&self, worker: usize, week: u32) -> ShiftId {
        self.workers[worker].weekly_shift(week, self.shift_count)
    }

    /// Nombre d'opérateurs sur `shift` ce jour-là.
    pub fn coverage(&self, slot: DaySlot, shift: ShiftId) -> usize {
        (0..self.workers.len())
            .filter(|&w| self.get(w, slot) == Assignment::Working(shift))
            .count()
    }

    pub fn days_worked(&self, worker: usize, week: u32) -> usize {
        (0..DAYS_PER_WEEK)
            .filter(|&d| self.get(worker, DaySlot::new(week, d)).is_working())
            .count()
    }

    /// Longueur de la série de dimanches travaillés contenant `week`
    /// si ce dimanche-là était travaillé.
    pub fn sunday_run_if_worked(&self, worker: usize, week: u32) -> u32 {
        let worked = |w: u32| self.get(worker, DaySlot::new(w, SUNDAY)).is_working();
        let before = (0..week).rev().take_while(|&w| worked(w)).count() as u32;
        let after = (week + 1..self.weeks).take_while(|&w| worked(w)).count() as u32;
        before + 1 + after
    }

    /// Tous les jours du planning, semaine par semaine.
    pub fn slots(&self) -> impl Iterator<Item = DaySlot> {
        let weeks = self.weeks;
        (0..weeks).flat_map(|w| (0..DAYS_PER_WEEK).map(move |d| DaySlot::new(w, d)))
    }

    /// Jours effectivement couverts (`day < days_covered`).
    pub fn covered_slots(&self) -> impl Iterator<Item = DaySlot> {
        let covered = self.days_covered;
        self.slots().filter(move |s| s.day < covered)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Worker, DaySlot, Assignment)> + '_ {
        self.workers
            .iter()
            .flat_map(move |w| self.slots().map(move |s| (w, s, self.get(w.index, s))))
    }
}

/// Paramètres scalaires d'un roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterParameters {
    pub worker_count: u32,
    pub shift_count: u32,
    /// Informatif : sélectionne le motif hebdomadaire par défaut.
    pub shift_hours: u32,
    pub min_operators_per_shift: u32,
    pub weeks: u32,
    pub days_covered_per_week: u32,
    /// Motif fourni par l'appelant, prioritaire sur la table par défaut.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work_pattern: Option<WorkPattern>,
}

impl RosterParameters {
    pub fn new(
        worker_count: u32,
        shift_count: u32,
        shift_hours: u32,
        min_operators_per_shift: u32,
        weeks: u32,
        days_covered_per_week: u32,
    ) -> Self {
        Self {
            worker_count,
            shift_count,
            shift_hours,
            min_operators_per_shift,
            weeks,
            days_covered_per_week,
            work_pattern: None,
        }
    }

    pub fn with_pattern(mut self, pattern: WorkPattern) -> Self {
        self.work_pattern = Some(pattern);
        self
    }

    /// `shift_count × min_operators_per_shift`
    pub fn required_workers(&self) -> u64 {
        u64::from(self.shift_count) * u64::from(self.min_operators_per_shift)
    }

    pub fn validate(&self) -> Result<(), BuildError> {
        positive("worker_count", self.worker_count)?;
        positive("shift_count", self.shift_count)?;
        positive("shift_hours", self.shift_hours)?;
        positive("min_operators_per_shift", self.min_operators_per_shift)?;
        positive("weeks", self.weeks)?;
        if self.worker_count > MAX_WORKERS {
            return Err(BuildError::invalid(
                "worker_count",
                format!("must be <= {MAX_WORKERS}"),
            ));
        }
        if self.shift_hours > MAX_SHIFT_HOURS {
            return Err(BuildError::invalid(
                "shift_hours",
                format!("must be <= {MAX_SHIFT_HOURS}"),
            ));
        }
        if self.weeks > MAX_WEEKS {
            return Err(BuildError::invalid("weeks", format!("must be <= {MAX_WEEKS}")));
        }
        if !(1..=u32::from(DAYS_PER_WEEK)).contains(&self.days_covered_per_week) {
            return Err(BuildError::invalid(
                "days_covered_per_week",
                "must be between 1 and 7",
            ));
        }
        if let Some(pattern) = &self.work_pattern {
            pattern.validate()?;
        }
        Ok(())
    }
}

fn positive(field: &'static str, value: u32) -> Result<(), BuildError> {
    if value == 0 {
        return Err(BuildError::invalid(field, "must be > 0"));
    }
    Ok(())
}
