use super::types::{RestRuleSoftViolation, RuleOptions};
use super::util;
use crate::model::{Assignment, DaySlot, RosterGrid, DAYS_PER_WEEK, SUNDAY};
use crate::pattern::WorkPattern;
use tracing::{debug, warn};

/// Place les jours de repos, opérateur par opérateur, semaine par semaine.
///
/// - un repos principal par semaine, tournant `(index + semaine) mod jours` ;
/// - lundi imposé quand le quart change par rapport à la semaine précédente ;
/// - le quota du motif remplit les autres jours couverts ;
/// - jamais plus de `max_consecutive_sundays` dimanches travaillés d'affilée.
#[derive(Debug, Clone, Copy)]
pub struct RestRuleEngine {
    days_covered: u8,
    opts: RuleOptions,
}

impl RestRuleEngine {
    pub fn new(days_covered: u8, opts: RuleOptions) -> Self {
        Self {
            days_covered: days_covered.clamp(1, DAYS_PER_WEEK),
            opts,
        }
    }

    pub fn apply(
        &self,
        mut grid: RosterGrid,
        pattern: &WorkPattern,
    ) -> (RosterGrid, Vec<RestRuleSoftViolation>) {
        let mut violations = Vec::new();
        let capacity = u32::from(self.days_covered) - 1;
        let cap = self.opts.max_consecutive_sundays;
        let shift_count = grid.shift_count();
        let covers_sunday = SUNDAY < self.days_covered;

        for worker in 0..grid.workers().len() {
            let mut sunday_run = 0u32;

            for week in 0..grid.weeks() {
                let requested = pattern.target_for_week(week);
                let quota = if requested > capacity {
                    warn!(worker, week, requested, granted = capacity, "weekly quota clamped");
                    violations.push(RestRuleSoftViolation {
                        worker,
                        week,
                        requested,
                        granted: capacity,
                    });
                    capacity
                } else {
                    requested
                };

                let shift = grid.weekly_shift(worker, week);
                let changed = week > 0 && grid.weekly_shift(worker, week - 1) != shift;
                let rest_day = if changed {
                    0
                } else {
                    ((worker as u64 + u64::from(week)) % u64::from(self.days_covered)) as u8
                };
                let sunday_off = covers_sunday
                    && sunday_run >= 1
                    && util::sunday_turn(worker, week, shift_count, cap);

                for day in 0..DAYS_PER_WEEK {
                    grid.set(worker, DaySlot::new(week, day), Assignment::Resting);
                }
                for day in util::working_days(worker, rest_day, quota, self.days_covered, sunday_off)
                {
                    grid.set(worker, DaySlot::new(week, day), Assignment::Working(shift));
                }

                if covers_sunday {
                    let sunday = DaySlot::new(week, SUNDAY);
                    if grid.get(worker, sunday).is_working() {
                        if sunday_run >= cap {
                            debug!(worker, week, "sunday cap reached, forcing rest");
                            grid.set(worker, sunday, Assignment::Resting);
                            sunday_run = 0;
                        } else {
                            sunday_run += 1;
                        }
                    } else {
                        sunday_run = 0;
                    }
                }
            }
        }

        debug!(clamped = violations.len(), "rest rules applied");
        (grid, violations)
    }
}
