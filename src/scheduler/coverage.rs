use super::types::{CoverageShortfall, RuleOptions};
use crate::model::{Assignment, RosterGrid, ShiftId};
use tracing::{debug, warn};

/// Comble les créneaux sous le minimum en rappelant des opérateurs au repos.
///
/// Seuls les opérateurs dont le quart de la semaine correspond au créneau sont
/// candidats, par index croissant. Un dimanche n'est jamais rappelé s'il
/// prolonge une série au-delà du plafond de dimanches consécutifs.
#[derive(Debug, Clone, Copy)]
pub struct CoverageRepairer {
    min_operators_per_shift: u32,
    opts: RuleOptions,
}

impl CoverageRepairer {
    pub fn new(min_operators_per_shift: u32, opts: RuleOptions) -> Self {
        Self {
            min_operators_per_shift,
            opts,
        }
    }

    pub fn repair(&self, mut grid: RosterGrid) -> (RosterGrid, Vec<CoverageShortfall>) {
        let mut shortfalls = Vec::new();
        let slots: Vec<_> = grid.covered_slots().collect();
        let required = self.min_operators_per_shift;

        for slot in slots {
            for shift in (0..grid.shift_count()).map(ShiftId::new) {
                let covered = grid.coverage(slot, shift) as u32;
                if covered >= required {
                    continue;
                }
                let mut missing = required - covered;

                for worker in 0..grid.workers().len() {
                    if missing == 0 {
                        break;
                    }
                    if grid.weekly_shift(worker, slot.week) != shift {
                        continue;
                    }
                    if grid.get(worker, slot).is_working() {
                        continue;
                    }
                    if slot.is_sunday()
                        && grid.sunday_run_if_worked(worker, slot.week)
                            > self.opts.max_consecutive_sundays
                    {
                        continue;
                    }
                    grid.set(worker, slot, Assignment::Working(shift));
                    missing -= 1;
                    debug!(worker, %slot, %shift, "worker called in");
                }

                if missing > 0 {
                    warn!(%slot, %shift, missing, "coverage below minimum");
                    shortfalls.push(CoverageShortfall {
                        slot,
                        shift,
                        required,
                        shortfall: missing,
                    });
                }
            }
        }

        (grid, shortfalls)
    }
}
