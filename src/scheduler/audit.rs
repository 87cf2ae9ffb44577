use super::types::{Conflict, ConflictKind, RuleOptions};
use crate::model::{DaySlot, RosterGrid, ShiftId, SUNDAY};

/// Vérifie une grille quelconque (générée ou rechargée) contre les règles.
pub(super) fn audit(
    grid: &RosterGrid,
    min_operators_per_shift: u32,
    opts: RuleOptions,
) -> Vec<Conflict> {
    let mut out = Vec::new();

    for worker in grid.workers() {
        let mut sunday_run = 0u32;
        for slot in grid.slots() {
            let cell = grid.get(worker.index, slot);
            if let Some(found) = cell.shift() {
                if slot.day >= grid.days_covered() {
                    out.push(Conflict {
                        worker: Some(worker.id.clone()),
                        slot,
                        kind: ConflictKind::WorkOutsideCoveredDays,
                    });
                }
                let expected = grid.weekly_shift(worker.index, slot.week);
                if found != expected {
                    out.push(Conflict {
                        worker: Some(worker.id.clone()),
                        slot,
                        kind: ConflictKind::WeeklyShiftMismatch { expected, found },
                    });
                }
            }

            if slot.day == SUNDAY {
                sunday_run = if cell.is_working() { sunday_run + 1 } else { 0 };
                if sunday_run > opts.max_consecutive_sundays {
                    out.push(Conflict {
                        worker: Some(worker.id.clone()),
                        slot,
                        kind: ConflictKind::SundayCapExceeded { run: sunday_run },
                    });
                }
            }
        }
    }

    let covered: Vec<DaySlot> = grid.covered_slots().collect();
    for slot in covered {
        for shift in (0..grid.shift_count()).map(ShiftId::new) {
            let count = grid.coverage(slot, shift) as u32;
            if count < min_operators_per_shift {
                out.push(Conflict {
                    worker: None,
                    slot,
                    kind: ConflictKind::Undercovered {
                        shift,
                        shortfall: min_operators_per_shift - count,
                    },
                });
            }
        }
    }

    out
}
