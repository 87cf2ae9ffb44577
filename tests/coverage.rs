#![forbid(unsafe_code)]
use rota::{
    Assignment, CoverageRepairer, CoverageShortfall, DaySlot, RosterBuilder, RosterGrid,
    RosterParameters, RotationAssigner, RuleOptions, ShiftId, WorkPattern, SUNDAY,
};

fn resting_grid(workers: u32, shifts: u32, weeks: u32, days: u8) -> RosterGrid {
    let assigned = RotationAssigner::new(shifts, 1).assign(workers).unwrap();
    RosterGrid::new(assigned, weeks, shifts, days)
}

#[test]
fn promotes_lowest_indices_first() {
    let repairer = CoverageRepairer::new(2, RuleOptions::default());
    let (grid, shortfalls) = repairer.repair(resting_grid(3, 1, 1, 7));

    assert!(shortfalls.is_empty());
    for day in 0..7 {
        let slot = DaySlot::new(0, day);
        assert!(grid.get(0, slot).is_working());
        assert!(grid.get(1, slot).is_working());
        assert!(grid.get(2, slot).is_resting());
    }
}

#[test]
fn only_same_weekly_shift_is_called_in() {
    let repairer = CoverageRepairer::new(3, RuleOptions::default());
    let (grid, shortfalls) = repairer.repair(resting_grid(4, 2, 1, 3));

    // deux opérateurs par quart : il en manque toujours un
    assert_eq!(shortfalls.len(), 6);
    assert!(shortfalls.iter().all(|s| s.shortfall == 1 && s.required == 3));

    for (worker, slot, cell) in grid.iter() {
        if slot.day < 3 {
            assert_eq!(cell, Assignment::Working(worker.base_shift));
        } else {
            assert!(cell.is_resting());
        }
    }
}

#[test]
fn sunday_cap_blocks_promotion() {
    let repairer = CoverageRepairer::new(1, RuleOptions::default());
    let (grid, shortfalls) = repairer.repair(resting_grid(1, 1, 3, 7));

    assert_eq!(
        shortfalls,
        vec![CoverageShortfall {
            slot: DaySlot::new(2, SUNDAY),
            shift: ShiftId::new(0),
            required: 1,
            shortfall: 1,
        }]
    );
    assert!(grid.get(0, DaySlot::new(0, SUNDAY)).is_working());
    assert!(grid.get(0, DaySlot::new(1, SUNDAY)).is_working());
    assert!(grid.get(0, DaySlot::new(2, SUNDAY)).is_resting());
    assert!(grid.get(0, DaySlot::new(2, 5)).is_working());
}

#[test]
fn shortfall_is_reported_not_fatal() {
    let params = RosterParameters::new(2, 1, 8, 2, 3, 7)
        .with_pattern(WorkPattern::new(vec![6]).unwrap());
    let (grid, report) = RosterBuilder::new().build(&params).unwrap();

    assert!(report.rest_violations.is_empty());
    assert_eq!(
        report.shortfalls,
        vec![CoverageShortfall {
            slot: DaySlot::new(2, SUNDAY),
            shift: ShiftId::new(0),
            required: 2,
            shortfall: 2,
        }]
    );
    assert_eq!(report.total_shortfall(), 2);
    // le reste de la grille est complet
    for week in 0..3 {
        for day in 0..6 {
            assert_eq!(grid.coverage(DaySlot::new(week, day), ShiftId::new(0)), 2);
        }
    }
}
