#![forbid(unsafe_code)]
use rota::{
    model::DAYS_PER_WEEK, Assignment, DaySlot, RestRuleEngine, RosterGrid, RotationAssigner,
    RuleOptions, ShiftId, WorkPattern, SUNDAY,
};

fn empty_grid(workers: u32, shifts: u32, weeks: u32, days: u8) -> RosterGrid {
    let assigned = RotationAssigner::new(shifts, 1).assign(workers).unwrap();
    RosterGrid::new(assigned, weeks, shifts, days)
}

fn pattern(days: &[u32]) -> WorkPattern {
    WorkPattern::new(days.to_vec()).unwrap()
}

fn rest_days(grid: &RosterGrid, worker: usize, week: u32) -> Vec<u8> {
    (0..DAYS_PER_WEEK)
        .filter(|&d| grid.get(worker, DaySlot::new(week, d)).is_resting())
        .collect()
}

#[test]
fn full_quota_clamps_and_reports_every_worker() {
    let engine = RestRuleEngine::new(7, RuleOptions::default());
    let (grid, violations) = engine.apply(empty_grid(9, 3, 1, 7), &pattern(&[7]));

    assert_eq!(violations.len(), 9);
    for v in &violations {
        assert_eq!(v.requested, 7);
        assert_eq!(v.granted, 6);
    }
    for worker in 0..9 {
        assert_eq!(grid.days_worked(worker, 0), 6);
    }
}

#[test]
fn primary_rest_day_rotates_without_shift_change() {
    let engine = RestRuleEngine::new(7, RuleOptions::default());
    let (grid, violations) = engine.apply(empty_grid(1, 1, 4, 7), &pattern(&[6]));
    assert!(violations.is_empty());

    // (index + semaine) mod 7, sauf le 3e dimanche d'affilée forcé en repos
    assert_eq!(rest_days(&grid, 0, 0), vec![0]);
    assert_eq!(rest_days(&grid, 0, 1), vec![1]);
    assert_eq!(rest_days(&grid, 0, 2), vec![2, SUNDAY]);
    assert_eq!(rest_days(&grid, 0, 3), vec![3]);
}

#[test]
fn shift_change_forces_monday_rest() {
    let engine = RestRuleEngine::new(7, RuleOptions::default());
    let (grid, _) = engine.apply(empty_grid(6, 3, 4, 7), &pattern(&[6]));

    for worker in 0..6 {
        for week in 1..4 {
            assert!(grid.get(worker, DaySlot::new(week, 0)).is_resting());
        }
    }
}

#[test]
fn working_days_use_weekly_shift() {
    let engine = RestRuleEngine::new(7, RuleOptions::default());
    let (grid, _) = engine.apply(empty_grid(6, 3, 4, 7), &pattern(&[6, 5, 5, 5]));

    for (worker, slot, cell) in grid.iter() {
        if let Assignment::Working(s) = cell {
            assert_eq!(s, worker.weekly_shift(slot.week, 3));
        }
    }
    assert_eq!(grid.days_worked(0, 0), 6);
    assert_eq!(grid.days_worked(0, 1), 5);
}

#[test]
fn days_beyond_coverage_stay_resting() {
    let engine = RestRuleEngine::new(5, RuleOptions::default());
    let (grid, violations) = engine.apply(empty_grid(4, 2, 2, 5), &pattern(&[6, 5, 5, 5]));

    // 5 jours couverts : au plus 4 travaillés autour du repos
    assert_eq!(violations.len(), 8);
    for worker in 0..4 {
        for week in 0..2 {
            assert!(grid.get(worker, DaySlot::new(week, 5)).is_resting());
            assert!(grid.get(worker, DaySlot::new(week, SUNDAY)).is_resting());
            assert_eq!(grid.days_worked(worker, week), 4);
        }
    }
}

#[test]
fn never_three_sundays_in_a_row() {
    let engine = RestRuleEngine::new(7, RuleOptions::default());
    let (grid, _) = engine.apply(empty_grid(12, 2, 8, 7), &pattern(&[6]));

    for worker in 0..12 {
        let mut run = 0;
        for week in 0..8 {
            if grid.get(worker, DaySlot::new(week, SUNDAY)).is_working() {
                run += 1;
                assert!(run <= 2, "worker {worker} week {week}");
            } else {
                run = 0;
            }
        }
    }
}

#[test]
fn custom_sunday_cap_is_honoured() {
    let rules = RuleOptions {
        max_consecutive_sundays: 1,
    };
    let engine = RestRuleEngine::new(7, rules);
    let (grid, _) = engine.apply(empty_grid(3, 1, 6, 7), &pattern(&[6]));

    for worker in 0..3 {
        for week in 1..6 {
            let prev = grid.get(worker, DaySlot::new(week - 1, SUNDAY));
            let this = grid.get(worker, DaySlot::new(week, SUNDAY));
            assert!(!(prev.is_working() && this.is_working()));
        }
    }
}

#[test]
fn applying_twice_gives_the_same_grid() {
    let engine = RestRuleEngine::new(7, RuleOptions::default());
    let p = pattern(&[4, 3, 4, 3]);
    let (once, _) = engine.apply(empty_grid(8, 2, 4, 7), &p);
    let (twice, _) = engine.apply(once.clone(), &p);
    assert_eq!(once, twice);
    assert_eq!(
        once.get(0, DaySlot::new(0, 1)),
        Assignment::Working(ShiftId::new(0))
    );
}
