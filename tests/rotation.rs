#![forbid(unsafe_code)]
use rota::{BuildError, RotationAssigner, ShiftId};

#[test]
fn round_robin_buckets_are_balanced() {
    for (workers, shifts) in [(18, 3), (10, 3), (7, 2), (11, 4), (5, 1)] {
        let assigned = RotationAssigner::new(shifts, 1).assign(workers).unwrap();
        assert_eq!(assigned.len(), workers as usize);

        let mut counts = vec![0usize; shifts as usize];
        for w in &assigned {
            counts[w.base_shift.get() as usize] += 1;
        }
        let max = counts.iter().max().unwrap();
        let min = counts.iter().min().unwrap();
        assert!(max - min <= 1, "unbalanced buckets {counts:?}");
    }
}

#[test]
fn worker_i_goes_to_bucket_i_mod_shifts() {
    let assigned = RotationAssigner::new(3, 2).assign(7).unwrap();
    let bases: Vec<u32> = assigned.iter().map(|w| w.base_shift.get()).collect();
    assert_eq!(bases, vec![0, 1, 2, 0, 1, 2, 0]);
    assert_eq!(assigned[0].id.as_str(), "OP1");
    assert_eq!(assigned[6].id.as_str(), "OP7");
    assert!(assigned.iter().enumerate().all(|(i, w)| w.index == i));
}

#[test]
fn insufficient_workers_is_rejected() {
    let err = RotationAssigner::new(3, 3).assign(5).unwrap_err();
    match err {
        BuildError::InsufficientWorkers { workers, required } => {
            assert_eq!(workers, 5);
            assert_eq!(required, 9);
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn weekly_shift_changes_every_week() {
    let assigned = RotationAssigner::new(3, 1).assign(6).unwrap();
    for w in &assigned {
        for week in 0..8 {
            let this = w.weekly_shift(week, 3);
            let next = w.weekly_shift(week + 1, 3);
            assert_ne!(this, next);
            assert_eq!(this, ShiftId::new((w.base_shift.get() + week) % 3));
        }
    }
}

#[test]
fn single_shift_never_rotates() {
    let assigned = RotationAssigner::new(1, 2).assign(2).unwrap();
    assert!(assigned
        .iter()
        .all(|w| (0..5).all(|week| w.weekly_shift(week, 1) == ShiftId::new(0))));
}
