use super::types::BuildError;
use crate::model::{ShiftId, Worker, WorkerId};

/// Répartit les opérateurs en round-robin sur les quarts de base.
#[derive(Debug, Clone, Copy)]
pub struct RotationAssigner {
    shift_count: u32,
    min_operators_per_shift: u32,
}

impl RotationAssigner {
    pub fn new(shift_count: u32, min_operators_per_shift: u32) -> Self {
        Self {
            shift_count,
            min_operators_per_shift,
        }
    }

    /// L'opérateur `i` reçoit le quart de base `i mod shift_count` ; les
    /// groupes diffèrent d'au plus un opérateur.
    pub fn assign(&self, worker_count: u32) -> Result<Vec<Worker>, BuildError> {
        if self.shift_count == 0 {
            return Err(BuildError::invalid("shift_count", "must be > 0"));
        }
        let required = u64::from(self.shift_count) * u64::from(self.min_operators_per_shift);
        if u64::from(worker_count) < required {
            return Err(BuildError::InsufficientWorkers {
                workers: worker_count,
                required,
            });
        }

        let buckets = self.shift_count as usize;
        let workers = (0..worker_count as usize)
            .map(|index| Worker {
                id: WorkerId::from_index(index),
                index,
                base_shift: ShiftId::new((index % buckets) as u32),
            })
            .collect();
        Ok(workers)
    }
}
