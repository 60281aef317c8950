use super::answers::AnswerStore;
use super::domain::{Dimension, Role};
use std::collections::HashMap;

/// Per-dimension point sums for a single answer store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DimensionSums {
    sums: [u32; 3],
}

impl DimensionSums {
    pub fn sum(&self, dimension: Dimension) -> u32 {
        self.sums[dimension as usize]
    }
}

/// Sums the answers falling in each dimension's index range. Unanswered
/// slots contribute zero; partial stores never fail, they only produce
/// lower sums. Pure function of the store contents.
pub fn aggregate(store: &AnswerStore) -> DimensionSums {
    let mut sums = [0u32; 3];
    for dimension in Dimension::ordered() {
        sums[dimension as usize] = store.slots()[dimension.question_range()]
            .iter()
            .flatten()
            .map(|answer| u32::from(answer.value()))
            .sum();
    }
    DimensionSums { sums }
}

/// Aggregated per-dimension, per-role point totals. Roles that were
/// never surveyed are absent and render as zero downstream.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoreMatrix {
    entries: HashMap<Role, DimensionSums>,
}

impl ScoreMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, role: Role, sums: DimensionSums) {
        self.entries.insert(role, sums);
    }

    pub fn score(&self, dimension: Dimension, role: Role) -> Option<u32> {
        self.entries.get(&role).map(|sums| sums.sum(dimension))
    }

    /// Accessor used by both report sinks: a missing entry is a zero,
    /// never an error.
    pub fn score_or_zero(&self, dimension: Dimension, role: Role) -> u32 {
        self.score(dimension, role).unwrap_or(0)
    }

    /// Roles with an entry, in fixed display order.
    pub fn roles_present(&self) -> Vec<Role> {
        Role::ordered()
            .into_iter()
            .filter(|role| self.entries.contains_key(role))
            .collect()
    }

    pub fn entry_count(&self) -> usize {
        self.entries.len() * Dimension::ordered().len()
    }
}
