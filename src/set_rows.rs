//! Editable per-set rows shown on the workout pane.

pub const MIN_REPS: u32 = 1;
pub const MIN_WEIGHT: f64 = 0.0;
pub const WEIGHT_STEP: f64 = 1.0;

#[derive(Clone, Debug, PartialEq)]
pub struct SetRow {
    pub reps: u32,
    pub weight: f64,
}

impl Default for SetRow {
    fn default() -> Self {
        SetRow { reps: MIN_REPS, weight: MIN_WEIGHT }
    }
}

impl SetRow {
    pub fn increment_reps(&mut self) {
        self.reps = self.reps.saturating_add(1);
    }

    pub fn decrement_reps(&mut self) {
        self.reps = self.reps.saturating_sub(1).max(MIN_REPS);
    }

    pub fn increment_weight(&mut self) {
        self.weight += WEIGHT_STEP;
    }

    pub fn decrement_weight(&mut self) {
        self.weight = (self.weight - WEIGHT_STEP).max(MIN_WEIGHT);
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SetRows {
    rows: Vec<SetRow>,
}

impl SetRows {
    pub fn with_sets(sets: usize) -> Self {
        let mut rows = SetRows::default();
        rows.resize(sets);
        rows
    }

    /// Grows or shrinks to `sets` rows. Existing rows keep their values; new
    /// rows start at the minimums.
    pub fn resize(&mut self, sets: usize) {
        self.rows.resize_with(sets, SetRow::default);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[SetRow] {
        &self.rows
    }

    pub fn row_mut(&mut self, idx: usize) -> Option<&mut SetRow> {
        self.rows.get_mut(idx)
    }

    pub fn reps(&self) -> Vec<u32> {
        self.rows.iter().map(|r| r.reps).collect()
    }

    pub fn weights(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.weight).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grow_keeps_existing_rows() {
        let mut rows = SetRows::with_sets(2);
        rows.row_mut(0).unwrap().reps = 8;
        rows.row_mut(1).unwrap().weight = 40.0;

        rows.resize(4);
        assert_eq!(rows.reps(), vec![8, 1, 1, 1]);
        assert_eq!(rows.weights(), vec![0.0, 40.0, 0.0, 0.0]);
    }

    #[test]
    fn shrink_drops_from_the_end() {
        let mut rows = SetRows::with_sets(3);
        for (i, row) in [5, 6, 7].into_iter().enumerate() {
            rows.row_mut(i).unwrap().reps = row;
        }
        rows.resize(1);
        assert_eq!(rows.reps(), vec![5]);
        rows.resize(0);
        assert!(rows.is_empty());
    }

    #[test]
    fn steppers_respect_minimums() {
        let mut row = SetRow::default();
        row.decrement_reps();
        row.decrement_weight();
        assert_eq!(row, SetRow { reps: 1, weight: 0.0 });

        row.increment_reps();
        row.increment_weight();
        row.increment_weight();
        assert_eq!(row, SetRow { reps: 2, weight: 2.0 });

        row.weight = 0.5;
        row.decrement_weight();
        assert_eq!(row.weight, 0.0);
    }
}
