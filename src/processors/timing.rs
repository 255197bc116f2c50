//! Category timing-table construction.
//!
//! For each trial category, the timing table has one row per selected trial
//! pair: the reward-unveiling time of trial N-1 and the interval from that
//! unveiling to trial N's reward unveiling (N-1 reward-to-end plus N
//! begin-to-choice plus N choice-to-reward).
//!
//! Pairing is by explicit trial index: a row is emitted for every trial i
//! whose category value is exactly 1 and which has a following trial i+1.
//! This reproduces the prior-column filtering of the original analysis
//! (rows with `<category>_prior == 1` are exactly the successors of rows
//! with `<category> == 1`, and a category trial in the final row is dropped
//! for lack of a successor) without relying on positional alignment of two
//! independently filtered sets.

use crate::core::transforms::{DerivedColumns, TrialCategory};

/// A 3-column timing table for one trial category.
///
/// The third column (`filler`) is the constant 1 and is emitted by the
/// writer rather than stored.
#[derive(Debug, Clone, Default)]
pub struct TimingTable {
    /// Reward-unveiling timestamp of the category trial, seconds.
    pub time_s: Vec<f64>,
    /// Interval from that unveiling to the next trial's unveiling, seconds.
    pub length_s: Vec<f64>,
}

impl TimingTable {
    /// Returns the number of timing rows.
    #[inline]
    pub fn len(&self) -> usize {
        self.time_s.len()
    }

    /// Returns true if the table has no rows.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.time_s.is_empty()
    }
}

/// Build the timing table for one category.
///
/// A category with no qualifying trials yields an empty table, which the
/// writer turns into an existing, empty output file.
pub fn build_timing_table(derived: &DerivedColumns, category: TrialCategory) -> TimingTable {
    let n = derived.num_trials();
    let mut table = TimingTable::default();

    if n < 2 {
        return table;
    }

    for i in 0..n - 1 {
        if !derived.is_member(category, i) {
            continue;
        }
        table.time_s.push(derived.reward_cue_s[i]);
        table.length_s.push(
            derived.len_reward_end_s[i]
                + derived.len_begin_choice_s[i + 1]
                + derived.len_choice_reward_s[i + 1],
        );
    }

    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SessionConfig;
    use crate::core::loaders::SessionTable;
    use crate::core::transforms::derive_columns;

    fn make_table(
        trial_start: &[f64],
        choice: &[f64],
        trial_end: &[f64],
        bridge: &[f64],
        reward: &[f64],
    ) -> SessionTable {
        let n = trial_start.len();
        SessionTable {
            headers: Vec::new(),
            rows: vec![Vec::new(); n],
            trial_start_ms: trial_start.to_vec(),
            go_cue_time_ms: trial_start.iter().map(|&v| v + 100.0).collect(),
            choice_time_ms: choice.to_vec(),
            post_choice_time_min_ms: choice.iter().map(|&v| v + 100.0).collect(),
            trial_end_ms: trial_end.to_vec(),
            bridge: bridge.to_vec(),
            reward: reward.to_vec(),
            source_path: None,
        }
    }

    fn sample_derived() -> DerivedColumns {
        // trial 0: stay_hit, trial 1: switch, trial 2: stay_miss
        let table = make_table(
            &[0.0, 1000.0, 3000.0],
            &[500.0, 1500.0, 3500.0],
            &[1000.0, 2000.0, 4000.0],
            &[0.0, 1.0, 0.0],
            &[5.0, 0.0, 0.0],
        );
        derive_columns(&table, &SessionConfig::default())
    }

    #[test]
    fn test_stay_hit_pairs_with_next_trial() {
        let derived = sample_derived();
        let timing = build_timing_table(&derived, TrialCategory::StayHit);

        assert_eq!(timing.len(), 1);
        // time = rewardCue of trial 0: 0.5 + 2.7
        assert!((timing.time_s[0] - 3.2).abs() < 1e-9);
        // length = (1.0 - 3.2) + (1.5 - 1.0) + 2.7
        assert!((timing.length_s[0] - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_final_row_category_emits_no_pair() {
        let derived = sample_derived();
        // trial 2 is the only stay_miss and has no following trial
        let timing = build_timing_table(&derived, TrialCategory::StayMiss);
        assert!(timing.is_empty());
    }

    #[test]
    fn test_switch_timing() {
        let derived = sample_derived();
        let timing = build_timing_table(&derived, TrialCategory::Switch);

        assert_eq!(timing.len(), 1);
        // time = rewardCue of trial 1: 1.5 + 2.7
        assert!((timing.time_s[0] - 4.2).abs() < 1e-9);
        assert!((timing.length_s[0] - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_category() {
        let table = make_table(
            &[0.0, 1000.0],
            &[500.0, 1500.0],
            &[1000.0, 2000.0],
            &[1.0, 1.0], // all switch trials
            &[0.0, 0.0],
        );
        let derived = derive_columns(&table, &SessionConfig::default());

        let timing = build_timing_table(&derived, TrialCategory::StayHit);
        assert!(timing.is_empty());
    }

    #[test]
    fn test_nonunit_switch_value_not_selected() {
        let table = make_table(
            &[0.0, 1000.0],
            &[500.0, 1500.0],
            &[1000.0, 2000.0],
            &[2.0, 0.0],
            &[0.0, 1.0],
        );
        let derived = derive_columns(&table, &SessionConfig::default());

        // bridge value 2 appears in the switch column but selects no row
        let timing = build_timing_table(&derived, TrialCategory::Switch);
        assert!(timing.is_empty());
    }

    #[test]
    fn test_single_trial_session() {
        let table = make_table(&[0.0], &[500.0], &[1000.0], &[0.0], &[5.0]);
        let derived = derive_columns(&table, &SessionConfig::default());

        let timing = build_timing_table(&derived, TrialCategory::StayHit);
        assert!(timing.is_empty());
    }

    #[test]
    fn test_consecutive_category_trials() {
        // Three stay_hit trials in a row: trials 0 and 1 pair forward,
        // trial 2 is the final row and is dropped.
        let table = make_table(
            &[0.0, 1000.0, 2000.0],
            &[500.0, 1500.0, 2500.0],
            &[1000.0, 2000.0, 3000.0],
            &[0.0, 0.0, 0.0],
            &[1.0, 2.0, 3.0],
        );
        let derived = derive_columns(&table, &SessionConfig::default());

        let timing = build_timing_table(&derived, TrialCategory::StayHit);
        assert_eq!(timing.len(), 2);
        assert!((timing.time_s[0] - 3.2).abs() < 1e-9);
        assert!((timing.time_s[1] - 4.2).abs() < 1e-9);
    }
}
