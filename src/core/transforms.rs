//! Per-trial column derivation.
//!
//! Converts millisecond timestamps to seconds, computes the reward-cue time
//! and the three sub-trial interval lengths, labels each trial with its
//! category flags, and shifts each category column down one row to produce
//! the `_prior` variants (what category the preceding trial was).

use serde::{Deserialize, Serialize};

use crate::config::SessionConfig;
use super::loaders::SessionTable;

/// Trial outcome categories.
///
/// `stay_hit` and `stay_miss` both require `bridge == 0` and are mutually
/// exclusive; `switch` mirrors the `bridge` column directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrialCategory {
    StayHit,
    StayMiss,
    Switch,
}

impl TrialCategory {
    /// All categories, in output order.
    pub const ALL: [TrialCategory; 3] = [
        TrialCategory::StayHit,
        TrialCategory::StayMiss,
        TrialCategory::Switch,
    ];

    /// The column/filename name for this category.
    pub fn name(self) -> &'static str {
        match self {
            TrialCategory::StayHit => "stay_hit",
            TrialCategory::StayMiss => "stay_miss",
            TrialCategory::Switch => "switch",
        }
    }
}

impl std::fmt::Display for TrialCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Derived timing and category columns, same length and order as the input
/// table.
///
/// `switch` holds the raw `bridge` value rather than a normalized 0/1 flag.
/// The original analysis script stored it that way and downstream selection
/// tests `== 1`, so a `bridge` of 2 is carried through the augmented CSV but
/// never selects a timing row.
#[derive(Debug, Clone)]
pub struct DerivedColumns {
    pub trial_start_s: Vec<f64>,
    pub go_cue_time_s: Vec<f64>,
    pub choice_time_s: Vec<f64>,
    pub post_choice_time_min_s: Vec<f64>,
    pub trial_end_s: Vec<f64>,
    /// Reward unveiling time: choice time plus the configured offset.
    pub reward_cue_s: Vec<f64>,
    /// Trial start to choice, seconds.
    pub len_begin_choice_s: Vec<f64>,
    /// Choice to reward unveiling, seconds.
    pub len_choice_reward_s: Vec<f64>,
    /// Reward unveiling to trial end, seconds.
    pub len_reward_end_s: Vec<f64>,
    pub stay_hit: Vec<u8>,
    pub stay_miss: Vec<u8>,
    pub switch: Vec<f64>,
    pub stay_hit_prior: Vec<u8>,
    pub stay_miss_prior: Vec<u8>,
    pub switch_prior: Vec<f64>,
}

/// Header names for the derived columns, in the order they are appended to
/// the augmented CSV.
pub const DERIVED_HEADERS: [&str; 15] = [
    "trialStart_s",
    "goCueTime_s",
    "choiceTime_s",
    "postChoiceTimeMin_s",
    "trialEnd_s",
    "rewardCue_s",
    "len_begin_choice_s",
    "len_choice_reward_s",
    "len_reward_end_s",
    "stay_hit",
    "stay_miss",
    "switch",
    "stay_hit_prior",
    "stay_miss_prior",
    "switch_prior",
];

impl DerivedColumns {
    /// Returns the number of trials.
    #[inline]
    pub fn num_trials(&self) -> usize {
        self.trial_start_s.len()
    }

    /// Category column value at row `i`, as a number.
    pub fn category_value(&self, category: TrialCategory, i: usize) -> f64 {
        match category {
            TrialCategory::StayHit => f64::from(self.stay_hit[i]),
            TrialCategory::StayMiss => f64::from(self.stay_miss[i]),
            TrialCategory::Switch => self.switch[i],
        }
    }

    /// True if row `i` is selected for `category` timing output.
    ///
    /// Selection tests `== 1` exactly, matching the raw-valued `switch`
    /// column semantics.
    #[inline]
    pub fn is_member(&self, category: TrialCategory, i: usize) -> bool {
        self.category_value(category, i) == 1.0
    }
}

/// Shift a column down one row, filling row 0 with the default value.
fn shift_prior<T: Copy + Default>(values: &[T]) -> Vec<T> {
    if values.is_empty() {
        return Vec::new();
    }
    let mut shifted = Vec::with_capacity(values.len());
    shifted.push(T::default());
    shifted.extend_from_slice(&values[..values.len() - 1]);
    shifted
}

/// Compute all derived columns for a session.
///
/// The three interval lengths decompose the full trial: for every row,
/// `len_begin_choice_s + len_choice_reward_s + len_reward_end_s`
/// equals `trialEnd_s - trialStart_s`.
pub fn derive_columns(table: &SessionTable, config: &SessionConfig) -> DerivedColumns {
    let n = table.num_trials();
    let to_s = |ms: &[f64]| -> Vec<f64> { ms.iter().map(|&v| v / config.ms_per_second).collect() };

    let trial_start_s = to_s(&table.trial_start_ms);
    let go_cue_time_s = to_s(&table.go_cue_time_ms);
    let choice_time_s = to_s(&table.choice_time_ms);
    let post_choice_time_min_s = to_s(&table.post_choice_time_min_ms);
    let trial_end_s = to_s(&table.trial_end_ms);

    let reward_cue_s: Vec<f64> = choice_time_s
        .iter()
        .map(|&c| c + config.reward_cue_offset_s)
        .collect();

    let mut len_begin_choice_s = Vec::with_capacity(n);
    let mut len_choice_reward_s = Vec::with_capacity(n);
    let mut len_reward_end_s = Vec::with_capacity(n);
    for i in 0..n {
        len_begin_choice_s.push(choice_time_s[i] - trial_start_s[i]);
        len_choice_reward_s.push(reward_cue_s[i] - choice_time_s[i]);
        len_reward_end_s.push(trial_end_s[i] - reward_cue_s[i]);
    }

    let mut stay_hit = Vec::with_capacity(n);
    let mut stay_miss = Vec::with_capacity(n);
    for i in 0..n {
        let stay = table.bridge[i] == 0.0;
        stay_hit.push(u8::from(stay && table.reward[i] != 0.0));
        stay_miss.push(u8::from(stay && table.reward[i] == 0.0));
    }
    let switch = table.bridge.clone();

    let stay_hit_prior = shift_prior(&stay_hit);
    let stay_miss_prior = shift_prior(&stay_miss);
    let switch_prior = shift_prior(&switch);

    DerivedColumns {
        trial_start_s,
        go_cue_time_s,
        choice_time_s,
        post_choice_time_min_s,
        trial_end_s,
        reward_cue_s,
        len_begin_choice_s,
        len_choice_reward_s,
        len_reward_end_s,
        stay_hit,
        stay_miss,
        switch,
        stay_hit_prior,
        stay_miss_prior,
        switch_prior,
    }
}
