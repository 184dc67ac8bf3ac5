//! The persisted progress record and the streak rule.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Cross-session statistics, one per installation.
///
/// Field names follow the JSON written by the browser version so an exported
/// record can be dropped in as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProgressRecord {
    /// Consecutive calendar days with at least one solve
    pub streak: u32,
    /// Lifetime solve events, one per distinct puzzle
    pub total_solved: u32,
    pub last_solved_date: Option<NaiveDate>,
    #[serde(rename = "solvedPuzzles")]
    pub solved_puzzle_ids: BTreeSet<String>,
}

impl ProgressRecord {
    pub fn has_solved(&self, puzzle_id: &str) -> bool {
        self.solved_puzzle_ids.contains(puzzle_id)
    }

    /// Whole calendar days between the last solve and `today`.
    pub fn days_since_last_solve(&self, today: NaiveDate) -> Option<i64> {
        self.last_solved_date
            .map(|last| today.signed_duration_since(last).num_days())
    }

    /// Reset the streak if more than one calendar day has passed since the
    /// last solve. Returns true when a reset happened.
    pub fn decay(&mut self, today: NaiveDate) -> bool {
        match self.days_since_last_solve(today) {
            Some(gap) if gap > 1 && self.streak > 0 => {
                self.streak = 0;
                true
            }
            _ => false,
        }
    }

    /// Copy with decay applied, for display at session start.
    pub fn decayed(&self, today: NaiveDate) -> Self {
        let mut record = self.clone();
        record.decay(today);
        record
    }

    /// Count a solve of `puzzle_id` on `today`.
    ///
    /// Returns false and leaves the record untouched when the puzzle was
    /// already recorded. Decay runs before the increment, so a solve after a
    /// multi-day gap yields a streak of 1. A second solve on the same day
    /// counts toward the total but not the streak.
    pub fn record_solve(&mut self, puzzle_id: &str, today: NaiveDate) -> bool {
        if self.has_solved(puzzle_id) {
            return false;
        }

        self.decay(today);
        // gap <= 0 covers a repeat solve today and a clock that went backwards
        let counts_for_streak = !matches!(self.days_since_last_solve(today), Some(gap) if gap <= 0);
        if counts_for_streak {
            self.streak = self.streak.saturating_add(1);
        }

        self.total_solved = self.total_solved.saturating_add(1);
        self.solved_puzzle_ids.insert(puzzle_id.to_string());
        self.last_solved_date = Some(today);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn record(streak: u32, last: Option<&str>) -> ProgressRecord {
        ProgressRecord {
            streak,
            total_solved: streak,
            last_solved_date: last.map(day),
            solved_puzzle_ids: BTreeSet::new(),
        }
    }

    #[test]
    fn test_first_solve_starts_streak() {
        let mut r = ProgressRecord::default();
        assert!(r.record_solve("p1", day("2026-01-16")));
        assert_eq!(r.streak, 1);
        assert_eq!(r.total_solved, 1);
        assert_eq!(r.last_solved_date, Some(day("2026-01-16")));
        assert!(r.has_solved("p1"));
    }

    #[test]
    fn test_consecutive_day_increments() {
        let mut r = record(4, Some("2026-01-15"));
        r.record_solve("p", day("2026-01-16"));
        assert_eq!(r.streak, 5);
    }

    #[test]
    fn test_same_day_does_not_increment_streak() {
        let mut r = record(4, Some("2026-01-16"));
        r.record_solve("other", day("2026-01-16"));
        assert_eq!(r.streak, 4);
        assert_eq!(r.total_solved, 5);
    }

    #[test]
    fn test_gap_resets_before_increment() {
        let mut r = record(5, Some("2026-01-13"));
        r.record_solve("p", day("2026-01-16"));
        assert_eq!(r.streak, 1);
    }

    #[test]
    fn test_decay_rules() {
        let today = day("2026-01-16");
        assert!(!record(3, None).decay(today));
        assert!(!record(3, Some("2026-01-16")).decay(today));
        assert!(!record(3, Some("2026-01-15")).decay(today));

        let mut stale = record(3, Some("2026-01-14"));
        assert!(stale.decay(today));
        assert_eq!(stale.streak, 0);
        // Date is kept; only the streak decays
        assert_eq!(stale.last_solved_date, Some(day("2026-01-14")));
    }

    #[test]
    fn test_decayed_leaves_original_untouched() {
        let r = record(7, Some("2026-01-01"));
        let shown = r.decayed(day("2026-01-16"));
        assert_eq!(shown.streak, 0);
        assert_eq!(r.streak, 7);
    }

    #[test]
    fn test_already_solved_is_not_recounted() {
        let mut r = ProgressRecord::default();
        r.record_solve("p1", day("2026-01-15"));
        let before = r.clone();
        assert!(!r.record_solve("p1", day("2026-01-16")));
        assert_eq!(r, before);
    }

    #[test]
    fn test_clock_going_backwards_keeps_streak() {
        let mut r = record(2, Some("2026-01-20"));
        r.record_solve("p", day("2026-01-16"));
        assert_eq!(r.streak, 2);
        assert_eq!(r.total_solved, 3);
    }

    #[test]
    fn test_json_field_names() {
        let mut r = ProgressRecord::default();
        r.record_solve("puzzle-2026-01-16", day("2026-01-16"));
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["streak"], 1);
        assert_eq!(json["totalSolved"], 1);
        assert_eq!(json["lastSolvedDate"], "2026-01-16");
        assert_eq!(json["solvedPuzzles"][0], "puzzle-2026-01-16");
    }

    #[test]
    fn test_missing_fields_default() {
        let r: ProgressRecord = serde_json::from_str(r#"{"streak": 3}"#).unwrap();
        assert_eq!(r.streak, 3);
        assert_eq!(r.total_solved, 0);
        assert!(r.last_solved_date.is_none());
        assert!(r.solved_puzzle_ids.is_empty());
    }

    #[test]
    fn test_reads_browser_record() {
        let json = r#"{"streak":2,"totalSolved":9,"lastSolvedDate":null,"solvedPuzzles":["a","b"]}"#;
        let r: ProgressRecord = serde_json::from_str(json).unwrap();
        assert_eq!(r.total_solved, 9);
        assert!(r.has_solved("b"));
    }
}
