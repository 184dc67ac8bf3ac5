//! Puzzle scoring.

pub const BASE_SCORE: u32 = 100;
pub const HINT_PENALTY: u32 = 15;
/// A solved puzzle never scores below this, however many hints were used.
pub const MIN_SOLVED_SCORE: u32 = 50;

/// Points for the current attempt. Revealing the solution forfeits everything.
pub fn compute_score(hints_used: u32, solution_revealed: bool) -> u32 {
    if solution_revealed {
        return 0;
    }
    BASE_SCORE
        .saturating_sub(HINT_PENALTY.saturating_mul(hints_used))
        .max(MIN_SOLVED_SCORE)
}
