//! Levels and badges derived from the progress record (display only).

use super::types::ProgressRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Level {
    pub name: &'static str,
    pub icon: &'static str,
    /// Lifetime solves needed to reach this level
    pub min_total: u32,
}

pub const LEVELS: [Level; 7] = [
    Level {
        name: "Beginner",
        icon: "\u{1F331}",
        min_total: 0,
    },
    Level {
        name: "Apprentice",
        icon: "\u{1F4DA}",
        min_total: 10,
    },
    Level {
        name: "Intermediate",
        icon: "\u{2694}",
        min_total: 50,
    },
    Level {
        name: "Advanced",
        icon: "\u{1F3AF}",
        min_total: 100,
    },
    Level {
        name: "Expert",
        icon: "\u{1F451}",
        min_total: 250,
    },
    Level {
        name: "Master",
        icon: "\u{1F3C6}",
        min_total: 500,
    },
    Level {
        name: "Grandmaster",
        icon: "\u{1F48E}",
        min_total: 1000,
    },
];

pub fn current_level(total_solved: u32) -> Level {
    LEVELS
        .iter()
        .rev()
        .find(|level| total_solved >= level.min_total)
        .copied()
        .unwrap_or(LEVELS[0])
}

pub fn next_level(total_solved: u32) -> Option<Level> {
    LEVELS
        .iter()
        .find(|level| total_solved < level.min_total)
        .copied()
}

/// Percent of the way from the current level to the next (100 at the top).
pub fn level_progress_percent(total_solved: u32) -> u32 {
    let current = current_level(total_solved);
    match next_level(total_solved) {
        Some(next) => {
            let span = next.min_total - current.min_total;
            (total_solved - current.min_total) * 100 / span
        }
        None => 100,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeId {
    FirstWin,
    Streak3,
    Streak7,
    Streak30,
    Total10,
    Total50,
    Total100,
    Total500,
}

impl BadgeId {
    pub const ALL: [BadgeId; 8] = [
        BadgeId::FirstWin,
        BadgeId::Streak3,
        BadgeId::Streak7,
        BadgeId::Streak30,
        BadgeId::Total10,
        BadgeId::Total50,
        BadgeId::Total100,
        BadgeId::Total500,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            BadgeId::FirstWin => "First Steps",
            BadgeId::Streak3 => "On Fire",
            BadgeId::Streak7 => "Unstoppable",
            BadgeId::Streak30 => "Legend",
            BadgeId::Total10 => "Determined",
            BadgeId::Total50 => "Persistent",
            BadgeId::Total100 => "Centurion",
            BadgeId::Total500 => "Puzzle King",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            BadgeId::FirstWin => "Solve your first puzzle",
            BadgeId::Streak3 => "3-day streak",
            BadgeId::Streak7 => "7-day streak",
            BadgeId::Streak30 => "30-day streak",
            BadgeId::Total10 => "10 puzzles solved",
            BadgeId::Total50 => "50 puzzles solved",
            BadgeId::Total100 => "100 puzzles solved",
            BadgeId::Total500 => "500 puzzles solved",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            BadgeId::FirstWin => "\u{1F389}",
            BadgeId::Streak3 => "\u{1F525}",
            BadgeId::Streak7 => "\u{26A1}",
            BadgeId::Streak30 => "\u{1F31F}",
            BadgeId::Total10 => "\u{1F3AF}",
            BadgeId::Total50 => "\u{1F4AA}",
            BadgeId::Total100 => "\u{1F3C5}",
            BadgeId::Total500 => "\u{1F451}",
        }
    }

    /// The stat this badge tracks and its target.
    fn requirement(&self, record: &ProgressRecord) -> (u32, u32) {
        match self {
            BadgeId::FirstWin => (record.total_solved, 1),
            BadgeId::Streak3 => (record.streak, 3),
            BadgeId::Streak7 => (record.streak, 7),
            BadgeId::Streak30 => (record.streak, 30),
            BadgeId::Total10 => (record.total_solved, 10),
            BadgeId::Total50 => (record.total_solved, 50),
            BadgeId::Total100 => (record.total_solved, 100),
            BadgeId::Total500 => (record.total_solved, 500),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Badge {
    pub id: BadgeId,
    pub unlocked: bool,
    /// Capped at `target`
    pub progress: u32,
    pub target: u32,
}

pub fn badges(record: &ProgressRecord) -> Vec<Badge> {
    BadgeId::ALL
        .iter()
        .map(|&id| {
            let (value, target) = id.requirement(record);
            Badge {
                id,
                unlocked: value >= target,
                progress: value.min(target),
                target,
            }
        })
        .collect()
}

/// First badge still locked, in display order.
pub fn next_badge(record: &ProgressRecord) -> Option<Badge> {
    badges(record).into_iter().find(|b| !b.unlocked)
}
