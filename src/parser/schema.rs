//! Positional column layouts for the four season tables.
//!
//! Positions count every `th`/`td` cell of a data row from the left, so the
//! rank header cell is position 0 and the school cell is position 1. Spacer
//! columns the site renders between column groups occupy a position too and
//! are simply not listed.

use crate::constants::{
    ADVANCED_OPPONENT_STATS_TABLE, ADVANCED_STATS_TABLE, BASIC_OPPONENT_STATS_TABLE,
    BASIC_STATS_TABLE,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// Non-negative integer count
    Count,
    /// Percentage, rate or rating
    Float,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub position: usize,
    pub field: &'static str,
    pub kind: ValueKind,
}

const fn count(position: usize, field: &'static str) -> Column {
    Column {
        position,
        field,
        kind: ValueKind::Count,
    }
}

const fn float(position: usize, field: &'static str) -> Column {
    Column {
        position,
        field,
        kind: ValueKind::Float,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSchema {
    pub name: &'static str,
    pub selector: &'static str,
    /// Cell holding the school link
    pub key_position: usize,
    pub columns: &'static [Column],
}

/// The four statistic tables that make up a season.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableKind {
    BasicSchool,
    BasicOpponent,
    AdvancedSchool,
    AdvancedOpponent,
}

impl TableKind {
    pub const ALL: [TableKind; 4] = [
        TableKind::BasicSchool,
        TableKind::BasicOpponent,
        TableKind::AdvancedSchool,
        TableKind::AdvancedOpponent,
    ];

    pub fn schema(self) -> &'static TableSchema {
        match self {
            TableKind::BasicSchool => &BASIC_SCHOOL,
            TableKind::BasicOpponent => &BASIC_OPPONENT,
            TableKind::AdvancedSchool => &ADVANCED_SCHOOL,
            TableKind::AdvancedOpponent => &ADVANCED_OPPONENT,
        }
    }
}

pub static BASIC_SCHOOL: TableSchema = TableSchema {
    name: "basic school stats",
    selector: BASIC_STATS_TABLE,
    key_position: 1,
    columns: &[
        count(2, "games_played"),
        count(3, "wins"),
        count(4, "losses"),
        float(5, "win_percentage"),
        float(6, "simple_rating_system"),
        float(7, "strength_of_schedule"),
        count(9, "conference_wins"),
        count(10, "conference_losses"),
        count(12, "home_wins"),
        count(13, "home_losses"),
        count(15, "away_wins"),
        count(16, "away_losses"),
        count(18, "points"),
        count(19, "opp_points"),
        count(21, "minutes_played"),
        count(22, "field_goals"),
        count(23, "field_goal_attempts"),
        float(24, "field_goal_percentage"),
        count(25, "three_point_field_goals"),
        count(26, "three_point_field_goal_attempts"),
        float(27, "three_point_field_goal_percentage"),
        count(28, "free_throws"),
        count(29, "free_throw_attempts"),
        float(30, "free_throw_percentage"),
        count(31, "offensive_rebounds"),
        count(32, "total_rebounds"),
        count(33, "assists"),
        count(34, "steals"),
        count(35, "blocks"),
        count(36, "turnovers"),
        count(37, "personal_fouls"),
    ],
};

// Same leading record columns as the school table; only the opponent
// shooting block is taken from here.
pub static BASIC_OPPONENT: TableSchema = TableSchema {
    name: "basic opponent stats",
    selector: BASIC_OPPONENT_STATS_TABLE,
    key_position: 1,
    columns: &[
        count(22, "opp_field_goals"),
        count(23, "opp_field_goal_attempts"),
        float(24, "opp_field_goal_percentage"),
        count(25, "opp_three_point_field_goals"),
        count(26, "opp_three_point_field_goal_attempts"),
        float(27, "opp_three_point_field_goal_percentage"),
        count(28, "opp_free_throws"),
        count(29, "opp_free_throw_attempts"),
        float(30, "opp_free_throw_percentage"),
        count(31, "opp_offensive_rebounds"),
        count(32, "opp_total_rebounds"),
        count(33, "opp_assists"),
        count(34, "opp_steals"),
        count(35, "opp_blocks"),
        count(36, "opp_turnovers"),
        count(37, "opp_personal_fouls"),
    ],
};

pub static ADVANCED_SCHOOL: TableSchema = TableSchema {
    name: "advanced school stats",
    selector: ADVANCED_STATS_TABLE,
    key_position: 1,
    columns: &[
        float(21, "pace"),
        float(22, "offensive_rating"),
        float(23, "free_throw_attempt_rate"),
        float(24, "three_point_attempt_rate"),
        float(25, "true_shooting_percentage"),
        float(26, "total_rebound_percentage"),
        float(27, "assist_percentage"),
        float(28, "steal_percentage"),
        float(29, "block_percentage"),
        float(31, "effective_field_goal_percentage"),
        float(32, "turnover_percentage"),
        float(33, "offensive_rebound_percentage"),
        float(34, "free_throws_per_field_goal_attempt"),
    ],
};

// Pace at position 21 repeats the school table's value and is skipped.
pub static ADVANCED_OPPONENT: TableSchema = TableSchema {
    name: "advanced opponent stats",
    selector: ADVANCED_OPPONENT_STATS_TABLE,
    key_position: 1,
    columns: &[
        float(22, "opp_offensive_rating"),
        float(23, "opp_free_throw_attempt_rate"),
        float(24, "opp_three_point_attempt_rate"),
        float(25, "opp_true_shooting_percentage"),
        float(26, "opp_total_rebound_percentage"),
        float(27, "opp_assist_percentage"),
        float(28, "opp_steal_percentage"),
        float(29, "opp_block_percentage"),
        float(31, "opp_effective_field_goal_percentage"),
        float(32, "opp_turnover_percentage"),
        float(33, "opp_offensive_rebound_percentage"),
        float(34, "opp_free_throws_per_field_goal_attempt"),
    ],
};
