//! Per-team season record and its single-row tabular form.

use crate::error::Result;
use crate::frame::DataFrame;
use crate::parser::{FieldMap, ParsedRow};
use serde::Serialize;

/// Every field of [`Team`], in export column order.
pub const FIELDS: &[&str] = &[
    "conference",
    "abbreviation",
    "name",
    "games_played",
    "wins",
    "losses",
    "win_percentage",
    "simple_rating_system",
    "strength_of_schedule",
    "conference_wins",
    "conference_losses",
    "home_wins",
    "home_losses",
    "away_wins",
    "away_losses",
    "points",
    "opp_points",
    "minutes_played",
    "field_goals",
    "field_goal_attempts",
    "field_goal_percentage",
    "three_point_field_goals",
    "three_point_field_goal_attempts",
    "three_point_field_goal_percentage",
    "two_point_field_goals",
    "two_point_field_goal_attempts",
    "two_point_field_goal_percentage",
    "free_throws",
    "free_throw_attempts",
    "free_throw_percentage",
    "offensive_rebounds",
    "total_rebounds",
    "assists",
    "steals",
    "blocks",
    "turnovers",
    "personal_fouls",
    "opp_field_goals",
    "opp_field_goal_attempts",
    "opp_field_goal_percentage",
    "opp_three_point_field_goals",
    "opp_three_point_field_goal_attempts",
    "opp_three_point_field_goal_percentage",
    "opp_two_point_field_goals",
    "opp_two_point_field_goal_attempts",
    "opp_two_point_field_goal_percentage",
    "opp_free_throws",
    "opp_free_throw_attempts",
    "opp_free_throw_percentage",
    "opp_offensive_rebounds",
    "opp_total_rebounds",
    "opp_assists",
    "opp_steals",
    "opp_blocks",
    "opp_turnovers",
    "opp_personal_fouls",
    "pace",
    "offensive_rating",
    "free_throw_attempt_rate",
    "three_point_attempt_rate",
    "true_shooting_percentage",
    "total_rebound_percentage",
    "assist_percentage",
    "steal_percentage",
    "block_percentage",
    "effective_field_goal_percentage",
    "turnover_percentage",
    "offensive_rebound_percentage",
    "free_throws_per_field_goal_attempt",
    "opp_offensive_rating",
    "opp_free_throw_attempt_rate",
    "opp_three_point_attempt_rate",
    "opp_true_shooting_percentage",
    "opp_total_rebound_percentage",
    "opp_assist_percentage",
    "opp_steal_percentage",
    "opp_block_percentage",
    "opp_effective_field_goal_percentage",
    "opp_turnover_percentage",
    "opp_offensive_rebound_percentage",
    "opp_free_throws_per_field_goal_attempt",
];

/// One team's statistics for one season. Numeric fields are `None` when the
/// source left the cell empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Team {
    pub conference: String,
    pub abbreviation: String,
    pub name: String,
    pub games_played: Option<u32>,
    pub wins: Option<u32>,
    pub losses: Option<u32>,
    pub win_percentage: Option<f64>,
    pub simple_rating_system: Option<f64>,
    pub strength_of_schedule: Option<f64>,
    pub conference_wins: Option<u32>,
    pub conference_losses: Option<u32>,
    pub home_wins: Option<u32>,
    pub home_losses: Option<u32>,
    pub away_wins: Option<u32>,
    pub away_losses: Option<u32>,
    pub points: Option<u32>,
    pub opp_points: Option<u32>,
    pub minutes_played: Option<u32>,
    pub field_goals: Option<u32>,
    pub field_goal_attempts: Option<u32>,
    pub field_goal_percentage: Option<f64>,
    pub three_point_field_goals: Option<u32>,
    pub three_point_field_goal_attempts: Option<u32>,
    pub three_point_field_goal_percentage: Option<f64>,
    pub two_point_field_goals: Option<u32>,
    pub two_point_field_goal_attempts: Option<u32>,
    pub two_point_field_goal_percentage: Option<f64>,
    pub free_throws: Option<u32>,
    pub free_throw_attempts: Option<u32>,
    pub free_throw_percentage: Option<f64>,
    pub offensive_rebounds: Option<u32>,
    pub total_rebounds: Option<u32>,
    pub assists: Option<u32>,
    pub steals: Option<u32>,
    pub blocks: Option<u32>,
    pub turnovers: Option<u32>,
    pub personal_fouls: Option<u32>,
    pub opp_field_goals: Option<u32>,
    pub opp_field_goal_attempts: Option<u32>,
    pub opp_field_goal_percentage: Option<f64>,
    pub opp_three_point_field_goals: Option<u32>,
    pub opp_three_point_field_goal_attempts: Option<u32>,
    pub opp_three_point_field_goal_percentage: Option<f64>,
    pub opp_two_point_field_goals: Option<u32>,
    pub opp_two_point_field_goal_attempts: Option<u32>,
    pub opp_two_point_field_goal_percentage: Option<f64>,
    pub opp_free_throws: Option<u32>,
    pub opp_free_throw_attempts: Option<u32>,
    pub opp_free_throw_percentage: Option<f64>,
    pub opp_offensive_rebounds: Option<u32>,
    pub opp_total_rebounds: Option<u32>,
    pub opp_assists: Option<u32>,
    pub opp_steals: Option<u32>,
    pub opp_blocks: Option<u32>,
    pub opp_turnovers: Option<u32>,
    pub opp_personal_fouls: Option<u32>,
    pub pace: Option<f64>,
    pub offensive_rating: Option<f64>,
    pub free_throw_attempt_rate: Option<f64>,
    pub three_point_attempt_rate: Option<f64>,
    pub true_shooting_percentage: Option<f64>,
    pub total_rebound_percentage: Option<f64>,
    pub assist_percentage: Option<f64>,
    pub steal_percentage: Option<f64>,
    pub block_percentage: Option<f64>,
    pub effective_field_goal_percentage: Option<f64>,
    pub turnover_percentage: Option<f64>,
    pub offensive_rebound_percentage: Option<f64>,
    pub free_throws_per_field_goal_attempt: Option<f64>,
    pub opp_offensive_rating: Option<f64>,
    pub opp_free_throw_attempt_rate: Option<f64>,
    pub opp_three_point_attempt_rate: Option<f64>,
    pub opp_true_shooting_percentage: Option<f64>,
    pub opp_total_rebound_percentage: Option<f64>,
    pub opp_assist_percentage: Option<f64>,
    pub opp_steal_percentage: Option<f64>,
    pub opp_block_percentage: Option<f64>,
    pub opp_effective_field_goal_percentage: Option<f64>,
    pub opp_turnover_percentage: Option<f64>,
    pub opp_offensive_rebound_percentage: Option<f64>,
    pub opp_free_throws_per_field_goal_attempt: Option<f64>,
}

/// The four parsed rows for one team.
pub struct TeamRows<'a> {
    pub basic: &'a ParsedRow,
    pub basic_opponent: &'a ParsedRow,
    pub advanced: &'a ParsedRow,
    pub advanced_opponent: &'a ParsedRow,
}

impl Team {
    /// Unions the four rows into a record. Each row carries a disjoint set of
    /// fields; the basic school row supplies the name and abbreviation.
    pub fn from_rows(rows: TeamRows<'_>, conference: impl Into<String>) -> Self {
        let mut fields = FieldMap::new();
        for row in [
            rows.basic,
            rows.basic_opponent,
            rows.advanced,
            rows.advanced_opponent,
        ] {
            fields.extend(row.fields.iter().map(|(field, value)| (*field, *value)));
        }
        let count = |field: &str| fields.get(field).and_then(|value| value.as_count());
        let float = |field: &str| fields.get(field).and_then(|value| value.as_float());

        let mut team = Team {
            conference: conference.into(),
            abbreviation: rows.basic.abbreviation.clone(),
            name: rows.basic.name.clone(),
            games_played: count("games_played"),
            wins: count("wins"),
            losses: count("losses"),
            win_percentage: float("win_percentage"),
            simple_rating_system: float("simple_rating_system"),
            strength_of_schedule: float("strength_of_schedule"),
            conference_wins: count("conference_wins"),
            conference_losses: count("conference_losses"),
            home_wins: count("home_wins"),
            home_losses: count("home_losses"),
            away_wins: count("away_wins"),
            away_losses: count("away_losses"),
            points: count("points"),
            opp_points: count("opp_points"),
            minutes_played: count("minutes_played"),
            field_goals: count("field_goals"),
            field_goal_attempts: count("field_goal_attempts"),
            field_goal_percentage: float("field_goal_percentage"),
            three_point_field_goals: count("three_point_field_goals"),
            three_point_field_goal_attempts: count("three_point_field_goal_attempts"),
            three_point_field_goal_percentage: float("three_point_field_goal_percentage"),
            two_point_field_goals: None,
            two_point_field_goal_attempts: None,
            two_point_field_goal_percentage: None,
            free_throws: count("free_throws"),
            free_throw_attempts: count("free_throw_attempts"),
            free_throw_percentage: float("free_throw_percentage"),
            offensive_rebounds: count("offensive_rebounds"),
            total_rebounds: count("total_rebounds"),
            assists: count("assists"),
            steals: count("steals"),
            blocks: count("blocks"),
            turnovers: count("turnovers"),
            personal_fouls: count("personal_fouls"),
            opp_field_goals: count("opp_field_goals"),
            opp_field_goal_attempts: count("opp_field_goal_attempts"),
            opp_field_goal_percentage: float("opp_field_goal_percentage"),
            opp_three_point_field_goals: count("opp_three_point_field_goals"),
            opp_three_point_field_goal_attempts: count("opp_three_point_field_goal_attempts"),
            opp_three_point_field_goal_percentage: float("opp_three_point_field_goal_percentage"),
            opp_two_point_field_goals: None,
            opp_two_point_field_goal_attempts: None,
            opp_two_point_field_goal_percentage: None,
            opp_free_throws: count("opp_free_throws"),
            opp_free_throw_attempts: count("opp_free_throw_attempts"),
            opp_free_throw_percentage: float("opp_free_throw_percentage"),
            opp_offensive_rebounds: count("opp_offensive_rebounds"),
            opp_total_rebounds: count("opp_total_rebounds"),
            opp_assists: count("opp_assists"),
            opp_steals: count("opp_steals"),
            opp_blocks: count("opp_blocks"),
            opp_turnovers: count("opp_turnovers"),
            opp_personal_fouls: count("opp_personal_fouls"),
            pace: float("pace"),
            offensive_rating: float("offensive_rating"),
            free_throw_attempt_rate: float("free_throw_attempt_rate"),
            three_point_attempt_rate: float("three_point_attempt_rate"),
            true_shooting_percentage: float("true_shooting_percentage"),
            total_rebound_percentage: float("total_rebound_percentage"),
            assist_percentage: float("assist_percentage"),
            steal_percentage: float("steal_percentage"),
            block_percentage: float("block_percentage"),
            effective_field_goal_percentage: float("effective_field_goal_percentage"),
            turnover_percentage: float("turnover_percentage"),
            offensive_rebound_percentage: float("offensive_rebound_percentage"),
            free_throws_per_field_goal_attempt: float("free_throws_per_field_goal_attempt"),
            opp_offensive_rating: float("opp_offensive_rating"),
            opp_free_throw_attempt_rate: float("opp_free_throw_attempt_rate"),
            opp_three_point_attempt_rate: float("opp_three_point_attempt_rate"),
            opp_true_shooting_percentage: float("opp_true_shooting_percentage"),
            opp_total_rebound_percentage: float("opp_total_rebound_percentage"),
            opp_assist_percentage: float("opp_assist_percentage"),
            opp_steal_percentage: float("opp_steal_percentage"),
            opp_block_percentage: float("opp_block_percentage"),
            opp_effective_field_goal_percentage: float("opp_effective_field_goal_percentage"),
            opp_turnover_percentage: float("opp_turnover_percentage"),
            opp_offensive_rebound_percentage: float("opp_offensive_rebound_percentage"),
            opp_free_throws_per_field_goal_attempt: float("opp_free_throws_per_field_goal_attempt"),
        };
        team.derive_two_point();
        team
    }

    // The basic tables only carry totals and threes; twos are the difference.
    fn derive_two_point(&mut self) {
        self.two_point_field_goals = difference(self.field_goals, self.three_point_field_goals);
        self.two_point_field_goal_attempts = difference(
            self.field_goal_attempts,
            self.three_point_field_goal_attempts,
        );
        self.two_point_field_goal_percentage =
            ratio(self.two_point_field_goals, self.two_point_field_goal_attempts);

        self.opp_two_point_field_goals =
            difference(self.opp_field_goals, self.opp_three_point_field_goals);
        self.opp_two_point_field_goal_attempts = difference(
            self.opp_field_goal_attempts,
            self.opp_three_point_field_goal_attempts,
        );
        self.opp_two_point_field_goal_percentage = ratio(
            self.opp_two_point_field_goals,
            self.opp_two_point_field_goal_attempts,
        );
    }

    /// Record-level sums that should hold for a complete season line.
    pub fn consistency_issues(&self) -> Vec<String> {
        let mut issues = Vec::new();
        let (Some(games), Some(wins), Some(losses)) = (self.games_played, self.wins, self.losses)
        else {
            return issues;
        };

        if wins + losses != games {
            issues.push(format!("wins {wins} + losses {losses} != games {games}"));
        }
        if let (Some(cw), Some(cl)) = (self.conference_wins, self.conference_losses) {
            if cw + cl > games {
                issues.push(format!("conference record {cw}-{cl} exceeds {games} games"));
            }
        }
        let venues = [self.home_wins, self.home_losses, self.away_wins, self.away_losses];
        let venue_games: u32 = venues.iter().flatten().sum();
        if venue_games > games {
            issues.push(format!("home and away games {venue_games} exceed {games} games"));
        }
        issues.extend(self.percentage_issues());
        issues
    }

    // Rate-style advanced metrics (pace, ratings, rebound/assist/steal/block/
    // turnover percentages) are on other scales and are not listed here.
    fn bounded_percentages(&self) -> [(&'static str, Option<f64>); 19] {
        [
            ("win_percentage", self.win_percentage),
            ("field_goal_percentage", self.field_goal_percentage),
            ("three_point_field_goal_percentage", self.three_point_field_goal_percentage),
            ("two_point_field_goal_percentage", self.two_point_field_goal_percentage),
            ("free_throw_percentage", self.free_throw_percentage),
            ("opp_field_goal_percentage", self.opp_field_goal_percentage),
            ("opp_three_point_field_goal_percentage", self.opp_three_point_field_goal_percentage),
            ("opp_two_point_field_goal_percentage", self.opp_two_point_field_goal_percentage),
            ("opp_free_throw_percentage", self.opp_free_throw_percentage),
            ("free_throw_attempt_rate", self.free_throw_attempt_rate),
            ("three_point_attempt_rate", self.three_point_attempt_rate),
            ("true_shooting_percentage", self.true_shooting_percentage),
            ("effective_field_goal_percentage", self.effective_field_goal_percentage),
            ("free_throws_per_field_goal_attempt", self.free_throws_per_field_goal_attempt),
            ("opp_free_throw_attempt_rate", self.opp_free_throw_attempt_rate),
            ("opp_three_point_attempt_rate", self.opp_three_point_attempt_rate),
            ("opp_true_shooting_percentage", self.opp_true_shooting_percentage),
            ("opp_effective_field_goal_percentage", self.opp_effective_field_goal_percentage),
            ("opp_free_throws_per_field_goal_attempt", self.opp_free_throws_per_field_goal_attempt),
        ]
    }

    /// Percentages that fall outside [0, 1]. Missing values are skipped.
    fn percentage_issues(&self) -> Vec<String> {
        self.bounded_percentages()
            .into_iter()
            .filter_map(|(field, value)| Some((field, value?)))
            .filter(|(_, value)| !(0.0..=1.0).contains(value))
            .map(|(field, value)| format!("{field} {value} outside [0, 1]"))
            .collect()
    }

    /// This record as a one-row frame indexed by abbreviation.
    pub fn dataframe(&self) -> Result<DataFrame> {
        let mut frame = DataFrame::new(FIELDS);
        frame.push_record(&self.abbreviation, self)?;
        Ok(frame)
    }
}

fn difference(total: Option<u32>, part: Option<u32>) -> Option<u32> {
    total?.checked_sub(part?)
}

fn ratio(made: Option<u32>, attempts: Option<u32>) -> Option<f64> {
    let attempts = attempts.filter(|attempts| *attempts > 0)?;
    let value = f64::from(made?) / f64::from(attempts);
    Some((value * 1000.0).round() / 1000.0)
}
