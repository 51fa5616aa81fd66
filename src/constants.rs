/// Source URL and selector constants shared by the fetch and parse layers.

pub const DEFAULT_BASE_URL: &str = "https://www.sports-reference.com/cbb";
pub const DEFAULT_USER_AGENT: &str = "ncaab_stats/0.1 (+https://www.sports-reference.com/cbb)";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

// Season pages, relative to the base URL. `{year}` is the season's ending year.
pub const BASIC_STATS_PATH: &str = "seasons/{year}-school-stats.html";
pub const BASIC_OPPONENT_STATS_PATH: &str = "seasons/{year}-opponent-stats.html";
pub const ADVANCED_STATS_PATH: &str = "seasons/{year}-advanced-school-stats.html";
pub const ADVANCED_OPPONENT_STATS_PATH: &str = "seasons/{year}-advanced-opponent-stats.html";
pub const SEASON_SUMMARY_PATH: &str = "seasons/{year}.html";
pub const CONFERENCE_PATH: &str = "conferences/{conference}/{year}.html";

// Table selectors inside the season pages
pub const BASIC_STATS_TABLE: &str = "table#basic_school_stats";
pub const BASIC_OPPONENT_STATS_TABLE: &str = "table#basic_opp_stats";
pub const ADVANCED_STATS_TABLE: &str = "table#adv_school_stats";
pub const ADVANCED_OPPONENT_STATS_TABLE: &str = "table#adv_opp_stats";
pub const CONFERENCE_SUMMARY_TABLE: &str = "table#conference-summary";
pub const CONFERENCE_STANDINGS_TABLE: &str = "table#standings";

/// First month of a new season. Seasons are named after the year they end in.
pub const SEASON_START_MONTH: u32 = 11;

/// Marker sports-reference appends to tournament teams in the school column.
pub const TOURNAMENT_MARKER: &str = "NCAA";
