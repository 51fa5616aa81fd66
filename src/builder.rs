use crate::config::StatsUrls;
use crate::error::{Result, ScraperError};
use crate::fetcher::fetch_document;
use crate::parser::{parse_document, ParsedRow, TableKind};
use crate::team::{Team, TeamRows};
use crate::types::{ConferenceMap, DocumentFetcher};
use std::collections::HashMap;
use tracing::{debug, info, instrument, warn};

/// The four season pages, fetched as a unit.
#[derive(Debug, Clone)]
pub struct SeasonDocuments {
    pub basic: String,
    pub basic_opponent: String,
    pub advanced: String,
    pub advanced_opponent: String,
}

impl SeasonDocuments {
    /// Fetches all four pages concurrently. Fails if any one of them fails.
    #[instrument(skip(fetcher, urls))]
    pub async fn fetch<F>(fetcher: &F, urls: &StatsUrls, season: u16) -> Result<Self>
    where
        F: DocumentFetcher + ?Sized,
    {
        let (basic_url, basic_opponent_url, advanced_url, advanced_opponent_url) = (
            urls.basic_stats(season),
            urls.basic_opponent_stats(season),
            urls.advanced_stats(season),
            urls.advanced_opponent_stats(season),
        );
        let (basic, basic_opponent, advanced, advanced_opponent) = tokio::try_join!(
            fetch_document(fetcher, &basic_url),
            fetch_document(fetcher, &basic_opponent_url),
            fetch_document(fetcher, &advanced_url),
            fetch_document(fetcher, &advanced_opponent_url),
        )?;
        debug!("Fetched all season documents");
        Ok(Self {
            basic,
            basic_opponent,
            advanced,
            advanced_opponent,
        })
    }

    fn document(&self, kind: TableKind) -> &str {
        match kind {
            TableKind::BasicSchool => &self.basic,
            TableKind::BasicOpponent => &self.basic_opponent,
            TableKind::AdvancedSchool => &self.advanced,
            TableKind::AdvancedOpponent => &self.advanced_opponent,
        }
    }
}

struct ParsedTable {
    kind: TableKind,
    rows: HashMap<String, ParsedRow>,
}

impl ParsedTable {
    fn parse(documents: &SeasonDocuments, kind: TableKind) -> Result<(Self, Vec<String>)> {
        let parsed = parse_document(documents.document(kind), kind.schema())?;
        let mut order = Vec::with_capacity(parsed.len());
        let mut rows = HashMap::with_capacity(parsed.len());
        for row in parsed {
            if rows.contains_key(&row.abbreviation) {
                warn!(
                    table = kind.schema().name,
                    abbreviation = %row.abbreviation,
                    "duplicate row ignored"
                );
                continue;
            }
            order.push(row.abbreviation.clone());
            rows.insert(row.abbreviation.clone(), row);
        }
        Ok((Self { kind, rows }, order))
    }

    fn row(&self, abbreviation: &str) -> Result<&ParsedRow> {
        self.rows
            .get(abbreviation)
            .ok_or_else(|| ScraperError::MissingRow {
                table: self.kind.schema().name,
                abbreviation: abbreviation.to_string(),
            })
    }
}

/// Joins the parsed season tables with the conference mapping.
pub struct RecordBuilder {
    season: u16,
    roster: Vec<String>,
    basic: ParsedTable,
    basic_opponent: ParsedTable,
    advanced: ParsedTable,
    advanced_opponent: ParsedTable,
    conferences: ConferenceMap,
}

impl RecordBuilder {
    /// Parses all four documents up front; a missing table, or a basic school
    /// table without team rows, fails here.
    pub fn new(season: u16, documents: &SeasonDocuments, conferences: ConferenceMap) -> Result<Self> {
        let (basic, roster) = ParsedTable::parse(documents, TableKind::BasicSchool)?;
        if roster.is_empty() {
            return Err(ScraperError::EmptyTable {
                table: TableKind::BasicSchool.schema().name,
            });
        }
        let (basic_opponent, _) = ParsedTable::parse(documents, TableKind::BasicOpponent)?;
        let (advanced, _) = ParsedTable::parse(documents, TableKind::AdvancedSchool)?;
        let (advanced_opponent, _) = ParsedTable::parse(documents, TableKind::AdvancedOpponent)?;
        debug!(season, teams = roster.len(), "Parsed season tables");

        Ok(Self {
            season,
            roster,
            basic,
            basic_opponent,
            advanced,
            advanced_opponent,
            conferences,
        })
    }

    pub fn season(&self) -> u16 {
        self.season
    }

    /// Abbreviations in basic school table order.
    pub fn roster(&self) -> &[String] {
        &self.roster
    }

    pub fn build(&self, abbreviation: &str) -> Result<Team> {
        let rows = TeamRows {
            basic: self.basic.row(abbreviation)?,
            basic_opponent: self.basic_opponent.row(abbreviation)?,
            advanced: self.advanced.row(abbreviation)?,
            advanced_opponent: self.advanced_opponent.row(abbreviation)?,
        };
        let conference = self
            .conferences
            .get(&abbreviation.to_lowercase())
            .filter(|conference| !conference.is_empty())
            .ok_or_else(|| ScraperError::UnresolvedConference {
                abbreviation: abbreviation.to_string(),
                season: self.season,
            })?;

        let team = Team::from_rows(rows, conference.clone());
        for issue in team.consistency_issues() {
            warn!(abbreviation, issue = %issue, "inconsistent season line");
        }
        Ok(team)
    }

    /// Builds every roster team in order; the first failure aborts.
    pub fn build_all(&self) -> Result<Vec<Team>> {
        let teams = self
            .roster
            .iter()
            .map(|abbreviation| self.build(abbreviation))
            .collect::<Result<Vec<_>>>()?;
        info!(season = self.season, teams = teams.len(), "Built team records");
        Ok(teams)
    }
}
