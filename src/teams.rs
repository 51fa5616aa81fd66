use crate::builder::{RecordBuilder, SeasonDocuments};
use crate::config::{Config, StatsUrls};
use crate::conferences::SportsReferenceConferences;
use crate::error::{Result, ScraperError};
use crate::fetcher::{CachingFetcher, HttpFetcher};
use crate::frame::DataFrame;
use crate::season::{resolve_season, SystemClock};
use crate::team::{Team, FIELDS};
use crate::types::{Clock, ConferenceResolver, DocumentFetcher};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, instrument};

/// Collaborators a season build depends on.
#[derive(Clone)]
pub struct Sources {
    pub fetcher: Arc<dyn DocumentFetcher>,
    pub conferences: Arc<dyn ConferenceResolver>,
    pub clock: Arc<dyn Clock>,
    pub urls: StatsUrls,
}

impl Sources {
    pub fn new(
        fetcher: Arc<dyn DocumentFetcher>,
        conferences: Arc<dyn ConferenceResolver>,
        clock: Arc<dyn Clock>,
        urls: StatsUrls,
    ) -> Self {
        Self {
            fetcher,
            conferences,
            clock,
            urls,
        }
    }

    /// Live site sources: HTTP fetcher (cached when configured), conferences
    /// scraped through the same fetcher, and the system clock.
    pub fn from_config(config: &Config) -> Result<Self> {
        let http = HttpFetcher::new(&config.source)?;
        let fetcher: Arc<dyn DocumentFetcher> = if config.source.cache {
            Arc::new(CachingFetcher::new(http))
        } else {
            Arc::new(http)
        };
        let urls = config.stats_urls();
        let conferences = Arc::new(SportsReferenceConferences::new(
            fetcher.clone(),
            urls.clone(),
        ));
        Ok(Self::new(fetcher, conferences, Arc::new(SystemClock), urls))
    }
}

/// Every team of one season, in the order of the basic school stats table.
#[derive(Debug, Clone)]
pub struct Teams {
    season: u16,
    teams: Vec<Team>,
    by_abbreviation: HashMap<String, usize>,
}

impl Teams {
    /// Builds the full season. `season` defaults to the current one. Either
    /// every team is built or an error is returned.
    #[instrument(skip(sources))]
    pub async fn new(season: Option<u16>, sources: &Sources) -> Result<Self> {
        // The season check and the season documents share pages within a build
        let fetcher = CachingFetcher::new(sources.fetcher.clone());
        let season = resolve_season(season, sources.clock.as_ref(), &fetcher, &sources.urls).await;

        let (documents, conferences) = tokio::try_join!(
            SeasonDocuments::fetch(&fetcher, &sources.urls, season),
            sources.conferences.team_conference(season),
        )?;

        let builder = RecordBuilder::new(season, &documents, conferences)?;
        let teams = builder.build_all()?;
        info!(season, teams = teams.len(), "Season loaded");
        Ok(Self::from_records(season, teams))
    }

    pub fn from_records(season: u16, teams: Vec<Team>) -> Self {
        let by_abbreviation = teams
            .iter()
            .enumerate()
            .map(|(position, team)| (team.abbreviation.clone(), position))
            .collect();
        Self {
            season,
            teams,
            by_abbreviation,
        }
    }

    pub fn season(&self) -> u16 {
        self.season
    }

    /// Looks a team up by abbreviation, ignoring case and surrounding space.
    pub fn get(&self, abbreviation: &str) -> Result<&Team> {
        let key = abbreviation.trim().to_uppercase();
        self.by_abbreviation
            .get(&key)
            .map(|position| &self.teams[*position])
            .ok_or_else(|| ScraperError::UnknownTeam(abbreviation.to_string()))
    }

    pub fn contains(&self, abbreviation: &str) -> bool {
        self.get(abbreviation).is_ok()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Team> {
        self.teams.iter()
    }

    pub fn len(&self) -> usize {
        self.teams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }

    /// Every team as one frame, one row per team indexed by abbreviation.
    pub fn dataframes(&self) -> Result<DataFrame> {
        let mut frame = DataFrame::new(FIELDS);
        for team in &self.teams {
            frame.push_record(&team.abbreviation, team)?;
        }
        Ok(frame)
    }
}

impl<'a> IntoIterator for &'a Teams {
    type Item = &'a Team;
    type IntoIter = std::slice::Iter<'a, Team>;

    fn into_iter(self) -> Self::IntoIter {
        self.teams.iter()
    }
}
