use crate::config::StatsUrls;
use crate::constants::{CONFERENCE_STANDINGS_TABLE, CONFERENCE_SUMMARY_TABLE};
use crate::error::Result;
use crate::fetcher::fetch_document;
use crate::parser::{conference_slug, links_in, school_slug};
use crate::types::{ConferenceMap, ConferenceResolver, DocumentFetcher};
use tracing::{debug, info, instrument};

/// Fixed mapping, independent of the season asked for.
#[derive(Debug, Clone, Default)]
pub struct StaticConferences {
    teams: ConferenceMap,
}

impl StaticConferences {
    pub fn new<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let teams = entries
            .into_iter()
            .map(|(team, conference)| (team.as_ref().to_lowercase(), conference.into()))
            .collect();
        Self { teams }
    }
}

#[async_trait::async_trait]
impl ConferenceResolver for StaticConferences {
    async fn team_conference(&self, _season: u16) -> Result<ConferenceMap> {
        Ok(self.teams.clone())
    }
}

/// Reads conference membership from the season summary page and each
/// conference's standings page.
pub struct SportsReferenceConferences<F> {
    fetcher: F,
    urls: StatsUrls,
}

impl<F: DocumentFetcher> SportsReferenceConferences<F> {
    pub fn new(fetcher: F, urls: StatsUrls) -> Self {
        Self { fetcher, urls }
    }

    async fn conferences(&self, season: u16) -> Result<Vec<String>> {
        let page = fetch_document(&self.fetcher, &self.urls.season_summary(season)).await?;
        let mut slugs: Vec<String> = Vec::new();
        for href in links_in(&page, CONFERENCE_SUMMARY_TABLE)? {
            if let Some(slug) = conference_slug(&href) {
                if !slugs.contains(&slug) {
                    slugs.push(slug);
                }
            }
        }
        Ok(slugs)
    }

    async fn members(&self, conference: &str, season: u16) -> Result<Vec<String>> {
        let page =
            fetch_document(&self.fetcher, &self.urls.conference(conference, season)).await?;
        let members = links_in(&page, CONFERENCE_STANDINGS_TABLE)?
            .iter()
            .filter_map(|href| school_slug(href))
            .collect();
        Ok(members)
    }
}

#[async_trait::async_trait]
impl<F: DocumentFetcher> ConferenceResolver for SportsReferenceConferences<F> {
    #[instrument(skip(self))]
    async fn team_conference(&self, season: u16) -> Result<ConferenceMap> {
        let mut teams = ConferenceMap::new();
        for conference in self.conferences(season).await? {
            let members = self.members(&conference, season).await?;
            debug!(conference = %conference, teams = members.len(), "conference standings");
            for team in members {
                teams.insert(team, conference.clone());
            }
        }
        info!("Resolved conferences for {} teams", teams.len());
        Ok(teams)
    }
}
