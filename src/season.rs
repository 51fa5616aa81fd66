use crate::config::StatsUrls;
use crate::constants::SEASON_START_MONTH;
use crate::types::{Clock, DocumentFetcher};
use chrono::{Datelike, Local, NaiveDate};
use tracing::{debug, info};

pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Clock pinned to one date, for replaying a past season.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// Season (named after the year it ends in) that `today` belongs to. The
/// month before the opener already counts towards the new season.
pub fn find_year_for_season(today: NaiveDate) -> u16 {
    let year = today.year() as u16;
    if today.month() >= SEASON_START_MONTH - 1 {
        year + 1
    } else {
        year
    }
}

/// Picks the season to build. An explicit request is taken as is. Otherwise
/// the clock decides, stepping back one season when the computed season's
/// stats page is not published yet but the previous one is.
pub async fn resolve_season<F>(
    requested: Option<u16>,
    clock: &dyn Clock,
    fetcher: &F,
    urls: &StatsUrls,
) -> u16
where
    F: DocumentFetcher + ?Sized,
{
    if let Some(season) = requested {
        return season;
    }

    let season = find_year_for_season(clock.today());
    if page_exists(fetcher, &urls.basic_stats(season)).await {
        return season;
    }

    let previous = season - 1;
    if page_exists(fetcher, &urls.basic_stats(previous)).await {
        info!(season, previous, "Current season not published, using previous");
        return previous;
    }
    season
}

async fn page_exists<F>(fetcher: &F, url: &str) -> bool
where
    F: DocumentFetcher + ?Sized,
{
    match fetcher.fetch(url).await {
        Ok(response) => response.is_success(),
        Err(e) => {
            debug!(url, error = %e, "season page check failed");
            false
        }
    }
}
