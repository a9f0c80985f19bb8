use chrono::{Local, NaiveDate, NaiveDateTime, TimeDelta};

use crate::{
    error::{AppError, AppResult},
    models::{AppDetail, Ranked, RecentGame, RecentParams, ToolPayload},
};

use super::{genre_filter_passes, sort_descending_by, Recommender};

/// Store release date format, e.g. "Dec 10, 2020"
const RELEASE_DATE_FORMAT: &str = "%b %d, %Y";

/// Parses a store release date to midnight of that day
pub(crate) fn parse_release_date(text: &str) -> Option<NaiveDateTime> {
    NaiveDate::parse_from_str(text, RELEASE_DATE_FORMAT)
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

impl Recommender {
    /// Games released within the last `days` days
    pub async fn recent_releases(&self, params: RecentParams) -> ToolPayload<RecentParams, RecentGame> {
        let outcome = self.find_recent_releases(&params, Local::now().naive_local()).await;
        ToolPayload::from_outcome(params, outcome, "Recent release recommendation")
    }

    pub(crate) async fn find_recent_releases(
        &self,
        params: &RecentParams,
        now: NaiveDateTime,
    ) -> AppResult<Ranked<RecentGame>> {
        let cutoff = TimeDelta::try_days(i64::from(params.days))
            .and_then(|window| now.checked_sub_signed(window))
            .ok_or_else(|| {
                AppError::InvalidInput(format!(
                    "days={} is outside the supported date range",
                    params.days
                ))
            })?;

        let listings = self.listings().await;
        let sampled = self.sample_details(&listings, self.samples.recent).await;

        let mut recent_games: Vec<RecentGame> = sampled
            .iter()
            .filter_map(|(appid, detail)| recent_candidate(*appid, detail, params, cutoff))
            .collect();

        // Raw date text, so "Mar" sorts above "Dec" regardless of year
        sort_descending_by(&mut recent_games, |g| g.release_date.clone());

        tracing::info!(
            sampled = sampled.len(),
            matched = recent_games.len(),
            cutoff = %cutoff,
            "Recent releases ranked"
        );

        Ok(Ranked::truncate(recent_games, params.limit))
    }
}

fn recent_candidate(
    appid: u64,
    detail: &AppDetail,
    params: &RecentParams,
    cutoff: NaiveDateTime,
) -> Option<RecentGame> {
    let release_text = detail.release_date_text();
    if release_text.is_empty() {
        return None;
    }

    let Some(released) = parse_release_date(release_text) else {
        tracing::trace!(appid = appid, date = %release_text, "Unparseable release date");
        return None;
    };
    if released < cutoff {
        return None;
    }

    if !genre_filter_passes(detail, params.genre.as_deref()) {
        return None;
    }

    let recommendations = detail.recommendation_count();
    if params.min_rating.is_some_and(|min| recommendations < min) {
        return None;
    }

    Some(RecentGame {
        appid,
        name: detail.name().to_string(),
        release_date: release_text.to_string(),
        genres: detail.genre_names(),
        recommendations,
        price: detail.final_price_or_free(),
    })
}
