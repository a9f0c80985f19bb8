use crate::{
    error::AppResult,
    models::{AppDetail, Ranked, SubGenreGame, SubGenreParams, SubGenreSummary, ToolPayload},
};

use super::{sort_descending_by, Recommender};

/// A genre combination the store has no dedicated tag for
///
/// A game belongs to the sub-genre when its genres contain one `primary` and
/// one `secondary` tag, or when the space-joined genre list contains one of the
/// `phrases`. All comparisons are on lowercased genre text.
#[derive(Debug, Clone, Copy)]
pub struct SubGenre {
    pub label: &'static str,
    pub primary: &'static [&'static str],
    pub secondary: &'static [&'static str],
    pub phrases: &'static [&'static str],
}

pub const ACTION_RPG: SubGenre = SubGenre {
    label: "Action RPG",
    primary: &["action"],
    secondary: &["rpg", "role-playing"],
    phrases: &["action rpg", "action role-playing"],
};

impl SubGenre {
    pub fn matches(&self, genres: &[String]) -> bool {
        let lowered: Vec<String> = genres.iter().map(|g| g.to_lowercase()).collect();
        let has_any = |tags: &[&str]| lowered.iter().any(|g| tags.contains(&g.as_str()));

        if has_any(self.primary) && has_any(self.secondary) {
            return true;
        }

        let joined = lowered.join(" ");
        self.phrases.iter().any(|phrase| joined.contains(phrase))
    }
}

impl Recommender {
    /// Most recommended games of the action-RPG sub-genre
    pub async fn recommend_action_rpg_games(
        &self,
        params: SubGenreParams,
    ) -> ToolPayload<SubGenreSummary, SubGenreGame> {
        self.recommend_subgenre(&ACTION_RPG, params).await
    }

    pub async fn recommend_subgenre(
        &self,
        subgenre: &SubGenre,
        params: SubGenreParams,
    ) -> ToolPayload<SubGenreSummary, SubGenreGame> {
        let outcome = self.find_subgenre_games(subgenre, &params).await;
        let summary = SubGenreSummary {
            genre: subgenre.label.to_string(),
        };
        ToolPayload::from_outcome(summary, outcome, subgenre.label)
    }

    async fn find_subgenre_games(
        &self,
        subgenre: &SubGenre,
        params: &SubGenreParams,
    ) -> AppResult<Ranked<SubGenreGame>> {
        let listings = self.listings().await;
        let sampled = self.sample_details(&listings, self.samples.subgenre).await;

        let mut matches: Vec<SubGenreGame> = sampled
            .iter()
            .filter_map(|(appid, detail)| subgenre_candidate(*appid, detail, subgenre))
            .collect();

        sort_descending_by(&mut matches, |g| g.recommendations);

        tracing::info!(
            subgenre = subgenre.label,
            sampled = sampled.len(),
            matched = matches.len(),
            "Sub-genre recommendations ranked"
        );

        Ok(Ranked::truncate(matches, params.limit))
    }
}

fn subgenre_candidate(appid: u64, detail: &AppDetail, subgenre: &SubGenre) -> Option<SubGenreGame> {
    let genres = detail.genre_names();
    if !subgenre.matches(&genres) {
        return None;
    }

    Some(SubGenreGame {
        appid,
        name: detail.name().to_string(),
        genres,
        recommendations: detail.recommendation_count(),
        price: detail.final_price_or_free(),
        release_date: detail.release_date_text().to_string(),
    })
}
