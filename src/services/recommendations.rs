use std::collections::HashMap;

use crate::models::{Recommendation, Strategy, User, Video};

use super::{
    catalog::Catalog,
    ordering::{self, truncated_cmp},
    render_list,
};

fn cannot_apply(strategy: Strategy) -> String {
    format!("{} cannot be applied", strategy)
}

fn found(strategy: Strategy, title: &str) -> String {
    format!("{} result: {}", strategy, title)
}

/// Produces a recommendation for one user.
///
/// Every failure, including an unknown user or a standard user asking for a
/// premium strategy, renders as `<Strategy> cannot be applied`.
pub fn execute(catalog: &Catalog, recommendation: &Recommendation) -> String {
    let strategy = recommendation.strategy;
    let Some(user) = catalog.user(&recommendation.username) else {
        tracing::debug!(username = %recommendation.username, "Recommendation for unknown user");
        return cannot_apply(strategy);
    };

    if strategy.is_premium_only() && !user.is_premium() {
        return cannot_apply(strategy);
    }

    let outcome = match strategy {
        Strategy::Standard => standard(catalog, user).map(|title| found(strategy, title)),
        Strategy::BestUnseen => best_unseen(catalog, user).map(|title| found(strategy, title)),
        Strategy::Popular => popular(catalog, user).map(|title| found(strategy, title)),
        Strategy::Favorite => favorite(catalog, user).map(|title| found(strategy, title)),
        Strategy::Search => search(catalog, user, recommendation.genre.as_deref())
            .map(|titles| render_list(&format!("{} result", strategy), &titles)),
    };

    outcome.unwrap_or_else(|| cannot_apply(strategy))
}

fn unseen<'a>(catalog: &'a Catalog, user: &'a User) -> impl Iterator<Item = &'a Video> + 'a {
    catalog
        .videos()
        .iter()
        .filter(move |video| !user.has_viewed(video.title()))
}

/// First unseen movie, else first unseen series, in catalog order
fn standard<'a>(catalog: &'a Catalog, user: &User) -> Option<&'a str> {
    catalog
        .videos()
        .iter()
        .find(|video| !user.has_viewed(video.title()))
        .map(Video::title)
}

/// Highest-rated unseen video under the truncated comparison
fn best_unseen<'a>(catalog: &'a Catalog, user: &'a User) -> Option<&'a str> {
    let mut candidates: Vec<&Video> = unseen(catalog, user).collect();
    ordering::sort_by(&mut candidates, |a, b| truncated_cmp(b.rating(), a.rating()));
    candidates.first().map(|video| video.title())
}

/// First unseen video of the most viewed genre that still has one
fn popular<'a>(catalog: &'a Catalog, user: &'a User) -> Option<&'a str> {
    // Genres in first-appearance order, so equal view counts stay deterministic
    let mut genre_views: Vec<(&str, u64)> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();
    for video in catalog.videos() {
        let views = catalog.video_total_views(video.title());
        for genre in video.genres() {
            match positions.get(genre.as_str()) {
                Some(&i) => genre_views[i].1 += views,
                None => {
                    positions.insert(genre.as_str(), genre_views.len());
                    genre_views.push((genre.as_str(), views));
                }
            }
        }
    }
    ordering::sort_by(&mut genre_views, |a, b| b.1.cmp(&a.1));

    genre_views.iter().find_map(|(genre, _)| {
        unseen(catalog, user)
            .find(|video| video.has_genre(genre))
            .map(Video::title)
    })
}

/// Most favorited unseen video; catalog order breaks ties
fn favorite<'a>(catalog: &'a Catalog, user: &'a User) -> Option<&'a str> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for other in catalog.users() {
        for title in &other.favorites {
            *counts.entry(title.as_str()).or_insert(0) += 1;
        }
    }

    let mut candidates: Vec<(&Video, usize)> = catalog
        .videos()
        .iter()
        .filter_map(|video| counts.get(video.title()).map(|&count| (video, count)))
        .collect();
    ordering::sort_by(&mut candidates, |a, b| b.1.cmp(&a.1));

    candidates
        .into_iter()
        .map(|(video, _)| video)
        .find(|video| !user.has_viewed(video.title()))
        .map(Video::title)
}

/// Every unseen video of the genre, by truncated rating then title
fn search(catalog: &Catalog, user: &User, genre: Option<&str>) -> Option<Vec<String>> {
    let genre = genre?;
    let mut candidates: Vec<&Video> = unseen(catalog, user)
        .filter(|video| video.has_genre(genre))
        .collect();
    if candidates.is_empty() {
        return None;
    }

    ordering::sort_by(&mut candidates, |a, b| {
        truncated_cmp(a.rating(), b.rating()).then_with(|| a.title().cmp(b.title()))
    });
    Some(
        candidates
            .into_iter()
            .map(|video| video.title().to_string())
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Tier;
    use crate::services::catalog::test_support::*;

    fn catalog() -> Catalog {
        Catalog::new(
            vec![],
            vec![
                user("ann", Tier::Premium, &[("Matrix", 2)], &["Matrix"]),
                user("bob", Tier::Standard, &[("Heat", 4), ("Matrix", 1)], &["Heat", "Matrix"]),
                user("cid", Tier::Premium, &[("Dark", 1)], &["Heat"]),
            ],
            vec![
                movie("Matrix", 1999, &["Action", "Sci-Fi"], 136, &[4.0]),
                movie("Heat", 1995, &["Action", "Crime"], 170, &[3.0]),
                movie("Alien", 1979, &["Sci-Fi", "Horror"], 117, &[5.0]),
                series("Dark", 2017, &["Sci-Fi", "Drama"], &[(50, &[2.0])]),
                series("Lost", 2004, &["Drama"], &[(40, &[])]),
            ],
        )
        .unwrap()
    }

    fn recommend(catalog: &Catalog, strategy: Strategy, username: &str) -> String {
        execute(
            catalog,
            &Recommendation {
                id: 1,
                strategy,
                username: username.to_string(),
                genre: None,
            },
        )
    }

    fn search_for(catalog: &Catalog, username: &str, genre: &str) -> String {
        execute(
            catalog,
            &Recommendation {
                id: 1,
                strategy: Strategy::Search,
                username: username.to_string(),
                genre: Some(genre.to_string()),
            },
        )
    }

    #[test]
    fn test_standard() {
        let catalog = catalog();
        assert_eq!(
            recommend(&catalog, Strategy::Standard, "bob"),
            "StandardRecommendation result: Alien"
        );
        assert_eq!(
            recommend(&catalog, Strategy::Standard, "ann"),
            "StandardRecommendation result: Heat"
        );
    }

    #[test]
    fn test_standard_falls_through_to_series() {
        let mut catalog = catalog();
        let ann = catalog.user_mut("ann").unwrap();
        ann.view("Heat");
        ann.view("Alien");
        assert_eq!(
            recommend(&catalog, Strategy::Standard, "ann"),
            "StandardRecommendation result: Dark"
        );
        let ann = catalog.user_mut("ann").unwrap();
        ann.view("Dark");
        ann.view("Lost");
        assert_eq!(
            recommend(&catalog, Strategy::Standard, "ann"),
            "StandardRecommendation cannot be applied"
        );
        assert_eq!(
            recommend(&catalog, Strategy::BestUnseen, "ann"),
            "BestRatedUnseenRecommendation cannot be applied"
        );
    }

    #[test]
    fn test_best_unseen() {
        let catalog = catalog();
        assert_eq!(
            recommend(&catalog, Strategy::BestUnseen, "bob"),
            "BestRatedUnseenRecommendation result: Alien"
        );
        assert_eq!(
            recommend(&catalog, Strategy::BestUnseen, "cid"),
            "BestRatedUnseenRecommendation result: Alien"
        );
    }

    #[test]
    fn test_premium_gate() {
        let catalog = catalog();
        assert_eq!(
            recommend(&catalog, Strategy::Popular, "bob"),
            "PopularRecommendation cannot be applied"
        );
        assert_eq!(
            recommend(&catalog, Strategy::Favorite, "bob"),
            "FavoriteRecommendation cannot be applied"
        );
        assert_eq!(
            search_for(&catalog, "bob", "Drama"),
            "SearchRecommendation cannot be applied"
        );
    }

    #[test]
    fn test_unknown_user() {
        let catalog = catalog();
        assert_eq!(
            recommend(&catalog, Strategy::Standard, "zed"),
            "StandardRecommendation cannot be applied"
        );
    }

    #[test]
    fn test_popular() {
        let catalog = catalog();
        // Action: Matrix 3 + Heat 4 = 7, Sci-Fi: 3 + 0 + 1 = 4, Crime 4, Drama 1
        assert_eq!(
            recommend(&catalog, Strategy::Popular, "ann"),
            "PopularRecommendation result: Heat"
        );
        // cid has not seen any Action title
        assert_eq!(
            recommend(&catalog, Strategy::Popular, "cid"),
            "PopularRecommendation result: Matrix"
        );
    }

    #[test]
    fn test_popular_with_large_view_counts() {
        let catalog = Catalog::new(
            vec![],
            vec![
                user("ann", Tier::Standard, &[("Matrix", u32::MAX), ("Heat", u32::MAX)], &[]),
                user("bob", Tier::Standard, &[("Titanic", u32::MAX), ("Lost", 5)], &[]),
                user("cid", Tier::Premium, &[], &[]),
            ],
            vec![
                movie("Matrix", 1999, &["Action"], 136, &[]),
                movie("Heat", 1995, &["Action"], 170, &[]),
                movie("Titanic", 1997, &["Drama"], 195, &[]),
                series("Lost", 2004, &["Drama"], &[(40, &[])]),
            ],
        )
        .unwrap();
        assert_eq!(
            recommend(&catalog, Strategy::Popular, "cid"),
            "PopularRecommendation result: Matrix"
        );
    }

    #[test]
    fn test_popular_skips_exhausted_genres() {
        let mut catalog = catalog();
        catalog.user_mut("ann").unwrap().view("Heat");
        // Action exhausted for ann; Sci-Fi is next
        assert_eq!(
            recommend(&catalog, Strategy::Popular, "ann"),
            "PopularRecommendation result: Alien"
        );
    }

    #[test]
    fn test_favorite() {
        let catalog = catalog();
        // Heat favorited twice, Matrix twice; Matrix comes first in the catalog
        assert_eq!(
            recommend(&catalog, Strategy::Favorite, "cid"),
            "FavoriteRecommendation result: Matrix"
        );
        assert_eq!(
            recommend(&catalog, Strategy::Favorite, "ann"),
            "FavoriteRecommendation result: Heat"
        );
    }

    #[test]
    fn test_favorite_nothing_left() {
        let mut catalog = catalog();
        catalog.user_mut("ann").unwrap().view("Heat");
        assert_eq!(
            recommend(&catalog, Strategy::Favorite, "ann"),
            "FavoriteRecommendation cannot be applied"
        );
    }

    #[test]
    fn test_search() {
        let catalog = catalog();
        assert_eq!(
            search_for(&catalog, "ann", "Drama"),
            "SearchRecommendation result: [Lost, Dark]"
        );
        assert_eq!(
            search_for(&catalog, "cid", "Sci-Fi"),
            "SearchRecommendation result: [Matrix, Alien]"
        );
        assert_eq!(
            search_for(&catalog, "ann", "Western"),
            "SearchRecommendation cannot be applied"
        );
    }

    #[test]
    fn test_search_within_one_point_orders_by_title() {
        let catalog = Catalog::new(
            vec![],
            vec![user("ann", Tier::Premium, &[], &[])],
            vec![
                movie("Beta", 2001, &["Drama"], 90, &[4.0]),
                movie("Alpha", 2002, &["Drama"], 95, &[4.5]),
            ],
        )
        .unwrap();
        assert_eq!(
            search_for(&catalog, "ann", "Drama"),
            "SearchRecommendation result: [Alpha, Beta]"
        );
    }

    #[test]
    fn test_best_unseen_within_one_point() {
        let catalog = Catalog::new(
            vec![],
            vec![user("ann", Tier::Premium, &[], &[])],
            vec![
                movie("Zed", 2001, &["Drama"], 90, &[4.0]),
                movie("Abc", 2002, &["Drama"], 95, &[4.5]),
                movie("Mid", 2003, &["Drama"], 99, &[4.5]),
            ],
        )
        .unwrap();
        assert_eq!(
            recommend(&catalog, Strategy::BestUnseen, "ann"),
            "BestRatedUnseenRecommendation result: Abc"
        );
    }
}
