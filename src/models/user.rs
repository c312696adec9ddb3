use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

/// Subscription tier; several recommendations are premium-only
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    #[serde(alias = "BASIC")]
    Standard,
    #[serde(alias = "PREMIUM")]
    Premium,
}

/// Reasons a user activity is refused
///
/// The messages are the tail of the rendered command error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ActivityError {
    #[error("is not seen")]
    NotSeen,
    #[error("is already in favourite list")]
    AlreadyFavorite,
    #[error("has been already rated")]
    AlreadyRated,
}

#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub username: String,
    pub tier: Tier,
    /// View count per title; absent means never viewed
    pub history: HashMap<String, u32>,
    pub favorites: Vec<String>,
    pub rated_movies: HashSet<String>,
    /// Season numbers rated per series title
    pub rated_seasons: HashMap<String, HashSet<u32>>,
}

impl User {
    pub fn new(
        username: String,
        tier: Tier,
        history: HashMap<String, u32>,
        favorites: Vec<String>,
    ) -> Self {
        Self {
            username,
            tier,
            history,
            favorites,
            rated_movies: HashSet::new(),
            rated_seasons: HashMap::new(),
        }
    }

    pub fn is_premium(&self) -> bool {
        self.tier == Tier::Premium
    }

    pub fn has_viewed(&self, title: &str) -> bool {
        self.history.contains_key(title)
    }

    pub fn has_favorite(&self, title: &str) -> bool {
        self.favorites.iter().any(|t| t == title)
    }

    pub fn has_rated_season(&self, title: &str, season_number: u32) -> bool {
        self.rated_seasons
            .get(title)
            .is_some_and(|seasons| seasons.contains(&season_number))
    }

    /// Records one more view and returns the user's count for the title.
    ///
    /// The count saturates at `u32::MAX`.
    pub fn view(&mut self, title: &str) -> u32 {
        let count = self.history.entry(title.to_string()).or_insert(0);
        *count = count.saturating_add(1);
        *count
    }

    pub fn favorite(&mut self, title: &str) -> Result<(), ActivityError> {
        if !self.has_viewed(title) {
            return Err(ActivityError::NotSeen);
        }
        if self.has_favorite(title) {
            return Err(ActivityError::AlreadyFavorite);
        }
        self.favorites.push(title.to_string());
        Ok(())
    }

    /// Marks a movie as rated by this user.
    ///
    /// Only the legality check and bookkeeping happen here; the caller appends
    /// the grade to the movie.
    pub fn rate_movie(&mut self, title: &str) -> Result<(), ActivityError> {
        if !self.has_viewed(title) {
            return Err(ActivityError::NotSeen);
        }
        if !self.rated_movies.insert(title.to_string()) {
            return Err(ActivityError::AlreadyRated);
        }
        Ok(())
    }

    /// Marks a season as rated by this user.
    ///
    /// The season number is not bounds-checked here; the series does that
    /// afterwards, and a refused season stays marked as rated.
    pub fn rate_series(&mut self, title: &str, season_number: u32) -> Result<(), ActivityError> {
        if !self.has_viewed(title) {
            return Err(ActivityError::NotSeen);
        }
        let seasons = self.rated_seasons.entry(title.to_string()).or_default();
        if !seasons.insert(season_number) {
            return Err(ActivityError::AlreadyRated);
        }
        Ok(())
    }

    /// Movies rated plus seasons rated across all series
    pub fn total_ratings(&self) -> usize {
        self.rated_movies.len() + self.rated_seasons.values().map(HashSet::len).sum::<usize>()
    }
}
