use std::collections::HashMap;

use crate::{
    error::{AppError, AppResult},
    models::{Action, Actor, Dataset, User, Video},
};

/// In-memory store for every entity of a run
///
/// Collections keep load order, which several tie-breaks rely on. Videos are
/// held movies first, then series.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    actors: Vec<Actor>,
    users: Vec<User>,
    videos: Vec<Video>,
    video_index: HashMap<String, usize>,
    user_index: HashMap<String, usize>,
}

impl Catalog {
    /// Builds a catalog, rejecting duplicate titles or usernames
    pub fn new(actors: Vec<Actor>, users: Vec<User>, mut videos: Vec<Video>) -> AppResult<Self> {
        // Stable, so load order survives inside each kind
        videos.sort_by_key(|video| !video.is_movie());

        let mut video_index = HashMap::with_capacity(videos.len());
        for (position, video) in videos.iter().enumerate() {
            if video_index.insert(video.title().to_string(), position).is_some() {
                return Err(AppError::InvalidInput(format!(
                    "title '{}' appears more than once",
                    video.title()
                )));
            }
        }

        let mut user_index = HashMap::with_capacity(users.len());
        for (position, user) in users.iter().enumerate() {
            if user_index.insert(user.username.clone(), position).is_some() {
                return Err(AppError::InvalidInput(format!(
                    "username '{}' appears more than once",
                    user.username
                )));
            }
        }

        Ok(Self {
            actors,
            users,
            videos,
            video_index,
            user_index,
        })
    }

    pub fn actors(&self) -> &[Actor] {
        &self.actors
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    /// All videos: movies then series
    pub fn videos(&self) -> &[Video] {
        &self.videos
    }

    pub fn movies(&self) -> impl Iterator<Item = &Video> {
        self.videos.iter().filter(|video| video.is_movie())
    }

    pub fn series(&self) -> impl Iterator<Item = &Video> {
        self.videos.iter().filter(|video| !video.is_movie())
    }

    pub fn video(&self, title: &str) -> Option<&Video> {
        self.video_index.get(title).map(|&i| &self.videos[i])
    }

    pub fn video_mut(&mut self, title: &str) -> Option<&mut Video> {
        let position = *self.video_index.get(title)?;
        self.videos.get_mut(position)
    }

    pub fn user(&self, username: &str) -> Option<&User> {
        self.user_index.get(username).map(|&i| &self.users[i])
    }

    pub fn user_mut(&mut self, username: &str) -> Option<&mut User> {
        let position = *self.user_index.get(username)?;
        self.users.get_mut(position)
    }

    /// Sum of every user's view count for the title
    pub fn video_total_views(&self, title: &str) -> u64 {
        self.users
            .iter()
            .filter_map(|user| user.history.get(title))
            .map(|&views| u64::from(views))
            .sum()
    }

    /// Number of users holding the title as a favorite
    pub fn video_total_favorites(&self, title: &str) -> usize {
        self.users
            .iter()
            .filter(|user| user.has_favorite(title))
            .count()
    }

    /// Mean rating of the actor's catalogued, non-zero-rated filmography
    pub fn actor_rating(&self, actor: &Actor) -> f64 {
        let ratings: Vec<f64> = actor
            .filmography
            .iter()
            .filter_map(|title| self.video(title))
            .map(Video::rating)
            .filter(|&rating| rating != 0.0)
            .collect();

        if ratings.is_empty() {
            return 0.0;
        }
        ratings.iter().sum::<f64>() / ratings.len() as f64
    }

    /// Recomputes every actor's rating from the current grades
    pub fn refresh_actor_ratings(&mut self) {
        let ratings: Vec<f64> = self
            .actors
            .iter()
            .map(|actor| self.actor_rating(actor))
            .collect();

        for (actor, rating) in self.actors.iter_mut().zip(ratings) {
            actor.rating = rating;
        }
    }
}

/// Turns a snapshot into a catalog and its ordered action list
pub fn load(dataset: Dataset) -> AppResult<(Catalog, Vec<Action>)> {
    let Dataset {
        actors,
        users,
        movies,
        series,
        actions,
    } = dataset;

    let videos: Vec<Video> = movies
        .into_iter()
        .map(Video::from)
        .chain(series.into_iter().map(Video::from))
        .collect();

    let catalog = Catalog::new(
        actors.into_iter().map(Actor::from).collect(),
        users.into_iter().map(User::from).collect(),
        videos,
    )?;

    let actions = actions
        .into_iter()
        .zip(1..)
        .map(|(record, position)| record.into_action(position))
        .collect::<AppResult<Vec<_>>>()?;

    tracing::info!(
        actors = catalog.actors().len(),
        users = catalog.users().len(),
        videos = catalog.videos().len(),
        actions = actions.len(),
        "Dataset loaded"
    );

    Ok((catalog, actions))
}
