use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

use super::{
    action::{
        Action, Command, CommandKind, Criterion, ObjectType, Query, QueryFilters, Recommendation,
        SortOrder, Strategy,
    },
    Actor, AwardKind, Movie, Season, Series, Tier, User, Video, VideoInfo,
};

// ============================================================================
// Snapshot records
// ============================================================================

/// Fully populated input snapshot: entities in load order plus the action list
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub actors: Vec<ActorRecord>,
    #[serde(default)]
    pub users: Vec<UserRecord>,
    #[serde(default)]
    pub movies: Vec<MovieRecord>,
    #[serde(default, alias = "shows")]
    pub series: Vec<SeriesRecord>,
    #[serde(default, alias = "commands")]
    pub actions: Vec<ActionRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActorRecord {
    pub name: String,
    #[serde(default)]
    pub career_description: String,
    #[serde(default)]
    pub filmography: Vec<String>,
    #[serde(default)]
    pub awards: HashMap<AwardKind, u32>,
}

impl From<ActorRecord> for Actor {
    fn from(record: ActorRecord) -> Self {
        Actor::new(
            record.name,
            record.career_description,
            record.filmography,
            record.awards,
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    pub username: String,
    pub subscription: Tier,
    #[serde(default)]
    pub history: HashMap<String, u32>,
    #[serde(default, alias = "favorite_movies")]
    pub favorites: Vec<String>,
}

impl From<UserRecord> for User {
    fn from(record: UserRecord) -> Self {
        User::new(
            record.username,
            record.subscription,
            record.history,
            record.favorites,
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieRecord {
    #[serde(alias = "name")]
    pub title: String,
    pub year: i32,
    #[serde(default)]
    pub cast: Vec<String>,
    #[serde(default)]
    pub genres: Vec<String>,
    pub duration: u32,
}

impl From<MovieRecord> for Video {
    fn from(record: MovieRecord) -> Self {
        let info = VideoInfo {
            title: record.title,
            year: record.year,
            cast: record.cast,
            genres: record.genres,
        };
        Video::Movie(Movie::new(info, record.duration))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeasonRecord {
    pub duration: u32,
    #[serde(default)]
    pub grades: Vec<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeriesRecord {
    #[serde(alias = "name")]
    pub title: String,
    pub year: i32,
    #[serde(default)]
    pub cast: Vec<String>,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub seasons: Vec<SeasonRecord>,
}

impl From<SeriesRecord> for Video {
    fn from(record: SeriesRecord) -> Self {
        let info = VideoInfo {
            title: record.title,
            year: record.year,
            cast: record.cast,
            genres: record.genres,
        };
        let seasons = record
            .seasons
            .into_iter()
            .map(|s| Season {
                duration: s.duration,
                grades: s.grades,
            })
            .collect();
        Video::Series(Series::new(info, seasons))
    }
}

/// Flat action record, as produced by the loader
///
/// Which fields matter depends on `action_type`; everything else is ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActionRecord {
    /// Identifier from the source file; results are numbered by position instead
    #[serde(default)]
    pub action_id: Option<u32>,
    pub action_type: String,
    /// Command or recommendation sub-type
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default, alias = "user")]
    pub username: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub grade: Option<f64>,
    #[serde(default, alias = "season")]
    pub season_number: Option<u32>,
    #[serde(default)]
    pub object_type: Option<String>,
    #[serde(default, alias = "criteria")]
    pub criterion: Option<String>,
    #[serde(default)]
    pub sort_type: Option<String>,
    #[serde(default)]
    pub number: Option<usize>,
    /// Four slots: year, genre, description words, awards
    #[serde(default)]
    pub filters: Option<Vec<Option<Vec<Option<String>>>>>,
    #[serde(default)]
    pub genre: Option<String>,
}

impl ActionRecord {
    fn undefined(&self, id: u32, reason: String) -> Action {
        tracing::debug!(
            action = id,
            source_id = ?self.action_id,
            reason = %reason,
            "Unrecognised action"
        );
        Action::Undefined {
            id,
            description: reason,
        }
    }

    /// Values of one filter slot, skipping null entries
    fn filter_slot(&self, slot: usize) -> Option<Vec<String>> {
        let values: Vec<String> = self
            .filters
            .as_ref()?
            .get(slot)?
            .as_ref()?
            .iter()
            .flatten()
            .cloned()
            .collect();
        if values.is_empty() {
            None
        } else {
            Some(values)
        }
    }

    fn query_filters(&self, id: u32) -> AppResult<QueryFilters> {
        let year = match self.filter_slot(0).and_then(|v| v.into_iter().next()) {
            Some(raw) => Some(raw.trim().parse::<i32>().map_err(|_| {
                AppError::InvalidInput(format!(
                    "action {}: year filter '{}' is not a number",
                    id, raw
                ))
            })?),
            None => None,
        };

        Ok(QueryFilters {
            year,
            genre: self.filter_slot(1).and_then(|v| v.into_iter().next()),
            words: self.filter_slot(2),
            awards: self.filter_slot(3),
        })
    }

    /// Converts the record into a typed action numbered by its 1-based input position.
    ///
    /// Unknown sub-types become `Action::Undefined`; malformed filter data is an error.
    pub fn into_action(self, id: u32) -> AppResult<Action> {
        let kind = self.kind.clone().unwrap_or_default();
        let username = self.username.clone().unwrap_or_default();

        let action = match self.action_type.as_str() {
            "command" => {
                let command_kind = match kind.as_str() {
                    "view" => CommandKind::View,
                    "favorite" => CommandKind::Favorite,
                    "rating" => match self.grade {
                        Some(grade) => CommandKind::Rating {
                            grade,
                            season_number: self.season_number.unwrap_or(0),
                        },
                        None => {
                            return Ok(self.undefined(id, "rating without grade".to_string()))
                        }
                    },
                    other => {
                        return Ok(self.undefined(id, format!("command type '{}'", other)))
                    }
                };
                Action::Command(Command {
                    id,
                    username,
                    title: self.title.clone().unwrap_or_default(),
                    kind: command_kind,
                })
            }
            "query" => {
                let object_type = self.object_type.as_deref().unwrap_or_default().parse::<ObjectType>();
                let criterion = self.criterion.as_deref().unwrap_or_default().parse::<Criterion>();
                let (object_type, criterion) = match (object_type, criterion) {
                    (Ok(o), Ok(c)) if c.applies_to(o) => (o, c),
                    (Ok(o), Ok(c)) => {
                        return Ok(self.undefined(id, format!("criterion {:?} on {:?}", c, o)))
                    }
                    (Err(e), _) | (_, Err(e)) => return Ok(self.undefined(id, e)),
                };
                let sort_order = match self.sort_type.as_deref() {
                    Some(raw) => match raw.parse::<SortOrder>() {
                        Ok(order) => order,
                        Err(e) => return Ok(self.undefined(id, e)),
                    },
                    None => SortOrder::default(),
                };
                Action::Query(Query {
                    id,
                    object_type,
                    criterion,
                    sort_order,
                    limit: self.number.unwrap_or(0),
                    filters: self.query_filters(id)?,
                })
            }
            "recommendation" => match kind.parse::<Strategy>() {
                Ok(strategy) => Action::Recommendation(Recommendation {
                    id,
                    strategy,
                    username,
                    genre: self.genre.clone(),
                }),
                Err(e) => return Ok(self.undefined(id, e)),
            },
            other => return Ok(self.undefined(id, format!("action type '{}'", other))),
        };

        Ok(action)
    }
}

/// Rendered outcome of one action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionResult {
    pub id: u32,
    pub message: String,
}
