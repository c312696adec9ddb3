use std::{fmt::Display, str::FromStr};

/// User activity carried by a command
#[derive(Debug, Clone, PartialEq)]
pub enum CommandKind {
    View,
    Favorite,
    /// `season_number` is 0 for a movie rating
    Rating { grade: f64, season_number: u32 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Command {
    pub id: u32,
    pub username: String,
    pub title: String,
    pub kind: CommandKind,
}

/// Entity collection a query runs over
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectType {
    Actors,
    Movies,
    Shows,
    Users,
}

impl FromStr for ObjectType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "actors" => Ok(ObjectType::Actors),
            "movies" => Ok(ObjectType::Movies),
            "shows" | "series" => Ok(ObjectType::Shows),
            "users" => Ok(ObjectType::Users),
            other => Err(format!("unknown object type: {}", other)),
        }
    }
}

/// Named computation a query runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Criterion {
    Average,
    Awards,
    FilterDescription,
    Ratings,
    Favorite,
    Longest,
    MostViewed,
    NumRatings,
}

impl Criterion {
    /// Whether this criterion is defined for the object type
    pub fn applies_to(self, object_type: ObjectType) -> bool {
        match self {
            Criterion::Average | Criterion::Awards | Criterion::FilterDescription => {
                object_type == ObjectType::Actors
            }
            Criterion::Ratings | Criterion::Favorite | Criterion::Longest | Criterion::MostViewed => {
                matches!(object_type, ObjectType::Movies | ObjectType::Shows)
            }
            Criterion::NumRatings => object_type == ObjectType::Users,
        }
    }
}

impl FromStr for Criterion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "average" => Ok(Criterion::Average),
            "awards" => Ok(Criterion::Awards),
            "filter_description" | "filter_descriptions" | "filterDescriptions" => {
                Ok(Criterion::FilterDescription)
            }
            "ratings" => Ok(Criterion::Ratings),
            "favorite" => Ok(Criterion::Favorite),
            "longest" => Ok(Criterion::Longest),
            "most_viewed" | "mostViewed" => Ok(Criterion::MostViewed),
            "num_ratings" | "numRatings" => Ok(Criterion::NumRatings),
            other => Err(format!("unknown criterion: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(format!("unknown sort order: {}", other)),
        }
    }
}

/// Optional query filters; each slot is independent
#[derive(Debug, Clone, PartialEq, Default)]
pub struct QueryFilters {
    pub year: Option<i32>,
    pub genre: Option<String>,
    /// Words required in an actor's career description
    pub words: Option<Vec<String>>,
    /// Award kinds an actor must hold
    pub awards: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub id: u32,
    pub object_type: ObjectType,
    pub criterion: Criterion,
    pub sort_order: SortOrder,
    /// 0 means unlimited
    pub limit: usize,
    pub filters: QueryFilters,
}

/// Recommendation strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Standard,
    BestUnseen,
    Popular,
    Favorite,
    Search,
}

impl Strategy {
    /// Whether the strategy is reserved for premium users
    pub fn is_premium_only(self) -> bool {
        matches!(self, Strategy::Popular | Strategy::Favorite | Strategy::Search)
    }
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "standard" => Ok(Strategy::Standard),
            "best_unseen" | "bestUnseen" => Ok(Strategy::BestUnseen),
            "popular" => Ok(Strategy::Popular),
            "favorite" => Ok(Strategy::Favorite),
            "search" => Ok(Strategy::Search),
            other => Err(format!("unknown recommendation strategy: {}", other)),
        }
    }
}

impl Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Strategy::Standard => "StandardRecommendation",
            Strategy::BestUnseen => "BestRatedUnseenRecommendation",
            Strategy::Popular => "PopularRecommendation",
            Strategy::Favorite => "FavoriteRecommendation",
            Strategy::Search => "SearchRecommendation",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Recommendation {
    pub id: u32,
    pub strategy: Strategy,
    pub username: String,
    /// Only used by the search strategy
    pub genre: Option<String>,
}

/// One unit of work, executed once and in order
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Command(Command),
    Query(Query),
    Recommendation(Recommendation),
    /// An action whose type could not be recognised
    Undefined { id: u32, description: String },
}

impl Action {
    pub fn id(&self) -> u32 {
        match self {
            Action::Command(command) => command.id,
            Action::Query(query) => query.id,
            Action::Recommendation(recommendation) => recommendation.id,
            Action::Undefined { id, .. } => *id,
        }
    }

    /// Short label used in logs
    pub fn kind(&self) -> &'static str {
        match self {
            Action::Command(_) => "command",
            Action::Query(_) => "query",
            Action::Recommendation(_) => "recommendation",
            Action::Undefined { .. } => "undefined",
        }
    }
}
