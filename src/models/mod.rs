pub mod action;
pub mod actor;
pub mod dataset;
pub mod user;
pub mod video;

pub use action::{
    Action, Command, CommandKind, Criterion, ObjectType, Query, QueryFilters, Recommendation,
    SortOrder, Strategy,
};
pub use actor::{Actor, AwardKind, DescriptionFilter};
pub use dataset::{ActionRecord, ActionResult, Dataset};
pub use user::{ActivityError, Tier, User};
pub use video::{Movie, Season, SeasonOutOfBounds, Series, Video, VideoInfo};
