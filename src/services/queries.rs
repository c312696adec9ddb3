use std::cmp::Ordering;

use crate::models::{
    Actor, Criterion, DescriptionFilter, ObjectType, Query, QueryFilters, SortOrder, User, Video,
};

use super::{
    catalog::Catalog,
    ordering::{self, truncated_cmp},
    render_list, OPERATION_NOT_DEFINED,
};

const QUERY_RESULT: &str = "Query result";

/// Sorts, optionally reverses, truncates and names the candidates.
///
/// `compare` must already include the alphabetical tie-break so that tie
/// groups reverse as a block.
fn rank<'a, T, C, N>(
    mut items: Vec<&'a T>,
    mut compare: C,
    sort_order: SortOrder,
    limit: usize,
    name: N,
) -> Vec<&'a str>
where
    C: FnMut(&T, &T) -> Ordering,
    N: Fn(&'a T) -> &'a str,
{
    ordering::sort_by(&mut items, |a, b| compare(a, b));
    if sort_order == SortOrder::Desc {
        items.reverse();
    }
    if limit > 0 {
        items.truncate(limit);
    }
    items.into_iter().map(name).collect()
}

/// Runs a query and renders `Query result: [..]`
pub fn execute(catalog: &mut Catalog, query: &Query) -> String {
    let names = match (query.object_type, query.criterion) {
        (ObjectType::Actors, Criterion::Average) => actors_by_average(catalog, query),
        (ObjectType::Actors, Criterion::Awards) => actors_by_awards(catalog, query),
        (ObjectType::Actors, Criterion::FilterDescription) => {
            actors_by_description(catalog, query)
        }
        (ObjectType::Movies | ObjectType::Shows, criterion)
            if criterion.applies_to(query.object_type) =>
        {
            videos_by(catalog, query)
        }
        (ObjectType::Users, Criterion::NumRatings) => users_by_ratings(catalog, query),
        (object_type, criterion) => {
            tracing::warn!(?object_type, ?criterion, "Criterion not defined for object type");
            return OPERATION_NOT_DEFINED.to_string();
        }
    };

    tracing::debug!(query_id = query.id, matched = names.len(), "Query ranked");
    render_list(QUERY_RESULT, &names)
}

fn actors_by_average(catalog: &mut Catalog, query: &Query) -> Vec<String> {
    // Grades change between actions, so ratings are refreshed on every read
    catalog.refresh_actor_ratings();

    let candidates: Vec<&Actor> = catalog
        .actors()
        .iter()
        .filter(|actor| actor.rating != 0.0)
        .collect();

    rank(
        candidates,
        |a, b| a.rating.total_cmp(&b.rating).then_with(|| a.name.cmp(&b.name)),
        query.sort_order,
        query.limit,
        |actor| actor.name.as_str(),
    )
    .into_iter()
    .map(str::to_string)
    .collect()
}

fn actors_by_awards(catalog: &Catalog, query: &Query) -> Vec<String> {
    let candidates: Vec<&Actor> = catalog
        .actors()
        .iter()
        .filter(|actor| match &query.filters.awards {
            Some(awards) => actor.has_all_awards(awards),
            None => true,
        })
        .collect();

    rank(
        candidates,
        |a, b| {
            a.total_awards()
                .cmp(&b.total_awards())
                .then_with(|| a.name.cmp(&b.name))
        },
        query.sort_order,
        query.limit,
        |actor| actor.name.as_str(),
    )
    .into_iter()
    .map(str::to_string)
    .collect()
}

fn actors_by_description(catalog: &Catalog, query: &Query) -> Vec<String> {
    let filter = match query.filters.words.as_deref().map(DescriptionFilter::new) {
        Some(Ok(filter)) => Some(filter),
        Some(Err(e)) => {
            tracing::warn!(error = %e, "Unusable description filter words");
            return Vec::new();
        }
        None => None,
    };

    let candidates: Vec<&Actor> = catalog
        .actors()
        .iter()
        .filter(|actor| {
            filter
                .as_ref()
                .map_or(true, |filter| actor.description_matches(filter))
        })
        .collect();

    rank(
        candidates,
        |a, b| a.name.cmp(&b.name),
        query.sort_order,
        query.limit,
        |actor| actor.name.as_str(),
    )
    .into_iter()
    .map(str::to_string)
    .collect()
}

/// Genre and year filters shared by every video criterion
fn matches_filters(video: &Video, filters: &QueryFilters) -> bool {
    let genre_ok = filters
        .genre
        .as_deref()
        .map_or(true, |genre| video.has_genre(genre));
    let year_ok = filters.year.map_or(true, |year| video.year() == year);
    genre_ok && year_ok
}

fn videos_by(catalog: &Catalog, query: &Query) -> Vec<String> {
    let pool: Vec<&Video> = match query.object_type {
        ObjectType::Movies => catalog.movies().collect(),
        _ => catalog.series().collect(),
    };

    let candidates: Vec<&Video> = pool
        .into_iter()
        .filter(|video| match query.criterion {
            Criterion::Ratings => video.rating() != 0.0,
            Criterion::Favorite => catalog.video_total_favorites(video.title()) != 0,
            Criterion::MostViewed => catalog.video_total_views(video.title()) != 0,
            _ => true,
        })
        .filter(|video| matches_filters(video, &query.filters))
        .collect();

    let by_title = |a: &Video, b: &Video| a.title().cmp(b.title());
    let names = match query.criterion {
        Criterion::Ratings => rank(
            candidates,
            |a, b| truncated_cmp(a.rating(), b.rating()).then_with(|| by_title(a, b)),
            query.sort_order,
            query.limit,
            Video::title,
        ),
        Criterion::Favorite => rank(
            candidates,
            |a, b| {
                catalog
                    .video_total_favorites(a.title())
                    .cmp(&catalog.video_total_favorites(b.title()))
                    .then_with(|| by_title(a, b))
            },
            query.sort_order,
            query.limit,
            Video::title,
        ),
        Criterion::Longest => rank(
            candidates,
            |a, b| {
                a.total_duration()
                    .cmp(&b.total_duration())
                    .then_with(|| by_title(a, b))
            },
            query.sort_order,
            query.limit,
            Video::title,
        ),
        _ => rank(
            candidates,
            |a, b| {
                catalog
                    .video_total_views(a.title())
                    .cmp(&catalog.video_total_views(b.title()))
                    .then_with(|| by_title(a, b))
            },
            query.sort_order,
            query.limit,
            Video::title,
        ),
    };

    names.into_iter().map(str::to_string).collect()
}

fn users_by_ratings(catalog: &Catalog, query: &Query) -> Vec<String> {
    let candidates: Vec<&User> = catalog
        .users()
        .iter()
        .filter(|user| user.total_ratings() != 0)
        .collect();

    rank(
        candidates,
        |a, b| {
            a.total_ratings()
                .cmp(&b.total_ratings())
                .then_with(|| a.username.cmp(&b.username))
        },
        query.sort_order,
        query.limit,
        |user| user.username.as_str(),
    )
    .into_iter()
    .map(str::to_string)
    .collect()
}
