use crate::models::{Command, CommandKind, SeasonOutOfBounds, Video};

use super::catalog::Catalog;

/// Renders a grade with at least one decimal, e.g. `4.0`
fn format_grade(grade: f64) -> String {
    if grade.is_finite() && grade.fract() == 0.0 {
        format!("{:.1}", grade)
    } else {
        grade.to_string()
    }
}

/// Applies a user command and renders its outcome.
///
/// An unknown user renders as an empty string.
pub fn execute(catalog: &mut Catalog, command: &Command) -> String {
    let title = command.title.as_str();
    let Some(user) = catalog.user_mut(&command.username) else {
        tracing::debug!(username = %command.username, "Command for unknown user");
        return String::new();
    };

    match command.kind {
        CommandKind::View => {
            let views = user.view(title);
            format!("success -> {} was viewed with total views of {}", title, views)
        }
        CommandKind::Favorite => match user.favorite(title) {
            Ok(()) => format!("success -> {} was added as favourite", title),
            Err(e) => format!("error -> {} {}", title, e),
        },
        CommandKind::Rating {
            grade,
            season_number: 0,
        } => {
            if let Err(e) = user.rate_movie(title) {
                return format!("error -> {} {}", title, e);
            }
            match catalog.video_mut(title) {
                Some(Video::Movie(movie)) => movie.add_grade(grade),
                _ => tracing::warn!(title = %title, "Rated title is not a catalogued movie"),
            }
            rated(title, grade, &command.username)
        }
        CommandKind::Rating {
            grade,
            season_number,
        } => {
            if let Err(e) = user.rate_series(title, season_number) {
                return format!("error -> {} {}", title, e);
            }
            // The user side already counts the season as rated, even when it
            // turns out not to exist.
            let stored = match catalog.video_mut(title) {
                Some(Video::Series(series)) => series.rate_season(season_number, grade),
                _ => Err(SeasonOutOfBounds(season_number)),
            };
            match stored {
                Ok(()) => rated(title, grade, &command.username),
                Err(e) => format!("error -> {}", e),
            }
        }
    }
}

fn rated(title: &str, grade: f64, username: &str) -> String {
    format!(
        "success -> {} was rated with {} by {}",
        title,
        format_grade(grade),
        username
    )
}
