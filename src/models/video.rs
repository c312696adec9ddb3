
/// Arithmetic mean, 0 for an empty list
fn mean(grades: &[f64]) -> f64 {
    if grades.is_empty() {
        return 0.0;
    }
    grades.iter().sum::<f64>() / grades.len() as f64
}

/// Fields shared by movies and series
#[derive(Debug, Clone, PartialEq)]
pub struct VideoInfo {
    pub title: String,
    pub year: i32,
    /// Informational only
    pub cast: Vec<String>,
    pub genres: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Movie {
    pub info: VideoInfo,
    /// Length in minutes
    pub duration: u32,
    pub grades: Vec<f64>,
}

impl Movie {
    pub fn new(info: VideoInfo, duration: u32) -> Self {
        Self {
            info,
            duration,
            grades: Vec::new(),
        }
    }

    pub fn add_grade(&mut self, grade: f64) {
        self.grades.push(grade);
    }

    pub fn rating(&self) -> f64 {
        mean(&self.grades)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Season {
    /// Length in minutes
    pub duration: u32,
    pub grades: Vec<f64>,
}

impl Season {
    pub fn new(duration: u32) -> Self {
        Self {
            duration,
            grades: Vec::new(),
        }
    }

    pub fn rating(&self) -> f64 {
        mean(&self.grades)
    }
}

/// Error returned when a season number does not exist in a series
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Season {0} out of bounds")]
pub struct SeasonOutOfBounds(pub u32);

#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub info: VideoInfo,
    /// Fixed at load, numbered from 1
    pub seasons: Vec<Season>,
}

impl Series {
    pub fn new(info: VideoInfo, seasons: Vec<Season>) -> Self {
        Self { info, seasons }
    }

    /// Appends a grade to a 1-based season
    pub fn rate_season(&mut self, season_number: u32, grade: f64) -> Result<(), SeasonOutOfBounds> {
        let index = (season_number as usize)
            .checked_sub(1)
            .ok_or(SeasonOutOfBounds(season_number))?;
        let season = self
            .seasons
            .get_mut(index)
            .ok_or(SeasonOutOfBounds(season_number))?;
        season.grades.push(grade);
        Ok(())
    }

    /// Mean of the per-season means; seasons without grades count as 0
    pub fn rating(&self) -> f64 {
        if self.seasons.is_empty() {
            return 0.0;
        }
        let total: f64 = self.seasons.iter().map(Season::rating).sum();
        total / self.seasons.len() as f64
    }

    pub fn total_duration(&self) -> u32 {
        self.seasons.iter().map(|s| s.duration).sum()
    }
}

/// A catalog entry: either a movie or a series
#[derive(Debug, Clone, PartialEq)]
pub enum Video {
    Movie(Movie),
    Series(Series),
}

impl Video {
    pub fn info(&self) -> &VideoInfo {
        match self {
            Video::Movie(movie) => &movie.info,
            Video::Series(series) => &series.info,
        }
    }

    pub fn title(&self) -> &str {
        &self.info().title
    }

    pub fn year(&self) -> i32 {
        self.info().year
    }

    pub fn genres(&self) -> &[String] {
        &self.info().genres
    }

    pub fn has_genre(&self, genre: &str) -> bool {
        self.genres().iter().any(|g| g == genre)
    }

    pub fn is_movie(&self) -> bool {
        matches!(self, Video::Movie(_))
    }

    pub fn rating(&self) -> f64 {
        match self {
            Video::Movie(movie) => movie.rating(),
            Video::Series(series) => series.rating(),
        }
    }

    /// Total length in minutes
    pub fn total_duration(&self) -> u32 {
        match self {
            Video::Movie(movie) => movie.duration,
            Video::Series(series) => series.total_duration(),
        }
    }
}
