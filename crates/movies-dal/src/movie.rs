use garde::Validate;
use serde::{Deserialize, Serialize};
use sqlx::Row as _;

use crate::ChosenRow;

pub type MovieId = uuid::Uuid;

pub const MIN_DURATION: u32 = 70;
pub const MAX_DURATION: u32 = 600;

/// Mutable part of a movie, used as input for both create and update
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct MovieData {
    #[garde(length(min = 1, max = 255), custom(not_blank))]
    #[cfg_attr(feature = "openapi", schema(example = "John Wick: Baba Yaga"))]
    pub title: String,
    #[garde(length(min = 1, max = 255), custom(not_blank))]
    #[cfg_attr(feature = "openapi", schema(example = "Action"))]
    pub genre: String,
    /// Duration in minutes
    #[garde(range(min = MIN_DURATION, max = MAX_DURATION))]
    #[cfg_attr(feature = "openapi", schema(example = 120, minimum = 70, maximum = 600))]
    pub duration: u32,
}

fn not_blank(value: &str, _ctx: &()) -> garde::Result {
    if value.trim().is_empty() {
        return Err(garde::Error::new("must not be blank"));
    }
    Ok(())
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Movie {
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = Uuid))]
    pub id: MovieId,
    pub title: String,
    pub genre: String,
    pub duration: u32,
}

impl Movie {
    pub fn new(id: MovieId, data: MovieData) -> Self {
        let MovieData {
            title,
            genre,
            duration,
        } = data;
        Movie {
            id,
            title,
            genre,
            duration,
        }
    }

    /// Overwrites all mutable fields, id stays
    pub fn apply(&mut self, data: MovieData) {
        self.title = data.title;
        self.genre = data.genre;
        self.duration = data.duration;
    }
}

// ids are stored as hyphenated text, so they read the same in any SQL client
impl sqlx::FromRow<'_, ChosenRow> for Movie {
    fn from_row(row: &ChosenRow) -> Result<Self, sqlx::Error> {
        let id: String = row.try_get("id")?;
        let id = MovieId::parse_str(&id).map_err(|e| sqlx::Error::ColumnDecode {
            index: "id".to_string(),
            source: Box::new(e),
        })?;
        Ok(Movie {
            id,
            title: row.try_get("title")?,
            genre: row.try_get("genre")?,
            duration: row.try_get("duration")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data(duration: u32) -> MovieData {
        MovieData {
            title: "Dune".into(),
            genre: "Sci-Fi".into(),
            duration,
        }
    }

    #[test]
    fn test_duration_bounds() {
        assert!(data(70).validate().is_ok());
        assert!(data(600).validate().is_ok());
        assert!(data(69).validate().is_err());
        assert!(data(601).validate().is_err());
        assert!(data(0).validate().is_err());
    }

    #[test]
    fn test_empty_strings_rejected() {
        let mut d = data(155);
        d.title = String::new();
        assert!(d.validate().is_err());

        let mut d = data(155);
        d.genre = String::new();
        assert!(d.validate().is_err());
    }

    #[test]
    fn test_blank_strings_rejected() {
        let mut d = data(155);
        d.title = "   ".into();
        assert!(d.validate().is_err());

        let mut d = data(155);
        d.genre = "\t".into();
        assert!(d.validate().is_err());

        let mut d = data(155);
        d.title = " Dune ".into();
        assert!(d.validate().is_ok());
    }

    #[cfg(feature = "openapi")]
    #[test]
    fn test_id_schema_is_uuid_string() {
        use utoipa::PartialSchema as _;

        let schema = serde_json::to_value(Movie::schema()).unwrap();
        assert_eq!(schema["properties"]["id"]["type"], "string");
        assert_eq!(schema["properties"]["id"]["format"], "uuid");
        assert_eq!(schema["properties"]["duration"]["type"], "integer");
    }

    #[test]
    fn test_apply_keeps_id() {
        let id = MovieId::new_v4();
        let mut movie = Movie::new(id, data(155));
        movie.apply(MovieData {
            title: "Dune: Part Two".into(),
            genre: "Adventure".into(),
            duration: 166,
        });
        assert_eq!(movie.id, id);
        assert_eq!(movie.title, "Dune: Part Two");
        assert_eq!(movie.genre, "Adventure");
        assert_eq!(movie.duration, 166);
    }
}
