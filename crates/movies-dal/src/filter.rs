//! Optional per-field constraints for movie search.
//!
//! [`MovieFilter::conditions`] is the only place where a filter is turned into
//! comparisons. Each backend consumes the same list of conditions, the in-memory
//! store evaluates them with [`Condition::holds`], the SQL store translates them to
//! bound `WHERE` clauses. All conditions must hold at once.

use std::{fmt::Display, str::FromStr};

use garde::Validate;
use serde::{Deserialize, Deserializer, Serialize};

use crate::movie::Movie;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
pub struct MovieFilter {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    #[garde(length(max = 255))]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    #[garde(length(max = 255))]
    pub genre: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    #[garde(skip)]
    pub duration: Option<u32>,
}

/// Query strings like `?title=&genre=Drama` send empty values for unused fields
pub fn empty_string_as_none<'de, D, T>(de: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    let value: Option<String> = Option::deserialize(de)?;
    match value.as_deref() {
        None | Some("") => Ok(None),
        Some(s) => s.parse::<T>().map(Some).map_err(serde::de::Error::custom),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    Title,
    Genre,
    Duration,
}

impl FilterField {
    pub fn column(&self) -> &'static str {
        match self {
            FilterField::Title => "title",
            FilterField::Genre => "genre",
            FilterField::Duration => "duration",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterValue<'a> {
    Text(&'a str),
    Integer(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Condition<'a> {
    pub field: FilterField,
    pub value: FilterValue<'a>,
}

impl Condition<'_> {
    pub fn holds(&self, movie: &Movie) -> bool {
        match (self.field, self.value) {
            (FilterField::Title, FilterValue::Text(v)) => movie.title == v,
            (FilterField::Genre, FilterValue::Text(v)) => movie.genre == v,
            (FilterField::Duration, FilterValue::Integer(v)) => movie.duration == v,
            // conditions() never pairs a field with a value of another type
            _ => false,
        }
    }
}

impl MovieFilter {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.genre.is_none() && self.duration.is_none()
    }

    pub fn conditions(&self) -> Vec<Condition<'_>> {
        let mut conditions = Vec::with_capacity(3);
        if let Some(title) = self.title.as_deref() {
            conditions.push(Condition {
                field: FilterField::Title,
                value: FilterValue::Text(title),
            });
        }
        if let Some(genre) = self.genre.as_deref() {
            conditions.push(Condition {
                field: FilterField::Genre,
                value: FilterValue::Text(genre),
            });
        }
        if let Some(duration) = self.duration {
            conditions.push(Condition {
                field: FilterField::Duration,
                value: FilterValue::Integer(duration),
            });
        }
        conditions
    }

    pub fn matches(&self, movie: &Movie) -> bool {
        self.conditions().iter().all(|c| c.holds(movie))
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = Some(genre.into());
        self
    }

    pub fn with_duration(mut self, duration: u32) -> Self {
        self.duration = Some(duration);
        self
    }
}

#[cfg(test)]
mod tests {
    use quickcheck::{Arbitrary, Gen};
    use quickcheck_macros::quickcheck;

    use super::*;
    use crate::movie::MovieId;

    const TITLES: &[&str] = &["Dune", "Alien", "Heat", "Ran"];
    const GENRES: &[&str] = &["Sci-Fi", "Drama", "Action"];
    const DURATIONS: &[u32] = &[0, 70, 120, 155, 600];

    // small value domains so that generated filters actually hit movies
    impl Arbitrary for MovieFilter {
        fn arbitrary(g: &mut Gen) -> Self {
            let pick = |g: &mut Gen, values: &[&str]| {
                bool::arbitrary(g).then(|| g.choose(values).unwrap().to_string())
            };
            MovieFilter {
                title: pick(g, TITLES),
                genre: pick(g, GENRES),
                duration: bool::arbitrary(g).then(|| *g.choose(DURATIONS).unwrap()),
            }
        }
    }

    #[derive(Debug, Clone)]
    struct Movies(Vec<Movie>);

    impl Arbitrary for Movies {
        fn arbitrary(g: &mut Gen) -> Self {
            let len = usize::arbitrary(g) % 30;
            let movies = (0..len)
                .map(|_| Movie {
                    id: MovieId::new_v4(),
                    title: g.choose(TITLES).unwrap().to_string(),
                    genre: g.choose(GENRES).unwrap().to_string(),
                    duration: *g.choose(&DURATIONS[1..]).unwrap(),
                })
                .collect();
            Movies(movies)
        }
    }

    #[quickcheck]
    fn empty_filter_matches_all(movies: Movies) -> bool {
        let filter = MovieFilter::default();
        movies.0.iter().all(|m| filter.matches(m))
    }

    #[quickcheck]
    fn single_field_filter_selects_equal_values(movies: Movies, genre_idx: usize) -> bool {
        let genre = GENRES[genre_idx % GENRES.len()];
        let filter = MovieFilter::default().with_genre(genre);
        movies
            .0
            .iter()
            .all(|m| filter.matches(m) == (m.genre == genre))
    }

    #[quickcheck]
    fn filter_is_conjunction(movies: Movies, filter: MovieFilter) -> bool {
        movies.0.iter().all(|m| {
            let expected = filter.title.as_ref().is_none_or(|t| *t == m.title)
                && filter.genre.as_ref().is_none_or(|g| *g == m.genre)
                && filter.duration.is_none_or(|d| d == m.duration);
            filter.matches(m) == expected
        })
    }

    #[test]
    fn test_zero_duration_is_constraint() {
        let movie = Movie {
            id: MovieId::new_v4(),
            title: "Dune".into(),
            genre: "Sci-Fi".into(),
            duration: 155,
        };
        let filter = MovieFilter::default().with_duration(0);
        assert!(!filter.is_empty());
        assert_eq!(1, filter.conditions().len());
        assert!(!filter.matches(&movie));
    }

    #[test]
    fn test_conditions_only_for_present_fields() {
        let filter = MovieFilter::default().with_title("Dune").with_duration(155);
        let conditions = filter.conditions();
        assert_eq!(2, conditions.len());
        assert_eq!(conditions[0].field, FilterField::Title);
        assert_eq!(conditions[0].value, FilterValue::Text("Dune"));
        assert_eq!(conditions[1].field.column(), "duration");
        assert!(MovieFilter::default().conditions().is_empty());
    }

    #[test]
    fn test_deserialize_empty_values() {
        let filter: MovieFilter =
            serde_json::from_str(r#"{"title":"","genre":"Drama","duration":""}"#).unwrap();
        assert_eq!(filter, MovieFilter::default().with_genre("Drama"));

        let filter: MovieFilter = serde_json::from_str(r#"{"duration":"155"}"#).unwrap();
        assert_eq!(filter.duration, Some(155));

        let filter: MovieFilter = serde_json::from_str("{}").unwrap();
        assert!(filter.is_empty());

        assert!(serde_json::from_str::<MovieFilter>(r#"{"duration":"long"}"#).is_err());
    }
}
