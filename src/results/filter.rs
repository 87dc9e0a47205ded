use std::collections::BTreeMap;

use serde::Serialize;

use crate::types::{CategoryField, ChoiceField, DishRecord, TagField};

/// Sentinel accepted by single-select filters meaning "no filter".
pub const ALL: &str = "All";

/// Inclusive rating interval.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RatingRange {
    pub min: f64,
    pub max: f64,
}

impl RatingRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }
}

/// Everything the user has selected for one interaction.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FilterSelection {
    pub tags: BTreeMap<TagField, Vec<String>>,
    pub choices: BTreeMap<ChoiceField, String>,
    pub min_rating: Option<f64>,
    pub max_rating: Option<f64>,
}

impl FilterSelection {
    pub fn with_tag<I, S>(mut self, field: TagField, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags
            .entry(field)
            .or_default()
            .extend(values.into_iter().map(Into::into));
        self
    }

    pub fn with_choice(mut self, field: ChoiceField, value: impl Into<String>) -> Self {
        self.choices.insert(field, value.into());
        self
    }

    pub fn with_rating(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.min_rating = min;
        self.max_rating = max;
        self
    }

    /// Selected values for one tag field (empty when none).
    pub fn tag_values(&self, field: TagField) -> &[String] {
        self.tags.get(&field).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Selected value for one single-select field, `"All"` when none.
    pub fn choice_value(&self, field: ChoiceField) -> &str {
        self.choices.get(&field).map_or(ALL, String::as_str)
    }

    /// The rating interval to enforce, or `None` when it would not narrow
    /// anything.
    ///
    /// Unset bounds default to the observed ones. A range that still covers
    /// the whole observed span is not a restriction, so unrated rows survive.
    pub fn rating_filter(&self, observed: Option<RatingRange>) -> Option<RatingRange> {
        if self.min_rating.is_none() && self.max_rating.is_none() {
            return None;
        }
        match observed {
            Some(o) => {
                let range = RatingRange::new(
                    self.min_rating.unwrap_or(o.min),
                    self.max_rating.unwrap_or(o.max),
                );
                (range.min > o.min || range.max < o.max).then_some(range)
            }
            None => Some(RatingRange::new(
                self.min_rating.unwrap_or(f64::NEG_INFINITY),
                self.max_rating.unwrap_or(f64::INFINITY),
            )),
        }
    }

    /// Active predicates for this selection. No-op selections produce none.
    pub fn predicates(&self, observed: Option<RatingRange>) -> Vec<Filter> {
        let mut filters = Vec::new();

        for (&field, values) in &self.tags {
            if !values.is_empty() {
                filters.push(Filter::AnyOf {
                    field: CategoryField::Tag(field),
                    values: values.clone(),
                });
            }
        }

        for (&field, value) in &self.choices {
            if !is_all(value) {
                filters.push(Filter::Equals {
                    field: CategoryField::Choice(field),
                    value: value.clone(),
                });
            }
        }

        if let Some(range) = self.rating_filter(observed) {
            filters.push(Filter::Rating(range));
        }

        filters
    }
}

fn is_all(value: &str) -> bool {
    value.is_empty() || value.eq_ignore_ascii_case(ALL)
}

/// One independent row predicate.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// Value is one of the selected options.
    AnyOf {
        field: CategoryField,
        values: Vec<String>,
    },
    /// Value equals the selected option.
    Equals { field: CategoryField, value: String },
    /// Rating present and within the inclusive range.
    Rating(RatingRange),
}

impl Filter {
    pub fn matches(&self, record: &DishRecord) -> bool {
        match self {
            Filter::AnyOf { field, values } => record
                .category(*field)
                .is_some_and(|v| values.iter().any(|s| s == v)),
            Filter::Equals { field, value } => record.category(*field) == Some(value.as_str()),
            Filter::Rating(range) => record
                .restaurant_rating
                .is_some_and(|r| range.contains(r)),
        }
    }
}

/// Apply every filter in turn. The result is the AND of all predicates, so
/// the order of `filters` does not matter.
pub fn apply<'a>(rows: &'a [DishRecord], filters: &[Filter]) -> Vec<&'a DishRecord> {
    filters
        .iter()
        .fold(rows.iter().collect::<Vec<_>>(), |kept, filter| {
            kept.into_iter().filter(|r| filter.matches(r)).collect()
        })
}
