//! Query-string parsing for the search page and API.
//!
//! Multi-select filters arrive as repeated keys (`spice=hot&spice=mild`),
//! which the plain `Query` extractor cannot express, so the raw query string
//! is decoded here.

use crate::results::FilterSelection;
use crate::types::{ChoiceField, TagField};

/// Decoded request parameters.
#[derive(Debug, Default, PartialEq)]
pub struct SearchParams {
    pub q: Option<String>,
    pub selection: FilterSelection,
}

pub fn parse(raw: Option<&str>) -> Result<SearchParams, String> {
    let mut params = SearchParams::default();
    let Some(raw) = raw else {
        return Ok(params);
    };

    let mut min_rating = None;
    let mut max_rating = None;

    for (key, value) in url::form_urlencoded::parse(raw.as_bytes()) {
        let key = key.as_ref();
        let value = value.into_owned();

        if key == "q" {
            params.q = Some(value).filter(|v| !v.trim().is_empty());
        } else if key == "min_rating" {
            min_rating = parse_rating(key, &value)?;
        } else if key == "max_rating" {
            max_rating = parse_rating(key, &value)?;
        } else if let Some(field) = TagField::ALL.into_iter().find(|f| f.param() == key) {
            if !value.is_empty() {
                params.selection = std::mem::take(&mut params.selection).with_tag(field, [value]);
            }
        } else if let Some(field) = ChoiceField::ALL.into_iter().find(|f| f.param() == key) {
            params.selection = std::mem::take(&mut params.selection).with_choice(field, value);
        }
    }

    if let (Some(min), Some(max)) = (min_rating, max_rating) {
        if min > max {
            return Err(format!("min_rating ({min}) is greater than max_rating ({max})"));
        }
    }
    params.selection = std::mem::take(&mut params.selection).with_rating(min_rating, max_rating);
    Ok(params)
}

/// The last non-blank `q` in a query string, decoded independently of
/// the other parameters.
pub fn query_text(raw: Option<&str>) -> Option<String> {
    url::form_urlencoded::parse(raw?.as_bytes())
        .filter(|(key, _)| key == "q")
        .map(|(_, value)| value.into_owned())
        .filter(|v| !v.trim().is_empty())
        .last()
}

fn parse_rating(key: &str, value: &str) -> Result<Option<f64>, String> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    match value.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(Some(v)),
        _ => Err(format!("{key} must be a number, got '{value}'")),
    }
}
