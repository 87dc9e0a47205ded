//! Turning a raw result set into the filtered card grid.
//!
//! Every step here is a pure function of the raw result set and the user's
//! current [`FilterSelection`]; nothing is cached between interactions.

pub mod card;
pub mod filter;
pub mod grid;
pub mod table;

use std::collections::BTreeMap;

use serde::Serialize;

pub use card::{Card, ImageSlot};
pub use filter::{FilterSelection, RatingRange};
pub use table::{flatten, options, FlattenError, ResultTable};

use crate::search::RawResultSet;
use crate::types::{CategoryField, ChoiceField, TagField};

/// Shown whenever a search produced nothing to display.
pub const CRAVING_MESSAGE: &str = "Please tell us what you're craving";

/// Filter choices derived from the current result set.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FilterOptions {
    pub tags: BTreeMap<TagField, Vec<String>>,
    pub choices: BTreeMap<ChoiceField, Vec<String>>,
}

impl FilterOptions {
    pub fn derive(table: &ResultTable) -> Self {
        Self {
            tags: TagField::ALL
                .into_iter()
                .map(|f| (f, options(table, CategoryField::Tag(f))))
                .collect(),
            choices: ChoiceField::ALL
                .into_iter()
                .map(|f| (f, options(table, CategoryField::Choice(f))))
                .collect(),
        }
    }
}

/// Everything needed to draw one page of results.
#[derive(Debug, Clone, Serialize)]
pub struct ResultsView {
    /// Records returned by the search
    pub total: usize,
    /// Records left after filtering
    pub count: usize,
    pub options: FilterOptions,
    /// Observed rating span of the unfiltered results
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<RatingRange>,
    /// Rating range actually enforced, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating_filter: Option<RatingRange>,
    pub rows: Vec<Vec<Card>>,
}

#[derive(Debug, Clone)]
pub enum Presentation {
    /// Nothing to show; ask the user for another query.
    Craving,
    Results(ResultsView),
}

/// Flatten, filter and lay out a result set.
pub fn present(raw: &RawResultSet, selection: &FilterSelection, columns: usize) -> Presentation {
    let table = match flatten(raw) {
        Ok(table) => table,
        Err(FlattenError::Empty) => return Presentation::Craving,
        Err(e @ FlattenError::Malformed(_)) => {
            tracing::warn!("{}", e);
            return Presentation::Craving;
        }
    };

    let options = FilterOptions::derive(&table);
    let rating = table.rating_bounds();
    let filters = selection.predicates(rating);
    let kept = filter::apply(table.rows(), &filters);

    tracing::debug!(
        total = table.rows().len(),
        kept = kept.len(),
        filters = filters.len(),
        "filters applied"
    );

    let cards: Vec<Card> = kept.iter().map(|r| Card::from_record(r)).collect();
    Presentation::Results(ResultsView {
        total: table.rows().len(),
        count: cards.len(),
        options,
        rating,
        rating_filter: selection.rating_filter(rating),
        rows: grid::layout(cards, columns),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn raw(records: Value) -> RawResultSet {
        RawResultSet::new(
            "CrispyMuffins",
            json!({"data": {"Get": {"CrispyMuffins": records}}}),
        )
    }

    fn results(p: Presentation) -> ResultsView {
        match p {
            Presentation::Results(v) => v,
            Presentation::Craving => panic!("expected results"),
        }
    }

    fn ramen() -> RawResultSet {
        raw(json!([
            {"dish_ID": "r1", "dishName": "Shio Ramen", "spice_Category": "mild",
             "restaurantRating": 4.2, "linkUber": "None", "linkDoorDash": "https://dd/r1",
             "imageUber": "None"},
            {"dish_ID": "r2", "dishName": "Tantanmen", "spice_Category": "hot",
             "restaurantRating": "4.6", "linkUber": "https://uber/r2",
             "imageUber": "https://img/r2.jpg"},
        ]))
    }

    #[test]
    fn test_ramen_scenario_spice_filter() {
        let sel = FilterSelection::default().with_tag(TagField::Spice, ["hot"]);
        let view = results(present(&ramen(), &sel, 3));
        assert_eq!(view.total, 2);
        assert_eq!(view.count, 1);
        assert_eq!(view.rows.len(), 1);
        assert_eq!(view.rows[0][0].dish_id.as_deref(), Some("r2"));
        assert_eq!(view.rows[0][0].title, "Tantanmen");
    }

    #[test]
    fn test_options_come_from_unfiltered_results() {
        let sel = FilterSelection::default().with_tag(TagField::Spice, ["hot"]);
        let view = results(present(&ramen(), &sel, 3));
        assert_eq!(view.options.tags[&TagField::Spice], ["mild", "hot"]);
        assert_eq!(view.rating, Some(RatingRange::new(4.2, 4.6)));
    }

    #[test]
    fn test_empty_and_malformed_route_to_craving() {
        let none = FilterSelection::default();
        assert!(matches!(present(&raw(json!([])), &none, 3), Presentation::Craving));
        assert!(matches!(present(&raw(json!("oops")), &none, 3), Presentation::Craving));
        let missing = RawResultSet::new("CrispyMuffins", json!({"data": {}}));
        assert!(matches!(present(&missing, &none, 3), Presentation::Craving));
    }

    #[test]
    fn test_filtered_to_nothing_is_not_craving() {
        let sel = FilterSelection::default().with_choice(ChoiceField::Cuisine, "Peruvian");
        let view = results(present(&ramen(), &sel, 3));
        assert_eq!(view.count, 0);
        assert!(view.rows.is_empty());
    }

    #[test]
    fn test_grid_of_seven() {
        let items: Vec<Value> = (0..7)
            .map(|i| json!({"dish_ID": i.to_string(), "dishName": format!("d{i}")}))
            .collect();
        let view = results(present(&raw(Value::Array(items)), &FilterSelection::default(), 3));
        let shape: Vec<usize> = view.rows.iter().map(Vec::len).collect();
        assert_eq!(shape, [3, 3, 1]);
        let order: Vec<_> = view
            .rows
            .iter()
            .flatten()
            .map(|c| c.dish_id.clone().unwrap())
            .collect();
        assert_eq!(order, ["0", "1", "2", "3", "4", "5", "6"]);
    }

    #[test]
    fn test_view_serializes() {
        let view = results(present(&ramen(), &FilterSelection::default(), 3));
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["total"], 2);
        assert_eq!(json["options"]["tags"]["spice"], json!(["mild", "hot"]));
        assert_eq!(json["rows"][0][0]["link"]["platform"], "door_dash");
        assert_eq!(json["rows"][0][1]["image"]["status"], "pending");
        assert!(json.get("rating_filter").is_none());
    }
}
