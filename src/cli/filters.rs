use anyhow::{bail, Result};
use clap::Args;

use crate::results::FilterSelection;
use crate::types::{ChoiceField, TagField};

/// Filter and display flags shared by `search` and `render`.
#[derive(Args, Debug, Default, Clone)]
pub struct FilterArgs {
    /// Texture tags to keep (repeatable)
    #[arg(long, value_name = "TAG")]
    texture: Vec<String>,

    /// Preparation tags to keep (repeatable)
    #[arg(long, value_name = "TAG")]
    preparation: Vec<String>,

    /// Feeling tags to keep (repeatable)
    #[arg(long, value_name = "TAG")]
    feeling: Vec<String>,

    /// Spice categories to keep (repeatable)
    #[arg(long, value_name = "CATEGORY")]
    spice: Vec<String>,

    /// Sweetness categories to keep (repeatable)
    #[arg(long, value_name = "CATEGORY")]
    sweetness: Vec<String>,

    /// Bitterness categories to keep (repeatable)
    #[arg(long, value_name = "CATEGORY")]
    bitterness: Vec<String>,

    /// Sour categories to keep (repeatable)
    #[arg(long, value_name = "CATEGORY")]
    sour: Vec<String>,

    /// Savory/delicious categories to keep (repeatable)
    #[arg(long, value_name = "CATEGORY")]
    savory: Vec<String>,

    /// Cuisine to keep ("All" for any)
    #[arg(long)]
    cuisine: Option<String>,

    /// Health concern tag to keep ("All" for any)
    #[arg(long)]
    health: Option<String>,

    /// Specific diet to keep ("All" for any)
    #[arg(long)]
    diet: Option<String>,

    /// Price description to keep ("All" for any)
    #[arg(long)]
    price: Option<String>,

    /// Review count category to keep ("All" for any)
    #[arg(long)]
    review_count: Option<String>,

    /// Lowest restaurant rating to keep (inclusive)
    #[arg(long)]
    pub min_rating: Option<f64>,

    /// Highest restaurant rating to keep (inclusive)
    #[arg(long)]
    pub max_rating: Option<f64>,

    /// Cards per grid row (overrides display.columns)
    #[arg(long, value_parser = clap::value_parser!(u16).range(1..))]
    pub columns: Option<u16>,

    /// Skip fetching card images
    #[arg(long)]
    pub no_images: bool,

    /// Print the filter options derived from the results
    #[arg(long)]
    pub show_options: bool,
}

impl FilterArgs {
    /// Build the immutable selection for this invocation.
    pub fn selection(&self) -> Result<FilterSelection> {
        if let (Some(min), Some(max)) = (self.min_rating, self.max_rating) {
            if min > max {
                bail!("--min-rating ({}) is greater than --max-rating ({})", min, max);
            }
        }
        for (flag, value) in [("--min-rating", self.min_rating), ("--max-rating", self.max_rating)] {
            if value.is_some_and(|v| !v.is_finite()) {
                bail!("{} must be a finite number", flag);
            }
        }

        let tags = [
            (TagField::Texture, &self.texture),
            (TagField::Preparation, &self.preparation),
            (TagField::Feeling, &self.feeling),
            (TagField::Spice, &self.spice),
            (TagField::Sweetness, &self.sweetness),
            (TagField::Bitterness, &self.bitterness),
            (TagField::Sour, &self.sour),
            (TagField::Savory, &self.savory),
        ];
        let choices = [
            (ChoiceField::Cuisine, &self.cuisine),
            (ChoiceField::HealthConcern, &self.health),
            (ChoiceField::Diet, &self.diet),
            (ChoiceField::Price, &self.price),
            (ChoiceField::ReviewCount, &self.review_count),
        ];

        let mut selection = FilterSelection::default().with_rating(self.min_rating, self.max_rating);
        for (field, values) in tags {
            if !values.is_empty() {
                selection = selection.with_tag(field, values.iter().cloned());
            }
        }
        for (field, value) in choices {
            if let Some(v) = value {
                selection = selection.with_choice(field, v.clone());
            }
        }
        Ok(selection)
    }
}
