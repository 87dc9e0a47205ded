use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Fields requested from the vector database for every dish, in request order.
pub const FIELDS: [&str; 30] = [
    "dish_ID",
    "dishName",
    "restaurantRating",
    "cuisine",
    "priceUber",
    "priceDescription",
    "restaurantName",
    "emoji",
    "restaurantPhone",
    "imageUber",
    "neighborhood",
    "normalizedIngredients",
    "foodHistory",
    "specificBaseAlternatives",
    "reviewCountCategory",
    "ratingCategory",
    "cleanedDiets",
    "linkUber",
    "linkDoorDash",
    "normalizedSuitableDiseaseFoodTags",
    "texture_Tags",
    "preparation_Tags",
    "feeling_Tags",
    "spice_Category",
    "sweetness_Category",
    "bitterness_Category",
    "sour_Category",
    "savory_Delicious_Category",
    "eater_ReviewDictVec",
    "infatuation_ReviewDictVec",
];

/// One dish, flattened from a single result object.
///
/// Text fields are `None` when the upstream value was `null` or absent. The
/// literal string `"None"` is kept as-is; callers that care (links, images)
/// treat it as absent themselves.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DishRecord {
    pub dish_id: Option<String>,
    pub dish_name: Option<String>,
    pub cuisine: Option<String>,
    pub neighborhood: Option<String>,
    pub emoji: Option<String>,

    pub restaurant_name: Option<String>,
    pub restaurant_phone: Option<String>,
    /// Coerced rating; non-numeric upstream values become `None`.
    pub restaurant_rating: Option<f64>,

    pub price_uber: Option<String>,
    pub price_description: Option<String>,
    pub link_uber: Option<String>,
    pub link_door_dash: Option<String>,
    pub image_uber: Option<String>,

    pub texture_tags: Option<String>,
    pub preparation_tags: Option<String>,
    pub feeling_tags: Option<String>,
    pub spice_category: Option<String>,
    pub sweetness_category: Option<String>,
    pub bitterness_category: Option<String>,
    pub sour_category: Option<String>,
    pub savory_delicious_category: Option<String>,

    pub cleaned_diets: Option<String>,
    pub suitable_disease_food_tags: Option<String>,

    pub food_history: Option<String>,
    pub specific_base_alternatives: Option<String>,
    pub normalized_ingredients: Option<String>,

    pub eater_review: Option<Value>,
    pub infatuation_review: Option<Value>,
    pub review_count_category: Option<String>,
    pub rating_category: Option<String>,
}

impl DishRecord {
    /// Build a record from one result object, coercing every scalar.
    pub fn from_fields(fields: &Map<String, Value>) -> Self {
        let text = |name: &str| fields.get(name).and_then(as_text);
        let opaque = |name: &str| fields.get(name).filter(|v| !v.is_null()).cloned();

        Self {
            dish_id: text("dish_ID"),
            dish_name: text("dishName"),
            cuisine: text("cuisine"),
            neighborhood: text("neighborhood"),
            emoji: text("emoji"),
            restaurant_name: text("restaurantName"),
            restaurant_phone: text("restaurantPhone"),
            restaurant_rating: fields.get("restaurantRating").and_then(coerce_rating),
            price_uber: text("priceUber"),
            price_description: text("priceDescription"),
            link_uber: text("linkUber"),
            link_door_dash: text("linkDoorDash"),
            image_uber: text("imageUber"),
            texture_tags: text("texture_Tags"),
            preparation_tags: text("preparation_Tags"),
            feeling_tags: text("feeling_Tags"),
            spice_category: text("spice_Category"),
            sweetness_category: text("sweetness_Category"),
            bitterness_category: text("bitterness_Category"),
            sour_category: text("sour_Category"),
            savory_delicious_category: text("savory_Delicious_Category"),
            cleaned_diets: text("cleanedDiets"),
            suitable_disease_food_tags: text("normalizedSuitableDiseaseFoodTags"),
            food_history: text("foodHistory"),
            specific_base_alternatives: text("specificBaseAlternatives"),
            normalized_ingredients: text("normalizedIngredients"),
            eater_review: opaque("eater_ReviewDictVec"),
            infatuation_review: opaque("infatuation_ReviewDictVec"),
            review_count_category: text("reviewCountCategory"),
            rating_category: text("ratingCategory"),
        }
    }

    /// Value of a filterable text column.
    pub fn category(&self, field: CategoryField) -> Option<&str> {
        let value = match field {
            CategoryField::Tag(tag) => match tag {
                TagField::Texture => &self.texture_tags,
                TagField::Preparation => &self.preparation_tags,
                TagField::Feeling => &self.feeling_tags,
                TagField::Spice => &self.spice_category,
                TagField::Sweetness => &self.sweetness_category,
                TagField::Bitterness => &self.bitterness_category,
                TagField::Sour => &self.sour_category,
                TagField::Savory => &self.savory_delicious_category,
            },
            CategoryField::Choice(choice) => match choice {
                ChoiceField::Cuisine => &self.cuisine,
                ChoiceField::HealthConcern => &self.suitable_disease_food_tags,
                ChoiceField::Diet => &self.cleaned_diets,
                ChoiceField::Price => &self.price_description,
                ChoiceField::ReviewCount => &self.review_count_category,
            },
        };
        value.as_deref()
    }
}

/// Render a scalar as display text. `null` is missing.
fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        other => Some(other.to_string()),
    }
}

/// Coerce a rating to a finite number; anything else is missing.
pub fn coerce_rating(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    n.is_finite().then_some(n)
}

/// Multi-select categorical tag columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TagField {
    Texture,
    Preparation,
    Feeling,
    Spice,
    Sweetness,
    Bitterness,
    Sour,
    Savory,
}

impl TagField {
    pub const ALL: [TagField; 8] = [
        TagField::Texture,
        TagField::Preparation,
        TagField::Feeling,
        TagField::Spice,
        TagField::Sweetness,
        TagField::Bitterness,
        TagField::Sour,
        TagField::Savory,
    ];

    /// Upstream column name.
    pub fn column(self) -> &'static str {
        match self {
            TagField::Texture => "texture_Tags",
            TagField::Preparation => "preparation_Tags",
            TagField::Feeling => "feeling_Tags",
            TagField::Spice => "spice_Category",
            TagField::Sweetness => "sweetness_Category",
            TagField::Bitterness => "bitterness_Category",
            TagField::Sour => "sour_Category",
            TagField::Savory => "savory_Delicious_Category",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TagField::Texture => "Texture Tags",
            TagField::Preparation => "Preparation Tags",
            TagField::Feeling => "Feeling Tags",
            TagField::Spice => "Spice Category",
            TagField::Sweetness => "Sweetness Category",
            TagField::Bitterness => "Bitterness Category",
            TagField::Sour => "Sour Category",
            TagField::Savory => "Savory/Delicious Category",
        }
    }

    /// Query-string key used by the HTTP UI.
    pub fn param(self) -> &'static str {
        match self {
            TagField::Texture => "texture",
            TagField::Preparation => "preparation",
            TagField::Feeling => "feeling",
            TagField::Spice => "spice",
            TagField::Sweetness => "sweetness",
            TagField::Bitterness => "bitterness",
            TagField::Sour => "sour",
            TagField::Savory => "savory",
        }
    }
}

/// Single-select categorical columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChoiceField {
    Cuisine,
    HealthConcern,
    Diet,
    Price,
    ReviewCount,
}

impl ChoiceField {
    pub const ALL: [ChoiceField; 5] = [
        ChoiceField::Cuisine,
        ChoiceField::HealthConcern,
        ChoiceField::Diet,
        ChoiceField::Price,
        ChoiceField::ReviewCount,
    ];

    pub fn column(self) -> &'static str {
        match self {
            ChoiceField::Cuisine => "cuisine",
            ChoiceField::HealthConcern => "normalizedSuitableDiseaseFoodTags",
            ChoiceField::Diet => "cleanedDiets",
            ChoiceField::Price => "priceDescription",
            ChoiceField::ReviewCount => "reviewCountCategory",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ChoiceField::Cuisine => "Select Cuisine",
            ChoiceField::HealthConcern => "Do you have health concerns?",
            ChoiceField::Diet => "Select Your Diet More Specific",
            ChoiceField::Price => "Select Price",
            ChoiceField::ReviewCount => "Select Review Count Category",
        }
    }

    pub fn param(self) -> &'static str {
        match self {
            ChoiceField::Cuisine => "cuisine",
            ChoiceField::HealthConcern => "health",
            ChoiceField::Diet => "diet",
            ChoiceField::Price => "price",
            ChoiceField::ReviewCount => "review_count",
        }
    }
}

/// Any filterable text column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CategoryField {
    Tag(TagField),
    Choice(ChoiceField),
}
