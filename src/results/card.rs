use serde::Serialize;
use serde_json::Value;

use crate::image::ImageFormat;
use crate::types::DishRecord;

/// Literal the upstream data uses for "no value" in link and image fields.
pub const NONE_LITERAL: &str = "None";

pub const NO_IMAGE: &str = "No image available";
pub const IMAGE_FAILED: &str = "Failed to load image from URL";

/// A link/image field with `null`, empty and `"None"` all mapped to absent.
pub fn usable(value: Option<&str>) -> Option<&str> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty() && *v != NONE_LITERAL)
}

/// Delivery platform a card title links to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    Uber,
    DoorDash,
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Platform::Uber => write!(f, "Uber Eats"),
            Platform::DoorDash => write!(f, "DoorDash"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TitleLink {
    pub platform: Platform,
    pub url: String,
}

/// Pick the title link: Uber first, then DoorDash, else none.
pub fn title_link(record: &DishRecord) -> Option<TitleLink> {
    if let Some(url) = usable(record.link_uber.as_deref()) {
        return Some(TitleLink {
            platform: Platform::Uber,
            url: url.to_string(),
        });
    }
    usable(record.link_door_dash.as_deref()).map(|url| TitleLink {
        platform: Platform::DoorDash,
        url: url.to_string(),
    })
}

/// Image state of a card.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ImageSlot {
    /// No usable URL on the record.
    Unavailable,
    /// URL present, not fetched.
    Pending { url: String },
    Loaded {
        url: String,
        format: ImageFormat,
        size: usize,
        #[serde(skip)]
        data: Vec<u8>,
    },
    Failed { url: String, reason: String },
}

/// Label/value line in a card's detail panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Detail {
    pub label: &'static str,
    pub value: String,
}

/// One dish as shown in the grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Card {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dish_id: Option<String>,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<TitleLink>,
    /// Collapsed summary line of the expandable panel.
    pub summary: String,
    pub image: ImageSlot,
    pub details: Vec<Detail>,
}

impl Card {
    pub fn from_record(record: &DishRecord) -> Self {
        let title = record
            .dish_name
            .clone()
            .unwrap_or_else(|| "Unnamed dish".to_string());

        let image = match usable(record.image_uber.as_deref()) {
            Some(url) => ImageSlot::Pending {
                url: url.to_string(),
            },
            None => ImageSlot::Unavailable,
        };

        Self {
            dish_id: record.dish_id.clone(),
            summary: summary(&title, record),
            link: title_link(record),
            title,
            image,
            details: details(record),
        }
    }
}

fn summary(title: &str, record: &DishRecord) -> String {
    let mut tags: Vec<String> = Vec::new();
    tags.extend(record.emoji.clone());
    tags.extend(record.price_uber.clone());
    tags.extend(record.eater_review.as_ref().map(|v| format!("Eater {}", review_text(v))));
    tags.extend(
        record
            .infatuation_review
            .as_ref()
            .map(|v| format!("Infatuation {}", review_text(v))),
    );

    let mut out = title.to_string();
    if !tags.is_empty() {
        out.push_str(&format!(" ({})", tags.join(", ")));
    }
    if let Some(hood) = &record.neighborhood {
        out.push_str(&format!(" ~ {hood}"));
    }
    out
}

fn details(record: &DishRecord) -> Vec<Detail> {
    let text = |v: &Option<String>| v.clone().unwrap_or_else(|| "n/a".to_string());
    vec![
        Detail {
            label: "Cuisine",
            value: text(&record.cuisine),
        },
        Detail {
            label: "Rating",
            value: record
                .restaurant_rating
                .map_or_else(|| "n/a".to_string(), |r| format!("{r:.1}")),
        },
        Detail {
            label: "Price",
            value: text(&record.price_uber),
        },
        Detail {
            label: "Restaurant",
            value: text(&record.restaurant_name),
        },
        Detail {
            label: "Ingredients",
            value: text(&record.normalized_ingredients),
        },
        Detail {
            label: "Phone",
            value: text(&record.restaurant_phone),
        },
        Detail {
            label: "Food History",
            value: text(&record.food_history),
        },
        Detail {
            label: "Alternative Dishes",
            value: text(&record.specific_base_alternatives),
        },
    ]
}

/// Review vectors are shown as-is: plain strings verbatim, anything else as
/// compact JSON.
fn review_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(uber: Option<&str>, door_dash: Option<&str>) -> DishRecord {
        DishRecord {
            dish_name: Some("Khao Soi".into()),
            link_uber: uber.map(Into::into),
            link_door_dash: door_dash.map(Into::into),
            ..Default::default()
        }
    }

    #[test]
    fn test_link_prefers_uber() {
        let link = title_link(&record(Some("https://uber/x"), Some("https://dd/x"))).unwrap();
        assert_eq!(link.platform, Platform::Uber);
        assert_eq!(link.url, "https://uber/x");
    }

    #[test]
    fn test_link_none_literal_falls_through() {
        let link = title_link(&record(Some("None"), Some("https://dd/x"))).unwrap();
        assert_eq!(link.platform, Platform::DoorDash);
        assert_eq!(link.url, "https://dd/x");

        let link = title_link(&record(None, Some("https://dd/y"))).unwrap();
        assert_eq!(link.platform, Platform::DoorDash);
    }

    #[test]
    fn test_link_absent() {
        assert_eq!(title_link(&record(Some("None"), Some("None"))), None);
        assert_eq!(title_link(&record(None, None)), None);
        assert_eq!(title_link(&record(Some(""), Some("  "))), None);

        let card = Card::from_record(&record(Some("None"), None));
        assert!(card.link.is_none());
        assert_eq!(card.title, "Khao Soi");
    }

    #[test]
    fn test_image_slot() {
        let mut r = record(None, None);
        assert_eq!(Card::from_record(&r).image, ImageSlot::Unavailable);

        r.image_uber = Some("None".into());
        assert_eq!(Card::from_record(&r).image, ImageSlot::Unavailable);

        r.image_uber = Some("https://img/x.jpg".into());
        assert_eq!(
            Card::from_record(&r).image,
            ImageSlot::Pending {
                url: "https://img/x.jpg".into()
            }
        );
    }

    #[test]
    fn test_summary_and_details() {
        let r = DishRecord {
            dish_name: Some("Tonkotsu".into()),
            emoji: Some("🍜".into()),
            price_uber: Some("$14.50".into()),
            neighborhood: Some("East Village".into()),
            eater_review: Some(json!({"stars": 4})),
            restaurant_rating: Some(4.6),
            normalized_ingredients: Some("pork, noodles".into()),
            ..Default::default()
        };
        let card = Card::from_record(&r);
        assert_eq!(
            card.summary,
            r#"Tonkotsu (🍜, $14.50, Eater {"stars":4}) ~ East Village"#
        );
        let find = |label: &str| {
            card.details
                .iter()
                .find(|d| d.label == label)
                .map(|d| d.value.clone())
                .unwrap()
        };
        assert_eq!(find("Rating"), "4.6");
        assert_eq!(find("Ingredients"), "pork, noodles");
        assert_eq!(find("Phone"), "n/a");
    }

    #[test]
    fn test_whole_rating_keeps_one_decimal() {
        let r = DishRecord {
            restaurant_rating: Some(4.0),
            ..Default::default()
        };
        let card = Card::from_record(&r);
        let rating = card.details.iter().find(|d| d.label == "Rating").unwrap();
        assert_eq!(rating.value, "4.0");
    }

    #[test]
    fn test_card_serialization_hides_image_bytes() {
        let mut card = Card::from_record(&record(Some("https://uber/x"), None));
        card.image = ImageSlot::Loaded {
            url: "https://img/x.png".into(),
            format: ImageFormat::Png,
            size: 4,
            data: vec![1, 2, 3, 4],
        };
        let json = serde_json::to_value(&card).unwrap();
        assert_eq!(json["image"]["status"], "loaded");
        assert_eq!(json["image"]["format"], "png");
        assert_eq!(json["image"]["size"], 4);
        assert!(json["image"].get("data").is_none());
        assert_eq!(json["link"]["platform"], "uber");
    }
}
