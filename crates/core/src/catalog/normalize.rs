//! # Record Normalization
//!
//! Turns one raw catalog record into a canonical [`Product`]. Source data is
//! hand-edited JSON, so every field is treated as hostile: ids may be
//! missing, prices may be strings, images hide under three different keys,
//! and categories arrive in whatever spelling the editor remembered.

use rand::Rng;
use regex::Regex;
use serde::Deserialize;
use serde_json::{Map, Value};

use super::product::{Product, PLACEHOLDER_IMG};

/// Serde view of one source record, before any coercion
#[derive(Debug, Default, Deserialize)]
pub struct RawProduct {
    pub id: Option<String>,
    pub title: Option<String>,
    pub price: Option<Value>,
    pub category: Option<String>,
    pub image: Option<Value>,
    pub images: Option<Value>,
    pub img: Option<String>,
    pub inventory: Option<Value>,
    pub stock: Option<Value>,
    pub featured: Option<Value>,
    pub description: Option<String>,
    pub condition: Option<String>,
    pub cond: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Lower-case, collapse non-alphanumeric runs to `-`, trim, cap at 64 chars.
/// An empty result gets a random `item-` suffix so the id is still unique.
pub fn slugify(s: &str) -> String {
    let lowered = s.to_lowercase();
    let collapsed = match Regex::new("[^a-z0-9]+") {
        Ok(re) => re.replace_all(&lowered, "-").into_owned(),
        Err(_) => lowered,
    };
    let out: String = collapsed.trim_matches('-').chars().take(64).collect();
    if out.is_empty() {
        random_item_id()
    } else {
        out
    }
}

/// `item-` plus six random base36 characters
fn random_item_id() -> String {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..6)
        .map(|_| char::from_digit(rng.gen_range(0..36), 36).unwrap_or('0'))
        .collect();
    format!("item-{}", suffix)
}

/// Fold category spellings into their canonical form; unknown categories
/// pass through lower-cased and trimmed.
pub fn normalize_category(v: &str) -> String {
    let s = v.trim().to_lowercase();
    match s.as_str() {
        "toys" | "toys & games" => "toys & games".to_string(),
        "home" | "home decor" => "home".to_string(),
        "purses" | "purses & accessories" => "purses".to_string(),
        "beauty" | "beauty & soaps" | "apothecary" => "apothecary".to_string(),
        _ => s,
    }
}

/// Coerce a JSON value to a non-negative finite number, default 0
fn coerce_price(value: Option<&Value>) -> f64 {
    let n = match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    };
    if n.is_finite() {
        n.max(0.0)
    } else {
        0.0
    }
}

/// Coerce an inventory-ish value to a whole unit count; `None` when the
/// field is absent or not numeric.
fn coerce_inventory(value: Option<&Value>) -> Option<u32> {
    let n = match value {
        Some(Value::Number(n)) => n.as_f64()?,
        Some(Value::String(s)) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    if !n.is_finite() {
        return None;
    }
    Some(n.max(0.0).trunc() as u32)
}

/// JavaScript-style truthiness, used for the `featured` flag
fn truthy(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Null) | None => false,
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

/// Normalize the `images` field: an array keeps its string members, a
/// single comma-separated string is split, anything else is empty.
fn coerce_images(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|v| v.as_str())
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
        Some(Value::String(s)) => s
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}

/// Pick the first viable image: `image`, then `images[0]`, then `img`,
/// then the placeholder.
fn pick_image(raw: &RawProduct, images: &[String]) -> String {
    if let Some(Value::String(s)) = &raw.image {
        let s = s.trim();
        if !s.is_empty() {
            return s.to_string();
        }
    }
    if let Some(first) = images.first() {
        return first.clone();
    }
    if let Some(s) = raw.img.as_deref().map(str::trim) {
        if !s.is_empty() {
            return s.to_string();
        }
    }
    PLACEHOLDER_IMG.to_string()
}

fn non_blank(s: &Option<String>) -> Option<String> {
    s.as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Normalize one raw record. `index` is the record's position in the source
/// array and seeds the id for untitled records (`item-1`, `item-2`, ...).
///
/// `current_stock` is left at 0 here; the loader attaches the real value
/// after reconciling with the stock ledger.
pub fn normalize_product(value: Value, index: usize) -> Product {
    let raw: RawProduct = serde_json::from_value(value).unwrap_or_default();

    let id = match non_blank(&raw.id) {
        Some(id) => id,
        None => {
            let seed = non_blank(&raw.title).unwrap_or_else(|| format!("item-{}", index + 1));
            slugify(&seed)
        }
    };

    let title = non_blank(&raw.title).unwrap_or_else(|| "Untitled Item".to_string());
    let images = coerce_images(raw.images.as_ref());
    let image = pick_image(&raw, &images);
    let inventory = coerce_inventory(raw.inventory.as_ref().or(raw.stock.as_ref()));

    Product {
        id,
        title,
        price: coerce_price(raw.price.as_ref()),
        category: normalize_category(raw.category.as_deref().unwrap_or("")),
        image,
        images,
        featured: truthy(raw.featured.as_ref()),
        description: non_blank(&raw.description).unwrap_or_default(),
        condition: non_blank(&raw.condition)
            .or_else(|| non_blank(&raw.cond))
            .unwrap_or_default(),
        inventory,
        current_stock: 0,
        extra: raw.extra,
    }
}
