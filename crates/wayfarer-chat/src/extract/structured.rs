//! Food and attraction mining from structured blocks and prose.
//!
//! The model is instructed to emit inline `LOCAL_FOOD:[...]` and
//! `LOCAL_ATTRACTIONS:[...]` arrays, but the payload is untrusted:
//! extraction repairs bareword keys, single quotes, and trailing commas
//! before strict JSON parsing, then degrades through a pairwise field
//! regex, labeled prose sections, and finally bare sentence patterns.
//! Duplicate names are suppressed at every tier and each item receives
//! a generated id and a deterministic image-search URL.

use regex::Regex;
use std::sync::LazyLock;
use uuid::Uuid;

use wayfarer_core::types::{AttractionItem, FoodItem};

/// Stands in for embedded newlines so the repair regexes and field
/// scans stay single-line; restored to a space in final values.
const NEWLINE_SENTINEL: char = '¶';

const FOOD_BLOCK_LABELS: &[&str] = &["LOCAL_FOOD", "LOCAL FOOD", "LOCAL-FOOD", "LOCALFOOD"];
const ATTRACTION_BLOCK_LABELS: &[&str] = &[
    "LOCAL_ATTRACTIONS",
    "LOCAL ATTRACTIONS",
    "LOCAL-ATTRACTIONS",
    "LOCALATTRACTIONS",
];

const FOOD_PROSE_LABELS: &[&str] = &[
    "local cuisine",
    "local food",
    "must-try foods",
    "food to try",
    "local dishes",
    "what to eat",
];
const ATTRACTION_PROSE_LABELS: &[&str] = &[
    "local attractions",
    "places to visit",
    "top attractions",
    "things to do",
    "must-see sights",
];

// =============================================================================
// Raw item plumbing
// =============================================================================

#[derive(Debug, Default, Clone)]
struct RawItem {
    name: String,
    price: Option<String>,
    description: Option<String>,
    location: Option<String>,
    duration: Option<String>,
    image_keyword: Option<String>,
}

/// Extract food and attraction items for one turn.
pub fn extract_structured(
    model_text: &str,
    destination: Option<&str>,
) -> (Vec<FoodItem>, Vec<AttractionItem>) {
    let food = extract_kind(
        model_text,
        FOOD_BLOCK_LABELS,
        FOOD_PROSE_LABELS,
        food_sentence_items,
    );
    let attractions = extract_kind(
        model_text,
        ATTRACTION_BLOCK_LABELS,
        ATTRACTION_PROSE_LABELS,
        attraction_sentence_items,
    );

    let fallback_location = destination.unwrap_or("Local area");

    let food = food
        .into_iter()
        .map(|item| {
            let image_url = image_url(item.image_keyword.as_deref().unwrap_or(&item.name));
            FoodItem {
                id: Uuid::new_v4(),
                price: item.price.unwrap_or_else(|| "Varies".to_string()),
                description: item.description.unwrap_or_default(),
                location: item
                    .location
                    .unwrap_or_else(|| fallback_location.to_string()),
                image_url,
                name: item.name,
            }
        })
        .collect();

    let attractions = attractions
        .into_iter()
        .map(|item| {
            let image_url = image_url(item.image_keyword.as_deref().unwrap_or(&item.name));
            AttractionItem {
                id: Uuid::new_v4(),
                price: item.price.unwrap_or_else(|| "Varies".to_string()),
                description: item.description.unwrap_or_default(),
                location: item
                    .location
                    .unwrap_or_else(|| fallback_location.to_string()),
                duration: item.duration.unwrap_or_else(|| "1-2 hours".to_string()),
                image_url,
                name: item.name,
            }
        })
        .collect();

    (food, attractions)
}

/// Run the fallback ladder for one entity kind; first non-empty tier wins.
fn extract_kind(
    text: &str,
    block_labels: &[&str],
    prose_labels: &[&str],
    sentence_fn: fn(&str) -> Vec<RawItem>,
) -> Vec<RawItem> {
    if let Some(block) = find_block(text, block_labels) {
        if let Some(items) = parse_block_items(&block) {
            if !items.is_empty() {
                return dedup(items);
            }
        }
        let pairwise = pairwise_items(&block);
        if !pairwise.is_empty() {
            return dedup(pairwise);
        }
    }

    let prose = prose_items(text, prose_labels);
    if !prose.is_empty() {
        return dedup(prose);
    }

    dedup(sentence_fn(text))
}

fn dedup(items: Vec<RawItem>) -> Vec<RawItem> {
    let mut seen: Vec<String> = Vec::new();
    items
        .into_iter()
        .filter(|item| {
            let key = item.name.trim().to_lowercase();
            if key.is_empty() || seen.contains(&key) {
                false
            } else {
                seen.push(key);
                true
            }
        })
        .collect()
}

/// Deterministic image-search URL from a keyword.
fn image_url(keyword: &str) -> String {
    let terms: Vec<String> = keyword
        .to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect();
    format!("https://source.unsplash.com/480x360/?{}", terms.join(","))
}

// =============================================================================
// Tier 1: labeled bracket block
// =============================================================================

/// Case-insensitive ASCII search; safe on any UTF-8 haystack because
/// the needle's ASCII bytes can only match at char boundaries.
fn find_ci(haystack: &str, needle: &str, from: usize) -> Option<usize> {
    let hay = haystack.as_bytes();
    let ned = needle.as_bytes();
    if ned.is_empty() || hay.len() < ned.len() || from > hay.len() - ned.len() {
        return None;
    }
    (from..=hay.len() - ned.len()).find(|&i| hay[i..i + ned.len()].eq_ignore_ascii_case(ned))
}

/// Locate a labeled `[...]` block, matching brackets across nesting.
fn find_block(text: &str, labels: &[&str]) -> Option<String> {
    for label in labels {
        let mut search_from = 0;
        while let Some(pos) = find_ci(text, label, search_from) {
            let after_label = pos + label.len();
            let rest = text[after_label..].trim_start_matches([' ', '\t', '\r', '\n', ':', '=']);
            if let Some(stripped) = rest.strip_prefix('[') {
                let mut depth = 1usize;
                for (i, c) in stripped.char_indices() {
                    match c {
                        '[' | '{' => depth += 1,
                        ']' | '}' => {
                            depth -= 1;
                            if depth == 0 {
                                return Some(format!("[{}]", &stripped[..i]));
                            }
                        }
                        _ => {}
                    }
                }
                return None;
            }
            search_from = after_label;
        }
    }
    None
}

// `{name: "x"` or `, price: ...` -> quoted key
static BAREWORD_KEY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([{,][\s¶]*)([A-Za-z_][A-Za-z0-9_]*)[\s¶]*:").unwrap());

// `'single quoted'` in key or value position
static SINGLE_QUOTE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([:,\{\[][\s¶]*)'([^']*)'").unwrap());

// `, }` or `, ]`
static TRAILING_COMMA_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r",[\s¶]*([}\]])").unwrap());

/// Rewrite common model JSON mistakes into strict JSON.
///
/// Newlines become the sentinel so every repair sees one line, then the
/// sentinel is normalized to a space before parsing.
fn repair_json(block: &str) -> String {
    let flat: String = block
        .replace('\r', "")
        .replace('\n', &NEWLINE_SENTINEL.to_string());
    let quoted_keys = BAREWORD_KEY_RE.replace_all(&flat, "${1}\"${2}\":");
    let double_quoted = SINGLE_QUOTE_RE.replace_all(&quoted_keys, "${1}\"${2}\"");
    TRAILING_COMMA_RE
        .replace_all(&double_quoted, "${1}")
        .replace(NEWLINE_SENTINEL, " ")
}

/// Strict parse of the repaired block; `None` signals "unparseable".
fn parse_block_items(block: &str) -> Option<Vec<RawItem>> {
    let repaired = repair_json(block);
    let values: Vec<serde_json::Value> = serde_json::from_str(&repaired).ok()?;
    Some(
        values
            .iter()
            .filter_map(|value| {
                let name = string_field(value, &["name"])?;
                Some(RawItem {
                    name,
                    price: string_field(value, &["price", "cost"]),
                    description: string_field(value, &["description", "desc"]),
                    location: string_field(value, &["location", "where"]),
                    duration: string_field(value, &["duration", "hours"]),
                    image_keyword: string_field(value, &["image_keyword", "image"]),
                })
            })
            .collect(),
    )
}

fn string_field(value: &serde_json::Value, keys: &[&str]) -> Option<String> {
    for key in keys {
        match value.get(key) {
            Some(serde_json::Value::String(s)) => {
                let restored = restore_newlines(s);
                if !restored.is_empty() {
                    return Some(restored);
                }
            }
            Some(serde_json::Value::Number(n)) => return Some(n.to_string()),
            _ => {}
        }
    }
    None
}

fn restore_newlines(raw: &str) -> String {
    raw.replace(NEWLINE_SENTINEL, " ").trim().to_string()
}

// =============================================================================
// Tier 2: pairwise field regexes
// =============================================================================

static OBJECT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\{[^{}]*\}").unwrap());

static NAME_FIELD_RE: LazyLock<Regex> = LazyLock::new(|| field_regex("name"));
static PRICE_FIELD_RE: LazyLock<Regex> = LazyLock::new(|| field_regex("price"));
static DESCRIPTION_FIELD_RE: LazyLock<Regex> = LazyLock::new(|| field_regex("description"));
static LOCATION_FIELD_RE: LazyLock<Regex> = LazyLock::new(|| field_regex("location"));
static DURATION_FIELD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)["']?(?:duration|hours)["']?\s*[:=]\s*["']?([^"',}]+)"#).unwrap());
static IMAGE_FIELD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)["']?image(?:_keyword)?["']?\s*[:=]\s*["']?([^"',}]+)"#).unwrap()
});

fn field_regex(key: &str) -> Regex {
    Regex::new(&format!(
        r#"(?i)["']?{}["']?\s*[:=]\s*["']?([^"',}}]+)"#,
        key
    ))
    .unwrap()
}

/// Per-object field capture for blocks strict parsing cannot handle.
fn pairwise_items(block: &str) -> Vec<RawItem> {
    let flat: String = block
        .replace('\r', "")
        .replace('\n', &NEWLINE_SENTINEL.to_string());
    OBJECT_RE
        .find_iter(&flat)
        .filter_map(|object| {
            let object = object.as_str();
            let name = capture(&NAME_FIELD_RE, object)?;
            Some(RawItem {
                name,
                price: capture(&PRICE_FIELD_RE, object),
                description: capture(&DESCRIPTION_FIELD_RE, object),
                location: capture(&LOCATION_FIELD_RE, object),
                duration: capture(&DURATION_FIELD_RE, object),
                image_keyword: capture(&IMAGE_FIELD_RE, object),
            })
        })
        .collect()
}

fn capture(re: &Regex, object: &str) -> Option<String> {
    re.captures(object)
        .and_then(|caps| caps.get(1))
        .map(|m| restore_newlines(m.as_str()))
        .filter(|s| !s.is_empty())
}

// =============================================================================
// Tier 3: labeled prose sections
// =============================================================================

static LIST_ITEM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(?:[-*•]|\d{1,2}[.)])\s+(.+)$").unwrap());

/// Scan list items under a labeled heading line.
fn prose_items(text: &str, labels: &[&str]) -> Vec<RawItem> {
    let lines: Vec<&str> = text.lines().collect();
    let mut items = Vec::new();

    for (i, line) in lines.iter().enumerate() {
        let lower = line.to_lowercase();
        if !labels.iter().any(|label| lower.contains(label)) {
            continue;
        }
        for body_line in &lines[i + 1..] {
            if let Some(caps) = LIST_ITEM_RE.captures(body_line) {
                if let Some(m) = caps.get(1) {
                    if let Some(item) = split_list_item(m.as_str()) {
                        items.push(item);
                    }
                }
            } else if body_line.trim().is_empty() && !items.is_empty() {
                break;
            } else if !body_line.trim().is_empty() && !items.is_empty() {
                break;
            }
        }
        if !items.is_empty() {
            break;
        }
    }
    items
}

/// Split "Name - description" / "Name: description" list items.
fn split_list_item(raw: &str) -> Option<RawItem> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    let (name, description) = if let Some((name, rest)) = raw.split_once(" - ") {
        (name, Some(rest))
    } else if let Some((name, rest)) = raw.split_once("–") {
        (name, Some(rest))
    } else if let Some((name, rest)) = raw.split_once(": ") {
        (name, Some(rest))
    } else {
        (raw, None)
    };
    let name = name.trim().trim_matches('*').trim();
    if name.is_empty() {
        return None;
    }
    Some(RawItem {
        name: name.to_string(),
        description: description.map(|d| d.trim().to_string()),
        ..RawItem::default()
    })
}

// =============================================================================
// Tier 4: sentence patterns
// =============================================================================

static FOOD_SENTENCE_RES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(
            r"(?i:popular|famous|local|traditional)\s+(?i:food|dish|snack|delicacy)\s+(?i:is\s+)?(?i:called\s+)?([A-Z][a-z]+(?:\s+[A-Z][a-z]+){0,3})",
        )
        .unwrap(),
        Regex::new(r"\b(?i:try)\s+(?i:the\s+)?([A-Z][a-z]+(?:\s+[A-Z][a-z]+){0,3})").unwrap(),
    ]
});

static ATTRACTION_SENTENCE_RES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"\b(?i:visit)\s+(?i:the\s+)?([A-Z][a-z]+(?:\s+[A-Z][a-z]+){0,3})").unwrap(),
        Regex::new(r"\b(?i:famous\s+for)\s+(?i:the\s+)?([A-Z][a-z]+(?:\s+[A-Z][a-z]+){0,3})")
            .unwrap(),
    ]
});

fn food_sentence_items(text: &str) -> Vec<RawItem> {
    sentence_items(text, &FOOD_SENTENCE_RES)
}

fn attraction_sentence_items(text: &str) -> Vec<RawItem> {
    sentence_items(text, &ATTRACTION_SENTENCE_RES)
}

fn sentence_items(text: &str, res: &[Regex]) -> Vec<RawItem> {
    let mut items = Vec::new();
    for re in res {
        for caps in re.captures_iter(text) {
            if let Some(m) = caps.get(1) {
                items.push(RawItem {
                    name: m.as_str().trim().to_string(),
                    ..RawItem::default()
                });
            }
        }
    }
    items
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // ---- Tier 1: strict blocks ----

    #[test]
    fn test_valid_food_block_round_trip() {
        let text = r#"Enjoy the food! LOCAL_FOOD:[{name:"A",price:"$5",description:"d",location:"L"}]"#;
        let (food, _) = extract_structured(text, None);
        assert_eq!(food.len(), 1);
        assert_eq!(food[0].name, "A");
        assert_eq!(food[0].price, "$5");
        assert_eq!(food[0].description, "d");
        assert_eq!(food[0].location, "L");
        assert!(!food[0].image_url.is_empty());
    }

    #[test]
    fn test_strict_json_block() {
        let text = r#"LOCAL_FOOD:[{"name":"Sushi","price":"$15","description":"Fresh nigiri","location":"Tokyo","image_keyword":"sushi"}]"#;
        let (food, _) = extract_structured(text, None);
        assert_eq!(food.len(), 1);
        assert_eq!(food[0].name, "Sushi");
        assert!(food[0].image_url.contains("sushi"));
    }

    #[test]
    fn test_attraction_block_with_duration() {
        let text = r#"LOCAL_ATTRACTIONS:[{"name":"Colosseum","price":"$18","description":"Ancient arena","location":"Rome","duration":"2-3 hours"}]"#;
        let (_, attractions) = extract_structured(text, None);
        assert_eq!(attractions.len(), 1);
        assert_eq!(attractions[0].duration, "2-3 hours");
    }

    #[test]
    fn test_single_quotes_repaired() {
        let text = "LOCAL_FOOD:[{'name': 'Pad Thai', 'price': '$4'}]";
        let (food, _) = extract_structured(text, None);
        assert_eq!(food.len(), 1);
        assert_eq!(food[0].name, "Pad Thai");
        assert_eq!(food[0].price, "$4");
    }

    #[test]
    fn test_trailing_comma_stripped() {
        let text = r#"LOCAL_FOOD:[{"name":"Ramen","price":"$9",},]"#;
        let (food, _) = extract_structured(text, None);
        assert_eq!(food.len(), 1);
        assert_eq!(food[0].name, "Ramen");
    }

    #[test]
    fn test_embedded_newlines_normalized() {
        let text = "LOCAL_FOOD:[{\"name\":\"Croissant\",\n\"description\":\"Flaky\nbutter pastry\"}]";
        let (food, _) = extract_structured(text, None);
        assert_eq!(food.len(), 1);
        assert_eq!(food[0].description, "Flaky butter pastry");
    }

    #[test]
    fn test_label_spelling_with_space() {
        let text = r#"LOCAL FOOD: [{"name":"Bagel"}]"#;
        let (food, _) = extract_structured(text, None);
        assert_eq!(food.len(), 1);
    }

    #[test]
    fn test_label_case_insensitive() {
        let text = r#"local_food:[{"name":"Tacos"}]"#;
        let (food, _) = extract_structured(text, None);
        assert_eq!(food.len(), 1);
    }

    #[test]
    fn test_numeric_price_accepted() {
        let text = r#"LOCAL_FOOD:[{"name":"Gelato","price":5}]"#;
        let (food, _) = extract_structured(text, None);
        assert_eq!(food[0].price, "5");
    }

    #[test]
    fn test_block_dedup_case_insensitive() {
        let text = r#"LOCAL_FOOD:[{"name":"Sushi"},{"name":"SUSHI"},{"name":"Ramen"}]"#;
        let (food, _) = extract_structured(text, None);
        assert_eq!(food.len(), 2);
    }

    #[test]
    fn test_items_without_name_skipped() {
        let text = r#"LOCAL_FOOD:[{"price":"$5"},{"name":"Ramen"}]"#;
        let (food, _) = extract_structured(text, None);
        assert_eq!(food.len(), 1);
    }

    // ---- Tier 2: pairwise regex ----

    #[test]
    fn test_pairwise_fallback_on_broken_json() {
        // Unbalanced quote defeats strict parsing even after repair.
        let text = r#"LOCAL_FOOD:[{name: Sushi", price: "$15", description: "Fresh}]"#;
        let (food, _) = extract_structured(text, None);
        assert_eq!(food.len(), 1);
        assert_eq!(food[0].name, "Sushi");
        assert_eq!(food[0].price, "$15");
    }

    #[test]
    fn test_pairwise_hours_key_maps_to_duration() {
        let text = r#"LOCAL_ATTRACTIONS:[{name: "Grand Palace", hours: "2 hours", price: broken"}]"#;
        let (_, attractions) = extract_structured(text, None);
        assert_eq!(attractions.len(), 1);
        assert_eq!(attractions[0].duration, "2 hours");
    }

    // ---- Tier 3: prose sections ----

    #[test]
    fn test_prose_section_bullets() {
        let text = "Some intro.\n\nLocal Cuisine:\n- Pad Thai - stir-fried noodles\n- Mango Sticky Rice: sweet dessert\n\nOther text.";
        let (food, _) = extract_structured(text, None);
        assert_eq!(food.len(), 2);
        assert_eq!(food[0].name, "Pad Thai");
        assert_eq!(food[0].description.as_str(), "stir-fried noodles");
        assert_eq!(food[1].name, "Mango Sticky Rice");
    }

    #[test]
    fn test_prose_section_numbered() {
        let text = "Places to Visit:\n1. Eiffel Tower\n2. Louvre Museum";
        let (_, attractions) = extract_structured(text, None);
        assert_eq!(attractions.len(), 2);
        assert_eq!(attractions[0].name, "Eiffel Tower");
    }

    #[test]
    fn test_prose_section_stops_at_blank_line() {
        let text = "Local Attractions:\n- Colosseum\n- Trevi Fountain\n\nUnrelated trailing line";
        let (_, attractions) = extract_structured(text, None);
        assert_eq!(attractions.len(), 2);
    }

    // ---- Tier 4: sentence patterns ----

    #[test]
    fn test_sentence_popular_food_called() {
        let text = "The most popular food called Khachapuri is everywhere.";
        let (food, _) = extract_structured(text, None);
        assert_eq!(food.len(), 1);
        assert_eq!(food[0].name, "Khachapuri");
    }

    #[test]
    fn test_sentence_try_the() {
        let text = "Be sure to try the Carbonara while in town.";
        let (food, _) = extract_structured(text, None);
        assert_eq!(food.len(), 1);
        assert_eq!(food[0].name, "Carbonara");
    }

    #[test]
    fn test_sentence_visit_the() {
        let text = "You should visit the Grand Palace early.";
        let (_, attractions) = extract_structured(text, None);
        assert_eq!(attractions.len(), 1);
        assert_eq!(attractions[0].name, "Grand Palace");
    }

    #[test]
    fn test_no_matches_anywhere() {
        let (food, attractions) = extract_structured("Have a wonderful day!", None);
        assert!(food.is_empty());
        assert!(attractions.is_empty());
    }

    // ---- Defaults and ids ----

    #[test]
    fn test_default_fields_filled() {
        let text = r#"LOCAL_FOOD:[{"name":"Ramen"}]"#;
        let (food, _) = extract_structured(text, Some("Tokyo"));
        assert_eq!(food[0].price, "Varies");
        assert_eq!(food[0].location, "Tokyo");
        assert!(food[0].description.is_empty());
        assert!(food[0].image_url.contains("ramen"));
    }

    #[test]
    fn test_default_location_without_destination() {
        let text = r#"LOCAL_FOOD:[{"name":"Ramen"}]"#;
        let (food, _) = extract_structured(text, None);
        assert_eq!(food[0].location, "Local area");
    }

    #[test]
    fn test_attraction_default_duration() {
        let text = r#"LOCAL_ATTRACTIONS:[{"name":"Old Town"}]"#;
        let (_, attractions) = extract_structured(text, None);
        assert_eq!(attractions[0].duration, "1-2 hours");
    }

    #[test]
    fn test_ids_unique_per_item() {
        let text = r#"LOCAL_FOOD:[{"name":"A"},{"name":"B"}]"#;
        let (food, _) = extract_structured(text, None);
        assert_ne!(food[0].id, food[1].id);
    }

    #[test]
    fn test_image_url_multiword_keyword() {
        let text = r#"LOCAL_ATTRACTIONS:[{"name":"Eiffel Tower"}]"#;
        let (_, attractions) = extract_structured(text, None);
        assert_eq!(
            attractions[0].image_url,
            "https://source.unsplash.com/480x360/?eiffel,tower"
        );
    }

    #[test]
    fn test_explicit_image_keyword_wins() {
        let text = r#"LOCAL_FOOD:[{"name":"Croissant","image_keyword":"french pastry"}]"#;
        let (food, _) = extract_structured(text, None);
        assert_eq!(
            food[0].image_url,
            "https://source.unsplash.com/480x360/?french,pastry"
        );
    }

    // ---- Both kinds in one text ----

    #[test]
    fn test_both_blocks_extracted() {
        let text = r#"Great picks below.
LOCAL_FOOD:[{"name":"Sushi","price":"$15"}]
LOCAL_ATTRACTIONS:[{"name":"Senso-ji Temple","duration":"1-2 hours"}]"#;
        let (food, attractions) = extract_structured(text, Some("Tokyo"));
        assert_eq!(food.len(), 1);
        assert_eq!(attractions.len(), 1);
        assert_eq!(attractions[0].name, "Senso-ji Temple");
    }

    // ---- Repair internals ----

    #[test]
    fn test_repair_json_bareword_keys() {
        let repaired = repair_json(r#"[{name:"A",price:"$5"}]"#);
        assert_eq!(repaired, r#"[{"name":"A","price":"$5"}]"#);
    }

    #[test]
    fn test_repair_json_keeps_valid_json() {
        let valid = r#"[{"name":"A"}]"#;
        assert_eq!(repair_json(valid), valid);
    }

    #[test]
    fn test_find_block_nested_brackets() {
        let text = r#"LOCAL_FOOD:[{"name":"Set [lunch]","price":"$5"}] and more"#;
        let block = find_block(text, FOOD_BLOCK_LABELS).unwrap();
        assert!(block.starts_with('['));
        assert!(block.ends_with(']'));
        assert!(block.contains("Set [lunch]"));
    }

    #[test]
    fn test_find_block_absent() {
        assert!(find_block("no blocks here", FOOD_BLOCK_LABELS).is_none());
    }
}
