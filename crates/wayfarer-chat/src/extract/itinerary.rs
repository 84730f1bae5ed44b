//! Itinerary mining from model output.
//!
//! Segments the text on repeated "Day N" headers and mines each day
//! body for activities through a strict fallback ladder: explicit
//! timed lines, then period-of-day lines, then bullets over a fixed
//! time rotation, then raw lines with synthetic times. When the text
//! carries itinerary cues but no headers at all, a deterministic
//! default template is generated instead.

use regex::Regex;
use std::sync::LazyLock;
use uuid::Uuid;

use wayfarer_core::types::{Activity, ItineraryDay, ItineraryDraft};

/// Fallback destination when no pattern resolves one.
const DEFAULT_DESTINATION: &str = "Your Destination";

/// Fixed time rotation for bullet items.
const ROTATION_TIMES: [&str; 6] = [
    "8:00 AM", "10:30 AM", "1:00 PM", "3:30 PM", "6:00 PM", "8:30 PM",
];

// "trip to Tokyo", "itinerary for Paris", "travel in Rome"
static TRIP_PHRASE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b(?i:trip|visit|travel|itinerary|plan)\s+(?i:to|for|in|at)\s+([A-Z][a-z]+(?:\s+[A-Z][a-z]+){0,3})",
    )
    .unwrap()
});

// Capitalized phrase after a bare preposition.
static CAP_AFTER_PREP_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?i:to|in|at|for)\s+([A-Z][a-z]+(?:\s+[A-Z][a-z]+){0,3})").unwrap()
});

// "3-day", "3 day"
static DAY_COUNT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(\d{1,2})\s*(?:-\s*)?day").unwrap());

// "Day 1:", "day 2 -", "DAY 3."
static DAY_HEADER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bday\s+(\d{1,2})\b\s*[:.\-–]?").unwrap());

// "9:00 AM - Visit the temple", "14:30: Lunch"
static TIME_LINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?:[-*•]\s*)?(\d{1,2}:\d{2}\s*(?:[AaPp][Mm])?)\s*[-–—:]\s*(.+)$").unwrap()
});

// "Morning: breakfast at the market"
static PERIOD_LINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?:[-*•]\s*)?(?i)(morning|afternoon|evening|night)\s*[:\-–]\s*(.+)$").unwrap()
});

// "- see the palace"
static BULLET_LINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*[-*•]\s+(.+)$").unwrap());

/// Extract an itinerary when the text carries itinerary cues.
pub fn extract_itinerary(
    model_text: &str,
    utterance: &str,
    default_days: u32,
) -> Option<ItineraryDraft> {
    let lower = model_text.to_lowercase();
    if !lower.contains("itinerary") && !lower.contains("day 1") {
        return None;
    }

    let destination = resolve_destination(utterance, model_text);
    let requested_days = day_count(model_text)
        .or_else(|| day_count(utterance))
        .unwrap_or(default_days);

    let mut days = parse_day_sections(model_text);
    if days.is_empty() {
        days = default_days_template(requested_days, &destination);
    }
    days.sort_by_key(|day| day.day);

    Some(ItineraryDraft {
        id: Uuid::new_v4(),
        title: format!("{}-Day Itinerary for {}", days.len(), destination),
        destination,
        days,
    })
}

// =============================================================================
// Destination and day count resolution
// =============================================================================

/// Destination by priority: trip phrase in the utterance, trip phrase in
/// the model text, capitalized-after-preposition in the utterance, then
/// the model text, then a literal default.
fn resolve_destination(utterance: &str, model_text: &str) -> String {
    for text in [utterance, model_text] {
        if let Some(caps) = TRIP_PHRASE_RE.captures(text) {
            if let Some(m) = caps.get(1) {
                return m.as_str().trim().to_string();
            }
        }
    }
    for text in [utterance, model_text] {
        if let Some(caps) = CAP_AFTER_PREP_RE.captures(text) {
            if let Some(m) = caps.get(1) {
                return m.as_str().trim().to_string();
            }
        }
    }
    DEFAULT_DESTINATION.to_string()
}

fn day_count(text: &str) -> Option<u32> {
    DAY_COUNT_RE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<u32>().ok())
        .filter(|n| *n > 0)
}

// =============================================================================
// Day section segmentation
// =============================================================================

fn parse_day_sections(text: &str) -> Vec<ItineraryDay> {
    let headers: Vec<(usize, usize, u32)> = DAY_HEADER_RE
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let num = caps.get(1)?.as_str().parse::<u32>().ok()?;
            Some((whole.start(), whole.end(), num))
        })
        .collect();

    let mut days: Vec<ItineraryDay> = Vec::new();
    for (i, (_, end, num)) in headers.iter().enumerate() {
        // Repeated headers for the same day number: first one wins.
        if days.iter().any(|d| d.day == *num) {
            continue;
        }
        let body_end = headers
            .get(i + 1)
            .map(|(start, _, _)| *start)
            .unwrap_or(text.len());
        let body = &text[*end..body_end];

        let activities = parse_activities(body);
        if activities.is_empty() {
            continue;
        }
        let title = day_title(body, &activities);
        days.push(ItineraryDay {
            day: *num,
            title,
            activities,
        });
    }
    days
}

// =============================================================================
// Activity fallback ladder
// =============================================================================

/// Try each strategy in order until one yields at least one activity.
fn parse_activities(body: &str) -> Vec<Activity> {
    let timed = timed_activities(body);
    if !timed.is_empty() {
        return timed;
    }

    let periods = period_activities(body);
    if !periods.is_empty() {
        return periods;
    }

    let bullets = bullet_activities(body);
    if !bullets.is_empty() {
        return bullets;
    }

    raw_line_activities(body)
}

fn timed_activities(body: &str) -> Vec<Activity> {
    body.lines()
        .filter_map(|line| {
            let caps = TIME_LINE_RE.captures(line)?;
            Some(Activity {
                time: caps.get(1)?.as_str().trim().to_string(),
                description: caps.get(2)?.as_str().trim().to_string(),
            })
        })
        .filter(|activity| !activity.description.is_empty())
        .collect()
}

fn period_activities(body: &str) -> Vec<Activity> {
    body.lines()
        .filter_map(|line| {
            let caps = PERIOD_LINE_RE.captures(line)?;
            let time = match caps.get(1)?.as_str().to_lowercase().as_str() {
                "morning" => "9:00 AM",
                "afternoon" => "2:00 PM",
                "evening" => "7:00 PM",
                _ => "9:00 PM",
            };
            Some(Activity {
                time: time.to_string(),
                description: caps.get(2)?.as_str().trim().to_string(),
            })
        })
        .filter(|activity| !activity.description.is_empty())
        .collect()
}

fn bullet_activities(body: &str) -> Vec<Activity> {
    body.lines()
        .filter_map(|line| {
            let caps = BULLET_LINE_RE.captures(line)?;
            Some(caps.get(1)?.as_str().trim().to_string())
        })
        .filter(|description| !description.is_empty())
        .enumerate()
        .map(|(i, description)| Activity {
            time: ROTATION_TIMES[i % ROTATION_TIMES.len()].to_string(),
            description,
        })
        .collect()
}

/// Last resort: any line longer than 10 characters, with synthetic
/// times stepping 2 hours from 8:00 and wrapping after a 14-hour span.
fn raw_line_activities(body: &str) -> Vec<Activity> {
    body.lines()
        .map(str::trim)
        .filter(|line| line.len() > 10)
        .enumerate()
        .map(|(i, line)| Activity {
            time: format_hour(8 + (2 * i as u32) % 14),
            description: line.to_string(),
        })
        .collect()
}

fn format_hour(hour24: u32) -> String {
    match hour24 {
        0 => "12:00 AM".to_string(),
        12 => "12:00 PM".to_string(),
        h if h < 12 => format!("{}:00 AM", h),
        h => format!("{}:00 PM", h - 12),
    }
}

// =============================================================================
// Day titles
// =============================================================================

const TITLE_MAX: usize = 50;

/// Title from the first plausible non-activity line, then from keyword
/// buckets over the first activity, then from the activity text itself.
fn day_title(body: &str, activities: &[Activity]) -> String {
    for line in body.lines() {
        let trimmed = line.trim().trim_start_matches(['#', '*']).trim();
        if trimmed.is_empty() {
            continue;
        }
        if TIME_LINE_RE.is_match(line)
            || PERIOD_LINE_RE.is_match(line)
            || BULLET_LINE_RE.is_match(line)
        {
            break;
        }
        if trimmed.len() < TITLE_MAX && trimmed.chars().any(|c| c.is_alphabetic()) {
            return trimmed.trim_end_matches([':', '-']).trim().to_string();
        }
        break;
    }

    let first = activities
        .first()
        .map(|a| a.description.as_str())
        .unwrap_or("");
    if let Some(bucket) = title_bucket(first) {
        return bucket.to_string();
    }
    truncate_title(first)
}

fn title_bucket(description: &str) -> Option<&'static str> {
    let lower = description.to_lowercase();
    if ["temple", "shrine", "palace"].iter().any(|k| lower.contains(k)) {
        Some("Cultural Exploration")
    } else if ["market", "shop"].iter().any(|k| lower.contains(k)) {
        Some("Shopping & Local Markets")
    } else if ["museum", "art", "gallery"].iter().any(|k| lower.contains(k)) {
        Some("Arts & Museums")
    } else if ["park", "garden", "nature"].iter().any(|k| lower.contains(k)) {
        Some("Nature & Outdoors")
    } else if ["food", "restaurant", "cafe"].iter().any(|k| lower.contains(k)) {
        Some("Food & Culinary Experiences")
    } else {
        None
    }
}

fn truncate_title(description: &str) -> String {
    if description.len() < TITLE_MAX {
        return description.to_string();
    }
    let mut cut = TITLE_MAX - 3;
    while !description.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}...", &description[..cut])
}

// =============================================================================
// Default template
// =============================================================================

/// Deterministic N-day skeleton used when no headers were found.
fn default_days_template(count: u32, destination: &str) -> Vec<ItineraryDay> {
    (1..=count)
        .map(|day| {
            let (title, descriptions) = if day == 1 {
                (
                    "Arrival & Orientation".to_string(),
                    [
                        "Arrive and settle in to your accommodation".to_string(),
                        "Orientation walk around the neighborhood".to_string(),
                        "Lunch at a well-reviewed local restaurant".to_string(),
                        format!("Visit a landmark to get your bearings in {}", destination),
                        "Sunset viewpoint or riverside stroll".to_string(),
                        "Welcome dinner featuring regional cuisine".to_string(),
                    ],
                )
            } else if day == count {
                (
                    "Farewell Day".to_string(),
                    [
                        "Breakfast and packing".to_string(),
                        "Last-minute souvenir shopping".to_string(),
                        "Farewell lunch at a favorite spot".to_string(),
                        format!("One more look at the best of {}", destination),
                        "Early dinner near your accommodation".to_string(),
                        "Prepare for departure".to_string(),
                    ],
                )
            } else {
                (
                    format!("Exploring {}", destination),
                    [
                        "Breakfast at a local cafe".to_string(),
                        "Morning sightseeing at the main attractions".to_string(),
                        "Lunch break with street food".to_string(),
                        "Museum or market visit".to_string(),
                        "Relax at a park or plaza".to_string(),
                        "Dinner and evening entertainment".to_string(),
                    ],
                )
            };

            ItineraryDay {
                day,
                title,
                activities: descriptions
                    .into_iter()
                    .enumerate()
                    .map(|(i, description)| Activity {
                        time: ROTATION_TIMES[i].to_string(),
                        description,
                    })
                    .collect(),
            }
        })
        .collect()
}

// =============================================================================
// Tests
// =============================================================================
