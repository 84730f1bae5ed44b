//! Model completion client with a deterministic canned fallback.
//!
//! The live provider posts the bounded conversation window to an
//! OpenAI-compatible chat-completion endpoint. On any failure (missing
//! credential, network error, non-success status, empty completion) the
//! [`CannedResponder`] takes over with keyword-driven text that carries
//! the same structured markers, so everything downstream of the model is
//! fallback-agnostic.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use wayfarer_core::config::ModelConfig;
use wayfarer_core::types::ConversationEntry;

use crate::error::ChatError;

/// Instruction prompt sent with every completion request.
pub const SYSTEM_PROMPT: &str = "You are Wayfarer, a friendly travel-planning assistant. \
You help users pick destinations, build day-by-day itineraries, check weather, and find \
flights, hotels, local food, and attractions. Keep replies concise and concrete. \
When you recommend an itinerary, format each day as 'Day N: <title>' followed by one \
activity per line. When you mention local dishes, append a machine-readable block \
LOCAL_FOOD:[{\"name\":\"...\",\"price\":\"...\",\"description\":\"...\",\"location\":\"...\",\"image_keyword\":\"...\"}]. \
When you mention attractions, append LOCAL_ATTRACTIONS:[{\"name\":\"...\",\"price\":\"...\",\
\"description\":\"...\",\"location\":\"...\",\"duration\":\"...\",\"image_keyword\":\"...\"}].";

/// Sends one chat-completion request.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    async fn complete(
        &self,
        system_prompt: &str,
        history: &[ConversationEntry],
    ) -> Result<String, ChatError>;
}

// =============================================================================
// HTTP provider
// =============================================================================

/// OpenAI-compatible chat-completion client.
pub struct HttpCompletionProvider {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    api_key_env: String,
    max_tokens: u32,
    temperature: f64,
}

impl HttpCompletionProvider {
    pub fn from_config(config: &ModelConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_default();
        Self {
            client,
            endpoint: config.endpoint.clone(),
            model: config.model.clone(),
            api_key_env: config.api_key_env.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        }
    }
}

#[derive(Debug, Serialize)]
struct WireMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
    max_tokens: u32,
    temperature: f64,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    message: CompletionMessage,
}

#[derive(Debug, Deserialize)]
struct CompletionMessage {
    content: String,
}

#[async_trait]
impl CompletionProvider for HttpCompletionProvider {
    async fn complete(
        &self,
        system_prompt: &str,
        history: &[ConversationEntry],
    ) -> Result<String, ChatError> {
        let api_key = std::env::var(&self.api_key_env)
            .map_err(|_| ChatError::Model(format!("missing credential {}", self.api_key_env)))?;

        let mut messages = Vec::with_capacity(history.len() + 1);
        messages.push(WireMessage {
            role: "system",
            content: system_prompt,
        });
        for entry in history {
            messages.push(WireMessage {
                role: entry.role.as_str(),
                content: &entry.content,
            });
        }

        let request = CompletionRequest {
            model: &self.model,
            messages,
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| ChatError::Model(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ChatError::Model(format!(
                "completion endpoint returned {}",
                response.status()
            )));
        }

        let body: CompletionResponse = response
            .json()
            .await
            .map_err(|e| ChatError::Model(e.to_string()))?;

        body.choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or_else(|| ChatError::Model("empty completion".to_string()))
    }
}

// =============================================================================
// Canned responder
// =============================================================================

struct CityGuide {
    name: &'static str,
    blurb: &'static str,
    foods: &'static [(&'static str, &'static str, &'static str)],
    attractions: &'static [(&'static str, &'static str, &'static str, &'static str)],
}

static CITY_GUIDES: &[CityGuide] = &[
    CityGuide {
        name: "Tokyo",
        blurb: "Tokyo blends neon-lit districts with quiet shrines and some of the best food in the world.",
        foods: &[
            ("Sushi", "$15", "Fresh nigiri from the morning market"),
            ("Ramen", "$9", "Rich tonkotsu broth with handmade noodles"),
        ],
        attractions: &[
            ("Senso-ji Temple", "Free", "Tokyo's oldest temple in Asakusa", "1-2 hours"),
            ("Shibuya Crossing", "Free", "The world's busiest pedestrian scramble", "30 minutes"),
        ],
    },
    CityGuide {
        name: "Paris",
        blurb: "Paris pairs world-class museums with cafe terraces and walkable riverside quarters.",
        foods: &[
            ("Croissant", "$4", "Flaky butter pastry from a corner boulangerie"),
            ("Coq au Vin", "$22", "Classic braised chicken in red wine"),
        ],
        attractions: &[
            ("Eiffel Tower", "$25", "Iron lattice icon with city-wide views", "2-3 hours"),
            ("Louvre Museum", "$20", "Home of the Mona Lisa and 35,000 works", "3-4 hours"),
        ],
    },
    CityGuide {
        name: "London",
        blurb: "London mixes royal landmarks, free museums, and distinct villages within the city.",
        foods: &[
            ("Fish and Chips", "$14", "Crispy battered cod with thick-cut chips"),
            ("Sunday Roast", "$20", "Roast beef with Yorkshire pudding"),
        ],
        attractions: &[
            ("Tower of London", "$35", "Historic castle holding the Crown Jewels", "2-3 hours"),
            ("British Museum", "Free", "World history under one grand roof", "2-4 hours"),
        ],
    },
    CityGuide {
        name: "New York",
        blurb: "New York packs skyline views, museum mile, and every cuisine on earth into one grid.",
        foods: &[
            ("Bagel with Lox", "$12", "Hand-rolled bagel with cured salmon"),
            ("New York Pizza", "$5", "Foldable thin-crust slice"),
        ],
        attractions: &[
            ("Central Park", "Free", "843 acres of green in midtown", "2-3 hours"),
            ("Statue of Liberty", "$24", "Harbor ferry and pedestal views", "3-4 hours"),
        ],
    },
    CityGuide {
        name: "Dubai",
        blurb: "Dubai stacks record-breaking architecture beside souks and desert dunes.",
        foods: &[
            ("Shawarma", "$6", "Spit-roasted meat wrapped in fresh bread"),
            ("Luqaimat", "$5", "Golden dumplings with date syrup"),
        ],
        attractions: &[
            ("Burj Khalifa", "$40", "Observation decks on the world's tallest tower", "2 hours"),
            ("Dubai Mall", "Free", "Mall, aquarium, and fountain shows", "2-4 hours"),
        ],
    },
    CityGuide {
        name: "Bali",
        blurb: "Bali offers rice terraces, surf beaches, and temple ceremonies in one island.",
        foods: &[
            ("Nasi Goreng", "$5", "Indonesian fried rice with a fried egg"),
            ("Babi Guling", "$8", "Balinese roast suckling pig"),
        ],
        attractions: &[
            ("Tanah Lot", "$5", "Sea temple on a wave-carved rock", "1-2 hours"),
            ("Tegallalang Terraces", "$3", "Iconic stepped rice paddies", "1-2 hours"),
        ],
    },
    CityGuide {
        name: "Rome",
        blurb: "Rome layers ancient ruins, Renaissance art, and trattoria cooking street by street.",
        foods: &[
            ("Carbonara", "$16", "Guanciale, pecorino, and egg over pasta"),
            ("Supplì", "$3", "Fried rice balls with molten mozzarella"),
        ],
        attractions: &[
            ("Colosseum", "$18", "The Flavian Amphitheatre of 70 AD", "2-3 hours"),
            ("Trevi Fountain", "Free", "Baroque fountain for coin wishes", "30 minutes"),
        ],
    },
    CityGuide {
        name: "Bangkok",
        blurb: "Bangkok runs on street food, river ferries, and gilded temple compounds.",
        foods: &[
            ("Pad Thai", "$4", "Stir-fried noodles with tamarind and peanuts"),
            ("Mango Sticky Rice", "$3", "Ripe mango over coconut rice"),
        ],
        attractions: &[
            ("Grand Palace", "$15", "Royal compound with the Emerald Buddha", "2-3 hours"),
            ("Chatuchak Market", "Free", "15,000 stalls of everything", "2-4 hours"),
        ],
    },
];

/// Deterministic keyword-driven reply generator.
///
/// Produces text compatible with the extraction pipeline: day headers
/// for itineraries, "weather in X" phrasing, and the same structured
/// food/attraction blocks the live model is instructed to emit.
pub struct CannedResponder;

impl CannedResponder {
    /// Generate a reply from the most recent user entry in the window.
    pub fn generate(&self, history: &[ConversationEntry]) -> String {
        let last_user = history
            .iter()
            .rev()
            .find(|entry| entry.role == wayfarer_core::types::Role::User)
            .map(|entry| entry.content.as_str())
            .unwrap_or("");
        let lower = last_user.to_lowercase();

        let city = CITY_GUIDES
            .iter()
            .find(|guide| lower.contains(&guide.name.to_lowercase()));

        let wants_itinerary =
            lower.contains("itinerary") || lower.contains("plan") || lower.contains("trip");
        let wants_weather = lower.contains("weather")
            || lower.contains("temperature")
            || lower.contains("climate");
        let wants_hotel = lower.contains("hotel") || lower.contains("stay");
        let wants_food = lower.contains("food") || lower.contains("eat") || lower.contains("dish");
        let wants_attractions = lower.contains("attraction")
            || lower.contains("see")
            || lower.contains("sight")
            || lower.contains("visit");

        let Some(guide) = city else {
            return self.capability_message();
        };

        let mut reply = String::new();
        reply.push_str(guide.blurb);
        reply.push_str("\n\n");

        if wants_weather {
            reply.push_str(&format!(
                "The weather in {} is usually pleasant; check closer to your dates for details.\n\n",
                guide.name
            ));
        }

        if wants_hotel {
            reply.push_str(&format!(
                "For hotels in {}, mid-range options cluster near the center; share your dates and I can pull live offers.\n\n",
                guide.name
            ));
        }

        if wants_itinerary {
            reply.push_str(&self.itinerary_section(guide, &lower));
            reply.push('\n');
        }

        if wants_food || wants_itinerary {
            reply.push_str(&self.food_block(guide));
            reply.push('\n');
        }

        if wants_attractions || wants_itinerary {
            reply.push_str(&self.attractions_block(guide));
            reply.push('\n');
        }

        reply.trim_end().to_string()
    }

    fn capability_message(&self) -> String {
        "I can help you plan a trip! Tell me a destination and I can build a day-by-day \
itinerary, check the weather, and suggest flights, hotels, local food, and attractions. \
For example: \"Plan a 3 day trip to Tokyo\"."
            .to_string()
    }

    fn itinerary_section(&self, guide: &CityGuide, lower: &str) -> String {
        let days = extract_day_count(lower).unwrap_or(3);
        let mut section = format!("Here's a {}-day itinerary for {}:\n\n", days, guide.name);
        for day in 1..=days {
            let title = if day == 1 {
                "Arrival & Orientation".to_string()
            } else if day == days {
                "Farewell Day".to_string()
            } else {
                format!("Exploring {}", guide.name)
            };
            section.push_str(&format!("Day {}: {}\n", day, title));
            section.push_str("Morning: Start with a local breakfast near your hotel\n");
            section.push_str(&format!(
                "Afternoon: Visit {}\n",
                guide.attractions.first().map(|a| a.0).unwrap_or("the old town")
            ));
            section.push_str(&format!(
                "Evening: Try {} at a neighborhood spot\n\n",
                guide.foods.first().map(|f| f.0).unwrap_or("local cuisine")
            ));
        }
        section
    }

    fn food_block(&self, guide: &CityGuide) -> String {
        let items: Vec<String> = guide
            .foods
            .iter()
            .map(|(name, price, description)| {
                format!(
                    "{{\"name\":\"{}\",\"price\":\"{}\",\"description\":\"{}\",\"location\":\"{}\",\"image_keyword\":\"{}\"}}",
                    name,
                    price,
                    description,
                    guide.name,
                    name.to_lowercase()
                )
            })
            .collect();
        format!("LOCAL_FOOD:[{}]", items.join(","))
    }

    fn attractions_block(&self, guide: &CityGuide) -> String {
        let items: Vec<String> = guide
            .attractions
            .iter()
            .map(|(name, price, description, duration)| {
                format!(
                    "{{\"name\":\"{}\",\"price\":\"{}\",\"description\":\"{}\",\"location\":\"{}\",\"duration\":\"{}\",\"image_keyword\":\"{}\"}}",
                    name,
                    price,
                    description,
                    guide.name,
                    duration,
                    name.to_lowercase()
                )
            })
            .collect();
        format!("LOCAL_ATTRACTIONS:[{}]", items.join(","))
    }
}

fn extract_day_count(lower: &str) -> Option<u32> {
    let mut digits = String::new();
    let mut found: Option<u32> = None;
    for (i, c) in lower.char_indices() {
        if c.is_ascii_digit() {
            digits.push(c);
        } else {
            let rest = lower[i..].trim_start_matches(|c: char| c.is_whitespace() || c == '-');
            if !digits.is_empty() && rest.starts_with("day") {
                found = digits.parse().ok();
                break;
            }
            digits.clear();
        }
    }
    found.filter(|d| (1..=14).contains(d))
}

// =============================================================================
// Model client
// =============================================================================

/// Facade over the live provider and the canned fallback.
pub struct ModelClient {
    provider: Option<Box<dyn CompletionProvider>>,
    fallback: CannedResponder,
}

impl ModelClient {
    pub fn new(provider: Box<dyn CompletionProvider>) -> Self {
        Self {
            provider: Some(provider),
            fallback: CannedResponder,
        }
    }

    /// A client that always answers from the canned responder.
    pub fn canned_only() -> Self {
        Self {
            provider: None,
            fallback: CannedResponder,
        }
    }

    /// Produce reply text for the window. Never fails: any provider
    /// error falls back to the canned responder.
    pub async fn generate(&self, history: &[ConversationEntry]) -> String {
        if let Some(provider) = &self.provider {
            match provider.complete(SYSTEM_PROMPT, history).await {
                Ok(text) => return text,
                Err(e) => {
                    tracing::warn!(error = %e, "model completion failed; using canned responder");
                }
            }
        }
        self.fallback.generate(history)
    }
}

// =============================================================================
// Tests
// =============================================================================
