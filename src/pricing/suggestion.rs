//! Structured price suggestion recovered from a completion.

use std::fmt;

use serde_json::Value;

use crate::llm::json::extract_json_object;

/// Shown when the completion carried no usable `price_range`.
pub const PRICE_RANGE_UNAVAILABLE: &str = "Not available";

/// Reasoning categories requested in the prompt.
///
/// Keys outside the fixed vocabulary are kept as [`ReasoningKey::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ReasoningKey {
    BasePriceDepreciation,
    ConditionAdjustment,
    AgeConsideration,
    BrandFactor,
    MarketTrends,
    Conclusion,
    Other(String),
}

impl ReasoningKey {
    pub const KNOWN: [ReasoningKey; 6] = [
        ReasoningKey::BasePriceDepreciation,
        ReasoningKey::ConditionAdjustment,
        ReasoningKey::AgeConsideration,
        ReasoningKey::BrandFactor,
        ReasoningKey::MarketTrends,
        ReasoningKey::Conclusion,
    ];

    pub fn from_key(key: &str) -> Self {
        match key {
            "base_price_depreciation" => ReasoningKey::BasePriceDepreciation,
            "condition_adjustment" => ReasoningKey::ConditionAdjustment,
            "age_consideration" => ReasoningKey::AgeConsideration,
            "brand_factor" => ReasoningKey::BrandFactor,
            "market_trends" => ReasoningKey::MarketTrends,
            "conclusion" => ReasoningKey::Conclusion,
            other => ReasoningKey::Other(other.to_string()),
        }
    }

    /// The JSON key as it appears in the completion.
    pub fn as_str(&self) -> &str {
        match self {
            ReasoningKey::BasePriceDepreciation => "base_price_depreciation",
            ReasoningKey::ConditionAdjustment => "condition_adjustment",
            ReasoningKey::AgeConsideration => "age_consideration",
            ReasoningKey::BrandFactor => "brand_factor",
            ReasoningKey::MarketTrends => "market_trends",
            ReasoningKey::Conclusion => "conclusion",
            ReasoningKey::Other(key) => key,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, ReasoningKey::Other(_))
    }

    /// Human title: underscores become spaces and each word is capitalized.
    pub fn title(&self) -> String {
        self.as_str()
            .split('_')
            .filter(|w| !w.is_empty())
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => {
                        first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                    }
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for ReasoningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reasoning returned alongside the price range.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Reasoning {
    /// Entries in the order the model produced them.
    Breakdown(Vec<(ReasoningKey, String)>),
    /// The model answered with something other than an object.
    Freeform(String),
    #[default]
    Missing,
}

impl Reasoning {
    fn from_value(value: Option<&Value>) -> Self {
        match value {
            None | Some(Value::Null) => Reasoning::Missing,
            Some(Value::Object(map)) if map.is_empty() => Reasoning::Missing,
            Some(Value::Object(map)) => Reasoning::Breakdown(
                map.iter()
                    .map(|(k, v)| (ReasoningKey::from_key(k), value_text(v)))
                    .collect(),
            ),
            Some(other) => Reasoning::Freeform(value_text(other)),
        }
    }

    /// Look up the text for one reasoning category.
    pub fn get(&self, key: &ReasoningKey) -> Option<&str> {
        match self {
            Reasoning::Breakdown(entries) => entries
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, text)| text.as_str()),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Reasoning::Missing)
    }
}

/// Structured result of a price suggestion.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSuggestion {
    pub price_range: String,
    pub reasoning: Reasoning,
}

impl PriceSuggestion {
    /// Build a suggestion from a parsed JSON value.
    ///
    /// Every field is defaulted: a missing `price_range` becomes
    /// [`PRICE_RANGE_UNAVAILABLE`] and missing reasoning becomes
    /// [`Reasoning::Missing`].
    pub fn from_value(value: &Value) -> Self {
        let price_range = match value.get("price_range") {
            None | Some(Value::Null) => PRICE_RANGE_UNAVAILABLE.to_string(),
            Some(v) => value_text(v),
        };

        Self {
            price_range,
            reasoning: Reasoning::from_value(value.get("reasoning")),
        }
    }

    pub fn has_price_range(&self) -> bool {
        self.price_range != PRICE_RANGE_UNAVAILABLE
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Extract a [`PriceSuggestion`] from raw completion text.
///
/// Returns the suggestion (if a JSON object was recovered) together with the
/// normalized JSON text, or the best unparseable candidate when extraction
/// failed. Never panics.
pub fn extract_suggestion(text: &str) -> (Option<PriceSuggestion>, Option<String>) {
    let extraction = extract_json_object(text);
    let suggestion = extraction.value.as_ref().map(PriceSuggestion::from_value);
    (suggestion, extraction.json_text)
}
