//! Typed product attributes collected from the user.

use std::fmt;
use std::str::FromStr;

use crate::error::QueryError;

/// Product category offered to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Mobile,
    Laptop,
    Tablet,
    Tv,
    Electronics,
    Furniture,
    Other,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Mobile,
        Category::Laptop,
        Category::Tablet,
        Category::Tv,
        Category::Electronics,
        Category::Furniture,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Mobile => "Mobile",
            Category::Laptop => "Laptop",
            Category::Tablet => "Tablet",
            Category::Tv => "TV",
            Category::Electronics => "Electronics",
            Category::Furniture => "Furniture",
            Category::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| QueryError::UnknownCategory(s.to_string(), expected(&Category::ALL)))
    }
}

/// Physical condition of the item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Condition {
    LikeNew,
    Good,
    Average,
    BelowAverage,
}

impl Condition {
    pub const ALL: [Condition; 4] = [
        Condition::LikeNew,
        Condition::Good,
        Condition::Average,
        Condition::BelowAverage,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Condition::LikeNew => "Like New",
            Condition::Good => "Good",
            Condition::Average => "Average",
            Condition::BelowAverage => "Below Average",
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Condition {
    type Err = QueryError;

    /// Accepts the display spelling as well as `like-new` / `like_new` forms.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().replace(['-', '_'], " ");
        Condition::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(&normalized))
            .ok_or_else(|| QueryError::UnknownCondition(s.to_string(), expected(&Condition::ALL)))
    }
}

fn expected<T: fmt::Display>(values: &[T]) -> String {
    values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Immutable input to prompt construction.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductQuery {
    pub title: String,
    pub category: Category,
    pub brand: String,
    pub condition: Condition,
    pub age_months: u32,
    /// Asking price in INR.
    pub asking_price: f64,
}

impl ProductQuery {
    /// Validate and build a query.
    ///
    /// Title and brand are trimmed and must be non-empty. The asking price
    /// must be finite and non-negative.
    pub fn new(
        title: &str,
        category: Category,
        brand: &str,
        condition: Condition,
        age_months: u32,
        asking_price: f64,
    ) -> Result<Self, QueryError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(QueryError::MissingTitle);
        }
        let brand = brand.trim();
        if brand.is_empty() {
            return Err(QueryError::MissingBrand);
        }
        if !asking_price.is_finite() || asking_price < 0.0 {
            return Err(QueryError::InvalidAskingPrice(asking_price));
        }

        Ok(Self {
            title: title.to_string(),
            category,
            brand: brand.to_string(),
            condition,
            age_months,
            asking_price,
        })
    }
}

/// Guess the brand from a product title.
///
/// Covers the handful of brands whose product lines are recognizable by
/// name alone; returns `None` otherwise.
pub fn infer_brand(title: &str) -> Option<&'static str> {
    let title = title.to_lowercase();
    if title.contains("iphone") || title.contains("macbook") {
        Some("Apple")
    } else if title.contains("samsung") {
        Some("Samsung")
    } else if title.contains("oneplus") {
        Some("OnePlus")
    } else if title.contains("xiaomi") || title.contains("redmi") {
        Some("Xiaomi")
    } else {
        None
    }
}
