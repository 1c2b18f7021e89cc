//! Prompt construction for price suggestions.

use super::query::ProductQuery;

/// Example reply embedded in the prompt to pin down the expected JSON shape.
pub const RESPONSE_TEMPLATE: &str = r#"{
  "price_range": "₹60000-₹70000",
  "reasoning": {
    "base_price_depreciation": "...",
    "condition_adjustment": "...",
    "age_consideration": "...",
    "brand_factor": "...",
    "market_trends": "...",
    "conclusion": "..."
  }
}"#;

/// Build the instruction prompt for a product.
///
/// Embeds every query field verbatim together with an example of the exact
/// JSON shape the reply must follow.
pub fn build_prompt(query: &ProductQuery) -> String {
    format!(
        r#"
You are an expert second-hand marketplace pricing assistant.
Given the product details, suggest a fair price range in INR and give structured reasoning.
Return ONLY a JSON object (no extra commentary). Example format:

{template}

Product:
Title: {title}
Category: {category}
Brand: {brand}
Condition: {condition}
Age (months): {age}
Asking Price: ₹{price}
"#,
        template = RESPONSE_TEMPLATE,
        title = query.title,
        category = query.category,
        brand = query.brand,
        condition = query.condition,
        age = query.age_months,
        price = query.asking_price,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::query::{Category, Condition};

    fn iphone() -> ProductQuery {
        ProductQuery::new(
            "iPhone 13 Pro Max",
            Category::Mobile,
            "Apple",
            Condition::LikeNew,
            10,
            90000.0,
        )
        .unwrap()
    }

    #[test]
    fn test_build_prompt_embeds_all_fields() {
        let prompt = build_prompt(&iphone());

        assert!(prompt.contains("Title: iPhone 13 Pro Max"));
        assert!(prompt.contains("Category: Mobile"));
        assert!(prompt.contains("Brand: Apple"));
        assert!(prompt.contains("Condition: Like New"));
        assert!(prompt.contains("Age (months): 10"));
        assert!(prompt.contains("Asking Price: ₹90000"));
    }

    #[test]
    fn test_build_prompt_contains_json_shape() {
        let prompt = build_prompt(&iphone());

        assert!(prompt.contains("Return ONLY a JSON object"));
        assert!(prompt.contains(r#""price_range": "₹60000-₹70000""#));
        for key in [
            "base_price_depreciation",
            "condition_adjustment",
            "age_consideration",
            "brand_factor",
            "market_trends",
            "conclusion",
        ] {
            assert!(prompt.contains(&format!("\"{}\": \"...\"", key)), "missing {key}");
        }
    }

    #[test]
    fn test_build_prompt_is_deterministic() {
        assert_eq!(build_prompt(&iphone()), build_prompt(&iphone()));
    }

    #[test]
    fn test_build_prompt_fractional_price() {
        let mut query = iphone();
        query.asking_price = 1234.5;
        assert!(build_prompt(&query).contains("Asking Price: ₹1234.5"));
    }
}
