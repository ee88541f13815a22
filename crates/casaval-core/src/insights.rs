//! Insight generator: fixed-threshold observations about a prediction
//!
//! These are domain heuristics, not statistics derived from the model. The
//! thresholds are product constants and must not drift: downstream consumers
//! match on the message wording.

use crate::features::{field_or_zero, RawInput};
use crate::schema::FeatureSchema;

/// Median income (in $10k units) above which an area is called premium.
const PREMIUM_INCOME: f64 = 10.0;
/// Median income below which an area is called budget-friendly.
const BUDGET_INCOME: f64 = 3.0;
/// House age (years) above which a property is called older.
const OLDER_AGE: f64 = 50.0;
/// House age below which a property is called newer.
const NEWER_AGE: f64 = 10.0;
/// Latitude north of which the market is historically strong.
const STRONG_MARKET_LATITUDE: f64 = 37.8;
/// Average rooms above which a property is called spacious.
const SPACIOUS_ROOMS: f64 = 7.0;

/// Produce 0-5 observation strings for a completed prediction.
///
/// Rules are evaluated independently in a fixed order. Fields are read
/// leniently (missing or unparseable values count as 0.0) so insights never
/// fail a request the model accepted.
pub fn generate_insights(
    schema: &FeatureSchema,
    raw: &RawInput,
    _predicted_price: f64,
) -> Vec<String> {
    let mut insights = Vec::new();

    if let Some(top) = schema.top_feature() {
        insights.push(format!(
            "{} is the most important factor ({:.1}%) affecting this price.",
            top.name,
            top.importance * 100.0
        ));
    }

    let income = field_or_zero(raw, "MedInc");
    if income > PREMIUM_INCOME {
        insights.push("High income area - premium pricing expected.".to_string());
    } else if income < BUDGET_INCOME {
        insights.push("Lower income area - budget-friendly pricing.".to_string());
    }

    let age = field_or_zero(raw, "HouseAge");
    if age > OLDER_AGE {
        insights.push("Older property - may benefit from renovations.".to_string());
    } else if age < NEWER_AGE {
        insights.push("Newer property - premium condition advantage.".to_string());
    }

    if field_or_zero(raw, "Latitude") > STRONG_MARKET_LATITUDE {
        insights.push("Northern California location - strong market area.".to_string());
    }

    if field_or_zero(raw, "AveRooms") > SPACIOUS_ROOMS {
        insights.push("Spacious property - large rooms command premium prices.".to_string());
    }

    insights
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FeatureField;
    use serde_json::json;

    fn schema() -> FeatureSchema {
        FeatureSchema::new(vec![
            FeatureField { name: "MedInc".into(), importance: 0.52 },
            FeatureField { name: "HouseAge".into(), importance: 0.05 },
            FeatureField { name: "AveRooms".into(), importance: 0.11 },
            FeatureField { name: "Latitude".into(), importance: 0.06 },
        ])
    }

    fn raw(value: serde_json::Value) -> RawInput {
        value.as_object().unwrap().clone()
    }

    fn has_income_tier(insights: &[String]) -> (bool, bool) {
        (
            insights.iter().any(|i| i.contains("premium pricing")),
            insights.iter().any(|i| i.contains("budget-friendly")),
        )
    }

    #[test]
    fn test_top_feature_always_reported() {
        let insights = generate_insights(&schema(), &raw(json!({})), 0.0);
        assert!(insights[0].contains("MedInc"));
        assert!(insights[0].contains("52.0%"));
    }

    #[test]
    fn test_income_premium_tier() {
        let insights = generate_insights(&schema(), &raw(json!({"MedInc": 12, "HouseAge": 20})), 0.0);
        let (premium, budget) = has_income_tier(&insights);
        assert!(premium);
        assert!(!budget);
    }

    #[test]
    fn test_income_budget_tier() {
        let insights = generate_insights(&schema(), &raw(json!({"MedInc": 2, "HouseAge": 20})), 0.0);
        let (premium, budget) = has_income_tier(&insights);
        assert!(!premium);
        assert!(budget);
    }

    #[test]
    fn test_income_middle_band_no_tier_message() {
        let insights = generate_insights(&schema(), &raw(json!({"MedInc": 5, "HouseAge": 20})), 0.0);
        let (premium, budget) = has_income_tier(&insights);
        assert!(!premium);
        assert!(!budget);
    }

    #[test]
    fn test_age_tiers() {
        let older = generate_insights(&schema(), &raw(json!({"MedInc": 5, "HouseAge": 60})), 0.0);
        assert!(older.iter().any(|i| i.contains("Older property")));

        let newer = generate_insights(&schema(), &raw(json!({"MedInc": 5, "HouseAge": 5})), 0.0);
        assert!(newer.iter().any(|i| i.contains("Newer property")));

        let middle = generate_insights(&schema(), &raw(json!({"MedInc": 5, "HouseAge": 30})), 0.0);
        assert!(!middle.iter().any(|i| i.contains("property -")));
    }

    #[test]
    fn test_location_and_rooms_rules() {
        let insights = generate_insights(
            &schema(),
            &raw(json!({"MedInc": 5, "HouseAge": 20, "Latitude": 38.5, "AveRooms": 8})),
            0.0,
        );
        assert!(insights.iter().any(|i| i.contains("strong market area")));
        assert!(insights.iter().any(|i| i.contains("Spacious property")));
    }

    #[test]
    fn test_all_rules_fire_at_most_five_messages() {
        let insights = generate_insights(
            &schema(),
            &raw(json!({"MedInc": 12, "HouseAge": 60, "Latitude": 38.5, "AveRooms": 9})),
            0.0,
        );
        assert_eq!(insights.len(), 5);
    }

    #[test]
    fn test_missing_fields_read_as_zero() {
        // MedInc absent -> 0.0 -> budget tier; HouseAge absent -> 0.0 -> newer
        let insights = generate_insights(&schema(), &raw(json!({})), 0.0);
        assert!(insights.iter().any(|i| i.contains("budget-friendly")));
        assert!(insights.iter().any(|i| i.contains("Newer property")));
    }
}
