use chrono::{NaiveDateTime, SubsecRound, Utc};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use utoipa::ToSchema;

/// Hint returned alongside a failed create or update.
pub const REQUIRED_FIELDS: &str = "title, making_time, serves, ingredients, cost";

/// Wire format for `created_at` / `updated_at`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Body of a create or update request, before validation.
///
/// Fields are kept as raw JSON so that clients sending numbers for text
/// fields (`"serves": 4`) or strings for `cost` (`"cost": "450"`) are
/// accepted the same way the older deployments accepted them.
#[derive(Debug, Default, Clone, Deserialize, ToSchema)]
pub struct RecipeRequest {
    #[serde(default)]
    #[schema(value_type = String, example = "Chicken curry")]
    pub title: Option<Value>,
    #[serde(default)]
    #[schema(value_type = String, example = "45 min")]
    pub making_time: Option<Value>,
    #[serde(default)]
    #[schema(value_type = String, example = "4 people")]
    pub serves: Option<Value>,
    #[serde(default)]
    #[schema(value_type = String, example = "onion, chicken, seasoning")]
    pub ingredients: Option<Value>,
    #[serde(default)]
    #[schema(value_type = f64, example = 1000)]
    pub cost: Option<Value>,
}

/// The five business fields of a recipe, validated.
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeContent {
    pub title: String,
    pub making_time: String,
    pub serves: String,
    pub ingredients: String,
    pub cost: f64,
}

#[derive(Error, Debug, PartialEq)]
#[error("missing or empty fields: {}", .missing.join(", "))]
pub struct ValidationError {
    pub missing: Vec<&'static str>,
}

impl RecipeRequest {
    /// Parse a request body. Anything that is not a JSON object yields an
    /// empty request, which then fails validation.
    pub fn from_body(body: &[u8]) -> Self {
        serde_json::from_slice(body).unwrap_or_default()
    }

    pub fn validate(self) -> Result<RecipeContent, ValidationError> {
        let title = required_text(self.title);
        let making_time = required_text(self.making_time);
        let serves = required_text(self.serves);
        let ingredients = required_text(self.ingredients);
        let cost = required_cost(self.cost);

        match (title, making_time, serves, ingredients, cost) {
            (Some(title), Some(making_time), Some(serves), Some(ingredients), Some(cost)) => {
                Ok(RecipeContent {
                    title,
                    making_time,
                    serves,
                    ingredients,
                    cost,
                })
            }
            (title, making_time, serves, ingredients, cost) => {
                let missing = [
                    ("title", title.is_none()),
                    ("making_time", making_time.is_none()),
                    ("serves", serves.is_none()),
                    ("ingredients", ingredients.is_none()),
                    ("cost", cost.is_none()),
                ]
                .into_iter()
                .filter_map(|(name, is_missing)| is_missing.then_some(name))
                .collect();
                Err(ValidationError { missing })
            }
        }
    }
}

fn required_text(value: Option<Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.is_empty() => Some(s),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        _ => None,
    }
}

// Zero is a valid cost; null, booleans and non-numeric strings are not.
fn required_cost(value: Option<Value>) -> Option<f64> {
    let cost = match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    // -0.0 would render as "-0" in the echo but "0" once read back.
    let cost = if cost == 0.0 { 0.0 } else { cost };
    cost.is_finite().then_some(cost)
}

/// Render a cost the way clients expect it: `1000`, not `1000.0`.
pub fn format_cost(cost: f64) -> String {
    cost.to_string()
}

pub fn format_timestamp(ts: NaiveDateTime) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

/// Current time truncated to whole seconds, matching what gets stored.
pub fn now() -> NaiveDateTime {
    Utc::now().trunc_subsecs(0).naive_utc()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(value: Value) -> RecipeRequest {
        RecipeRequest::from_body(value.to_string().as_bytes())
    }

    fn valid() -> Value {
        json!({
            "title": "Tomato soup",
            "making_time": "15 min",
            "serves": "5 people",
            "ingredients": "onion, tomato, seasoning, water",
            "cost": 450
        })
    }

    #[test]
    fn test_validate_complete_request() {
        let content = request(valid()).validate().unwrap();
        assert_eq!(
            content,
            RecipeContent {
                title: "Tomato soup".to_string(),
                making_time: "15 min".to_string(),
                serves: "5 people".to_string(),
                ingredients: "onion, tomato, seasoning, water".to_string(),
                cost: 450.0,
            }
        );
    }

    #[test]
    fn test_each_missing_field_is_reported() {
        for field in ["title", "making_time", "serves", "ingredients", "cost"] {
            let mut body = valid();
            body.as_object_mut().unwrap().remove(field);
            let err = request(body).validate().unwrap_err();
            assert_eq!(err.missing, vec![field]);
        }
    }

    #[test]
    fn test_empty_and_falsy_text_rejected() {
        let mut body = valid();
        body["title"] = json!("");
        body["serves"] = json!(0);
        body["ingredients"] = json!(false);
        body["making_time"] = json!(null);
        let err = request(body).validate().unwrap_err();
        assert_eq!(err.missing, vec!["title", "making_time", "serves", "ingredients"]);
        assert_eq!(
            err.to_string(),
            "missing or empty fields: title, making_time, serves, ingredients"
        );
    }

    #[test]
    fn test_numeric_text_fields_are_stringified() {
        let mut body = valid();
        body["serves"] = json!(4);
        assert_eq!(request(body).validate().unwrap().serves, "4");
    }

    #[test]
    fn test_zero_cost_is_valid() {
        let mut body = valid();
        body["cost"] = json!(0);
        assert_eq!(request(body).validate().unwrap().cost, 0.0);
    }

    #[test]
    fn test_negative_zero_cost_is_zero() {
        for raw in [json!(-0.0), json!("-0")] {
            let mut body = valid();
            body["cost"] = raw;
            let cost = request(body).validate().unwrap().cost;
            assert!(cost.is_sign_positive());
            assert_eq!(format_cost(cost), "0");
        }
    }

    #[test]
    fn test_cost_from_numeric_string() {
        let mut body = valid();
        body["cost"] = json!(" 1200 ");
        assert_eq!(request(body).validate().unwrap().cost, 1200.0);

        let mut body = valid();
        body["cost"] = json!("cheap");
        assert_eq!(request(body).validate().unwrap_err().missing, vec!["cost"]);

        let mut body = valid();
        body["cost"] = json!("NaN");
        assert!(request(body).validate().is_err());
    }

    #[test]
    fn test_malformed_body_is_empty_request() {
        let err = RecipeRequest::from_body(b"{not json").validate().unwrap_err();
        assert_eq!(err.missing.len(), 5);

        let err = RecipeRequest::from_body(b"").validate().unwrap_err();
        assert_eq!(err.missing.len(), 5);

        let err = RecipeRequest::from_body(b"\"soup\"").validate().unwrap_err();
        assert_eq!(err.missing.len(), 5);
    }

    #[test]
    fn test_format_cost() {
        assert_eq!(format_cost(1000.0), "1000");
        assert_eq!(format_cost(0.0), "0");
        assert_eq!(format_cost(12.5), "12.5");
    }

    #[test]
    fn test_format_timestamp() {
        let ts = chrono::NaiveDate::from_ymd_opt(2016, 1, 10)
            .unwrap()
            .and_hms_opt(12, 10, 12)
            .unwrap();
        assert_eq!(format_timestamp(ts), "2016-01-10 12:10:12");
    }

    #[test]
    fn test_now_has_no_subseconds() {
        use chrono::Timelike;
        assert_eq!(now().nanosecond(), 0);
    }
}
