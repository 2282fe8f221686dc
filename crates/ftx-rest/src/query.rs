//! Query assembly and encoding
//!
//! A [`Query`] is an insertion-ordered JSON object. GET requests encode it into
//! the URL, POST and DELETE requests send it as the JSON body.

use rust_decimal::Decimal;
use serde_json::{Map, Number, Value};

use crate::error::{RestError, RestResult};

/// Ordered request parameters
pub type Query = Map<String, Value>;

/// Assemble a query from independently optional parameters
///
/// Absent values are dropped; present ones keep the caller's key and order.
///
/// ```
/// use ftx_rest::query::QueryBuilder;
///
/// let query = QueryBuilder::new()
///     .opt("limit", Some(50))
///     .opt("start_time", None::<i64>)
///     .param("market", "BTC-PERP")
///     .build();
///
/// assert_eq!(query.len(), 2);
/// assert!(!query.contains_key("start_time"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct QueryBuilder {
    query: Query,
}

impl QueryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Always include `key`
    pub fn param(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.query.insert(key.to_string(), value.into());
        self
    }

    /// Include `key` only when `value` is present
    pub fn opt<V: Into<Value>>(self, key: &str, value: Option<V>) -> Self {
        match value {
            Some(value) => self.param(key, value),
            None => self,
        }
    }

    /// Always include a decimal, as a JSON number
    pub fn decimal(self, key: &str, value: Decimal) -> Self {
        self.param(key, decimal_value(value))
    }

    /// Include a decimal only when present
    pub fn opt_decimal(self, key: &str, value: Option<Decimal>) -> Self {
        self.opt(key, value.map(decimal_value))
    }

    pub fn build(self) -> Query {
        self.query
    }
}

/// Keep only the present entries of a list of optional parameters
pub fn build_query<'a, I>(params: I) -> Query
where
    I: IntoIterator<Item = (&'a str, Option<Value>)>,
{
    params
        .into_iter()
        .filter_map(|(key, value)| value.map(|value| (key.to_string(), value)))
        .collect()
}

/// Render a decimal as a JSON number
///
/// The digits are carried verbatim, so prices and sizes are signed and sent
/// exactly as given. Trailing zeros are dropped: `8500.000` is sent as `8500`.
pub fn decimal_value(value: Decimal) -> Value {
    let text = value.normalize().to_string();
    // Decimal's Display never uses an exponent, so this is always a JSON number
    match text.parse::<Number>() {
        Ok(number) => Value::Number(number),
        Err(_) => Value::String(text),
    }
}

/// Encode a query for the signature payload
///
/// Standard form encoding; list values repeat the bare key.
pub fn encode_signed(query: &Query) -> RestResult<String> {
    encode(&pairs(query, false))
}

/// Encode a query for a GET URL
///
/// List values repeat the key with a `[]` suffix (`coins[]=BTC&coins[]=ETH`),
/// and `/`, `[`, `]` are left literal.
pub fn encode_url(query: &Query) -> RestResult<String> {
    let encoded = encode(&pairs(query, true))?;
    Ok(encoded
        .replace("%5B", "[")
        .replace("%5D", "]")
        .replace("%2F", "/"))
}

fn encode(pairs: &[(String, String)]) -> RestResult<String> {
    serde_urlencoded::to_string(pairs).map_err(|e| RestError::Serialize(e.to_string()))
}

fn pairs(query: &Query, bracket_lists: bool) -> Vec<(String, String)> {
    let mut pairs = Vec::with_capacity(query.len());
    for (key, value) in query {
        match value {
            Value::Array(items) => {
                let key = if bracket_lists {
                    format!("{}[]", key)
                } else {
                    key.clone()
                };
                pairs.extend(items.iter().map(|item| (key.clone(), scalar_text(item))));
            }
            other => pairs.push((key.clone(), scalar_text(other))),
        }
    }
    pairs
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn query(value: Value) -> Query {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected an object"),
        }
    }

    #[test]
    fn test_builder_drops_absent_values() {
        let query = QueryBuilder::new()
            .opt("limit", Some(100u32))
            .opt("start_time", None::<i64>)
            .opt("end_time", Some(1_600_000_000i64))
            .build();

        assert_eq!(Value::Object(query), json!({"limit": 100, "end_time": 1600000000}));
    }

    #[test]
    fn test_builder_keeps_insertion_order() {
        let query = QueryBuilder::new()
            .param("market", "BTC-PERP")
            .param("side", "buy")
            .param("price", Value::Null)
            .build();

        let keys: Vec<&str> = query.keys().map(String::as_str).collect();
        assert_eq!(keys, ["market", "side", "price"]);
        assert!(query["price"].is_null());
    }

    #[test]
    fn test_build_query_helper() {
        let query = build_query([
            ("limit", Some(json!(5))),
            ("order", None),
            ("orderId", Some(json!(42))),
        ]);
        assert_eq!(Value::Object(query), json!({"limit": 5, "orderId": 42}));
    }

    #[test]
    fn test_decimal_value() {
        assert_eq!(decimal_value(dec!(8500)), json!(8500));
        assert_eq!(decimal_value(dec!(8500.000)), json!(8500));
        assert_eq!(decimal_value(dec!(0.0013)), json!(0.0013));
        assert_eq!(decimal_value(dec!(-50)), json!(-50));
    }

    #[test]
    fn test_decimal_value_keeps_every_digit() {
        let value = decimal_value(dec!(0.123456789012345678));
        assert_eq!(value.to_string(), "0.123456789012345678");

        let value = decimal_value(dec!(20000.123456789012345));
        assert_eq!(value.to_string(), "20000.123456789012345");
        assert!(value.is_number());
    }

    #[test]
    fn test_encode_url_brackets_lists() {
        let q = query(json!({"coins": ["BTC", "ETH"]}));
        assert_eq!(encode_url(&q).unwrap(), "coins[]=BTC&coins[]=ETH");
    }

    #[test]
    fn test_encode_signed_repeats_bare_key() {
        let q = query(json!({"coins": ["BTC", "ETH"]}));
        assert_eq!(encode_signed(&q).unwrap(), "coins=BTC&coins=ETH");
    }

    #[test]
    fn test_encode_scalars() {
        let q = query(json!({
            "market": "BTC/USD",
            "showAvgPrice": false,
            "depth": 20,
            "note": "a b"
        }));

        assert_eq!(
            encode_url(&q).unwrap(),
            "market=BTC/USD&showAvgPrice=false&depth=20&note=a+b"
        );
        assert_eq!(
            encode_signed(&q).unwrap(),
            "market=BTC%2FUSD&showAvgPrice=false&depth=20&note=a+b"
        );
    }

    #[test]
    fn test_encode_empty() {
        assert_eq!(encode_url(&Query::new()).unwrap(), "");
        assert_eq!(encode_signed(&Query::new()).unwrap(), "");
    }
}
