//! Payment record carried from the HTTP endpoint to the broker.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// A single payment request.
///
/// No field is required. Absent fields stay absent on the wire, and fields
/// beyond `amount`, `payer` and `payee` are kept in `extra` so that whatever
/// the caller sends is published unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaymentRecord {
    /// Amount, integral or fractional
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<Number>,

    /// Paying party
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payer: Option<String>,

    /// Receiving party
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payee: Option<String>,

    /// Any additional caller-supplied fields
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PaymentRecord {
    /// Create a record with no extra fields.
    pub fn new(amount: i64, payer: impl Into<String>, payee: impl Into<String>) -> Self {
        Self {
            amount: Some(Number::from(amount)),
            payer: Some(payer.into()),
            payee: Some(payee.into()),
            extra: Map::new(),
        }
    }

    /// Attach an extra field.
    pub fn with_field(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_canonical_encoding() {
        let record = PaymentRecord::new(100, "A", "B");
        let text = serde_json::to_string(&record).unwrap();
        assert_eq!(text, r#"{"amount":100,"payer":"A","payee":"B"}"#);
    }

    #[test]
    fn test_extra_fields_survive() {
        let body = r#"{"amount":5,"payer":"A","payee":"B","currency":"EUR","memo":null}"#;
        let record: PaymentRecord = serde_json::from_str(body).unwrap();

        assert_eq!(record.extra.get("currency"), Some(&json!("EUR")));
        assert_eq!(record.extra.get("memo"), Some(&Value::Null));

        let reencoded: Value = serde_json::to_value(&record).unwrap();
        let original: Value = serde_json::from_str(body).unwrap();
        assert_eq!(reencoded, original);
    }

    #[test]
    fn test_fractional_amount_accepted() {
        let record: PaymentRecord =
            serde_json::from_str(r#"{"amount":100.5,"payer":"A","payee":"B"}"#).unwrap();

        assert_eq!(record.amount.as_ref().and_then(Number::as_f64), Some(100.5));
        assert_eq!(
            serde_json::to_string(&record).unwrap(),
            r#"{"amount":100.5,"payer":"A","payee":"B"}"#
        );
    }

    #[test]
    fn test_missing_fields_stay_absent() {
        let record: PaymentRecord = serde_json::from_str(r#"{"amount":100,"payer":"A"}"#).unwrap();

        assert_eq!(record.payee, None);
        assert_eq!(
            serde_json::to_string(&record).unwrap(),
            r#"{"amount":100,"payer":"A"}"#
        );
    }

    #[test]
    fn test_null_amount_accepted() {
        let record: PaymentRecord =
            serde_json::from_str(r#"{"amount":null,"payer":"A","payee":"B"}"#).unwrap();

        assert_eq!(record.amount, None);
    }

    #[test]
    fn test_empty_object_accepted() {
        let record: PaymentRecord = serde_json::from_str("{}").unwrap();

        assert_eq!(record, PaymentRecord::default());
        assert_eq!(serde_json::to_string(&record).unwrap(), "{}");
    }

    #[test]
    fn test_wrong_shape_rejected() {
        assert!(serde_json::from_str::<PaymentRecord>(r#"{"amount":"lots"}"#).is_err());
        assert!(serde_json::from_str::<PaymentRecord>("[1,2]").is_err());
    }
}
