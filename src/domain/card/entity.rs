use serde_json::Value;

/// A card record as returned by the record service.
///
/// The record is kept as the raw JSON document. Only `report.image_url` is
/// interpreted, and loosely: the service has returned ids, booleans and
/// strings there, and any non-empty value means an image is already linked.
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    document: Value,
}

impl Card {
    /// Wraps a lookup response. Empty documents (`null`, `false`, `0`, `""`)
    /// mean the service has no such card.
    pub fn from_document(document: Value) -> Option<Self> {
        is_truthy(&document).then_some(Self { document })
    }

    pub fn field(&self, key: &str) -> Option<&Value> {
        self.document.get(key)
    }

    /// Image already linked to this card, if any. A report that is not an
    /// object carries no image.
    pub fn image_url(&self) -> Option<&Value> {
        self.document
            .get("report")
            .filter(|report| report.is_object())
            .and_then(|report| report.get("image_url"))
            .filter(|url| is_truthy(url))
    }

    pub fn has_image(&self) -> bool {
        self.image_url().is_some()
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
