//! Document value model.
//!
//! A document is an untyped JSON object: string keys mapping to scalars,
//! nested objects, or arrays. The storage layer assigns the identifier; it is
//! never part of a caller-supplied body.

use serde_json::{Map, Value};

/// One stored record, free of its identifier.
pub type Document = Map<String, Value>;

/// Key under which the assigned identifier is exposed to clients.
pub const ID_KEY: &str = "id";

/// Remove any caller-supplied identifier from an update payload.
///
/// The identifier is immutable once assigned, so an incoming body must never
/// be allowed to carry one into the store.
pub fn strip_id(doc: &mut Document) {
    doc.remove(ID_KEY);
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn strip_id_removes_identifier_key() {
        let mut doc = Document::new();
        doc.insert("id".to_string(), json!("someone-elses-id"));
        doc.insert("name".to_string(), json!("a"));

        strip_id(&mut doc);

        assert!(!doc.contains_key("id"));
        assert_eq!(doc.get("name"), Some(&json!("a")));
    }

    #[test]
    fn strip_id_is_a_no_op_without_identifier() {
        let mut doc = Document::new();
        doc.insert("name".to_string(), json!("a"));

        strip_id(&mut doc);

        assert_eq!(doc.len(), 1);
    }
}
