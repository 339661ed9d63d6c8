//! `MenuTree` over JSON documents.
//!
//! Groups are array-valued keys (`"MenuPlans": [...]`). A group holding a
//! single object instead of an array is read as a one-item list, which is
//! how the XML form represents a lone item anyway.

use serde_json::Value;

use crate::extraction::{Group, MenuTree};

impl MenuTree for Value {
    fn items(&self, group: Group) -> Vec<&Value> {
        match self.get(group.container) {
            Some(Value::Array(items)) => items.iter().collect(),
            Some(item @ Value::Object(_)) => vec![item],
            _ => Vec::new(),
        }
    }

    fn field(&self, name: &str) -> Option<String> {
        let text = match self.get(name)? {
            Value::String(s) => s.trim().to_string(),
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            _ => return None,
        };

        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::{PLANS, RECIPES};
    use serde_json::json;

    #[test]
    fn test_items_from_array() {
        let session = json!({ "MenuPlans": [{ "MenuPlanName": "A" }, { "MenuPlanName": "B" }] });
        let plans = session.items(PLANS);

        assert_eq!(plans.len(), 2);
        assert_eq!(plans[1].field("MenuPlanName"), Some("B".to_string()));
    }

    #[test]
    fn test_items_single_object_and_missing() {
        let category = json!({ "Recipes": { "RecipeName": "Pizza" } });
        assert_eq!(category.items(RECIPES).len(), 1);

        assert!(json!({}).items(RECIPES).is_empty());
        assert!(json!({ "Recipes": "Pizza" }).items(RECIPES).is_empty());
        assert!(json!([1, 2]).items(RECIPES).is_empty());
    }

    #[test]
    fn test_field_values() {
        let node = json!({ "Name": "  Pizza ", "Blank": "   ", "Id": 42, "Flag": true, "Nothing": null });

        assert_eq!(node.field("Name"), Some("Pizza".to_string()));
        assert_eq!(node.field("Blank"), None);
        assert_eq!(node.field("Id"), Some("42".to_string()));
        // Same text an XML element would carry
        assert_eq!(node.field("Flag"), Some("true".to_string()));
        assert_eq!(node.field("Nothing"), None);
        assert_eq!(node.field("Missing"), None);
    }
}
