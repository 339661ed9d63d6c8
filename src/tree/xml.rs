//! Generic XML element tree and its accessors.
//!
//! The XML feed is read into [`XmlNode`]s keeping only element names (with
//! any namespace prefix), text, and children. Lookups compare names
//! case-insensitively by suffix, so `a:Recipe` answers to `Recipe`.
//!
//! Suffix matching is deliberately loose: `child_by_name(day, "Date")` also
//! matches `ServiceDate`. Callers probe the most specific names first.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::{FeedError, Result};
use crate::extraction::{Group, MenuTree, SESSIONS};

/// An XML element: qualified name, concatenated text, child elements.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlNode {
    pub name: String,
    pub text: String,
    pub children: Vec<XmlNode>,
}

impl XmlNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_child(mut self, child: XmlNode) -> Self {
        self.children.push(child);
        self
    }

    /// Parse an XML document into its root element.
    ///
    /// Text and CDATA directly inside an element are appended to its `text`.
    /// Attributes, comments and processing instructions are dropped.
    ///
    /// # Errors
    /// Returns `FeedError::Xml` for reader errors, unclosed elements, more
    /// than one root element, or a document without any element.
    pub fn parse(xml: &str) -> Result<XmlNode> {
        let mut reader = Reader::from_str(xml);
        let mut stack: Vec<XmlNode> = Vec::new();
        let mut root: Option<XmlNode> = None;

        loop {
            match reader.read_event() {
                Ok(Event::Start(e)) => stack.push(XmlNode::new(element_name(&e))),
                Ok(Event::Empty(e)) => {
                    attach(&mut stack, &mut root, XmlNode::new(element_name(&e)))?;
                }
                Ok(Event::End(_)) => {
                    let node = stack
                        .pop()
                        .ok_or_else(|| FeedError::Xml("unexpected closing tag".to_string()))?;
                    attach(&mut stack, &mut root, node)?;
                }
                Ok(Event::Text(e)) => {
                    if let Some(current) = stack.last_mut() {
                        let text = e
                            .unescape()
                            .map_err(|err| FeedError::Xml(err.to_string()))?;
                        current.text.push_str(&text);
                    }
                }
                Ok(Event::CData(e)) => {
                    if let Some(current) = stack.last_mut() {
                        current.text.push_str(&String::from_utf8_lossy(&e.into_inner()));
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(FeedError::Xml(format!(
                        "at position {}: {}",
                        reader.buffer_position(),
                        e
                    )));
                }
                _ => {}
            }
        }

        if let Some(open) = stack.last() {
            return Err(FeedError::Xml(format!("element '{}' is never closed", open.name)));
        }

        root.ok_or_else(|| FeedError::Xml("document has no root element".to_string()))
    }
}

fn element_name(start: &BytesStart) -> String {
    String::from_utf8_lossy(start.name().as_ref()).into_owned()
}

fn attach(stack: &mut [XmlNode], root: &mut Option<XmlNode>, node: XmlNode) -> Result<()> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(node);
    } else if root.is_none() {
        *root = Some(node);
    } else {
        return Err(FeedError::Xml(format!(
            "second root element '{}'",
            node.name
        )));
    }
    Ok(())
}

/// Element name without its namespace prefix.
fn local_name(name: &str) -> &str {
    name.rsplit(':').next().unwrap_or(name)
}

/// Direct children whose name ends with `name`, ignoring case.
pub fn children_by_name<'a>(node: Option<&'a XmlNode>, name: &str) -> Vec<&'a XmlNode> {
    let Some(node) = node else {
        return Vec::new();
    };
    let suffix = name.to_lowercase();

    node.children
        .iter()
        .filter(|child| child.name.to_lowercase().ends_with(&suffix))
        .collect()
}

/// First of [`children_by_name`].
pub fn child_by_name<'a>(node: Option<&'a XmlNode>, name: &str) -> Option<&'a XmlNode> {
    children_by_name(node, name).into_iter().next()
}

/// Trimmed text of a node, empty when absent.
pub fn text(node: Option<&XmlNode>) -> String {
    node.map(|n| n.text.trim().to_string()).unwrap_or_default()
}

impl MenuTree for XmlNode {
    fn items(&self, group: Group) -> Vec<&XmlNode> {
        children_by_name(child_by_name(Some(self), group.container), group.item)
    }

    /// Exact local-name matches are tried before suffix matches, and blank
    /// elements are skipped, so `<RecipeName/><Name>Pizza</Name>` answers
    /// `Name` with "Pizza" the way the JSON key lookup does.
    fn field(&self, name: &str) -> Option<String> {
        let candidates = children_by_name(Some(self), name);
        let non_blank = |node: &&XmlNode| !node.text.trim().is_empty();

        candidates
            .iter()
            .copied()
            .filter(|node| local_name(&node.name).eq_ignore_ascii_case(name))
            .find(non_blank)
            .or_else(|| candidates.iter().copied().find(non_blank))
            .map(|node| text(Some(node)))
    }

    /// Sessions sit directly under the root in some responses and inside a
    /// `FamilyMenuSessions` wrapper in others.
    fn sessions(&self) -> Vec<&XmlNode> {
        let direct = children_by_name(Some(self), SESSIONS.item);
        if direct.is_empty() {
            self.items(SESSIONS)
        } else {
            direct
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::RECIPES;

    #[test]
    fn test_parse_builds_tree() {
        let root = XmlNode::parse(
            r#"<?xml version="1.0" encoding="utf-8"?>
            <Root xmlns:a="urn:menu">
              <a:Recipes>
                <a:Recipe><a:RecipeName> Mac &amp; Cheese </a:RecipeName></a:Recipe>
                <a:Recipe><a:RecipeName><![CDATA[Fish <Tacos>]]></a:RecipeName></a:Recipe>
                <a:Recipe/>
              </a:Recipes>
            </Root>"#,
        )
        .unwrap();

        assert_eq!(root.name, "Root");
        let recipes = root.items(RECIPES);
        assert_eq!(recipes.len(), 3);
        assert_eq!(recipes[0].field("RecipeName"), Some("Mac & Cheese".to_string()));
        assert_eq!(recipes[1].field("RecipeName"), Some("Fish <Tacos>".to_string()));
        assert_eq!(recipes[2].field("RecipeName"), None);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(XmlNode::parse(""), Err(FeedError::Xml(_))));
        assert!(matches!(XmlNode::parse("just text"), Err(FeedError::Xml(_))));
        assert!(matches!(XmlNode::parse("<a><b></a>"), Err(FeedError::Xml(_))));
        assert!(matches!(XmlNode::parse("<a>"), Err(FeedError::Xml(_))));
        assert!(matches!(XmlNode::parse("<a/><b/>"), Err(FeedError::Xml(_))));
    }

    #[test]
    fn test_children_by_name_suffix_and_case() {
        let node = XmlNode::new("Day")
            .with_child(XmlNode::new("ns:MenuMeal"))
            .with_child(XmlNode::new("MENUMEAL"))
            .with_child(XmlNode::new("MenuMeals"));

        assert_eq!(children_by_name(Some(&node), "MenuMeal").len(), 2);
        assert_eq!(children_by_name(Some(&node), "menumeals").len(), 1);
        assert!(children_by_name(None, "MenuMeal").is_empty());
        assert!(children_by_name(Some(&XmlNode::new("Leaf")), "MenuMeal").is_empty());
    }

    #[test]
    fn test_child_by_name_and_text() {
        let day = XmlNode::new("Day")
            .with_child(XmlNode::new("ServiceDate").with_text(" 2025-10-07 "))
            .with_child(XmlNode::new("Date").with_text("2025-10-06"));

        // Suffix match: ServiceDate comes first and ends with "date"
        assert_eq!(text(child_by_name(Some(&day), "Date")), "2025-10-07");
        assert_eq!(text(child_by_name(Some(&day), "MenuDate")), "");
        assert_eq!(text(None), "");
        assert!(child_by_name(Some(&day), "Nope").is_none());
    }

    #[test]
    fn test_field_skips_blank_suffix_matches() {
        let recipe = XmlNode::new("Recipe")
            .with_child(XmlNode::new("RecipeName"))
            .with_child(XmlNode::new("Name").with_text("Pizza"));
        assert_eq!(recipe.field("RecipeName"), None);
        assert_eq!(recipe.field("Name"), Some("Pizza".to_string()));

        let day = XmlNode::new("Day")
            .with_child(XmlNode::new("a:MenuDate").with_text("  "))
            .with_child(XmlNode::new("a:Date").with_text("2025-10-06"));
        assert_eq!(day.field("Date"), Some("2025-10-06".to_string()));
        assert_eq!(day.field("MenuDate"), None);
    }

    #[test]
    fn test_field_prefers_exact_name() {
        let category = XmlNode::new("RecipeCategory")
            .with_child(XmlNode::new("DisplayName").with_text("Lunch Line 2"))
            .with_child(XmlNode::new("Name").with_text("Main Entree"));
        assert_eq!(category.field("Name"), Some("Main Entree".to_string()));

        // No exact match: fall back to the first non-blank suffix match
        let day = XmlNode::new("Day")
            .with_child(XmlNode::new("Date"))
            .with_child(XmlNode::new("ServiceDate").with_text("2025-10-07"));
        assert_eq!(day.field("Date"), Some("2025-10-07".to_string()));
    }

    #[test]
    fn test_sessions_direct_or_wrapped() {
        let direct = XmlNode::new("Response")
            .with_child(XmlNode::new("FamilyMenuSession"))
            .with_child(XmlNode::new("FamilyMenuSession"));
        assert_eq!(direct.sessions().len(), 2);

        let wrapped = XmlNode::new("Response").with_child(
            XmlNode::new("FamilyMenuSessions").with_child(XmlNode::new("FamilyMenuSession")),
        );
        assert_eq!(wrapped.sessions().len(), 1);

        assert!(XmlNode::new("Response").sessions().is_empty());
    }
}
