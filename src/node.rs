//! The node view consumed by the strainer.
//!
//! The strainer does not own parse trees. A parser exposes its tag type
//! through [`TagLike`] and offers nodes to [`Strainer::search`] as [`Node`]
//! values. [`Element`] is a concrete owned implementation for callers that
//! do not have their own tree types, and for this crate's tests.
//!
//! [`Strainer::search`]: crate::Strainer::search

use std::collections::HashMap;
use std::fmt::Debug;
use std::slice;

/// An attribute value: a single string or an ordered sequence of strings.
///
/// HTML attributes like `class` are multi-valued; most others are single.
/// [`values`](Self::values) presents both uniformly as an ordered sequence,
/// a single value being a sequence of length one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrValue {
    /// A single string value.
    Single(String),
    /// An ordered sequence of values, as with `class="main big"`.
    Multi(Vec<String>),
}

impl AttrValue {
    /// View the value as an ordered sequence.
    #[must_use]
    pub fn values(&self) -> &[String] {
        match self {
            Self::Single(value) => slice::from_ref(value),
            Self::Multi(values) => values.as_slice(),
        }
    }

    /// The sequence joined with single spaces, in original order.
    #[must_use]
    pub fn joined(&self) -> String {
        self.values().join(" ")
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        Self::Single(value.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        Self::Single(value)
    }
}

impl From<Vec<String>> for AttrValue {
    fn from(values: Vec<String>) -> Self {
        Self::Multi(values)
    }
}

impl From<Vec<&str>> for AttrValue {
    fn from(values: Vec<&str>) -> Self {
        Self::Multi(values.into_iter().map(str::to_string).collect())
    }
}

impl<const N: usize> From<[&str; N]> for AttrValue {
    fn from(values: [&str; N]) -> Self {
        Self::Multi(values.into_iter().map(str::to_string).collect())
    }
}

/// The tag view offered to a strainer.
///
/// Object-safe so one strainer works over any tree implementation. The
/// strainer never mutates a tag.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot be offered to a strainer",
    label = "this type is not a tag view",
    note = "implement `TagLike` for your parser's tag type, or use the provided `Element`"
)]
pub trait TagLike: Debug {
    /// The tag's local name, without any namespace prefix.
    fn local_name(&self) -> &str;

    /// The tag's namespace prefix, if any (the `ns` in `<ns:a>`).
    fn prefix(&self) -> Option<&str> {
        None
    }

    /// Look up an attribute by name.
    fn attr(&self, name: &str) -> Option<&AttrValue>;

    /// The tag's associated text content, if known.
    fn text(&self) -> Option<&str> {
        None
    }
}

/// A parse-tree node offered to [`Strainer::search`].
///
/// `Other` carries the parser's name for a node kind the strainer cannot
/// match against (a comment, doctype, processing instruction); `search`
/// rejects it with [`StrainError::UnsupportedNode`].
///
/// [`Strainer::search`]: crate::Strainer::search
/// [`StrainError::UnsupportedNode`]: crate::StrainError::UnsupportedNode
#[derive(Debug)]
pub enum Node<'a, T> {
    /// A tag with a name, optional prefix, and attributes.
    Tag(&'a T),
    /// A text node.
    Text(&'a str),
    /// Any other node kind, by name.
    Other {
        /// The parser's name for the node kind.
        kind: &'a str,
    },
}

impl<T> Clone for Node<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Node<'_, T> {}

/// A concrete owned tag with a builder.
///
/// ```
/// use strainer::{Element, TagLike};
///
/// let tag = Element::new("a")
///     .with_prefix("ns")
///     .with_attr("class", ["main", "big"])
///     .with_text("a string");
/// assert_eq!(tag.local_name(), "a");
/// assert_eq!(tag.prefix(), Some("ns"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Element {
    name: String,
    prefix: Option<String>,
    attrs: HashMap<String, AttrValue>,
    text: Option<String>,
}

impl Element {
    /// Create an element with the given local name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set the namespace prefix (builder pattern).
    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Add an attribute (builder pattern).
    #[must_use]
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    /// Set the associated text content (builder pattern).
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// The full attribute map.
    #[must_use]
    pub fn attrs(&self) -> &HashMap<String, AttrValue> {
        &self.attrs
    }
}

impl TagLike for Element {
    fn local_name(&self) -> &str {
        &self.name
    }

    fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    fn attr(&self, name: &str) -> Option<&AttrValue> {
        self.attrs.get(name)
    }

    fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_value_is_a_sequence_of_one() {
        let value = AttrValue::from("main");
        assert_eq!(value.values(), ["main".to_string()]);
        assert_eq!(value.joined(), "main");
    }

    #[test]
    fn multi_value_joins_in_order() {
        let value = AttrValue::from(["main", "big"]);
        assert_eq!(value.values().len(), 2);
        assert_eq!(value.joined(), "main big");
    }

    #[test]
    fn element_builder_round_trip() {
        let tag = Element::new("b")
            .with_prefix("ns")
            .with_attr("id", "1")
            .with_attr("class", ["main", "big"])
            .with_text("hello");

        assert_eq!(tag.local_name(), "b");
        assert_eq!(tag.prefix(), Some("ns"));
        assert_eq!(tag.attr("id"), Some(&AttrValue::Single("1".to_string())));
        assert_eq!(tag.attr("missing"), None);
        assert_eq!(tag.text(), Some("hello"));
    }

    #[test]
    fn node_is_copy() {
        let tag = Element::new("a");
        let node = Node::Tag(&tag);
        let copy = node;
        assert!(matches!(copy, Node::Tag(_)));
        assert!(matches!(node, Node::Tag(_)));
    }
}
