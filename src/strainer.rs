//! The aggregate filter over tag name, attributes, and string content.
//!
//! Clause semantics in one line: the name clause, each per-attribute
//! clause, and the string clause combine by AND; rules within one clause
//! combine by OR, evaluated left to right with short-circuiting.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use regex::Regex;

use crate::error::StrainError;
use crate::filter::{Filter, NameFilter, ValueFilter};
use crate::node::{AttrValue, Node, TagLike};
use crate::rule::{AttrValueRule, StringRule, TagNameRule};
use crate::warn::{StderrSink, Warning, WarningSink};

/// The `attrs` argument: a mapping of per-attribute filters, or a scalar
/// treated as a filter on the `class` attribute.
#[derive(Debug)]
pub enum AttrsArg {
    /// Per-attribute filters. Keys are taken verbatim; this is the only
    /// way to filter an attribute literally named `class_`.
    Map(Vec<(String, ValueFilter)>),
    /// Sugar: a bare filter value restricts the `class` attribute.
    Scalar(ValueFilter),
}

impl From<&str> for AttrsArg {
    fn from(value: &str) -> Self {
        Self::Scalar(value.into())
    }
}

impl From<String> for AttrsArg {
    fn from(value: String) -> Self {
        Self::Scalar(value.into())
    }
}

impl From<bool> for AttrsArg {
    fn from(value: bool) -> Self {
        Self::Scalar(value.into())
    }
}

impl From<Regex> for AttrsArg {
    fn from(value: Regex) -> Self {
        Self::Scalar(value.into())
    }
}

impl From<ValueFilter> for AttrsArg {
    fn from(value: ValueFilter) -> Self {
        Self::Scalar(value)
    }
}

impl From<Vec<ValueFilter>> for AttrsArg {
    fn from(values: Vec<ValueFilter>) -> Self {
        Self::Scalar(Filter::Any(values))
    }
}

impl From<Vec<&str>> for AttrsArg {
    fn from(values: Vec<&str>) -> Self {
        Self::Scalar(values.into())
    }
}

impl From<Vec<(String, ValueFilter)>> for AttrsArg {
    fn from(entries: Vec<(String, ValueFilter)>) -> Self {
        Self::Map(entries)
    }
}

impl From<HashMap<String, ValueFilter>> for AttrsArg {
    fn from(entries: HashMap<String, ValueFilter>) -> Self {
        Self::Map(entries.into_iter().collect())
    }
}

impl<const N: usize> From<[(&str, ValueFilter); N]> for AttrsArg {
    fn from(entries: [(&str, ValueFilter); N]) -> Self {
        Self::Map(
            entries
                .into_iter()
                .map(|(name, filter)| (name.to_string(), filter))
                .collect(),
        )
    }
}

/// An aggregate filter over tag name, attribute values, and string content.
///
/// Built once via [`builder`](Self::builder), then immutable. Safe to share
/// across threads without synchronization.
///
/// ```
/// use strainer::{Element, Strainer};
///
/// let strainer: Strainer<Element> = Strainer::builder()
///     .name("a")
///     .attr("class", "sister")
///     .build()
///     .unwrap();
///
/// assert!(strainer.matches_tag(&Element::new("a").with_attr("class", "sister")));
/// assert!(!strainer.matches_tag(&Element::new("p").with_attr("class", "sister")));
/// ```
pub struct Strainer<T> {
    name_rules: Vec<TagNameRule<T>>,
    attribute_rules: HashMap<String, Vec<AttrValueRule>>,
    string_rules: Vec<StringRule>,
}

impl<T: TagLike> Strainer<T> {
    /// Start building a strainer.
    #[must_use]
    pub fn builder() -> StrainerBuilder<T> {
        StrainerBuilder::new()
    }

    /// The compiled tag-name rules.
    #[must_use]
    pub fn name_rules(&self) -> &[TagNameRule<T>] {
        &self.name_rules
    }

    /// The compiled per-attribute rules.
    #[must_use]
    pub fn attribute_rules(&self) -> &HashMap<String, Vec<AttrValueRule>> {
        &self.attribute_rules
    }

    /// The compiled string rules.
    #[must_use]
    pub fn string_rules(&self) -> &[StringRule] {
        &self.string_rules
    }

    /// Does the tag satisfy every clause of this strainer?
    ///
    /// A strainer with neither name rules nor attribute rules never
    /// matches a tag: string rules alone select text nodes, not tags.
    ///
    /// The name clause accepts a tag when any name rule matches the tag
    /// itself, or, for a tag with a namespace prefix, the rendered
    /// `prefix:name`. Each attribute clause needs at least one of its
    /// rules to match that attribute's value; multi-valued attributes are
    /// tested element-wise first and then as one space-joined string. The
    /// string clause, when present, needs at least one rule to match the
    /// tag's associated text.
    pub fn matches_tag(&self, tag: &T) -> bool {
        if self.name_rules.is_empty() && self.attribute_rules.is_empty() {
            return false;
        }

        if !self.name_rules.is_empty() {
            let prefixed = tag
                .prefix()
                .map(|prefix| format!("{prefix}:{}", tag.local_name()));
            let name_matches = self.name_rules.iter().any(|rule| {
                rule.matches_tag(tag)
                    || prefixed
                        .as_deref()
                        .is_some_and(|rendered| rule.matches_string(rendered))
            });
            if !name_matches {
                return false;
            }
        }

        for (attr, rules) in &self.attribute_rules {
            if !attr_clause_matches(rules, tag.attr(attr)) {
                return false;
            }
        }

        if !self.string_rules.is_empty() {
            let text = tag.text();
            return self
                .string_rules
                .iter()
                .any(|rule| rule.matches_string(text));
        }
        true
    }

    /// Parse-time admission: could a tag with this name and these
    /// attributes possibly match?
    ///
    /// Conservative by design. A name rule that carries a tag predicate
    /// cannot be decided before a tag exists and never causes rejection
    /// here; string rules are ignored because no text has been parsed
    /// yet. Attribute rules apply in full over the raw map.
    pub fn allow_tag_creation(
        &self,
        prefix: Option<&str>,
        name: &str,
        attrs: &HashMap<String, AttrValue>,
    ) -> bool {
        if !self.name_rules.is_empty() {
            let prefixed = prefix.map(|prefix| format!("{prefix}:{name}"));
            let name_matches = self.name_rules.iter().any(|rule| {
                rule.needs_tag()
                    || rule.matches_string(name)
                    || prefixed
                        .as_deref()
                        .is_some_and(|rendered| rule.matches_string(rendered))
            });
            if !name_matches {
                return false;
            }
        }

        self.attribute_rules
            .iter()
            .all(|(attr, rules)| attr_clause_matches(rules, attrs.get(attr)))
    }

    /// Offer a node; get it back if it matches.
    ///
    /// A text node can only match a strainer that has no name rules and no
    /// attribute rules, and then only through its string rules.
    ///
    /// # Errors
    ///
    /// [`StrainError::UnsupportedNode`] for [`Node::Other`].
    pub fn search<'a>(&self, node: Node<'a, T>) -> Result<Option<Node<'a, T>>, StrainError> {
        match node {
            Node::Tag(tag) => Ok(self.matches_tag(tag).then_some(node)),
            Node::Text(text) => {
                let matched = self.name_rules.is_empty()
                    && self.attribute_rules.is_empty()
                    && self
                        .string_rules
                        .iter()
                        .any(|rule| rule.matches_string(Some(text)));
                Ok(matched.then_some(node))
            }
            Node::Other { kind } => Err(StrainError::UnsupportedNode {
                kind: kind.to_string(),
            }),
        }
    }
}

impl<T> fmt::Debug for Strainer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Strainer")
            .field("name_rules", &self.name_rules)
            .field("attribute_rules", &self.attribute_rules)
            .field("string_rules", &self.string_rules)
            .finish()
    }
}

impl<T> Clone for Strainer<T> {
    fn clone(&self) -> Self {
        Self {
            name_rules: self.name_rules.clone(),
            attribute_rules: self.attribute_rules.clone(),
            string_rules: self.string_rules.clone(),
        }
    }
}

/// One attribute's rule list against one possibly-absent value.
///
/// Multi-valued attributes are tested element-wise first; if nothing
/// matched, the rules are retried against the space-joined value, so a
/// filter of `"main big"` can match `class="main big"` even though the
/// parser stores it as `["main", "big"]`.
fn attr_clause_matches(rules: &[AttrValueRule], value: Option<&AttrValue>) -> bool {
    let Some(value) = value else {
        return rules.iter().any(|rule| rule.matches_string(None));
    };

    let values = value.values();
    if rules
        .iter()
        .any(|rule| values.iter().any(|value| rule.matches_string(Some(value))))
    {
        return true;
    }
    if values.len() > 1 {
        let joined = value.joined();
        return rules.iter().any(|rule| rule.matches_string(Some(&joined)));
    }
    false
}

/// Builds a [`Strainer`]. Slots left unset contribute no rules.
///
/// The construction surface mirrors the search API this crate descends
/// from: a name filter, an `attrs` argument (mapping or scalar), a string
/// filter, and any number of per-attribute filters by name.
pub struct StrainerBuilder<T> {
    name: Option<NameFilter<T>>,
    // Mapping-path entries keep their keys verbatim; keyword-path entries
    // rename `class_` to `class`. Mapping entries normalize first so
    // concatenation order is deterministic.
    mapped_attrs: Vec<(String, ValueFilter)>,
    keyword_attrs: Vec<(String, ValueFilter)>,
    string: Option<ValueFilter>,
    text: Option<ValueFilter>,
    sink: Arc<dyn WarningSink>,
}

impl<T: TagLike> StrainerBuilder<T> {
    fn new() -> Self {
        Self {
            name: None,
            mapped_attrs: Vec::new(),
            keyword_attrs: Vec::new(),
            string: None,
            text: None,
            sink: Arc::new(StderrSink),
        }
    }

    /// Filter on tag name.
    #[must_use]
    pub fn name(mut self, filter: impl Into<NameFilter<T>>) -> Self {
        self.name = Some(filter.into());
        self
    }

    /// The `attrs` argument: a mapping of per-attribute filters, or a
    /// scalar standing for a filter on the `class` attribute.
    ///
    /// Mapping keys are taken verbatim, so `attrs([("class_", ..)])`
    /// filters an attribute literally named `class_`.
    #[must_use]
    pub fn attrs(mut self, arg: impl Into<AttrsArg>) -> Self {
        match arg.into() {
            AttrsArg::Map(entries) => self.mapped_attrs.extend(entries),
            AttrsArg::Scalar(filter) => self.mapped_attrs.push(("class".to_string(), filter)),
        }
        self
    }

    /// Filter one attribute by name.
    ///
    /// The name `class_` is an alias for `class`, kept for compatibility
    /// with the keyword spelling this API descends from, where `class`
    /// could not be written directly. Rules for the same attribute
    /// accumulate rather than overwrite, and every accumulated rule list
    /// must find a match.
    #[must_use]
    pub fn attr(mut self, name: impl Into<String>, filter: impl Into<ValueFilter>) -> Self {
        let mut name = name.into();
        if name == "class_" {
            name = "class".to_string();
        }
        self.keyword_attrs.push((name, filter.into()));
        self
    }

    /// Filter on string content.
    #[must_use]
    pub fn string(mut self, filter: impl Into<ValueFilter>) -> Self {
        self.string = Some(filter.into());
        self
    }

    /// Deprecated alias for [`string`](Self::string).
    ///
    /// Emits a deprecation warning at build time. If `string` is also
    /// set, the `text` value is dropped.
    #[must_use]
    pub fn text(mut self, filter: impl Into<ValueFilter>) -> Self {
        self.text = Some(filter.into());
        self
    }

    /// Where construction warnings are delivered. Defaults to stderr.
    #[must_use]
    pub fn warning_sink(mut self, sink: Arc<dyn WarningSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Normalize every filter and assemble the strainer.
    ///
    /// # Errors
    ///
    /// [`StrainError::InvalidRule`] if a byte-string literal is not valid
    /// UTF-8.
    pub fn build(self) -> Result<Strainer<T>, StrainError> {
        let sink = self.sink;

        let mut string = self.string;
        if let Some(text) = self.text {
            sink.warn(&Warning::Deprecated(
                "the 'text' filter is deprecated; use 'string' instead".to_string(),
            ));
            if string.is_none() {
                string = Some(text);
            }
        }

        let name_rules = match self.name {
            Some(filter) => filter
                .normalize(sink.as_ref())?
                .into_iter()
                .map(TagNameRule::from_assertion)
                .collect(),
            None => Vec::new(),
        };

        let mut attribute_rules: HashMap<String, Vec<AttrValueRule>> = HashMap::new();
        for (attr, filter) in self.mapped_attrs.into_iter().chain(self.keyword_attrs) {
            let assertions = filter.normalize(sink.as_ref())?;
            attribute_rules
                .entry(attr)
                .or_default()
                .extend(assertions.into_iter().map(AttrValueRule::from_assertion));
        }

        let string_rules = match string {
            Some(filter) => filter
                .normalize(sink.as_ref())?
                .into_iter()
                .map(StringRule::from_assertion)
                .collect(),
            None => Vec::new(),
        };

        Ok(Strainer {
            name_rules,
            attribute_rules,
            string_rules,
        })
    }
}
