//! Config-driven strainer construction.
//!
//! These types mirror the builder surface with serde-deserializable
//! config, so filters can live in JSON or YAML next to the rest of a
//! pipeline's configuration. Predicates are not expressible here; they
//! only exist in the typed API.
//!
//! # Relationship to runtime types
//!
//! | Config type | Runtime counterpart |
//! |-------------|---------------------|
//! | [`StrainerConfig`] | [`Strainer`] |
//! | [`AttrsConfig`] | the builder's `attrs` argument |
//! | [`FilterConfig`] | [`Filter`](crate::Filter) |
//!
//! # Example
//!
//! ```
//! use strainer::config::StrainerConfig;
//! use strainer::{Element, Strainer};
//!
//! let config: StrainerConfig = serde_yaml::from_str(
//!     "
//! name: a
//! attrs:
//!   class: sister
//! ",
//! )
//! .unwrap();
//!
//! let strainer: Strainer<Element> = config.build().unwrap();
//! assert!(strainer.matches_tag(&Element::new("a").with_attr("class", "sister")));
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use regex::Regex;
use serde::Deserialize;

use crate::error::StrainError;
use crate::filter::Filter;
use crate::node::TagLike;
use crate::strainer::{AttrsArg, Strainer};
use crate::warn::{StderrSink, WarningSink};

/// One filter value in configuration form.
///
/// A bare string is a literal, a bare boolean is a presence test, a
/// one-field object picks the assertion explicitly, and a list matches
/// when any element matches.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum FilterConfig {
    /// Bare boolean: a presence test.
    Present(bool),
    /// Bare string: an exact-equality literal.
    Literal(String),
    /// Explicit rule object; exactly one field must be set.
    Rule(RuleConfig),
    /// A list of filters, any of which may match.
    Many(Vec<FilterConfig>),
}

/// An explicit rule object with independently-optional fields.
///
/// JSON examples:
///
/// ```json
/// { "literal": "sister" }
/// { "pattern": "^h[1-6]$" }
/// { "present": false }
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleConfig {
    /// Exact-equality literal.
    #[serde(default)]
    pub literal: Option<String>,
    /// Regex source, compiled at build time.
    #[serde(default)]
    pub pattern: Option<String>,
    /// Presence test.
    #[serde(default)]
    pub present: Option<bool>,
}

impl RuleConfig {
    fn build<P>(&self) -> Result<Filter<P>, StrainError> {
        match (&self.literal, &self.pattern, &self.present) {
            (Some(literal), None, None) => Ok(Filter::Literal(literal.clone())),
            (None, Some(pattern), None) => {
                let compiled = Regex::new(pattern).map_err(|err| StrainError::InvalidPattern {
                    pattern: pattern.clone(),
                    source: err.to_string(),
                })?;
                Ok(Filter::Pattern(compiled))
            }
            (None, None, Some(present)) => Ok(Filter::Present(*present)),
            (None, None, None) => Err(StrainError::InvalidRule {
                reason: "one of literal, pattern or present must be given".to_string(),
            }),
            _ => Err(StrainError::InvalidRule {
                reason: "at most one of literal, pattern and present may be given".to_string(),
            }),
        }
    }
}

impl FilterConfig {
    /// Compile into a runtime filter value.
    fn build<P>(&self) -> Result<Filter<P>, StrainError> {
        match self {
            Self::Present(present) => Ok(Filter::Present(*present)),
            Self::Literal(literal) => Ok(Filter::Literal(literal.clone())),
            Self::Rule(rule) => rule.build(),
            Self::Many(items) => Ok(Filter::Any(
                items
                    .iter()
                    .map(FilterConfig::build)
                    .collect::<Result<_, _>>()?,
            )),
        }
    }
}

/// The `attrs` argument in configuration form.
///
/// A mapping restricts each named attribute (keys are verbatim); anything
/// else is a scalar restricting the `class` attribute.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum AttrsConfig {
    /// Per-attribute filters.
    Map(HashMap<String, FilterConfig>),
    /// A scalar: a filter on the `class` attribute.
    Scalar(FilterConfig),
}

/// A whole strainer in configuration form.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StrainerConfig {
    /// Tag-name filter.
    #[serde(default)]
    pub name: Option<FilterConfig>,
    /// Attribute filters, or a scalar `class` filter.
    #[serde(default)]
    pub attrs: Option<AttrsConfig>,
    /// String-content filter.
    #[serde(default)]
    pub string: Option<FilterConfig>,
    /// Deprecated alias for `string`; warns at build time.
    #[serde(default)]
    pub text: Option<FilterConfig>,
}

impl StrainerConfig {
    /// Build a strainer, sending warnings to stderr.
    ///
    /// # Errors
    ///
    /// [`StrainError::InvalidRule`] or [`StrainError::InvalidPattern`] for
    /// malformed rule objects.
    pub fn build<T: TagLike>(&self) -> Result<Strainer<T>, StrainError> {
        self.build_with_sink(Arc::new(StderrSink))
    }

    /// Build a strainer with an explicit warning sink.
    ///
    /// # Errors
    ///
    /// As [`build`](Self::build).
    pub fn build_with_sink<T: TagLike>(
        &self,
        sink: Arc<dyn WarningSink>,
    ) -> Result<Strainer<T>, StrainError> {
        let mut builder = Strainer::<T>::builder().warning_sink(sink);

        if let Some(name) = &self.name {
            builder = builder.name(name.build()?);
        }
        if let Some(attrs) = &self.attrs {
            let arg = match attrs {
                AttrsConfig::Map(map) => AttrsArg::Map(
                    map.iter()
                        .map(|(attr, filter)| Ok((attr.clone(), filter.build()?)))
                        .collect::<Result<_, StrainError>>()?,
                ),
                AttrsConfig::Scalar(filter) => AttrsArg::Scalar(filter.build()?),
            };
            builder = builder.attrs(arg);
        }
        if let Some(string) = &self.string {
            builder = builder.string(string.build()?);
        }
        if let Some(text) = &self.text {
            builder = builder.text(text.build()?);
        }

        builder.build()
    }
}
