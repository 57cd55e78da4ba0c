//! strainer - declarative element filters for markup parse trees
//!
//! A [`Strainer`] answers one question: does a parse-tree node (a tag with
//! a name, prefix and attributes, or a text node) satisfy a filter? The
//! filter is built from do-what-I-mean values: string literals, compiled
//! regexes, booleans (presence tests), predicates, lists of any of these,
//! and per-attribute maps. Construction normalizes that surface into small
//! single-assertion rules; matching is then a pure, synchronous walk over
//! the rules.
//!
//! Two consumers drive the API:
//!
//! - **Tree search**: offer every node through [`Strainer::search`] and
//!   keep the matches.
//! - **Parse-time admission**: ask [`Strainer::allow_tag_creation`] before
//!   building a tag, so subtrees that cannot possibly match are never
//!   constructed.
//!
//! Clause semantics in one line: the name clause, each per-attribute
//! clause, and the string clause combine by AND; rules within one clause
//! combine by OR.
//!
//! # Example
//!
//! ```
//! use regex::Regex;
//! use strainer::{Element, Strainer};
//!
//! let strainer: Strainer<Element> = Strainer::builder()
//!     .name(vec![Regex::new("^h[1-6]$").unwrap()])
//!     .attr("class", "headline")
//!     .build()
//!     .unwrap();
//!
//! let tag = Element::new("h2").with_attr("class", ["headline", "wide"]);
//! assert!(strainer.matches_tag(&tag));
//!
//! let tag = Element::new("p").with_attr("class", "headline");
//! assert!(!strainer.matches_tag(&tag));
//! ```
//!
//! # Integrating a parser
//!
//! Implement [`TagLike`] for your tag type; the strainer consumes tags by
//! reference and never mutates them. Tag-name predicates receive your tag
//! type directly:
//!
//! ```
//! use strainer::{Element, NameFilter, Strainer};
//!
//! let strainer: Strainer<Element> = Strainer::builder()
//!     .name(NameFilter::tag_func(|tag: &Element| tag.attr("href").is_some()))
//!     .build()
//!     .unwrap();
//! assert!(strainer.matches_tag(&Element::new("a").with_attr("href", "/")));
//! ```
//!
//! # Features
//!
//! - `config`: serde-deserializable strainer configuration (JSON/YAML),
//!   see [`config`].

mod error;
mod filter;
mod node;
mod rule;
mod strainer;
mod warn;

#[cfg(feature = "config")]
pub mod config;

pub use error::StrainError;
pub use filter::{Filter, NameFilter, ValueFilter};
pub use node::{AttrValue, Element, Node, TagLike};
pub use rule::{AttrValueRule, StrPredicate, StringRule, TagNameRule, TagPredicate};
pub use strainer::{AttrsArg, Strainer, StrainerBuilder};
pub use warn::{StderrSink, Warning, WarningSink};

/// Prelude for convenient imports.
///
/// ```
/// use strainer::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        AttrValue, AttrsArg, Element, Filter, NameFilter, Node, StrainError, Strainer,
        StrainerBuilder, TagLike, ValueFilter, Warning, WarningSink,
    };
}
