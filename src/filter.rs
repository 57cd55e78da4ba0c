//! The filter value surface and its normalization into rules.
//!
//! Filter values are deliberately do-what-I-mean: a literal, a byte-string
//! literal, a compiled regex, a boolean presence test, a predicate, a list
//! of any of these, or anything printable. Normalization flattens one
//! filter value into a list of single-assertion rules.

use std::fmt;
use std::sync::Arc;

use regex::Regex;

use crate::error::StrainError;
use crate::rule::{Assertion, StrPredicate, TagPredicate};
use crate::warn::{Warning, WarningSink};

/// A single filter value, generic over its predicate capability `P`.
///
/// Use [`NameFilter`] for the tag-name slot and [`ValueFilter`] for
/// attribute and string slots; the two differ only in what their
/// predicates receive.
pub enum Filter<P> {
    /// Match a string exactly.
    Literal(String),
    /// A byte-string literal, decoded as UTF-8 during normalization.
    Bytes(Vec<u8>),
    /// Match when the pattern is found anywhere in the candidate.
    Pattern(Regex),
    /// Match by user predicate.
    Predicate(P),
    /// `true` matches any present value, `false` matches only absence.
    Present(bool),
    /// Match when any element matches. A list nested inside another list
    /// is skipped during normalization, with a warning.
    Any(Vec<Filter<P>>),
}

/// Filter over a tag name; predicates see the whole tag view.
pub type NameFilter<T> = Filter<TagPredicate<T>>;

/// Filter over an attribute value or string content.
pub type ValueFilter = Filter<StrPredicate>;

impl<P> Filter<P> {
    /// A literal from anything printable.
    ///
    /// This is the catch-all for values that are none of the recognized
    /// filter shapes: they match by their displayed form.
    pub fn stringified(value: impl fmt::Display) -> Self {
        Self::Literal(value.to_string())
    }

    /// A byte-string literal, decoded as UTF-8 at build time.
    pub fn bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self::Bytes(bytes.into())
    }

    /// Flatten this filter into single-assertion rules.
    ///
    /// Nested lists are skipped, warning at most once per call. Byte
    /// literals decode as UTF-8 or fail the build.
    pub(crate) fn normalize(
        self,
        sink: &dyn WarningSink,
    ) -> Result<Vec<Assertion<P>>, StrainError> {
        let mut assertions = Vec::new();
        let mut warned = false;
        self.flatten(false, &mut assertions, sink, &mut warned)?;
        Ok(assertions)
    }

    fn flatten(
        self,
        in_list: bool,
        out: &mut Vec<Assertion<P>>,
        sink: &dyn WarningSink,
        warned: &mut bool,
    ) -> Result<(), StrainError> {
        match self {
            Self::Literal(literal) => out.push(Assertion::Literal(literal)),
            Self::Bytes(bytes) => {
                let literal = String::from_utf8(bytes).map_err(|err| StrainError::InvalidRule {
                    reason: format!("byte-string literal is not valid UTF-8: {err}"),
                })?;
                out.push(Assertion::Literal(literal));
            }
            Self::Pattern(pattern) => out.push(Assertion::Pattern(pattern)),
            Self::Predicate(predicate) => out.push(Assertion::Predicate(predicate)),
            Self::Present(present) => out.push(Assertion::Present(present)),
            Self::Any(_) if in_list => {
                // A list inside a list opens the door to self-reference;
                // skip it rather than recurse.
                if !*warned {
                    sink.warn(&Warning::NestedFilterList);
                    *warned = true;
                }
            }
            Self::Any(items) => {
                for item in items {
                    item.flatten(true, out, sink, warned)?;
                }
            }
        }
        Ok(())
    }
}

impl Filter<StrPredicate> {
    /// A predicate over the candidate string.
    pub fn func(predicate: impl Fn(&str) -> bool + Send + Sync + 'static) -> Self {
        Self::Predicate(Arc::new(predicate))
    }
}

impl<T> Filter<TagPredicate<T>> {
    /// A predicate over the whole tag view.
    pub fn tag_func(predicate: impl Fn(&T) -> bool + Send + Sync + 'static) -> Self {
        Self::Predicate(Arc::new(predicate))
    }
}

impl<P> fmt::Debug for Filter<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(literal) => f.debug_tuple("Literal").field(literal).finish(),
            Self::Bytes(bytes) => f.debug_tuple("Bytes").field(bytes).finish(),
            Self::Pattern(pattern) => f.debug_tuple("Pattern").field(&pattern.as_str()).finish(),
            Self::Predicate(_) => f.write_str("Predicate(..)"),
            Self::Present(present) => f.debug_tuple("Present").field(present).finish(),
            Self::Any(items) => f.debug_tuple("Any").field(items).finish(),
        }
    }
}

impl<P> From<&str> for Filter<P> {
    fn from(value: &str) -> Self {
        Self::Literal(value.to_string())
    }
}

impl<P> From<String> for Filter<P> {
    fn from(value: String) -> Self {
        Self::Literal(value)
    }
}

impl<P> From<bool> for Filter<P> {
    fn from(value: bool) -> Self {
        Self::Present(value)
    }
}

impl<P> From<Regex> for Filter<P> {
    fn from(value: Regex) -> Self {
        Self::Pattern(value)
    }
}

impl<P> From<&[u8]> for Filter<P> {
    fn from(value: &[u8]) -> Self {
        Self::Bytes(value.to_vec())
    }
}

impl<P, V: Into<Filter<P>>> From<Vec<V>> for Filter<P> {
    fn from(values: Vec<V>) -> Self {
        Self::Any(values.into_iter().map(Into::into).collect())
    }
}

impl<P, V: Into<Filter<P>>, const N: usize> From<[V; N]> for Filter<P> {
    fn from(values: [V; N]) -> Self {
        Self::Any(values.into_iter().map(Into::into).collect())
    }
}

/// `None` is the "attribute must be absent" shorthand.
impl<P, V: Into<Filter<P>>> From<Option<V>> for Filter<P> {
    fn from(value: Option<V>) -> Self {
        match value {
            Some(value) => value.into(),
            None => Self::Present(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::warn::testing::CollectSink;

    fn normalized(filter: ValueFilter) -> Vec<Assertion<StrPredicate>> {
        filter.normalize(&crate::warn::StderrSink).unwrap()
    }

    #[test]
    fn literal_normalizes_to_one_rule() {
        let rules = normalized("a".into());
        assert_eq!(rules.len(), 1);
        assert!(matches!(&rules[0], Assertion::Literal(s) if s == "a"));
    }

    #[test]
    fn bytes_decode_as_utf8() {
        let rules = normalized(ValueFilter::bytes("\u{2603}".as_bytes()));
        assert!(matches!(&rules[0], Assertion::Literal(s) if s == "\u{2603}"));
    }

    #[test]
    fn bytes_and_decoded_string_normalize_identically() {
        let from_bytes = normalized(ValueFilter::bytes("snow".as_bytes()));
        let from_str = normalized("snow".into());
        assert!(matches!(
            (&from_bytes[0], &from_str[0]),
            (Assertion::Literal(a), Assertion::Literal(b)) if a == b
        ));
    }

    #[test]
    fn invalid_utf8_bytes_fail_the_build() {
        let err = ValueFilter::bytes(vec![0xff, 0xfe])
            .normalize(&crate::warn::StderrSink)
            .unwrap_err();
        assert!(matches!(err, StrainError::InvalidRule { .. }));
    }

    #[test]
    fn booleans_become_presence_rules() {
        assert!(matches!(&normalized(true.into())[0], Assertion::Present(true)));
        assert!(matches!(&normalized(false.into())[0], Assertion::Present(false)));
    }

    #[test]
    fn regex_becomes_a_pattern_rule() {
        let rules = normalized(Regex::new("^a$").unwrap().into());
        assert!(matches!(&rules[0], Assertion::Pattern(re) if re.as_str() == "^a$"));
    }

    #[test]
    fn func_becomes_a_predicate_rule() {
        let rules = normalized(ValueFilter::func(|s| s == "x"));
        assert!(matches!(&rules[0], Assertion::Predicate(_)));
    }

    #[test]
    fn list_flattens_in_order() {
        let rules = normalized(vec!["a", "b"].into());
        assert_eq!(rules.len(), 2);
        assert!(matches!(&rules[0], Assertion::Literal(s) if s == "a"));
        assert!(matches!(&rules[1], Assertion::Literal(s) if s == "b"));
    }

    #[test]
    fn mixed_list_keeps_each_shape() {
        let filter = ValueFilter::Any(vec![
            Regex::new("a").unwrap().into(),
            ValueFilter::func(|_| false),
        ]);
        let rules = normalized(filter);
        assert!(matches!(&rules[0], Assertion::Pattern(_)));
        assert!(matches!(&rules[1], Assertion::Predicate(_)));
    }

    #[test]
    fn nested_list_is_skipped_with_one_warning() {
        let sink = CollectSink::new();
        let filter = ValueFilter::Any(vec![
            "a".into(),
            ValueFilter::Any(vec!["inner".into()]),
            ValueFilter::Any(vec!["inner2".into()]),
            "b".into(),
        ]);

        let rules = filter.normalize(sink.as_ref()).unwrap();
        assert_eq!(rules.len(), 2);
        assert!(matches!(&rules[0], Assertion::Literal(s) if s == "a"));
        assert!(matches!(&rules[1], Assertion::Literal(s) if s == "b"));

        // Two nested lists, one warning.
        assert_eq!(sink.take(), vec![Warning::NestedFilterList]);
    }

    #[test]
    fn stringified_covers_everything_else() {
        let rules = normalized(ValueFilter::stringified(100));
        assert!(matches!(&rules[0], Assertion::Literal(s) if s == "100"));
    }

    #[test]
    fn none_means_must_be_absent() {
        let rules = normalized(Option::<&str>::None.into());
        assert!(matches!(&rules[0], Assertion::Present(false)));

        let rules = normalized(Some("a").into());
        assert!(matches!(&rules[0], Assertion::Literal(s) if s == "a"));
    }
}
