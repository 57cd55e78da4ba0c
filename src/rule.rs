//! Match rules: one positive assertion each.
//!
//! Three rule kinds share the same text-matching primitive and differ only
//! in what their predicate arm receives: a tag-name rule's predicate sees
//! the whole tag view, while attribute and string rules see a candidate
//! string.

use std::fmt;
use std::sync::Arc;

use regex::Regex;

use crate::error::StrainError;
use crate::node::TagLike;

/// A predicate over a whole tag view.
///
/// Called synchronously on the matching thread, left to right within a
/// rule list. A panic inside the predicate propagates to the caller
/// unchanged.
pub type TagPredicate<T> = Arc<dyn Fn(&T) -> bool + Send + Sync>;

/// A predicate over a candidate string.
///
/// Called synchronously on the matching thread. Absent candidates are
/// never passed in: a predicate rule does not match an absent value, and
/// absence is the business of presence rules.
pub type StrPredicate = Arc<dyn Fn(&str) -> bool + Send + Sync>;

/// The single assertion carried by a rule.
///
/// The sum type makes "exactly one assertion per rule" structural. The
/// only way to get it wrong is [`from_parts`](Self::from_parts), which
/// checks.
#[derive(Clone)]
pub(crate) enum Assertion<P> {
    /// The candidate must equal this string exactly.
    Literal(String),
    /// The pattern must find a match anywhere in the candidate.
    Pattern(Regex),
    /// A user predicate decides.
    Predicate(P),
    /// `true` matches any present value, `false` matches only absence.
    Present(bool),
}

impl<P> Assertion<P> {
    pub(crate) fn from_parts(
        literal: Option<String>,
        pattern: Option<Regex>,
        predicate: Option<P>,
        present: Option<bool>,
    ) -> Result<Self, StrainError> {
        match (literal, pattern, predicate, present) {
            (Some(literal), None, None, None) => Ok(Self::Literal(literal)),
            (None, Some(pattern), None, None) => Ok(Self::Pattern(pattern)),
            (None, None, Some(predicate), None) => Ok(Self::Predicate(predicate)),
            (None, None, None, Some(present)) => Ok(Self::Present(present)),
            (None, None, None, None) => Err(StrainError::InvalidRule {
                reason: "one of literal, pattern, predicate or present must be given".to_string(),
            }),
            _ => Err(StrainError::InvalidRule {
                reason: "at most one of literal, pattern, predicate and present may be given"
                    .to_string(),
            }),
        }
    }

    /// Literal, pattern and presence arms over a candidate that is known
    /// to be present. Predicate arms are the rule kinds' business and
    /// never match through this path.
    fn matches_present_text(&self, candidate: &str) -> bool {
        match self {
            Self::Literal(literal) => literal == candidate,
            Self::Pattern(pattern) => pattern.is_match(candidate),
            Self::Present(present) => *present,
            Self::Predicate(_) => false,
        }
    }
}

impl Assertion<StrPredicate> {
    /// The full text-matching primitive; `None` is an absent candidate.
    fn matches(&self, candidate: Option<&str>) -> bool {
        match (self, candidate) {
            (Self::Present(present), _) => *present == candidate.is_some(),
            (Self::Predicate(predicate), Some(candidate)) => predicate(candidate),
            (other, Some(candidate)) => other.matches_present_text(candidate),
            // Literal and pattern rules never match absence.
            (_, None) => false,
        }
    }
}

impl<P> fmt::Debug for Assertion<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(literal) => f.debug_tuple("Literal").field(literal).finish(),
            Self::Pattern(pattern) => f.debug_tuple("Pattern").field(&pattern.as_str()).finish(),
            Self::Predicate(_) => f.write_str("Predicate(..)"),
            Self::Present(present) => f.debug_tuple("Present").field(present).finish(),
        }
    }
}

/// Filters a tag by name, or by an arbitrary condition on the whole tag.
pub struct TagNameRule<T> {
    assertion: Assertion<TagPredicate<T>>,
}

impl<T: TagLike> TagNameRule<T> {
    /// Rule matching a tag whose local name equals `literal` exactly.
    pub fn literal(literal: impl Into<String>) -> Self {
        Self {
            assertion: Assertion::Literal(literal.into()),
        }
    }

    /// Rule matching when `pattern` finds a match in the name.
    pub fn pattern(pattern: Regex) -> Self {
        Self {
            assertion: Assertion::Pattern(pattern),
        }
    }

    /// Rule deciding by a predicate over the whole tag view.
    pub fn predicate(predicate: impl Fn(&T) -> bool + Send + Sync + 'static) -> Self {
        Self {
            assertion: Assertion::Predicate(Arc::new(predicate)),
        }
    }

    /// Presence rule. A tag name is always present, so this matches every
    /// tag when `true` and no tag when `false`.
    pub fn present(present: bool) -> Self {
        Self {
            assertion: Assertion::Present(present),
        }
    }

    /// Assemble a rule from independently-optional parts.
    ///
    /// # Errors
    ///
    /// [`StrainError::InvalidRule`] unless exactly one part is given.
    pub fn from_parts(
        literal: Option<String>,
        pattern: Option<Regex>,
        predicate: Option<TagPredicate<T>>,
        present: Option<bool>,
    ) -> Result<Self, StrainError> {
        Assertion::from_parts(literal, pattern, predicate, present)
            .map(|assertion| Self { assertion })
    }

    pub(crate) fn from_assertion(assertion: Assertion<TagPredicate<T>>) -> Self {
        Self { assertion }
    }

    /// Whether this rule's assertion is a predicate over the tag view.
    ///
    /// Such a rule cannot be decided from a name and an attribute map
    /// alone, which matters for parse-time admission.
    #[must_use]
    pub fn needs_tag(&self) -> bool {
        matches!(self.assertion, Assertion::Predicate(_))
    }

    /// Does this rule accept the tag?
    ///
    /// Literal, pattern and presence arms test the local name; a predicate
    /// arm is applied to the whole tag view.
    pub fn matches_tag(&self, tag: &T) -> bool {
        match &self.assertion {
            Assertion::Predicate(predicate) => predicate(tag),
            other => other.matches_present_text(tag.local_name()),
        }
    }

    /// Match a rendered name, used for the `prefix:name` retry.
    ///
    /// A predicate arm never matches here: it needs a tag view, and the
    /// tag view was already offered through [`matches_tag`](Self::matches_tag).
    pub fn matches_string(&self, name: &str) -> bool {
        match &self.assertion {
            Assertion::Predicate(_) => false,
            other => other.matches_present_text(name),
        }
    }
}

impl<T> fmt::Debug for TagNameRule<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TagNameRule").field(&self.assertion).finish()
    }
}

impl<T> Clone for TagNameRule<T> {
    fn clone(&self) -> Self {
        Self {
            assertion: self.assertion.clone(),
        }
    }
}

/// Filters one attribute's value.
#[derive(Clone)]
pub struct AttrValueRule {
    assertion: Assertion<StrPredicate>,
}

impl AttrValueRule {
    /// Rule matching a value equal to `literal` exactly.
    pub fn literal(literal: impl Into<String>) -> Self {
        Self {
            assertion: Assertion::Literal(literal.into()),
        }
    }

    /// Rule matching when `pattern` finds a match in the value.
    pub fn pattern(pattern: Regex) -> Self {
        Self {
            assertion: Assertion::Pattern(pattern),
        }
    }

    /// Rule deciding by a predicate over the value.
    pub fn predicate(predicate: impl Fn(&str) -> bool + Send + Sync + 'static) -> Self {
        Self {
            assertion: Assertion::Predicate(Arc::new(predicate)),
        }
    }

    /// Presence rule: `true` requires the attribute to be present with any
    /// value, `false` requires it to be absent.
    pub fn present(present: bool) -> Self {
        Self {
            assertion: Assertion::Present(present),
        }
    }

    /// Assemble a rule from independently-optional parts.
    ///
    /// # Errors
    ///
    /// [`StrainError::InvalidRule`] unless exactly one part is given.
    pub fn from_parts(
        literal: Option<String>,
        pattern: Option<Regex>,
        predicate: Option<StrPredicate>,
        present: Option<bool>,
    ) -> Result<Self, StrainError> {
        Assertion::from_parts(literal, pattern, predicate, present)
            .map(|assertion| Self { assertion })
    }

    pub(crate) fn from_assertion(assertion: Assertion<StrPredicate>) -> Self {
        Self { assertion }
    }

    /// Does this rule accept the candidate? `None` is an absent value.
    pub fn matches_string(&self, candidate: Option<&str>) -> bool {
        self.assertion.matches(candidate)
    }
}

impl fmt::Debug for AttrValueRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AttrValueRule").field(&self.assertion).finish()
    }
}

/// Filters a text node or a tag's associated text.
#[derive(Clone)]
pub struct StringRule {
    assertion: Assertion<StrPredicate>,
}

impl StringRule {
    /// Rule matching text equal to `literal` exactly.
    pub fn literal(literal: impl Into<String>) -> Self {
        Self {
            assertion: Assertion::Literal(literal.into()),
        }
    }

    /// Rule matching when `pattern` finds a match in the text.
    pub fn pattern(pattern: Regex) -> Self {
        Self {
            assertion: Assertion::Pattern(pattern),
        }
    }

    /// Rule deciding by a predicate over the text.
    pub fn predicate(predicate: impl Fn(&str) -> bool + Send + Sync + 'static) -> Self {
        Self {
            assertion: Assertion::Predicate(Arc::new(predicate)),
        }
    }

    /// Presence rule over the text content.
    pub fn present(present: bool) -> Self {
        Self {
            assertion: Assertion::Present(present),
        }
    }

    /// Assemble a rule from independently-optional parts.
    ///
    /// # Errors
    ///
    /// [`StrainError::InvalidRule`] unless exactly one part is given.
    pub fn from_parts(
        literal: Option<String>,
        pattern: Option<Regex>,
        predicate: Option<StrPredicate>,
        present: Option<bool>,
    ) -> Result<Self, StrainError> {
        Assertion::from_parts(literal, pattern, predicate, present)
            .map(|assertion| Self { assertion })
    }

    pub(crate) fn from_assertion(assertion: Assertion<StrPredicate>) -> Self {
        Self { assertion }
    }

    /// Does this rule accept the candidate? `None` is an absent value.
    pub fn matches_string(&self, candidate: Option<&str>) -> bool {
        self.assertion.matches(candidate)
    }
}

impl fmt::Debug for StringRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("StringRule").field(&self.assertion).finish()
    }
}
