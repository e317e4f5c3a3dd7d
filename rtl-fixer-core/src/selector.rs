//! CSS selectors for the in-memory document.
//!
//! Parsing and matching come from the `selectors` crate; this module only
//! supplies the string-backed [`SelectorImpl`] and a small list wrapper.
use std::fmt;
use std::hash::Hasher;

use selectors::SelectorImpl;
use selectors::context::{MatchingContext, SelectorCaches};
use selectors::parser::{ParseRelative, Selector, SelectorParseErrorKind};
use thiserror::Error;
use twox_hash::XxHash64;

#[derive(Debug, Error)]
#[error("invalid selector `{selector}`: {reason}")]
pub struct SelectorError {
    pub selector: String,
    pub reason: String,
}

/// Selector implementation over plain strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixerSelectors;

/// Identifier, attribute value, local name and namespace in one type.
#[derive(Debug, Clone, PartialEq, Eq, Default, Hash)]
pub struct CssIdent(pub String);

impl precomputed_hash::PrecomputedHash for CssIdent {
    #[allow(clippy::cast_possible_truncation)]
    fn precomputed_hash(&self) -> u32 {
        let mut hasher = XxHash64::with_seed(0);
        hasher.write(self.0.as_bytes());
        hasher.finish() as u32
    }
}

impl cssparser::ToCss for CssIdent {
    fn to_css<W: fmt::Write>(&self, dest: &mut W) -> fmt::Result {
        dest.write_str(&self.0)
    }
}

impl AsRef<str> for CssIdent {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<String> for CssIdent {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl<'a> From<&'a str> for CssIdent {
    fn from(s: &'a str) -> Self {
        Self(s.to_string())
    }
}

/// No pseudo-elements are recognised.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PseudoElement {}

impl cssparser::ToCss for PseudoElement {
    fn to_css<W: fmt::Write>(&self, _dest: &mut W) -> fmt::Result {
        match *self {}
    }
}

impl selectors::parser::PseudoElement for PseudoElement {
    type Impl = FixerSelectors;

    fn accepts_state_pseudo_classes(&self) -> bool {
        match *self {}
    }

    fn valid_after_slotted(&self) -> bool {
        match *self {}
    }
}

/// User-action pseudo-classes never apply to a static document.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PseudoClass {}

impl selectors::parser::NonTSPseudoClass for PseudoClass {
    type Impl = FixerSelectors;

    fn is_active_or_hover(&self) -> bool {
        match *self {}
    }

    fn is_user_action_state(&self) -> bool {
        match *self {}
    }
}

impl cssparser::ToCss for PseudoClass {
    fn to_css<W: fmt::Write>(&self, _dest: &mut W) -> fmt::Result {
        match *self {}
    }
}

impl<'i> selectors::parser::Parser<'i> for FixerSelectors {
    type Impl = FixerSelectors;
    type Error = SelectorParseErrorKind<'i>;
}

impl SelectorImpl for FixerSelectors {
    type ExtraMatchingData<'a> = ();
    type AttrValue = CssIdent;
    type Identifier = CssIdent;
    type LocalName = CssIdent;
    type NamespaceUrl = CssIdent;
    type NamespacePrefix = CssIdent;
    type BorrowedLocalName = CssIdent;
    type BorrowedNamespaceUrl = CssIdent;
    type NonTSPseudoClass = PseudoClass;
    type PseudoElement = PseudoElement;
}

/// A parsed comma-separated selector list.
#[derive(Debug, Clone)]
pub struct SelectorList {
    source: String,
    selectors: Vec<Selector<FixerSelectors>>,
}

impl SelectorList {
    /// # Errors
    ///
    /// Returns an error if `source` is not a valid selector list.
    pub fn parse(source: &str) -> Result<Self, SelectorError> {
        let mut input = cssparser::ParserInput::new(source);
        let mut parser = cssparser::Parser::new(&mut input);
        let list = selectors::parser::SelectorList::parse(
            &FixerSelectors,
            &mut parser,
            ParseRelative::No,
        )
        .map_err(|err| SelectorError {
            selector: source.to_string(),
            reason: format!(
                "{:?} at line {}, column {}",
                err.kind, err.location.line, err.location.column
            ),
        })?;
        Ok(Self {
            source: source.to_string(),
            selectors: list.slice().to_vec(),
        })
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.selectors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.selectors.is_empty()
    }

    /// True if any selector in the list matches `element`.
    pub fn matches<E>(&self, element: &E) -> bool
    where
        E: selectors::Element<Impl = FixerSelectors>,
    {
        let mut caches = SelectorCaches::default();
        let mut context = MatchingContext::new(
            selectors::matching::MatchingMode::Normal,
            None,
            &mut caches,
            selectors::context::QuirksMode::NoQuirks,
            selectors::matching::NeedsSelectorFlags::No,
            selectors::matching::MatchingForInvalidation::No,
        );
        self.selectors.iter().any(|selector| {
            selectors::matching::matches_selector(selector, 0, None, element, &mut context)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_comma_lists() {
        let list = SelectorList::parse(".postArticle-content, section.eh, p, h1").unwrap();
        assert_eq!(list.len(), 4);
        assert_eq!(list.as_str(), ".postArticle-content, section.eh, p, h1");
    }

    #[test]
    fn accepts_combinators_and_attribute_selectors() {
        for source in [
            ".postArticle-content p",
            "article > header .avatar",
            r#"[aria-label="responses"]"#,
            "li:first-child",
        ] {
            assert!(SelectorList::parse(source).is_ok(), "{source}");
        }
    }

    #[test]
    fn rejects_invalid_selectors() {
        for source in ["", "p >", "!responses", "p:hover"] {
            let err = SelectorList::parse(source).unwrap_err();
            assert_eq!(err.selector, source);
        }
    }

    #[test]
    fn identifiers_hash_consistently() {
        use precomputed_hash::PrecomputedHash;
        let a = CssIdent::from("avatar");
        assert_eq!(a.precomputed_hash(), CssIdent::from("avatar".to_string()).precomputed_hash());
        assert_ne!(a.precomputed_hash(), CssIdent::from("followState").precomputed_hash());
    }
}
