//! Typed token values.
//!
//! A token's raw CSS value is split into syntactic components, and each
//! component is run through an ordered chain of parsers. The first parser that
//! recognizes the component wins; [`RawValue`] is the terminal fallback and
//! never declines.

mod absolute;
mod color;
mod modifier;
mod raw;
mod relative;
mod separator;

pub use absolute::AbsoluteValue;
pub use color::{Color, ColorValue, RgbaColor};
pub use modifier::{Modifier, ModifierKind, ModifyContext, Unit};
pub use raw::RawValue;
pub use relative::{ROOT_RELATIVE_UNITS, RelativeValue};
pub use separator::SeparatorValue;

use crate::syntax::{CssSyntax, Node, SyntaxProvider};

/// One parsed component of a token value.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenValue {
    /// Hex literal, color function or named color.
    Color(ColorValue),
    /// Pixel length.
    Absolute(AbsoluteValue),
    /// Root-relative length such as `rem`.
    Relative(RelativeValue),
    /// Comma between value lists.
    Separator(SeparatorValue),
    /// Anything else.
    Raw(RawValue),
}

impl TokenValue {
    /// Source text of the component.
    pub fn raw(&self) -> &str {
        match self {
            Self::Color(value) => value.raw(),
            Self::Absolute(value) => value.raw(),
            Self::Relative(value) => value.raw(),
            Self::Separator(value) => value.raw(),
            Self::Raw(value) => value.raw(),
        }
    }

    /// Apply a modifier, or `None` when it does not apply to this kind of value.
    pub fn apply(&self, modifier: &Modifier, ctx: &ModifyContext) -> Option<String> {
        match self {
            Self::Color(value) => value.apply(modifier, ctx),
            Self::Absolute(value) => value.apply(modifier, ctx),
            Self::Relative(value) => value.apply(modifier, ctx),
            Self::Separator(_) | Self::Raw(_) => None,
        }
    }

    /// Whether this is a color.
    pub fn is_color(&self) -> bool {
        matches!(self, Self::Color(_))
    }

    /// The color, if this is one.
    pub fn as_color(&self) -> Option<&ColorValue> {
        match self {
            Self::Color(value) => Some(value),
            _ => None,
        }
    }
}

/// What a value parser looks at: the component's source text and its node.
#[derive(Debug, Clone, Copy)]
pub struct ValueInput<'a> {
    pub input: &'a str,
    pub node: &'a Node,
}

/// A candidate parser in the chain. Returns `None` to decline.
pub type ValueParser = fn(&ValueInput<'_>) -> Option<TokenValue>;

/// Candidate parsers, most specific first. The raw fallback runs after these.
const VALUE_PARSERS: &[ValueParser] = &[
    color::parse,
    absolute::parse,
    relative::parse,
    separator::parse,
];

/// Parse one component through the chain.
pub fn parse_value(input: &ValueInput<'_>) -> TokenValue {
    VALUE_PARSERS
        .iter()
        .find_map(|parser| parser(input))
        .unwrap_or_else(|| raw::parse(input))
}

/// Split a raw CSS value into components and parse each one.
///
/// ```
/// use snowcss_core::values::{parse_values, TokenValue};
///
/// let values = parse_values("1px 2px, #fff");
/// assert_eq!(values.len(), 4);
/// assert!(matches!(values[2], TokenValue::Separator(_)));
/// ```
pub fn parse_values(raw: &str) -> Vec<TokenValue> {
    parse_values_with(&CssSyntax::new(), raw)
}

/// [`parse_values`] with an explicit syntax provider.
pub fn parse_values_with(syntax: &dyn SyntaxProvider, raw: &str) -> Vec<TokenValue> {
    syntax
        .parse_value(raw)
        .iter()
        .map(|node| {
            let input = node.text(raw).unwrap_or(raw);
            parse_value(&ValueInput { input, node })
        })
        .collect()
}
