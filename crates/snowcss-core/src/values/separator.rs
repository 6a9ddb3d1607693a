use super::{TokenValue, ValueInput};
use crate::syntax::NodeKind;

/// A comma separating value lists, e.g. in `box-shadow` or `font-family`.
#[derive(Debug, Clone, PartialEq)]
pub struct SeparatorValue {
    raw: String,
}

impl SeparatorValue {
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }
}

pub(crate) fn parse(input: &ValueInput<'_>) -> Option<TokenValue> {
    match &input.node.kind {
        NodeKind::Operator(op) if op == "," => {
            Some(TokenValue::Separator(SeparatorValue::new(op.as_str())))
        }
        _ => None,
    }
}
