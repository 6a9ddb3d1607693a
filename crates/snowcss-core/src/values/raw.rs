use super::{TokenValue, ValueInput};

/// A value component with no richer representation.
#[derive(Debug, Clone, PartialEq)]
pub struct RawValue {
    raw: String,
}

impl RawValue {
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }
}

/// Terminal fallback of the parser chain.
pub(crate) fn parse(input: &ValueInput<'_>) -> TokenValue {
    TokenValue::Raw(RawValue::new(input.input))
}
