use super::{Modifier, ModifyContext, TokenValue, Unit, ValueInput};
use crate::syntax::NodeKind;
use crate::utils::format_number;

/// A length in `px`.
#[derive(Debug, Clone, PartialEq)]
pub struct AbsoluteValue {
    raw: String,
    value: f64,
}

impl AbsoluteValue {
    /// Create a pixel value.
    pub fn new(raw: impl Into<String>, value: f64) -> Self {
        Self {
            raw: raw.into(),
            value,
        }
    }

    /// Source text.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Magnitude in pixels.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Unit conversion and negation. Alpha does not apply.
    pub fn apply(&self, modifier: &Modifier, ctx: &ModifyContext) -> Option<String> {
        match modifier {
            Modifier::Unit { unit: Unit::Px } => Some(self.raw.clone()),
            Modifier::Unit { unit: Unit::Rem } => Some(format!(
                "{}rem",
                format_number(self.value / ctx.root_font_size)
            )),
            Modifier::Negate => Some(format!("{}px", format_number(-self.value))),
            Modifier::Alpha { .. } => None,
        }
    }
}

pub(crate) fn parse(input: &ValueInput<'_>) -> Option<TokenValue> {
    match &input.node.kind {
        NodeKind::Dimension { value, unit } if unit.eq_ignore_ascii_case("px") => {
            Some(TokenValue::Absolute(AbsoluteValue::new(input.input, *value)))
        }
        _ => None,
    }
}
