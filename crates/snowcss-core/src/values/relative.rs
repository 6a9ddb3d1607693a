use super::{Modifier, ModifyContext, TokenValue, Unit, ValueInput};
use crate::syntax::NodeKind;
use crate::utils::format_number;

/// Root-relative units recognized as lengths.
pub const ROOT_RELATIVE_UNITS: &[&str] = &["rcap", "rch", "rem", "rex", "ric", "rlh"];

/// A length in a root-relative unit.
#[derive(Debug, Clone, PartialEq)]
pub struct RelativeValue {
    raw: String,
    value: f64,
    unit: String,
}

impl RelativeValue {
    /// Create a relative value. The unit is stored lowercase.
    pub fn new(raw: impl Into<String>, value: f64, unit: &str) -> Self {
        Self {
            raw: raw.into(),
            value,
            unit: unit.to_ascii_lowercase(),
        }
    }

    /// Source text.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Magnitude.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// The unit, e.g. `rem`.
    pub fn unit(&self) -> &str {
        &self.unit
    }

    /// Unit conversion (only `rem` converts to `px`) and negation.
    pub fn apply(&self, modifier: &Modifier, ctx: &ModifyContext) -> Option<String> {
        match modifier {
            Modifier::Unit { unit } if unit.as_str() == self.unit => Some(self.raw.clone()),
            Modifier::Unit { unit: Unit::Px } if self.unit == "rem" => Some(format!(
                "{}px",
                format_number(self.value * ctx.root_font_size)
            )),
            Modifier::Negate => Some(format!("{}{}", format_number(-self.value), self.unit)),
            _ => None,
        }
    }
}

pub(crate) fn parse(input: &ValueInput<'_>) -> Option<TokenValue> {
    match &input.node.kind {
        NodeKind::Dimension { value, unit }
            if ROOT_RELATIVE_UNITS
                .iter()
                .any(|u| u.eq_ignore_ascii_case(unit)) =>
        {
            Some(TokenValue::Relative(RelativeValue::new(input.input, *value, unit)))
        }
        _ => None,
    }
}
