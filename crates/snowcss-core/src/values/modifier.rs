//! Modifiers accepted by `--value()`.

use std::fmt;
use std::str::FromStr;

use crate::utils::format_number;

/// Target unit of a unit conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Unit {
    /// Absolute pixels.
    Px,
    /// Root-relative ems.
    Rem,
}

impl Unit {
    /// CSS spelling of the unit.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Px => "px",
            Self::Rem => "rem",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Unit {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "px" => Ok(Self::Px),
            "rem" => Ok(Self::Rem),
            _ => Err(()),
        }
    }
}

/// Modifier kind discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModifierKind {
    Unit,
    Alpha,
    Negate,
}

/// A transformation applied to a single-valued token at resolution time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Modifier {
    /// `to px` / `to rem`
    Unit { unit: Unit },
    /// `/ 50%`, stored as a fraction in `0..=1`.
    Alpha { value: f64 },
    /// `negate`
    Negate,
}

impl Modifier {
    /// Unit conversion modifier.
    pub fn unit(unit: Unit) -> Self {
        Self::Unit { unit }
    }

    /// Alpha override modifier.
    pub fn alpha(value: f64) -> Self {
        Self::Alpha { value }
    }

    /// The modifier's kind.
    pub fn kind(&self) -> ModifierKind {
        match self {
            Self::Unit { .. } => ModifierKind::Unit,
            Self::Alpha { .. } => ModifierKind::Alpha,
            Self::Negate => ModifierKind::Negate,
        }
    }

    /// Stable key for memoization: `unit:px`, `alpha:0.5`, `negate`.
    pub fn cache_key(&self) -> String {
        match self {
            Self::Unit { unit } => format!("unit:{unit}"),
            Self::Alpha { value } => format!("alpha:{}", format_number(*value)),
            Self::Negate => "negate".to_string(),
        }
    }
}

/// Context needed to apply modifiers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModifyContext {
    /// Root font size in pixels for px/rem conversion.
    pub root_font_size: f64,
}

impl Default for ModifyContext {
    fn default() -> Self {
        Self {
            root_font_size: 16.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_cache_keys() {
        assert_eq!(Modifier::unit(Unit::Px).cache_key(), "unit:px");
        assert_eq!(Modifier::unit(Unit::Rem).cache_key(), "unit:rem");
    }

    #[test]
    fn alpha_cache_keys() {
        assert_eq!(Modifier::alpha(0.5).cache_key(), "alpha:0.5");
        assert_eq!(Modifier::alpha(1.0).cache_key(), "alpha:1");
        assert_eq!(Modifier::alpha(0.0).cache_key(), "alpha:0");
    }

    #[test]
    fn negate_cache_key() {
        assert_eq!(Modifier::Negate.cache_key(), "negate");
        assert_eq!(Modifier::Negate.kind(), ModifierKind::Negate);
    }

    #[test]
    fn unit_from_str() {
        assert_eq!("px".parse::<Unit>(), Ok(Unit::Px));
        assert_eq!("rem".parse::<Unit>(), Ok(Unit::Rem));
        assert!("em".parse::<Unit>().is_err());
    }
}
