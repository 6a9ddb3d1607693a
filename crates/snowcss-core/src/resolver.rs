//! Resolution of extracted calls against a token index.

use crate::config::Config;
use crate::diagnostics::{Diagnostics, WithDiagnostics};
use crate::functions::{FunctionName, SnowFunction, ValueFunction};
use crate::path::Path;
use crate::syntax::Span;
use crate::token::Token;
use crate::values::TokenValue;

const CONTEXT: &str = "resolver";

/// A call matched to its token, with the CSS it resolves to.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedToken {
    name: FunctionName,
    path: Path,
    values: Vec<TokenValue>,
    resolved: Vec<String>,
    location: Span,
}

impl ResolvedToken {
    /// Create a resolved token.
    pub fn new(
        name: FunctionName,
        path: Path,
        values: Vec<TokenValue>,
        resolved: Vec<String>,
        location: Span,
    ) -> Self {
        Self {
            name,
            path,
            values,
            resolved,
            location,
        }
    }

    /// Function that referenced the token.
    pub fn name(&self) -> FunctionName {
        self.name
    }

    /// Full token path, including the prefix.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The token's parsed values, before any modifier.
    pub fn values(&self) -> &[TokenValue] {
        &self.values
    }

    /// Final CSS values after modifier application.
    pub fn resolved(&self) -> &[String] {
        &self.resolved
    }

    /// Span of the call in the source.
    pub fn location(&self) -> Span {
        self.location
    }

    /// The resolved values joined by spaces.
    pub fn value_css(&self) -> String {
        self.resolved.join(" ")
    }

    /// The replacement for the call: `var(--path)` for `--token()`, the
    /// resolved value for `--value()`.
    pub fn to_css(&self) -> String {
        match self.name {
            FunctionName::Token => self.path.to_css_var_ref(),
            FunctionName::Value => self.value_css(),
        }
    }
}

/// Resolve calls against a config.
///
/// Calls whose token does not exist are dropped with a warning.
pub fn resolve(
    config: &Config,
    functions: &[SnowFunction],
) -> WithDiagnostics<Vec<ResolvedToken>> {
    let mut diagnostics = Diagnostics::new();
    let mut resolved = Vec::with_capacity(functions.len());

    for function in functions {
        match config.get_by_path(function.path()) {
            Some(token) => resolved.push(resolve_token(config, token, function, &mut diagnostics)),
            None => {
                diagnostics.warning(format!("token '{}' not found", function.path()), CONTEXT);
            }
        }
    }

    (resolved, diagnostics)
}

/// Resolve every token of the config as an unmodified `--value()` call with
/// an empty span, in index order.
pub fn resolve_all(config: &Config) -> WithDiagnostics<Vec<ResolvedToken>> {
    let mut diagnostics = Diagnostics::new();

    let resolved = config
        .tokens()
        .map(|token| {
            let function = SnowFunction::from(ValueFunction::new(
                token.path().clone(),
                None,
                Span::default(),
            ));
            resolve_token(config, token, &function, &mut diagnostics)
        })
        .collect();

    (resolved, diagnostics)
}

fn resolve_token(
    config: &Config,
    token: &Token,
    function: &SnowFunction,
    diagnostics: &mut Diagnostics,
) -> ResolvedToken {
    ResolvedToken::new(
        function.name(),
        token.path().clone(),
        token.values().to_vec(),
        resolve_values(config, token, function, diagnostics),
        function.location(),
    )
}

fn resolve_values(
    config: &Config,
    token: &Token,
    function: &SnowFunction,
    diagnostics: &mut Diagnostics,
) -> Vec<String> {
    let Some(modifier) = function.modifier() else {
        return vec![token.raw().to_string()];
    };

    let [value] = token.values() else {
        if token.values().is_empty() {
            diagnostics.warning(
                format!("cannot apply modifier to empty token '{}'", token.path()),
                CONTEXT,
            );
            return vec![token.raw().to_string()];
        }
        diagnostics.warning(
            format!("cannot apply modifier to multi-value token '{}'", token.path()),
            CONTEXT,
        );
        return vec![token.raw().to_string()];
    };

    let resolved = value
        .apply(modifier, &config.modify_context())
        .unwrap_or_else(|| token.raw().to_string());
    vec![resolved]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{TokenTable, UserConfig};
    use crate::functions::TokenFunction;
    use crate::values::{Modifier, Unit};

    fn config() -> Config {
        let tokens = TokenTable::new()
            .with("colors", TokenTable::new().with("primary", "#ff0000"))
            .with(
                "space",
                TokenTable::new()
                    .with("md", "16px")
                    .with("inset", "1px 2px 3px 4px")
                    .with("none", ""),
            );
        Config::new(UserConfig::new(tokens)).unwrap()
    }

    fn value(path: &str, modifier: Option<Modifier>) -> SnowFunction {
        ValueFunction::new(Path::from_dot_path(path), modifier, Span::new(3, 9)).into()
    }

    #[test]
    fn token_call_resolves_to_var_reference() {
        let function = TokenFunction::new(Path::from_dot_path("colors.primary"), Span::new(0, 1));
        let (resolved, diagnostics) = resolve(&config(), &[SnowFunction::from(function)]);

        assert!(diagnostics.is_empty());
        assert_eq!(resolved[0].to_css(), "var(--colors-primary)");
        assert_eq!(resolved[0].resolved(), ["#ff0000"]);
    }

    #[test]
    fn value_call_resolves_to_raw_value() {
        let (resolved, diagnostics) = resolve(&config(), &[value("colors.primary", None)]);
        assert!(diagnostics.is_empty());
        assert_eq!(resolved[0].to_css(), "#ff0000");
        assert_eq!(resolved[0].location(), Span::new(3, 9));
    }

    #[test]
    fn modifier_is_applied_to_single_value() {
        let (resolved, _) = resolve(
            &config(),
            &[
                value("space.md", Some(Modifier::unit(Unit::Rem))),
                value("space.md", Some(Modifier::Negate)),
                value("colors.primary", Some(Modifier::alpha(0.5))),
            ],
        );
        let css: Vec<String> = resolved.iter().map(ResolvedToken::to_css).collect();
        assert_eq!(css, ["1rem", "-16px", "#ff000080"]);
    }

    #[test]
    fn inapplicable_modifier_falls_back_to_raw() {
        let (resolved, diagnostics) =
            resolve(&config(), &[value("colors.primary", Some(Modifier::Negate))]);
        assert_eq!(resolved[0].to_css(), "#ff0000");
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn modifier_on_multi_value_token_warns() {
        let (resolved, diagnostics) =
            resolve(&config(), &[value("space.inset", Some(Modifier::unit(Unit::Rem)))]);

        assert_eq!(resolved[0].to_css(), "1px 2px 3px 4px");
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(
            diagnostics.all()[0].message(),
            "cannot apply modifier to multi-value token 'space.inset'"
        );
        assert!(!diagnostics.has_errors());
    }

    #[test]
    fn modifier_on_empty_token_warns() {
        let (resolved, diagnostics) =
            resolve(&config(), &[value("space.none", Some(Modifier::Negate))]);

        assert_eq!(resolved[0].to_css(), "");
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(
            diagnostics.all()[0].message(),
            "cannot apply modifier to empty token 'space.none'"
        );
    }

    #[test]
    fn missing_token_is_dropped_with_warning() {
        let (resolved, diagnostics) = resolve(&config(), &[value("colors.missing", None)]);

        assert!(resolved.is_empty());
        assert_eq!(diagnostics.all()[0].message(), "token 'colors.missing' not found");
        assert_eq!(diagnostics.all()[0].context(), Some("resolver"));
        assert!(!diagnostics.has_errors());
    }

    #[test]
    fn resolve_all_covers_every_token() {
        let (resolved, diagnostics) = resolve_all(&config());
        assert!(diagnostics.is_empty());
        assert_eq!(resolved.len(), 4);
        assert!(resolved.iter().all(|r| r.name() == FunctionName::Value));
        assert!(resolved.iter().all(|r| r.location() == Span::new(0, 0)));
        assert_eq!(resolved[2].value_css(), "1px 2px 3px 4px");
    }
}
