//! Compilation context: one loaded config plus the tokens a build has used.

use std::sync::Arc;

use indexmap::IndexMap;
use snowcss_core::config::{Config, InjectType};
use snowcss_core::diagnostics::{Diagnostics, WithDiagnostics};
use snowcss_core::emitter::{EmitOptions, emit};
use snowcss_core::extract::{SnowAtRule, extract, extract_at_rules};
use snowcss_core::functions::FunctionName;
use snowcss_core::resolver::{ResolvedToken, resolve, resolve_all};
use snowcss_core::rewrite;

use crate::Result;
use crate::loader::{LoadConfigOptions, load_config};

/// Ties extraction, resolution, rewriting and emission to one config.
///
/// `--token()` references are remembered across [`collect`](Self::collect)
/// calls so [`emit_css`](Self::emit_css) can emit only the custom properties
/// a build actually referenced.
#[derive(Debug, Clone)]
pub struct Context {
    config: Arc<Config>,
    collected: IndexMap<String, ResolvedToken>,
}

impl Context {
    /// Create a context for a loaded config.
    pub fn new(config: impl Into<Arc<Config>>) -> Self {
        Self {
            config: config.into(),
            collected: IndexMap::new(),
        }
    }

    /// Load a config and create a context for it.
    pub fn load(options: &LoadConfigOptions) -> Result<Self> {
        Ok(Self::new(load_config(options)?))
    }

    /// The config.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Extract and resolve the calls in `input`.
    ///
    /// Diagnostics are ordered extraction first, then resolution.
    pub fn collect(&mut self, input: &str) -> WithDiagnostics<Vec<ResolvedToken>> {
        let (functions, mut diagnostics) = extract(input);
        let (resolved, resolve_diagnostics) = resolve(&self.config, &functions);
        diagnostics.merge(resolve_diagnostics);

        for token in &resolved {
            if token.name() == FunctionName::Token {
                self.collected
                    .insert(token.path().to_dot_path(), token.clone());
            }
        }

        (resolved, diagnostics)
    }

    /// Find the `@snowcss` at-rules in `input`.
    pub fn collect_at_rules(&self, input: &str) -> WithDiagnostics<Vec<SnowAtRule>> {
        extract_at_rules(input)
    }

    /// Replace resolved calls in `input`.
    pub fn replace(&self, input: &str, resolved: &[ResolvedToken]) -> String {
        rewrite::replace(input, resolved)
    }

    /// Replace an at-rule in `input`.
    pub fn replace_at_rule(&self, input: &str, at_rule: &SnowAtRule, replacement: &str) -> String {
        rewrite::replace_at_rule(input, at_rule, replacement)
    }

    /// Emit the tokens referenced by `--token()` so far.
    pub fn emit_css(&self, options: EmitOptions) -> Option<String> {
        let tokens: Vec<ResolvedToken> = self.collected.values().cloned().collect();
        emit(&tokens, options)
    }

    /// Emit every token of the config.
    pub fn emit_all_css(&self, options: EmitOptions) -> WithDiagnostics<Option<String>> {
        let (resolved, diagnostics) = resolve_all(&self.config);
        (emit(&resolved, options), diagnostics)
    }

    /// Tokens referenced by `--token()` so far, in first-seen order.
    pub fn collected(&self) -> impl Iterator<Item = &ResolvedToken> {
        self.collected.values()
    }

    /// Forget the collected tokens.
    pub fn clear(&mut self) {
        self.collected.clear();
    }

    /// Compile one stylesheet.
    ///
    /// Returns no code when any error diagnostic was produced. Otherwise every
    /// call is rewritten and, for `inject = "at-rule"`, the first `@snowcss`
    /// at-rule is replaced with the whole token table.
    pub fn transform(&mut self, input: &str) -> WithDiagnostics<Option<String>> {
        let (resolved, mut diagnostics) = self.collect(input);

        if diagnostics.has_errors() {
            tracing::debug!("Skipping transform: {} diagnostics", diagnostics.len());
            return (None, diagnostics);
        }

        let mut output = self.replace(input, &resolved);

        if self.config.inject() == InjectType::AtRule {
            output = self.inject_at_rule(output, &mut diagnostics);
        }

        (Some(output), diagnostics)
    }

    fn inject_at_rule(&self, input: String, diagnostics: &mut Diagnostics) -> String {
        let (at_rules, at_rule_diagnostics) = self.collect_at_rules(&input);
        diagnostics.merge(at_rule_diagnostics);

        let Some(first) = at_rules.first() else {
            return input;
        };

        if at_rules.len() > 1 {
            diagnostics.warning(
                format!(
                    "found {} '@snowcss' at-rules, only the first one will be used",
                    at_rules.len()
                ),
                "transform",
            );
        }

        let (css, emit_diagnostics) = self.emit_all_css(EmitOptions::pretty());
        diagnostics.merge(emit_diagnostics);
        let css = css.unwrap_or_default();
        self.replace_at_rule(&input, first, &css)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use snowcss_core::config::{TokenTable, UserConfig};

    fn context(inject: InjectType) -> Context {
        let tokens = TokenTable::new()
            .with(
                "colors",
                TokenTable::new().with("primary", "#ff0000").with("muted", "#999"),
            )
            .with("space", TokenTable::new().with("md", "16px"));
        Context::new(Config::new(UserConfig::new(tokens).with_inject(inject)).unwrap())
    }

    #[test]
    fn collect_remembers_token_references_only() {
        let mut ctx = context(InjectType::Asset);
        let (resolved, diagnostics) = ctx.collect(
            ".a { color: --token(\"colors.primary\"); margin: --value(\"space.md\"); }",
        );

        assert_eq!(resolved.len(), 2);
        assert!(diagnostics.is_empty());

        let collected: Vec<String> = ctx.collected().map(|t| t.path().to_dot_path()).collect();
        assert_eq!(collected, ["colors.primary"]);
    }

    #[test]
    fn emit_css_uses_collected_tokens() {
        let mut ctx = context(InjectType::Asset);
        assert_eq!(ctx.emit_css(EmitOptions::minified()), None);

        ctx.collect(".a { color: --token(\"colors.primary\"); }");
        ctx.collect(".b { color: --token(\"colors.primary\"); }");
        assert_eq!(
            ctx.emit_css(EmitOptions::minified()).as_deref(),
            Some(":root{--colors-primary:#ff0000;}")
        );

        ctx.clear();
        assert_eq!(ctx.emit_css(EmitOptions::minified()), None);
    }

    #[test]
    fn emit_all_css_covers_the_table() {
        let ctx = context(InjectType::Asset);
        let (css, diagnostics) = ctx.emit_all_css(EmitOptions::minified());
        assert!(diagnostics.is_empty());
        assert_eq!(
            css.as_deref(),
            Some(":root{--colors-primary:#ff0000;--colors-muted:#999;--space-md:16px;}")
        );
    }

    #[test]
    fn transform_rewrites_calls() {
        let mut ctx = context(InjectType::Asset);
        let (code, diagnostics) = ctx.transform(".a { padding: --value(\"space.md\" to rem); }");

        assert!(diagnostics.is_empty());
        assert_eq!(code.as_deref(), Some(".a { padding: 1rem; }"));
    }

    #[test]
    fn transform_stops_on_errors() {
        let mut ctx = context(InjectType::Asset);
        let (code, diagnostics) = ctx.transform(".a { color: --token(colors); }");

        assert!(code.is_none());
        assert!(diagnostics.has_errors());
    }

    #[test]
    fn transform_keeps_going_on_warnings() {
        let mut ctx = context(InjectType::Asset);
        let (code, diagnostics) = ctx.transform(".a { color: --value(\"colors.nope\"); }");

        assert_eq!(code.as_deref(), Some(".a { color: --value(\"colors.nope\"); }"));
        assert_eq!(diagnostics.len(), 1);
    }

    #[test]
    fn transform_injects_at_rule() {
        let mut ctx = context(InjectType::AtRule);
        let (code, diagnostics) =
            ctx.transform("@snowcss;\n.a { color: --token(\"colors.primary\"); }\n@snowcss;");

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics.all()[0].context(), Some("transform"));
        assert_eq!(
            code.as_deref(),
            Some(
                ":root {\n  --colors-primary: #ff0000;\n  --colors-muted: #999;\n  --space-md: 16px;\n}\n\
                 .a { color: var(--colors-primary); }\n@snowcss;"
            )
        );
    }

    #[test]
    fn at_rule_is_left_alone_for_other_inject_types() {
        let mut ctx = context(InjectType::Inline);
        let (code, _) = ctx.transform("@snowcss;");
        assert_eq!(code.as_deref(), Some("@snowcss;"));
    }
}
