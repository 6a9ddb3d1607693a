//! Serialization of resolved tokens into a `:root {}` custom-property block.

use crate::resolver::ResolvedToken;

/// Options for [`emit`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmitOptions {
    /// Emit without any whitespace.
    pub minify: bool,
}

impl EmitOptions {
    /// Pretty output.
    pub fn pretty() -> Self {
        Self { minify: false }
    }

    /// Minified output.
    pub fn minified() -> Self {
        Self { minify: true }
    }
}

/// Emit one custom property per token, in input order.
///
/// Returns `None` for an empty input so callers can tell "nothing to emit"
/// apart from an empty rule.
pub fn emit(tokens: &[ResolvedToken], options: EmitOptions) -> Option<String> {
    if tokens.is_empty() {
        return None;
    }

    let declarations = tokens
        .iter()
        .map(|token| declaration(token, options.minify));

    let css = if options.minify {
        format!(":root{{{}}}", declarations.collect::<String>())
    } else {
        let body: Vec<String> = declarations.map(|decl| format!("  {decl}")).collect();
        format!(":root {{\n{}\n}}", body.join("\n"))
    };

    Some(css)
}

fn declaration(token: &ResolvedToken, minify: bool) -> String {
    let name = token.path().to_css_var();
    let value = token.value_css();
    if minify {
        format!("{name}:{value};")
    } else {
        format!("{name}: {value};")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::functions::FunctionName;
    use crate::path::Path;
    use crate::syntax::Span;

    fn token(path: &str, value: &str) -> ResolvedToken {
        ResolvedToken::new(
            FunctionName::Value,
            Path::from_dot_path(path),
            vec![],
            vec![value.to_string()],
            Span::default(),
        )
    }

    #[test]
    fn empty_input_emits_nothing() {
        assert_eq!(emit(&[], EmitOptions::default()), None);
        assert_eq!(emit(&[], EmitOptions::minified()), None);
    }

    #[test]
    fn pretty_output() {
        let css = emit(
            &[token("colors.primary", "#ff0000"), token("size.0.5", "2px")],
            EmitOptions::pretty(),
        )
        .unwrap();

        assert_eq!(
            css,
            ":root {\n  --colors-primary: #ff0000;\n  --size-0\\.5: 2px;\n}"
        );
    }

    #[test]
    fn minified_output() {
        let css = emit(
            &[token("colors.primary", "#ff0000"), token("space.md", "16px")],
            EmitOptions::minified(),
        )
        .unwrap();

        assert_eq!(css, ":root{--colors-primary:#ff0000;--space-md:16px;}");
        assert!(!css.contains('\n'));
        assert!(!css.contains(": "));
    }

    #[test]
    fn token_calls_emit_their_value_not_a_reference() {
        let resolved = ResolvedToken::new(
            FunctionName::Token,
            Path::from_dot_path("colors.primary"),
            vec![],
            vec!["#ff0000".to_string()],
            Span::default(),
        );
        let css = emit(&[resolved], EmitOptions::minified()).unwrap();
        assert_eq!(css, ":root{--colors-primary:#ff0000;}");
    }
}
