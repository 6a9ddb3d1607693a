//! Extraction of reserved function calls and `@snowcss` at-rules.

use crate::diagnostics::{Diagnostics, WithDiagnostics};
use crate::functions::{FUNCTION_NAMES, FunctionName, SnowFunction, parse_function};
use crate::syntax::{CssSyntax, Node, NodeKind, Span, SyntaxProvider, walk};

/// Name of the at-rule that marks where to inject the token stylesheet.
pub const SNOW_AT_RULE: &str = "snowcss";

/// Find every `--token()` and `--value()` call in a stylesheet.
///
/// Calls inside custom-property values are found too, with spans relative to
/// `input`.
///
/// ```
/// use snowcss_core::extract::extract;
///
/// let (calls, diagnostics) = extract(".a { margin: --value(\"space.md\" negate); }");
/// assert_eq!(calls.len(), 1);
/// assert!(diagnostics.is_empty());
/// ```
pub fn extract(input: &str) -> WithDiagnostics<Vec<SnowFunction>> {
    extract_with(&CssSyntax::new(), input)
}

/// [`extract`] with an explicit syntax provider.
pub fn extract_with(
    syntax: &dyn SyntaxProvider,
    input: &str,
) -> WithDiagnostics<Vec<SnowFunction>> {
    let nodes = syntax.parse_stylesheet(input);
    let mut functions = vec![];
    let mut diagnostics = Diagnostics::new();

    walk(&nodes, &mut |node| match &node.kind {
        NodeKind::Function { .. } => {
            functions.extend(parse_call(node, Some(0), &mut diagnostics));
        }
        NodeKind::Raw(value) if FUNCTION_NAMES.iter().any(|name| value.contains(name)) => {
            functions.extend(extract_from_raw(syntax, node, value, &mut diagnostics));
        }
        _ => {}
    });

    tracing::debug!(
        "Extracted {} token function calls ({} diagnostics)",
        functions.len(),
        diagnostics.len()
    );

    (functions, diagnostics)
}

/// Re-parse a custom-property value and extract the calls inside it.
fn extract_from_raw(
    syntax: &dyn SyntaxProvider,
    raw: &Node,
    value: &str,
    diagnostics: &mut Diagnostics,
) -> Vec<SnowFunction> {
    let base = raw.span.map(|span| span.start);
    let nodes = syntax.parse_value(value);
    let mut functions = vec![];

    walk(&nodes, &mut |node| {
        functions.extend(parse_call(node, base, diagnostics));
    });

    functions
}

/// Parse a node if it is a reserved call. `base` shifts the node's span; a
/// missing base or span is reported as an error.
fn parse_call(
    node: &Node,
    base: Option<usize>,
    diagnostics: &mut Diagnostics,
) -> Option<SnowFunction> {
    let NodeKind::Function { name, children } = &node.kind else {
        return None;
    };
    let function_name = FunctionName::from_name(name)?;

    let Some((span, base)) = node.span.zip(base) else {
        diagnostics.error(
            format!("missing location for function node '{name}'"),
            "extract:parse",
        );
        return None;
    };

    parse_function(function_name, children, span.offset(base), diagnostics)
}

/// An `@snowcss` at-rule.
#[derive(Debug, Clone, PartialEq)]
pub struct SnowAtRule {
    /// Span of the whole rule, including its `;` or block.
    pub location: Span,
    /// Prelude text between the name and the `;` or `{`, if any.
    pub prelude: Option<String>,
    /// Block text including braces, if the rule has one.
    pub block: Option<String>,
}

/// Find every `@snowcss` at-rule in a stylesheet.
pub fn extract_at_rules(input: &str) -> WithDiagnostics<Vec<SnowAtRule>> {
    extract_at_rules_with(&CssSyntax::new(), input)
}

/// [`extract_at_rules`] with an explicit syntax provider.
pub fn extract_at_rules_with(
    syntax: &dyn SyntaxProvider,
    input: &str,
) -> WithDiagnostics<Vec<SnowAtRule>> {
    let nodes = syntax.parse_stylesheet(input);
    let mut at_rules = vec![];
    let mut diagnostics = Diagnostics::new();

    walk(&nodes, &mut |node| {
        let NodeKind::AtRule {
            name,
            prelude,
            block,
        } = &node.kind
        else {
            return;
        };
        if !name.eq_ignore_ascii_case(SNOW_AT_RULE) {
            return;
        }

        let Some(location) = node.span else {
            diagnostics.error(
                format!("missing location for at-rule '@{name}'"),
                "extract:parseAtRule",
            );
            return;
        };

        at_rules.push(SnowAtRule {
            location,
            prelude: source_between(input, prelude.first(), prelude.last()),
            block: block.as_deref().and_then(|block| block.text(input)).map(str::to_string),
        });
    });

    (at_rules, diagnostics)
}

fn source_between(input: &str, first: Option<&Node>, last: Option<&Node>) -> Option<String> {
    let start = first?.span?.start;
    let end = last?.span?.end;
    input.get(start..end).map(str::to_string)
}
