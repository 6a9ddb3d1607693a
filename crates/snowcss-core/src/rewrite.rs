//! Text rewriting: replacing extracted calls with their resolved CSS.

use crate::extract::SnowAtRule;
use crate::resolver::ResolvedToken;
use crate::syntax::Span;

/// Replace every resolved call's span with [`ResolvedToken::to_css`].
///
/// Spans are applied from the end of the input backwards, so earlier offsets
/// stay valid. Spans that do not fit the input, or overlap a span already
/// replaced, are skipped.
pub fn replace(input: &str, resolved: &[ResolvedToken]) -> String {
    let mut ordered: Vec<&ResolvedToken> = resolved.iter().collect();
    ordered.sort_by(|a, b| b.location().end.cmp(&a.location().end));

    let mut output = input.to_string();
    let mut limit = input.len();

    for token in ordered {
        let span = token.location();
        if span.end > limit || !is_valid_span(input, span) {
            tracing::warn!(
                "Skipping replacement of '{}' at {}..{}: span is out of range or overlapping",
                token.path(),
                span.start,
                span.end
            );
            continue;
        }

        output.replace_range(span.start..span.end, &token.to_css());
        limit = span.start;
    }

    output
}

/// Replace an `@snowcss` at-rule with `replacement`.
pub fn replace_at_rule(input: &str, at_rule: &SnowAtRule, replacement: &str) -> String {
    let span = at_rule.location;
    if !is_valid_span(input, span) {
        tracing::warn!(
            "Skipping replacement of @snowcss at {}..{}: span is out of range",
            span.start,
            span.end
        );
        return input.to_string();
    }

    let mut output = String::with_capacity(input.len() + replacement.len());
    output.push_str(&input[..span.start]);
    output.push_str(replacement);
    output.push_str(&input[span.end..]);
    output
}

fn is_valid_span(input: &str, span: Span) -> bool {
    span.start <= span.end
        && span.end <= input.len()
        && input.is_char_boundary(span.start)
        && input.is_char_boundary(span.end)
}
