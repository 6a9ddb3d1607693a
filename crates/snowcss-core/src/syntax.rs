//! Positioned CSS syntax trees built on the `cssparser` tokenizer.
//!
//! The compiler only needs a shallow tree: function calls with their argument
//! nodes, literals, operators, nested blocks and at-rules, each carrying the
//! byte span it was read from. Spans are what later text rewriting replaces,
//! so they must cover exactly the source of the node.
//!
//! Custom-property values inside `{}` blocks are kept as opaque [`NodeKind::Raw`]
//! fragments. Consumers that care about their content re-parse them with
//! [`SyntaxProvider::parse_value`] and offset the resulting spans.

use cssparser::{Delimiter, ParseError, Parser, ParserInput, SourcePosition, Token};

/// A `{start, end}` byte range into source text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Span {
    /// Offset of the first byte.
    pub start: usize,
    /// Offset one past the last byte.
    pub end: usize,
}

impl Span {
    /// Create a span.
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Shift both ends by `offset`.
    pub fn offset(self, offset: usize) -> Self {
        Self {
            start: self.start + offset,
            end: self.end + offset,
        }
    }

    /// Length in bytes.
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Whether the span covers nothing.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Kind of bracket that opened a [`NodeKind::Block`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockDelimiter {
    /// `( ... )`
    Parenthesis,
    /// `[ ... ]`
    Square,
    /// `{ ... }`
    Curly,
}

/// Structural type of a syntax node.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// Function call such as `rgb(...)` or `--value(...)`.
    Function { name: String, children: Vec<Node> },
    /// Quoted string literal, unquoted value.
    String(String),
    /// Identifier or keyword.
    Ident(String),
    /// Plain number.
    Number(f64),
    /// Number with a unit.
    Dimension { value: f64, unit: String },
    /// Percentage as a whole percent (`50%` is `50.0`).
    Percentage(f64),
    /// Hash literal without the leading `#`.
    Hash(String),
    /// Comma, slash and other punctuation.
    Operator(String),
    /// Bracketed block.
    Block {
        delimiter: BlockDelimiter,
        children: Vec<Node>,
    },
    /// At-rule with its prelude and optional `{}` block.
    AtRule {
        name: String,
        prelude: Vec<Node>,
        block: Option<Box<Node>>,
    },
    /// Unparsed fragment, used for custom-property values.
    Raw(String),
    /// Unquoted `url(...)`.
    Url(String),
    /// Anything else, as source text.
    Other(String),
}

/// A syntax node with its optional source span.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// What the node is.
    pub kind: NodeKind,
    /// Where it came from, when position tracking is enabled.
    pub span: Option<Span>,
}

impl Node {
    /// Create a node.
    pub fn new(kind: NodeKind, span: Option<Span>) -> Self {
        Self { kind, span }
    }

    /// Direct child nodes, in source order.
    pub fn children(&self) -> Vec<&Node> {
        match &self.kind {
            NodeKind::Function { children, .. } | NodeKind::Block { children, .. } => {
                children.iter().collect()
            }
            NodeKind::AtRule { prelude, block, .. } => {
                prelude.iter().chain(block.as_deref()).collect()
            }
            _ => Vec::new(),
        }
    }

    /// Visit this node and all of its descendants, depth-first, parents first.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Node)) {
        visit(self);
        for child in self.children() {
            child.walk(visit);
        }
    }

    /// Function name, when this node is a function call.
    pub fn function_name(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Function { name, .. } => Some(name),
            _ => None,
        }
    }

    /// Source text of the node.
    pub fn text<'s>(&self, source: &'s str) -> Option<&'s str> {
        self.span.and_then(|span| source.get(span.start..span.end))
    }
}

/// Visit every node of a forest, depth-first.
pub fn walk<'a>(nodes: &'a [Node], visit: &mut impl FnMut(&'a Node)) {
    for node in nodes {
        node.walk(visit);
    }
}

/// Capability contract for whatever turns CSS text into positioned nodes.
pub trait SyntaxProvider {
    /// Parse a full stylesheet.
    fn parse_stylesheet(&self, input: &str) -> Vec<Node>;

    /// Parse a standalone value fragment, e.g. `1px solid red`.
    fn parse_value(&self, input: &str) -> Vec<Node>;
}

/// The default [`SyntaxProvider`], backed by `cssparser`.
#[derive(Debug, Clone, Copy)]
pub struct CssSyntax {
    positions: bool,
}

impl CssSyntax {
    /// Create a provider that records spans.
    pub fn new() -> Self {
        Self { positions: true }
    }

    /// Create a provider that leaves every span empty.
    pub fn without_positions() -> Self {
        Self { positions: false }
    }

    /// Whether spans are recorded.
    pub fn positions(&self) -> bool {
        self.positions
    }
}

impl Default for CssSyntax {
    fn default() -> Self {
        Self::new()
    }
}

impl SyntaxProvider for CssSyntax {
    fn parse_stylesheet(&self, input: &str) -> Vec<Node> {
        let mut input = ParserInput::new(input);
        let mut parser = Parser::new(&mut input);
        TreeBuilder { syntax: *self }.collect(&mut parser, Mode::Block)
    }

    fn parse_value(&self, input: &str) -> Vec<Node> {
        let mut input = ParserInput::new(input);
        let mut parser = Parser::new(&mut input);
        TreeBuilder { syntax: *self }.collect(&mut parser, Mode::Value)
    }
}

/// What kind of list is being collected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    /// Stylesheet top level and `{}` blocks: at-rules and declarations.
    Block,
    /// Values, function arguments, `()` and `[]` blocks.
    Value,
}

struct TreeBuilder {
    syntax: CssSyntax,
}

impl TreeBuilder {
    fn span(&self, start: SourcePosition, end: SourcePosition) -> Option<Span> {
        self.syntax
            .positions
            .then(|| Span::new(start.byte_index(), end.byte_index()))
    }

    /// Collect every node until the parser (or nested block) is exhausted.
    fn collect<'i>(&self, parser: &mut Parser<'i, '_>, mode: Mode) -> Vec<Node> {
        let mut nodes = vec![];
        let mut at_declaration_start = true;

        loop {
            let start = parser.position();
            let token = match parser.next_including_whitespace_and_comments() {
                Ok(token) => token.clone(),
                Err(_) => break,
            };

            match &token {
                Token::WhiteSpace(_) | Token::Comment(_) => continue,

                Token::Ident(name)
                    if mode == Mode::Block && at_declaration_start && name.starts_with("--") =>
                {
                    nodes.push(Node::new(
                        NodeKind::Ident(name.to_string()),
                        self.span(start, parser.position()),
                    ));
                    if let Some(raw) = self.custom_property_value(parser) {
                        nodes.push(raw);
                    }
                    at_declaration_start = false;
                    continue;
                }

                Token::AtKeyword(name) if mode == Mode::Block => {
                    let name = name.to_string();
                    nodes.push(self.at_rule(parser, start, name));
                    at_declaration_start = true;
                    continue;
                }

                _ => {}
            }

            at_declaration_start = matches!(token, Token::Semicolon | Token::CurlyBracketBlock);

            if let Some(node) = self.node(parser, start, token) {
                nodes.push(node);
            }
        }

        nodes
    }

    /// Turn one already consumed token into a node, descending into blocks.
    fn node<'i>(
        &self,
        parser: &mut Parser<'i, '_>,
        start: SourcePosition,
        token: Token<'i>,
    ) -> Option<Node> {
        let kind = match token {
            Token::WhiteSpace(_) | Token::Comment(_) => return None,

            Token::Function(name) => NodeKind::Function {
                name: name.to_string(),
                children: self.nested(parser, Mode::Value),
            },
            Token::ParenthesisBlock => NodeKind::Block {
                delimiter: BlockDelimiter::Parenthesis,
                children: self.nested(parser, Mode::Value),
            },
            Token::SquareBracketBlock => NodeKind::Block {
                delimiter: BlockDelimiter::Square,
                children: self.nested(parser, Mode::Value),
            },
            Token::CurlyBracketBlock => NodeKind::Block {
                delimiter: BlockDelimiter::Curly,
                children: self.nested(parser, Mode::Block),
            },

            Token::QuotedString(value) => NodeKind::String(value.to_string()),
            Token::Ident(name) => NodeKind::Ident(name.to_string()),
            Token::Hash(value) | Token::IDHash(value) => NodeKind::Hash(value.to_string()),
            Token::UnquotedUrl(url) => NodeKind::Url(url.to_string()),

            Token::Number { value, .. } => {
                NodeKind::Number(numeric_prefix(parser.slice_from(start), 0, value))
            }
            Token::Percentage { unit_value, .. } => NodeKind::Percentage(numeric_prefix(
                parser.slice_from(start),
                1,
                unit_value * 100.0,
            )),
            Token::Dimension { value, unit, .. } => NodeKind::Dimension {
                value: numeric_prefix(parser.slice_from(start), unit.len(), value),
                unit: unit.to_string(),
            },

            Token::Delim(c) => NodeKind::Operator(c.to_string()),
            Token::Comma => NodeKind::Operator(",".to_string()),
            Token::Colon => NodeKind::Operator(":".to_string()),
            Token::Semicolon => NodeKind::Operator(";".to_string()),

            _ => NodeKind::Other(parser.slice_from(start).to_string()),
        };

        Some(Node::new(kind, self.span(start, parser.position())))
    }

    /// Collect the contents of the block the parser is positioned at.
    fn nested<'i>(&self, parser: &mut Parser<'i, '_>, mode: Mode) -> Vec<Node> {
        parser
            .parse_nested_block(|p| Ok::<_, ParseError<'i, ()>>(self.collect(p, mode)))
            .unwrap_or_default()
    }

    /// Read `@name prelude;` or `@name prelude { ... }`.
    fn at_rule<'i>(
        &self,
        parser: &mut Parser<'i, '_>,
        start: SourcePosition,
        name: String,
    ) -> Node {
        let mut prelude = vec![];
        let mut block = None;

        loop {
            let token_start = parser.position();
            let token = match parser.next_including_whitespace_and_comments() {
                Ok(token) => token.clone(),
                Err(_) => break,
            };

            match token {
                Token::WhiteSpace(_) | Token::Comment(_) => continue,
                Token::Semicolon => break,
                Token::CurlyBracketBlock => {
                    block = self.node(parser, token_start, token).map(Box::new);
                    break;
                }
                other => {
                    if let Some(node) = self.node(parser, token_start, other) {
                        prelude.push(node);
                    }
                }
            }
        }

        Node::new(
            NodeKind::AtRule {
                name,
                prelude,
                block,
            },
            self.span(start, parser.position()),
        )
    }

    /// Capture the value of a `--name: value` declaration as a trimmed raw node.
    ///
    /// Leaves the parser before the terminating `;` (or at the end of the block).
    fn custom_property_value<'i>(&self, parser: &mut Parser<'i, '_>) -> Option<Node> {
        let state = parser.state();
        if parser.expect_colon().is_err() {
            parser.reset(&state);
            return None;
        }

        let start = parser.position();
        let _ = parser.parse_until_before(Delimiter::Semicolon, |p| {
            while p.next_including_whitespace_and_comments().is_ok() {}
            Ok::<_, ParseError<'i, ()>>(())
        });

        let text = parser.slice_from(start);
        let leading = text.len() - text.trim_start().len();
        let value = text.trim();

        let span = self.syntax.positions.then(|| {
            let offset = start.byte_index() + leading;
            Span::new(offset, offset + value.len())
        });

        Some(Node::new(NodeKind::Raw(value.to_string()), span))
    }
}

/// Read the numeric part of a token from its source text, so decimals stay exact.
fn numeric_prefix(text: &str, suffix_len: usize, fallback: f32) -> f64 {
    text.len()
        .checked_sub(suffix_len)
        .and_then(|end| text.get(..end))
        .and_then(|number| number.parse::<f64>().ok())
        .unwrap_or(f64::from(fallback))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value(input: &str) -> Vec<Node> {
        CssSyntax::new().parse_value(input)
    }

    fn find_function<'a>(nodes: &'a [Node], name: &str) -> Option<&'a Node> {
        let mut found = None;
        walk(nodes, &mut |node| {
            if found.is_none() && node.function_name() == Some(name) {
                found = Some(node);
            }
        });
        found
    }

    #[test]
    fn parse_value_components() {
        let nodes = value("1px 2.5rem red");
        assert_eq!(nodes.len(), 3);
        assert_eq!(
            nodes[0].kind,
            NodeKind::Dimension {
                value: 1.0,
                unit: "px".to_string()
            }
        );
        assert_eq!(
            nodes[1].kind,
            NodeKind::Dimension {
                value: 2.5,
                unit: "rem".to_string()
            }
        );
        assert_eq!(nodes[2].kind, NodeKind::Ident("red".to_string()));
    }

    #[test]
    fn value_spans_cover_source() {
        let input = "1px  #fff, 'Inter'";
        let nodes = value(input);
        let texts: Vec<&str> = nodes.iter().filter_map(|n| n.text(input)).collect();
        assert_eq!(texts, ["1px", "#fff", ",", "'Inter'"]);
    }

    #[test]
    fn decimals_are_exact() {
        let nodes = value("0.75rem 33%");
        assert_eq!(
            nodes[0].kind,
            NodeKind::Dimension {
                value: 0.75,
                unit: "rem".to_string()
            }
        );
        assert_eq!(nodes[1].kind, NodeKind::Percentage(33.0));
    }

    #[test]
    fn function_span_includes_arguments() {
        let input = ".a { color: --value(\"colors.primary\" / 50%); }";
        let nodes = CssSyntax::new().parse_stylesheet(input);
        let function = find_function(&nodes, "--value").unwrap();

        assert_eq!(function.text(input), Some("--value(\"colors.primary\" / 50%)"));

        let NodeKind::Function { children, .. } = &function.kind else {
            panic!("expected function");
        };
        assert_eq!(children.len(), 3);
        assert_eq!(children[0].kind, NodeKind::String("colors.primary".to_string()));
        assert_eq!(children[1].kind, NodeKind::Operator("/".to_string()));
        assert_eq!(children[2].kind, NodeKind::Percentage(50.0));
    }

    #[test]
    fn custom_property_value_is_raw() {
        let input = ":root { --brand:  --token(\"colors.primary\") ; color: red; }";
        let nodes = CssSyntax::new().parse_stylesheet(input);

        let mut raws = vec![];
        walk(&nodes, &mut |node| {
            if let NodeKind::Raw(value) = &node.kind {
                raws.push((value.clone(), node.text(input)));
            }
        });

        assert_eq!(raws.len(), 1);
        assert_eq!(raws[0].0, "--token(\"colors.primary\")");
        assert_eq!(raws[0].1, Some("--token(\"colors.primary\")"));
        assert!(find_function(&nodes, "--token").is_none());
    }

    #[test]
    fn at_rule_statement_and_block() {
        let input = "@snowcss;\n@media (min-width: 10px) { .a { color: red; } }";
        let nodes = CssSyntax::new().parse_stylesheet(input);

        let NodeKind::AtRule { name, block, .. } = &nodes[0].kind else {
            panic!("expected at-rule");
        };
        assert_eq!(name, "snowcss");
        assert!(block.is_none());
        assert_eq!(nodes[0].text(input), Some("@snowcss;"));

        let NodeKind::AtRule { name, block, .. } = &nodes[1].kind else {
            panic!("expected at-rule");
        };
        assert_eq!(name, "media");
        assert!(block.is_some());
    }

    #[test]
    fn without_positions_has_no_spans() {
        let nodes = CssSyntax::without_positions().parse_value("1px red");
        assert!(nodes.iter().all(|n| n.span.is_none()));
    }

    #[test]
    fn span_offset() {
        let span = Span::new(2, 5).offset(10);
        assert_eq!(span, Span::new(12, 15));
        assert_eq!(span.len(), 3);
    }
}
