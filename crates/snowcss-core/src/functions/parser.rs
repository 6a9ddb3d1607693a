use super::{FunctionName, SnowFunction, TokenFunction, ValueFunction};
use crate::diagnostics::Diagnostics;
use crate::path::Path;
use crate::syntax::{Node, NodeKind, Span};
use crate::values::{Modifier, Unit};

const CONTEXT: &str = "parser";

/// Parse the arguments of a reserved function call.
///
/// Returns `None` when the call has to be dropped. Problems are reported to
/// `diagnostics`.
pub(crate) fn parse_function(
    name: FunctionName,
    args: &[Node],
    location: Span,
    diagnostics: &mut Diagnostics,
) -> Option<SnowFunction> {
    let mut parser = ArgumentParser {
        nodes: args,
        pos: 0,
        diagnostics,
    };

    match name {
        FunctionName::Token => parser.token_function(location),
        FunctionName::Value => parser.value_function(location),
    }
}

/// Cursor over the argument nodes of one call.
struct ArgumentParser<'a> {
    nodes: &'a [Node],
    pos: usize,
    diagnostics: &'a mut Diagnostics,
}

impl<'a> ArgumentParser<'a> {
    fn token_function(&mut self, location: Span) -> Option<SnowFunction> {
        let path = self.path()?;

        if self.advance().is_some() {
            return self.error("--token() does not support modifiers");
        }

        Some(TokenFunction::new(path, location).into())
    }

    fn value_function(&mut self, location: Span) -> Option<SnowFunction> {
        let path = self.path()?;
        let modifier = self.modifier();

        if modifier.is_some() && self.advance().is_some() {
            self.diagnostics.warning(
                format!("unexpected trailing content in --value('{path}') call; ignored"),
                CONTEXT,
            );
        }

        Some(ValueFunction::new(path, modifier, location).into())
    }

    /// The quoted path argument.
    fn path(&mut self) -> Option<Path> {
        let value = match self.advance().map(|node| &node.kind) {
            Some(NodeKind::String(value)) => value,
            _ => return self.error("expected a quoted string path as first argument"),
        };

        if value.trim().is_empty() {
            return self.error("empty path is not allowed");
        }

        Some(Path::from_dot_path(value))
    }

    fn modifier(&mut self) -> Option<Modifier> {
        let node = self.advance()?;

        match &node.kind {
            NodeKind::Ident(name) if name == "to" => self.unit_modifier(),
            NodeKind::Ident(name) if name == "negate" => Some(Modifier::Negate),
            NodeKind::Operator(op) if op == "/" => self.alpha_modifier(),
            _ => self.error("unexpected --value() modifier"),
        }
    }

    fn unit_modifier(&mut self) -> Option<Modifier> {
        let name = match self.advance().map(|node| &node.kind) {
            Some(NodeKind::Ident(name)) => name,
            _ => return self.error("expected unit identifier after 'to': px, rem"),
        };

        match name.parse::<Unit>() {
            Ok(unit) => Some(Modifier::unit(unit)),
            Err(()) => self.error(format!("unexpected unit '{name}'; expected 'px' or 'rem'")),
        }
    }

    fn alpha_modifier(&mut self) -> Option<Modifier> {
        match self.advance().map(|node| &node.kind) {
            Some(NodeKind::Percentage(percent)) => Some(Modifier::alpha(percent / 100.0)),
            _ => self.error("expected percentage value after '/'"),
        }
    }

    fn advance(&mut self) -> Option<&'a Node> {
        let node = self.nodes.get(self.pos)?;
        self.pos += 1;
        Some(node)
    }

    fn error<T>(&mut self, message: impl Into<String>) -> Option<T> {
        self.diagnostics.error(message, CONTEXT);
        None
    }
}
