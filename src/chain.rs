use crate::parse::{self, ArgumentError, Fields, ParseError};
use crate::shape::{Shape, ShapeKind};
use std::fmt;

type Result<T> = std::result::Result<T, ParseError>;

pub type ParseFn = fn(&Fields) -> std::result::Result<Shape, ArgumentError>;

/// One link of the dispatch chain: a shape kind and the function that
/// turns its arguments into a [`Shape`].
#[derive(Clone, Copy)]
pub struct Interpreter {
    kind: ShapeKind,
    parse: ParseFn,
}

impl fmt::Debug for Interpreter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Interpreter")
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

impl Interpreter {
    pub fn new(kind: ShapeKind, parse: ParseFn) -> Self {
        Self { kind, parse }
    }

    pub fn circle() -> Self {
        Self::new(ShapeKind::Circle, parse::circle)
    }

    pub fn segment() -> Self {
        Self::new(ShapeKind::Segment, parse::segment)
    }

    pub fn triangle() -> Self {
        Self::new(ShapeKind::Triangle, parse::triangle)
    }

    pub fn polygon() -> Self {
        Self::new(ShapeKind::Polygon, parse::polygon)
    }

    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    pub fn can_handle(&self, keyword: &str) -> bool {
        self.kind.matches(keyword)
    }

    pub fn parse(&self, tokens: &[&str]) -> Result<Shape> {
        Fields::split(tokens)
            .and_then(|fields| (self.parse)(&fields))
            .map_err(|err| ParseError::malformed(self.kind, err))
    }
}

/// Ordered list of interpreters, fixed after construction.
///
/// The first interpreter claiming the keyword wins. Keywords are mutually
/// exclusive, so order only affects how many links are tried.
#[derive(Clone, Debug)]
pub struct DispatchChain {
    interpreters: Vec<Interpreter>,
}

impl Default for DispatchChain {
    fn default() -> Self {
        Self::standard()
    }
}

impl DispatchChain {
    pub fn new(interpreters: Vec<Interpreter>) -> Self {
        Self { interpreters }
    }

    /// circle -> segment -> triangle -> polygon
    pub fn standard() -> Self {
        Self::new(vec![
            Interpreter::circle(),
            Interpreter::segment(),
            Interpreter::triangle(),
            Interpreter::polygon(),
        ])
    }

    pub fn interpreters(&self) -> &[Interpreter] {
        &self.interpreters
    }

    pub fn dispatch(&self, tokens: &[&str]) -> Result<Shape> {
        let keyword = tokens.get(1).ok_or_else(|| {
            ParseError::malformed("command", ArgumentError::Missing("shape keyword"))
        })?;
        match self
            .interpreters
            .iter()
            .find(|interpreter| interpreter.can_handle(keyword))
        {
            Some(interpreter) => {
                log::debug!("{} handled by {} interpreter", keyword, interpreter.kind());
                interpreter.parse(tokens)
            }
            None => Err(ParseError::UnsupportedShape(keyword.to_string())),
        }
    }

    pub fn handle(&self, line: &str) -> Result<Shape> {
        self.dispatch(&parse::tokenize(line))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::{ColorName, Point};

    #[test]
    fn test_dispatch_every_keyword() {
        let chain = DispatchChain::standard();
        let commands = [
            ("X {} 1 2 3 red", ShapeKind::Circle),
            ("X {} 1 2 3 4 red", ShapeKind::Segment),
            ("X {} 1 2 3 4 5 6 red", ShapeKind::Triangle),
            ("X {} 1 2 3 4 5 6 7 8 red", ShapeKind::Polygon),
        ];
        for (template, kind) in commands {
            let keyword = kind.keyword();
            let mut chars = keyword.chars();
            let capitalized = match chars.next() {
                Some(first) => first.to_string() + &chars.as_str().to_lowercase(),
                None => String::new(),
            };
            for spelling in [
                keyword.to_string(),
                keyword.to_lowercase(),
                capitalized,
            ] {
                let line = template.replace("{}", &spelling);
                let shape = chain.handle(&line).unwrap();
                assert_eq!(shape.kind(), kind, "{}", line);
            }
        }
    }

    #[test]
    fn test_segment_scenario() {
        let chain = DispatchChain::standard();
        assert_eq!(
            chain.handle("X SEGMENT 10 20 30 40 blue"),
            Ok(Shape::Segment {
                from: Point::new(10, 20),
                to: Point::new(30, 40),
                color: ColorName::new("blue").unwrap(),
            })
        );
    }

    #[test]
    fn test_polygon_scenario() {
        let chain = DispatchChain::standard();
        assert_eq!(
            chain.handle("X POLYGON 0 0 10 0 10 10 0 10 green"),
            Ok(Shape::Polygon {
                vertices: vec![
                    Point::new(0, 0),
                    Point::new(10, 0),
                    Point::new(10, 10),
                    Point::new(0, 10),
                ],
                color: ColorName::new("green").unwrap(),
            })
        );
    }

    #[test]
    fn test_polygone_alias() {
        let chain = DispatchChain::standard();
        let shape = chain.handle("X POLYGONE 0 0 5 0 5 5 red").unwrap();
        assert_eq!(shape.kind(), ShapeKind::Polygon);
    }

    #[test]
    fn test_polygon_through_chain_has_triangle_arity() {
        let chain = DispatchChain::standard();
        match chain.handle("X POLYGON 0 0 5 0 5 5 red") {
            Ok(Shape::Polygon { vertices, .. }) => assert_eq!(vertices.len(), (9 - 2) / 2),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_unsupported_then_valid() {
        let chain = DispatchChain::standard();
        assert_eq!(
            chain.handle("X HEXAGON 1 2 red"),
            Err(ParseError::UnsupportedShape("HEXAGON".to_string()))
        );
        assert!(chain.handle("X CIRCLE 1 2 3 red").is_ok());
    }

    #[test]
    fn test_malformed_is_reported() {
        let chain = DispatchChain::standard();
        assert_eq!(
            chain.handle("X CIRCLE abc 10 5 red"),
            Err(ParseError::malformed(
                ShapeKind::Circle,
                ArgumentError::NotAnInteger {
                    field: "cx".to_string(),
                    token: "abc".to_string(),
                }
            ))
        );
        assert!(chain.handle("X CIRCLE 1 2 3 red").is_ok());
    }

    #[test]
    fn test_missing_keyword() {
        let chain = DispatchChain::standard();
        assert_eq!(
            chain.handle(""),
            Err(ParseError::malformed(
                "command",
                ArgumentError::Missing("shape keyword")
            ))
        );
        assert_eq!(
            chain.handle("X"),
            Err(ParseError::malformed(
                "command",
                ArgumentError::Missing("shape keyword")
            ))
        );
        assert_eq!(
            chain.handle("X CIRCLE"),
            Err(ParseError::malformed(
                ShapeKind::Circle,
                ArgumentError::Missing("color")
            ))
        );
    }

    #[test]
    fn test_custom_chain_order() {
        let chain = DispatchChain::new(vec![Interpreter::polygon()]);
        assert_eq!(chain.interpreters().len(), 1);
        assert!(chain.handle("X POLYGON 0 0 1 0 1 1 red").is_ok());
        assert_eq!(
            chain.handle("X CIRCLE 1 2 3 red"),
            Err(ParseError::UnsupportedShape("CIRCLE".to_string()))
        );
    }

    #[test]
    fn test_whitespace_runs() {
        let chain = DispatchChain::standard();
        assert_eq!(
            chain.handle("  X   circle  1\t2  3   RED  "),
            Ok(Shape::Circle {
                center: Point::new(1, 2),
                radius: 3,
                color: ColorName::new("red").unwrap(),
            })
        );
    }
}
