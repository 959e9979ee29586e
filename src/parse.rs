use crate::shape::{ColorName, Point, Shape, ShapeKind};
use nom::branch::alt;
use nom::bytes::complete::is_not;
use nom::character::complete::{char, digit1, multispace0};
use nom::combinator::{all_consuming, map_res, opt, recognize};
use nom::multi::many0;
use nom::sequence::{pair, preceded, terminated};
use nom::{IResult, Parser};
use std::str::FromStr;
use thiserror::Error;

/// Why the arguments of an otherwise recognized shape were rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ArgumentError {
    #[error("missing {0}")]
    Missing(&'static str),
    #[error("{field} is not an integer: {token:?}")]
    NotAnInteger { field: String, token: String },
    #[error("expected {expected} arguments, got {found}")]
    Arity { expected: usize, found: usize },
    #[error("odd number of coordinates ({0})")]
    DanglingCoordinate(usize),
    #[error("a polygon needs at least 3 vertices, got {0}")]
    TooFewVertices(usize),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("unsupported shape: {0}")]
    UnsupportedShape(String),
    #[error("malformed arguments for {shape}: {source}")]
    MalformedArguments {
        shape: String,
        source: ArgumentError,
    },
}

impl ParseError {
    pub fn malformed(shape: impl ToString, source: ArgumentError) -> Self {
        Self::MalformedArguments {
            shape: shape.to_string(),
            source,
        }
    }
}

type Result<T> = std::result::Result<T, ArgumentError>;

fn field(input: &str) -> IResult<&str, &str> {
    preceded(multispace0, is_not(" \t\r\n")).parse(input)
}

fn fields(input: &str) -> IResult<&str, Vec<&str>> {
    terminated(many0(field), multispace0).parse(input)
}

/// Splits a command line on runs of ASCII whitespace.
///
/// Leading and trailing whitespace is dropped and consecutive separators
/// never produce empty tokens, so field positions are stable.
pub fn tokenize(line: &str) -> Vec<&str> {
    fields(line).map(|(_, tokens)| tokens).unwrap_or_default()
}

fn signed_digits(input: &str) -> IResult<&str, &str> {
    recognize(pair(opt(alt((char('+'), char('-')))), digit1)).parse(input)
}

fn integer(input: &str) -> IResult<&str, i32> {
    map_res(signed_digits, i32::from_str).parse(input)
}

/// Parses a whole token as a base-10 `i32`, rejecting any surrounding garbage.
pub fn parse_integer(token: &str) -> Option<i32> {
    all_consuming(integer)
        .parse(token)
        .ok()
        .map(|(_, value)| value)
}

/// The positional layout every command shares:
/// `<header> <keyword> <args...> <color>`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Fields<'a> {
    pub header: &'a str,
    pub keyword: &'a str,
    pub args: &'a [&'a str],
    pub color: &'a str,
}

impl<'a> Fields<'a> {
    pub fn split(tokens: &'a [&'a str]) -> Result<Self> {
        match tokens {
            [] | [_] => Err(ArgumentError::Missing("shape keyword")),
            [_, _] => Err(ArgumentError::Missing("color")),
            [header, keyword, args @ .., color] => Ok(Self {
                header: *header,
                keyword: *keyword,
                args,
                color: *color,
            }),
        }
    }

    /// Number of tokens in the original command.
    pub fn token_count(&self) -> usize {
        self.args.len() + 3
    }

    fn color_name(&self) -> Result<ColorName> {
        ColorName::new(self.color).ok_or(ArgumentError::Missing("color"))
    }

    fn expect_args(&self, expected: usize) -> Result<()> {
        if self.args.len() == expected {
            Ok(())
        } else {
            Err(ArgumentError::Arity {
                expected,
                found: self.args.len(),
            })
        }
    }
}

fn integer_field(field: &str, token: &str) -> Result<i32> {
    parse_integer(token).ok_or_else(|| ArgumentError::NotAnInteger {
        field: field.to_string(),
        token: token.to_string(),
    })
}

fn vertices(coordinates: &[&str]) -> Result<Vec<Point>> {
    if coordinates.len() % 2 != 0 {
        return Err(ArgumentError::DanglingCoordinate(coordinates.len()));
    }
    coordinates
        .chunks_exact(2)
        .enumerate()
        .map(|(index, xy)| -> Result<Point> {
            Ok(Point::new(
                integer_field(&format!("x{}", index + 1), xy[0])?,
                integer_field(&format!("y{}", index + 1), xy[1])?,
            ))
        })
        .collect()
}

/// `X CIRCLE cx cy radius color`
pub fn circle(fields: &Fields) -> Result<Shape> {
    fields.expect_args(3)?;
    log::debug!("parsing {}", ShapeKind::Circle);
    let cx = integer_field("cx", fields.args[0])?;
    let cy = integer_field("cy", fields.args[1])?;
    let radius = integer_field("radius", fields.args[2])?;
    Ok(Shape::Circle {
        center: Point::new(cx, cy),
        radius,
        color: fields.color_name()?,
    })
}

/// `X SEGMENT x1 y1 x2 y2 color`
pub fn segment(fields: &Fields) -> Result<Shape> {
    fields.expect_args(4)?;
    log::debug!("parsing {}", ShapeKind::Segment);
    let points = vertices(fields.args)?;
    Ok(Shape::Segment {
        from: points[0],
        to: points[1],
        color: fields.color_name()?,
    })
}

/// `X TRIANGLE x1 y1 x2 y2 x3 y3 color`
pub fn triangle(fields: &Fields) -> Result<Shape> {
    fields.expect_args(6)?;
    log::debug!("parsing {}", ShapeKind::Triangle);
    let points = vertices(fields.args)?;
    Ok(Shape::Triangle {
        vertices: [points[0], points[1], points[2]],
        color: fields.color_name()?,
    })
}

/// `X POLYGON x1 y1 ... xn yn color`
///
/// The vertex count is `(tokens - 2) / 2`. An odd number of coordinates and
/// fewer than three vertices are both rejected instead of being truncated.
pub fn polygon(fields: &Fields) -> Result<Shape> {
    log::debug!("parsing {}", ShapeKind::Polygon);
    let vertices = vertices(fields.args)?;
    debug_assert_eq!(vertices.len(), (fields.token_count() - 2) / 2);
    if vertices.len() < 3 {
        return Err(ArgumentError::TooFewVertices(vertices.len()));
    }
    Ok(Shape::Polygon {
        vertices,
        color: fields.color_name()?,
    })
}
