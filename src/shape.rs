use std::fmt;

pub const WIDTH: u32 = 1000;
pub const HEIGHT: u32 = 800;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// A color name as it appeared on the wire, trimmed and lower-cased.
///
/// Whether the name is known is decided later by the palette.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ColorName(String);

impl ColorName {
    pub fn new(name: &str) -> Option<Self> {
        let name = name.trim();
        if name.is_empty() {
            None
        } else {
            Some(Self(name.to_lowercase()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ColorName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Circle,
    Segment,
    Triangle,
    Polygon,
}

impl ShapeKind {
    /// Canonical protocol keyword.
    pub fn keyword(self) -> &'static str {
        match self {
            ShapeKind::Circle => "CIRCLE",
            ShapeKind::Segment => "SEGMENT",
            ShapeKind::Triangle => "TRIANGLE",
            ShapeKind::Polygon => "POLYGON",
        }
    }

    /// Older clients spell the polygon keyword "POLYGONE".
    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            ShapeKind::Polygon => &["POLYGONE"],
            _ => &[],
        }
    }

    pub fn matches(self, keyword: &str) -> bool {
        self.keyword().eq_ignore_ascii_case(keyword)
            || self
                .aliases()
                .iter()
                .any(|alias| alias.eq_ignore_ascii_case(keyword))
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// A fully parsed drawing request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Shape {
    Circle {
        center: Point,
        radius: i32,
        color: ColorName,
    },
    Segment {
        from: Point,
        to: Point,
        color: ColorName,
    },
    Triangle {
        vertices: [Point; 3],
        color: ColorName,
    },
    Polygon {
        vertices: Vec<Point>,
        color: ColorName,
    },
}

impl Shape {
    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Circle { .. } => ShapeKind::Circle,
            Shape::Segment { .. } => ShapeKind::Segment,
            Shape::Triangle { .. } => ShapeKind::Triangle,
            Shape::Polygon { .. } => ShapeKind::Polygon,
        }
    }

    pub fn color(&self) -> &ColorName {
        match self {
            Shape::Circle { color, .. }
            | Shape::Segment { color, .. }
            | Shape::Triangle { color, .. }
            | Shape::Polygon { color, .. } => color,
        }
    }
}
