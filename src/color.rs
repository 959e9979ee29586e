use ahash::AHashMap;
use nom::bytes::complete::{tag, take_while1, take_while_m_n};
use nom::combinator::{all_consuming, map, map_res};
use nom::sequence::{preceded, separated_pair, tuple};
use nom::{IResult, Parser};
use std::fmt;
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::new(0, 0, 0);
    pub const RED: Color = Color::new(255, 0, 0);
    pub const GREEN: Color = Color::new(0, 255, 0);
    pub const BLUE: Color = Color::new(0, 0, 255);
    pub const YELLOW: Color = Color::new(255, 255, 0);
    pub const CYAN: Color = Color::new(0, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({} {} {})", self.r, self.g, self.b)
    }
}

/// Name to color lookup with a fallback for names it does not know.
#[derive(Clone, Debug)]
pub struct Palette {
    colors: AHashMap<String, Color>,
    fallback: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self::empty(Color::BLACK)
            .with_color("red", Color::RED)
            .with_color("green", Color::GREEN)
            .with_color("blue", Color::BLUE)
            .with_color("yellow", Color::YELLOW)
            .with_color("black", Color::BLACK)
            .with_color("cyan", Color::CYAN)
    }
}

impl Palette {
    pub fn empty(fallback: Color) -> Self {
        Self {
            colors: Default::default(),
            fallback,
        }
    }

    pub fn with_color(mut self, name: &str, color: Color) -> Self {
        self.colors.insert(normalize(name), color);
        self
    }

    pub fn fallback(&self) -> Color {
        self.fallback
    }

    pub fn get(&self, name: &str) -> Option<Color> {
        self.colors.get(&normalize(name)).copied()
    }

    pub fn resolve(&self, name: &str) -> Color {
        self.get(name).unwrap_or_else(|| {
            log::debug!("unknown color {:?}, using {}", name, self.fallback);
            self.fallback
        })
    }
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid palette entry {0:?}, expected NAME=#RRGGBB")]
pub struct PaletteEntryError(String);

fn from_hex(input: &str) -> Result<u8, std::num::ParseIntError> {
    u8::from_str_radix(input, 16)
}

fn is_hex_digit(c: char) -> bool {
    c.is_ascii_hexdigit()
}

fn hex_primary(input: &str) -> IResult<&str, u8> {
    map_res(take_while_m_n(2, 2, is_hex_digit), from_hex)(input)
}

fn color_hex(input: &str) -> IResult<&str, Color> {
    map(
        preceded(tag("#"), tuple((hex_primary, hex_primary, hex_primary))),
        |(r, g, b)| Color::new(r, g, b),
    )
    .parse(input)
}

fn color_name(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_alphanumeric() || c == '_' || c == '-').parse(input)
}

fn palette_entry(input: &str) -> IResult<&str, (&str, Color)> {
    separated_pair(color_name, tag("="), color_hex).parse(input)
}

/// Parses `NAME=#RRGGBB`, the format of the `--palette` option.
pub fn parse_palette_entry(input: &str) -> Result<(String, Color), PaletteEntryError> {
    all_consuming(palette_entry)
        .parse(input.trim())
        .map(|(_, (name, color))| (normalize(name), color))
        .map_err(|_| PaletteEntryError(input.to_string()))
}
