use crate::color::Color;
use crate::render::Renderer;
use crate::shape::{Point, Shape, HEIGHT, WIDTH};
use std::collections::VecDeque;
use std::io::Write;
use std::path::PathBuf;

/// Default number of shapes a canvas keeps.
pub const MAX_SHAPES: usize = 10_000;

/// Fixed-size drawing surface that accumulates shapes and publishes them as
/// an SVG document.
///
/// At most `max_shapes` shapes are retained; the oldest is dropped first, so
/// memory and the size of each published document stay bounded.
#[derive(Debug)]
pub struct SvgCanvas {
    width: u32,
    height: u32,
    max_shapes: usize,
    output: Option<PathBuf>,
    shapes: VecDeque<(Shape, Color)>,
}

impl Default for SvgCanvas {
    fn default() -> Self {
        Self::new(WIDTH, HEIGHT)
    }
}

impl SvgCanvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            max_shapes: MAX_SHAPES,
            output: None,
            shapes: VecDeque::new(),
        }
    }

    pub fn with_max_shapes(mut self, max_shapes: usize) -> Self {
        self.max_shapes = max_shapes.max(1);
        while self.shapes.len() > self.max_shapes {
            self.shapes.pop_front();
        }
        self
    }

    pub fn with_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.output = Some(path.into());
        self
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn write_to(&self, writer: &mut impl Write) -> std::io::Result<()> {
        write!(
            writer,
            "<svg version=\"1.1\" width=\"{}\" height=\"{}\" xmlns=\"http://www.w3.org/2000/svg\">\n",
            self.width, self.height
        )?;
        write!(
            writer,
            "<rect width=\"100%\" height=\"100%\" fill=\"white\" />\n"
        )?;
        for (shape, color) in &self.shapes {
            write_shape(writer, shape, *color)?;
        }
        write!(writer, "</svg>\n")?;
        writer.flush()?;
        Ok(())
    }
}

fn write_points(writer: &mut impl Write, points: &[Point]) -> std::io::Result<()> {
    for (index, point) in points.iter().enumerate() {
        if index > 0 {
            write!(writer, " ")?;
        }
        write!(writer, "{},{}", point.x, point.y)?;
    }
    Ok(())
}

fn write_shape(writer: &mut impl Write, shape: &Shape, color: Color) -> std::io::Result<()> {
    match shape {
        Shape::Circle { center, radius, .. } => {
            write!(
                writer,
                "<circle cx=\"{}\" cy=\"{}\" r=\"{}\" fill=\"none\" stroke=\"{}\" />\n",
                center.x,
                center.y,
                radius.unsigned_abs(),
                color
            )?;
        }
        Shape::Segment { from, to, .. } => {
            write!(
                writer,
                "<line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" stroke=\"{}\" />\n",
                from.x, from.y, to.x, to.y, color
            )?;
        }
        Shape::Triangle { vertices, .. } => {
            write!(writer, "<polygon points=\"")?;
            write_points(writer, vertices)?;
            write!(writer, "\" fill=\"none\" stroke=\"{}\" />\n", color)?;
        }
        Shape::Polygon { vertices, .. } => {
            write!(writer, "<polygon points=\"")?;
            write_points(writer, vertices)?;
            write!(writer, "\" fill=\"none\" stroke=\"{}\" />\n", color)?;
        }
    }
    Ok(())
}

impl Renderer for SvgCanvas {
    fn render(&mut self, shape: &Shape, color: Color) -> std::io::Result<()> {
        if let Shape::Circle { radius, .. } = shape {
            if *radius < 0 {
                log::warn!("negative radius {}, drawing with {}", radius, radius.unsigned_abs());
            }
        }
        log::debug!("drawing {} in {}", shape.kind(), color);
        while self.shapes.len() >= self.max_shapes {
            self.shapes.pop_front();
        }
        self.shapes.push_back((shape.clone(), color));
        Ok(())
    }

    /// Writes the whole document next to the output file, then renames it
    /// into place so readers never see a half-written frame.
    fn present(&mut self) -> std::io::Result<()> {
        let Some(output) = &self.output else {
            return Ok(());
        };
        let mut staging = output.clone().into_os_string();
        staging.push(".tmp");
        let staging = PathBuf::from(staging);
        {
            let mut writer = std::io::BufWriter::new(std::fs::File::create(&staging)?);
            self.write_to(&mut writer)?;
        }
        std::fs::rename(&staging, output)?;
        log::debug!("presented {} shapes to {:?}", self.shapes.len(), output);
        Ok(())
    }
}
