use crate::color::Color;
use crate::shape::Shape;

/// Consumer of parsed shapes. Implementations own the drawing surface, so a
/// renderer is only ever driven by one request at a time.
pub trait Renderer {
    fn render(&mut self, shape: &Shape, color: Color) -> std::io::Result<()>;

    /// Makes everything rendered so far visible.
    fn present(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
