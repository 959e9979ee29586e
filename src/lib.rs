pub mod chain;
pub mod color;
pub mod parse;
pub mod render;
pub mod server;
pub mod shape;
pub mod svg;
