use anyhow::Context;
use clap::Parser;
use concolor_clap::ColorChoice;
use drawsrv::chain::DispatchChain;
use drawsrv::color::{Color, Palette};
use drawsrv::server::Server;
use drawsrv::svg::SvgCanvas;
use env_logger::WriteStyle;
use std::net::TcpListener;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MainError {
    #[error(transparent)]
    AnyhowError(#[from] anyhow::Error),
    #[error(transparent)]
    IOError(#[from] std::io::Error),
}

type Result<T> = std::result::Result<T, MainError>;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[clap(color = concolor_clap::color_choice())]
struct Args {
    /// address to listen on
    #[arg(long, default_value = "0.0.0.0:8080")]
    bind: String,
    /// SVG file the canvas is published to after every drawn shape
    #[arg(long, default_value = "drawing.svg")]
    output: PathBuf,
    /// canvas width
    #[arg(long, default_value_t = drawsrv::shape::WIDTH)]
    width: u32,
    /// canvas height
    #[arg(long, default_value_t = drawsrv::shape::HEIGHT)]
    height: u32,
    /// extra color names, e.g. --palette magenta=#ff00ff
    #[arg(long, value_name = "NAME=#RRGGBB", value_parser = drawsrv::color::parse_palette_entry)]
    palette: Vec<(String, Color)>,
    /// most shapes kept on the canvas, oldest are dropped first
    #[arg(long, default_value_t = drawsrv::svg::MAX_SHAPES)]
    max_shapes: usize,
    /// seconds to wait for a client to send its command
    #[arg(long, value_name = "SECONDS")]
    read_timeout: Option<u64>,
    #[command(flatten)]
    color: concolor_clap::Color,
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,
}

fn run(args: Args) -> Result<()> {
    let palette = args
        .palette
        .iter()
        .fold(Palette::default(), |palette, (name, color)| {
            palette.with_color(name, *color)
        });
    let canvas = SvgCanvas::new(args.width, args.height)
        .with_max_shapes(args.max_shapes)
        .with_output(args.output.clone());
    let listener = TcpListener::bind(&args.bind)
        .with_context(|| format!("Error binding {}", args.bind))?;
    log::info!(
        "Server is running on {}, drawing to {:?}",
        listener.local_addr()?,
        args.output
    );
    let mut server = Server::new(DispatchChain::standard(), palette, canvas)
        .with_read_timeout(args.read_timeout.map(Duration::from_secs));
    server.serve(&listener)?;
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .write_style(match args.color.color {
            ColorChoice::Always => WriteStyle::Always,
            ColorChoice::Auto => WriteStyle::Auto,
            ColorChoice::Never => WriteStyle::Never,
        })
        .init();
    log::debug!("{:?}", args);
    run(args)?;
    Ok(())
}
