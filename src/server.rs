use crate::chain::DispatchChain;
use crate::color::Palette;
use crate::parse::ParseError;
use crate::render::Renderer;
use crate::shape::Shape;
use std::io::{BufRead, BufReader, Read};
use std::net::TcpListener;
use std::time::Duration;

/// Upper bound on a single request line.
pub const MAX_REQUEST_BYTES: u64 = 64 * 1024;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Drawn(Shape),
    Rejected(ParseError),
}

pub struct Server<R> {
    chain: DispatchChain,
    palette: Palette,
    renderer: R,
    read_timeout: Option<Duration>,
}

impl<R: Renderer> Server<R> {
    pub fn new(chain: DispatchChain, palette: Palette, renderer: R) -> Self {
        Self {
            chain,
            palette,
            renderer,
            read_timeout: None,
        }
    }

    pub fn with_read_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.read_timeout = timeout;
        self
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Parses one command and, if it is valid, draws and presents it.
    ///
    /// Rejected commands are logged and returned, they never end the server.
    pub fn handle_request(&mut self, request: &str) -> std::io::Result<Outcome> {
        log::info!("received: {:?}", request);
        match self.chain.handle(request) {
            Ok(shape) => {
                let color = self.palette.resolve(shape.color().as_str());
                self.renderer.render(&shape, color)?;
                self.renderer.present()?;
                Ok(Outcome::Drawn(shape))
            }
            Err(err) => {
                log::warn!("{}", err);
                Ok(Outcome::Rejected(err))
            }
        }
    }

    pub fn handle_connection(&mut self, stream: impl Read) -> std::io::Result<Outcome> {
        let mut reader = BufReader::new(stream.take(MAX_REQUEST_BYTES));
        let mut line = String::new();
        reader.read_line(&mut line)?;
        if !line.ends_with('\n') && line.len() as u64 >= MAX_REQUEST_BYTES {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("request longer than {} bytes", MAX_REQUEST_BYTES),
            ));
        }
        let request = line.trim_end_matches(['\r', '\n']);
        self.handle_request(request)
    }

    /// Serves connections one after another until the listener fails.
    pub fn serve(&mut self, listener: &TcpListener) -> std::io::Result<()> {
        for stream in listener.incoming() {
            let stream = match stream {
                Ok(stream) => stream,
                Err(err) => {
                    log::warn!("accept failed: {}", err);
                    continue;
                }
            };
            match stream.peer_addr() {
                Ok(peer) => log::debug!("connection from {}", peer),
                Err(err) => log::debug!("connection from unknown peer: {}", err),
            }
            if let Err(err) = stream.set_read_timeout(self.read_timeout) {
                log::warn!("could not set read timeout: {}", err);
            }
            if let Err(err) = self.handle_connection(&stream) {
                log::warn!("connection failed: {}", err);
            }
        }
        Ok(())
    }
}
