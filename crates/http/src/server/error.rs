use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("can't resolve {host}:{port}: {source}")]
    Resolve { host: String, port: u16, source: io::Error },

    #[error("no listening socket could be created, {attempted} address(es) tried")]
    NoListeners { attempted: usize },
}
