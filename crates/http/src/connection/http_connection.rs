use std::error::Error;
use std::sync::Arc;

use bytes::BytesMut;
use futures::SinkExt;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio_util::codec::{Decoder, FramedWrite};
use tracing::{debug, error, info, warn};

use crate::codec::{RequestDecoder, ResponseEncoder};
use crate::handler::Handler;
use crate::protocol::{HttpError, ParseError, RequestMessage, ResponseMessage};

/// Size of a single read from the socket.
pub const READ_CHUNK_SIZE: usize = 256;

/// Server side worker for one accepted connection.
///
/// `HttpConnection` runs exactly one request/response exchange:
/// - reads until the header terminator has arrived or the peer closes
/// - decodes the request, answering `400` when it is malformed
/// - hands valid requests to the [`Handler`], answering `500` when it fails
/// - writes the encoded response and shuts the connection down
///
/// There is no keep-alive and no read timeout: a peer that never sends the
/// terminator and never closes keeps the worker waiting.
///
/// # Type Parameters
///
/// * `R`: The async readable stream type
/// * `W`: The async writable stream type
#[derive(Debug)]
pub struct HttpConnection<R, W> {
    reader: R,
    framed_write: FramedWrite<W, ResponseEncoder>,
    buffer: BytesMut,
    decoder: RequestDecoder,
}

impl<R, W> HttpConnection<R, W>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            reader,
            framed_write: FramedWrite::new(writer, ResponseEncoder::new()),
            buffer: BytesMut::with_capacity(READ_CHUNK_SIZE),
            decoder: RequestDecoder::new(),
        }
    }

    /// Processes the connection to completion.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] when reading, writing or shutting down the socket
    /// fails. Malformed requests are not errors, they are answered with `400`.
    pub async fn process<H>(mut self, handler: Arc<H>) -> Result<(), HttpError>
    where
        H: Handler,
    {
        let response = match self.read_request().await {
            Ok(request) => Self::handle(request, handler.as_ref()).await,
            Err(HttpError::Malformed { source }) if !source.is_io() => {
                warn!(cause = %source, "malformed request");
                ResponseMessage::with_status("400")
            }
            Err(e) => return Err(e),
        };

        let status = response.status_code().to_string();
        self.framed_write.send(response).await?;
        self.framed_write.get_mut().shutdown().await?;
        debug!(%status, "response sent, connection closed");
        Ok(())
    }

    async fn read_request(&mut self) -> Result<RequestMessage, HttpError> {
        let mut chunk = [0u8; READ_CHUNK_SIZE];

        loop {
            if let Some(request) = self.decoder.decode(&mut self.buffer)? {
                return Ok(request);
            }

            let read_size = self.reader.read(&mut chunk).await?;
            if read_size == 0 {
                debug!(buffered = self.buffer.len(), "peer closed before sending a complete head");
                return match self.decoder.decode_eof(&mut self.buffer)? {
                    Some(request) => Ok(request),
                    None => Err(ParseError::MissingTerminator.into()),
                };
            }

            self.buffer.extend_from_slice(&chunk[..read_size]);
        }
    }

    async fn handle<H>(request: RequestMessage, handler: &H) -> ResponseMessage
    where
        H: Handler,
    {
        info!(method = request.method(), path = request.path(), "handling request");
        match handler.call(request).await {
            Ok(response) => response,
            Err(e) => {
                let cause: Box<dyn Error + Send + Sync> = e.into();
                error!(%cause, "handler failed, answering 500");
                ResponseMessage::with_status("500")
            }
        }
    }
}
