use bytes::BytesMut;
use futures::SinkExt;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite};
use tokio::net::{TcpStream, ToSocketAddrs};
use tokio_util::codec::{Decoder, FramedWrite};
use tracing::{debug, info};

use crate::codec::{RequestEncoder, ResponseDecoder};
use crate::connection::READ_CHUNK_SIZE;
use crate::protocol::{HttpError, RequestMessage, ResponseMessage};

/// A completed response together with the number of bytes it arrived in.
#[derive(Debug, Clone)]
pub struct Download {
    response: ResponseMessage,
    received: usize,
}

impl Download {
    /// True only for the literal status code `200`.
    pub fn is_success(&self) -> bool {
        self.response.is_ok()
    }

    pub fn response(&self) -> &ResponseMessage {
        &self.response
    }

    /// Total bytes read from the connection.
    pub fn received(&self) -> usize {
        self.received
    }
}

/// Client side of one request/response exchange over a connected stream.
///
/// The request is written through a [`RequestEncoder`], then the response is
/// read in chunks of [`READ_CHUNK_SIZE`] bytes. A response announcing its
/// `Content-Length` completes as soon as the full body is buffered, any other
/// response completes when the server closes the connection.
#[derive(Debug)]
pub struct ResponseReceiver<R, W> {
    reader: R,
    framed_write: FramedWrite<W, RequestEncoder>,
    buffer: BytesMut,
    decoder: ResponseDecoder,
}

impl<R, W> ResponseReceiver<R, W>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            reader,
            framed_write: FramedWrite::new(writer, RequestEncoder::new()),
            buffer: BytesMut::with_capacity(READ_CHUNK_SIZE),
            decoder: ResponseDecoder::new(),
        }
    }

    /// Sends `request` and waits for the complete response.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Io`] when the connection fails and
    /// [`HttpError::Malformed`] when the received bytes don't decode.
    pub async fn exchange(mut self, request: RequestMessage) -> Result<Download, HttpError> {
        debug!(method = request.method(), path = request.path(), "sending request");
        self.framed_write.send(request).await?;
        self.receive().await
    }

    async fn receive(&mut self) -> Result<Download, HttpError> {
        let mut chunk = [0u8; READ_CHUNK_SIZE];
        let mut received = 0usize;

        loop {
            let read_size = self.reader.read(&mut chunk).await?;
            if read_size == 0 {
                debug!(received, "server closed the connection");
                let response = self.decoder.decode_eof(&mut self.buffer)?;
                return Self::finish(response, received);
            }

            received += read_size;
            self.buffer.extend_from_slice(&chunk[..read_size]);

            if let Some(response) = self.decoder.decode(&mut self.buffer)? {
                debug!(received, "response complete by Content-Length");
                return Self::finish(Some(response), received);
            }
        }
    }

    fn finish(response: Option<ResponseMessage>, received: usize) -> Result<Download, HttpError> {
        // decode_eof of ResponseDecoder always yields a message or an error
        let response = response.ok_or(crate::protocol::ParseError::MissingTerminator)?;
        info!(status = response.status_code(), received, "response received");
        Ok(Download { response, received })
    }
}

/// Connects to `addr` and runs one exchange over a fresh TCP connection.
///
/// # Errors
///
/// See [`ResponseReceiver::exchange`]; a failed connect is [`HttpError::Io`].
pub async fn fetch<A: ToSocketAddrs>(addr: A, request: RequestMessage) -> Result<Download, HttpError> {
    let stream = TcpStream::connect(addr).await?;
    let (reader, writer) = stream.into_split();
    ResponseReceiver::new(reader, writer).exchange(request).await
}
