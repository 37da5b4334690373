use bytes::BytesMut;
use criterion::{Criterion, criterion_group, criterion_main};
use futures::executor::block_on;
use plain_http::codec::{RequestDecoder, ResponseDecoder, ResponseEncoder, decode_request};
use plain_http::connection::HttpConnection;
use plain_http::handler::make_handler;
use plain_http::protocol::{RequestMessage, ResponseMessage};
use std::convert::Infallible;
use std::hint::black_box;
use std::io;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tokio::io::{AsyncRead, AsyncWrite, ReadBuf};
use tokio_util::codec::{Decoder, Encoder};

const REQUEST: &[u8] = b"GET /index.html HTTP/1.0\r\nHost: localhost:8080\r\nUser-Agent: bench\r\nAccept: */*\r\n\r\n";

// In-memory socket: serves `read_data` once, then reports EOF
#[derive(Clone)]
struct MockIO {
    read_data: Vec<u8>,
    write_data: Vec<u8>,
    read_pos: usize,
}

impl MockIO {
    fn new(read_data: Vec<u8>) -> Self {
        Self { read_data, write_data: Vec::new(), read_pos: 0 }
    }
}

impl AsyncRead for MockIO {
    fn poll_read(mut self: Pin<&mut Self>, _cx: &mut Context<'_>, buf: &mut ReadBuf<'_>) -> Poll<io::Result<()>> {
        let remaining = &self.read_data[self.read_pos..];
        let amt = remaining.len().min(buf.remaining());
        buf.put_slice(&remaining[..amt]);
        self.read_pos += amt;
        Poll::Ready(Ok(()))
    }
}

impl AsyncWrite for MockIO {
    fn poll_write(mut self: Pin<&mut Self>, _cx: &mut Context<'_>, buf: &[u8]) -> Poll<Result<usize, io::Error>> {
        self.write_data.extend_from_slice(buf);
        Poll::Ready(Ok(buf.len()))
    }

    fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Result<(), io::Error>> {
        Poll::Ready(Ok(()))
    }

    fn poll_shutdown(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Result<(), io::Error>> {
        Poll::Ready(Ok(()))
    }
}

async fn hello(_req: RequestMessage) -> Result<ResponseMessage, Infallible> {
    let mut response = ResponseMessage::with_status("200").with_body("Hello World!");
    response.set_content_length();
    Ok(response)
}

fn bench_request_decoder(c: &mut Criterion) {
    c.bench_function("decode_request", |b| {
        b.iter(|| black_box(decode_request(black_box(REQUEST)).unwrap()));
    });

    // terminator arrives in the last read, every read rescans the buffer
    c.bench_function("decode_request_streaming", |b| {
        b.iter(|| {
            let mut decoder = RequestDecoder::new();
            let mut bytes = BytesMut::new();
            for chunk in REQUEST.chunks(16) {
                bytes.extend_from_slice(chunk);
                if let Some(request) = decoder.decode(&mut bytes).unwrap() {
                    black_box(request);
                }
            }
        });
    });
}

fn bench_response_codec(c: &mut Criterion) {
    let mut response = ResponseMessage::with_status("200")
        .with_header("Connection", "close")
        .with_header("Content-Type", "text/html")
        .with_body(vec![b'x'; 4096]);
    response.set_content_length();

    c.bench_function("encode_response", |b| {
        b.iter(|| {
            let mut encoder = ResponseEncoder::new();
            let mut bytes = BytesMut::new();
            encoder.encode(response.clone(), &mut bytes).unwrap();
            black_box(bytes);
        });
    });

    let wire = plain_http::codec::encode_response(&response);
    c.bench_function("decode_response_streaming", |b| {
        b.iter(|| {
            let mut decoder = ResponseDecoder::new();
            let mut bytes = BytesMut::new();
            for chunk in wire.chunks(256) {
                bytes.extend_from_slice(chunk);
                if let Some(response) = decoder.decode(&mut bytes).unwrap() {
                    black_box(response);
                }
            }
        });
    });
}

fn bench_http_connection(c: &mut Criterion) {
    let handler = Arc::new(make_handler(hello));

    c.bench_function("process_request", |b| {
        b.iter(|| {
            let mock_io = MockIO::new(REQUEST.to_vec());
            let (reader, writer) = (mock_io.clone(), mock_io);
            let connection = HttpConnection::new(reader, writer);
            block_on(connection.process(Arc::clone(&handler))).unwrap();
        });
    });
}

criterion_group!(benches, bench_request_decoder, bench_response_codec, bench_http_connection);
criterion_main!(benches);
