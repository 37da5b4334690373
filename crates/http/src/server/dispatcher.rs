use std::future::{Future, poll_fn};
use std::io;
use std::net::SocketAddr;
use std::pin::pin;
use std::sync::Arc;
use std::task::Poll;
use std::time::Duration;

use tokio::net::{TcpListener, TcpSocket, TcpStream};
use tokio::task::JoinSet;
use tracing::{Instrument, debug, error, info, info_span, warn};

use crate::connection::HttpConnection;
use crate::handler::Handler;
use crate::protocol::HttpError;
use crate::server::ServerError;

/// Tunables of the dispatch loop.
#[derive(Debug, Clone)]
pub struct DispatcherConfig {
    /// Listen backlog of every listening socket.
    pub backlog: u32,
    /// Upper bound of one readiness poll; the reap pass runs at least this often.
    pub tick: Duration,
    /// Admission limit on simultaneously running workers, `None` for unbounded.
    pub max_connections: Option<usize>,
    /// How long in-flight workers may run after shutdown before they are aborted.
    pub drain_timeout: Duration,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self { backlog: 16, tick: Duration::from_millis(20), max_connections: None, drain_timeout: Duration::from_secs(5) }
    }
}

/// Resolves `hostname:port` into the local addresses to listen on.
///
/// # Errors
///
/// Returns [`ServerError::Resolve`] if the lookup fails or yields nothing.
pub async fn resolve(hostname: &str, port: u16) -> Result<Vec<SocketAddr>, ServerError> {
    let addrs: Vec<SocketAddr> = tokio::net::lookup_host((hostname, port))
        .await
        .map_err(|source| ServerError::Resolve { host: hostname.to_string(), port, source })?
        .collect();

    if addrs.is_empty() {
        let source = io::Error::new(io::ErrorKind::NotFound, "no address found");
        return Err(ServerError::Resolve { host: hostname.to_string(), port, source });
    }

    Ok(addrs)
}

/// Multi-address listen loop of the server.
///
/// The dispatcher owns one listening socket per local address. A single task
/// polls all of them for readiness, accepts connections, spawns one
/// [`HttpConnection`] worker per connection and reaps finished workers without
/// ever blocking on them.
#[derive(Debug)]
pub struct Dispatcher {
    listeners: Vec<TcpListener>,
    config: DispatcherConfig,
    workers: JoinSet<Result<(), HttpError>>,
}

impl Dispatcher {
    /// Creates a listening socket for every address in `addrs`.
    ///
    /// A socket that can't be created, bound or put into listening state is
    /// logged and skipped.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::NoListeners`] if no address could be listened on.
    pub fn bind(addrs: &[SocketAddr], config: DispatcherConfig) -> Result<Self, ServerError> {
        let mut listeners = Vec::with_capacity(addrs.len());
        for addr in addrs {
            match listen(*addr, config.backlog) {
                Ok(listener) => {
                    let local_addr = listener.local_addr().unwrap_or(*addr);
                    info!(addr = %local_addr, "start listening");
                    listeners.push(listener);
                }
                Err(e) => warn!(%addr, cause = %e, "can't listen on address, skipped"),
            }
        }

        if listeners.is_empty() {
            return Err(ServerError::NoListeners { attempted: addrs.len() });
        }

        Ok(Self { listeners, config, workers: JoinSet::new() })
    }

    /// Addresses of the listening sockets.
    pub fn local_addrs(&self) -> Vec<SocketAddr> {
        self.listeners.iter().filter_map(|listener| listener.local_addr().ok()).collect()
    }

    /// Number of workers that have been spawned and not yet reaped.
    pub fn pending(&self) -> usize {
        self.workers.len()
    }

    /// Runs the dispatch loop forever.
    pub async fn run<H>(self, handler: Arc<H>)
    where
        H: Handler + Sync + 'static,
    {
        self.run_until(handler, std::future::pending::<()>()).await;
    }

    /// Runs the dispatch loop until `shutdown` resolves, then stops accepting
    /// and waits up to `drain_timeout` for the in-flight workers. Workers still
    /// running after that are aborted.
    pub async fn run_until<H, S>(mut self, handler: Arc<H>, shutdown: S)
    where
        H: Handler + Sync + 'static,
        S: Future<Output = ()>,
    {
        let mut shutdown = pin!(shutdown);

        loop {
            if poll_once(shutdown.as_mut()).await {
                info!(pending = self.workers.len(), "shutdown requested, stop accepting");
                break;
            }

            self.tick(&handler).await;
        }

        let drain_timeout = self.config.drain_timeout;
        if tokio::time::timeout(drain_timeout, self.drain()).await.is_err() {
            warn!(pending = self.workers.len(), ?drain_timeout, "connections still open, aborting them");
            self.workers.abort_all();
            self.drain().await;
        }
        info!("all connections finished");
    }

    async fn drain(&mut self) {
        while let Some(result) = self.workers.join_next().await {
            report(result);
        }
    }

    /// One iteration of the loop: a bounded readiness poll, the accepts it
    /// allows and a reap pass.
    async fn tick<H>(&mut self, handler: &Arc<H>)
    where
        H: Handler + Sync + 'static,
    {
        if self.at_capacity() {
            tokio::time::sleep(self.config.tick).await;
        } else if let Ok(accepted) = tokio::time::timeout(self.config.tick, self.poll_ready()).await {
            for result in accepted {
                match result {
                    Ok((stream, peer)) => self.spawn_worker(stream, peer, handler),
                    Err(e) => warn!(cause = %e, "failed to accept"),
                }
            }
        }

        self.reap();
    }

    fn at_capacity(&self) -> bool {
        self.config.max_connections.is_some_and(|max| self.workers.len() >= max)
    }

    /// Waits until at least one listener is ready and accepts one connection
    /// from every ready listener.
    async fn poll_ready(&self) -> Vec<io::Result<(TcpStream, SocketAddr)>> {
        poll_fn(|cx| {
            let accepted: Vec<_> = self
                .listeners
                .iter()
                .filter_map(|listener| match listener.poll_accept(cx) {
                    Poll::Ready(result) => Some(result),
                    Poll::Pending => None,
                })
                .collect();

            if accepted.is_empty() { Poll::Pending } else { Poll::Ready(accepted) }
        })
        .await
    }

    fn spawn_worker<H>(&mut self, stream: TcpStream, peer: SocketAddr, handler: &Arc<H>)
    where
        H: Handler + Sync + 'static,
    {
        let local = stream.local_addr().map_or_else(|_e| "unknown".to_string(), |addr| addr.to_string());
        info!(%peer, %local, "accepting connection");

        let handler = Arc::clone(handler);
        let span = info_span!("connection", %peer);
        self.workers.spawn(
            async move {
                let (reader, writer) = stream.into_split();
                HttpConnection::new(reader, writer).process(handler).await
            }
            .instrument(span),
        );
    }

    /// Removes every finished worker without waiting for the others.
    fn reap(&mut self) {
        while let Some(result) = self.workers.try_join_next() {
            report(result);
        }
    }
}

fn listen(addr: SocketAddr, backlog: u32) -> io::Result<TcpListener> {
    let socket = if addr.is_ipv4() { TcpSocket::new_v4()? } else { TcpSocket::new_v6()? };
    socket.set_reuseaddr(true)?;
    #[cfg(unix)]
    socket.set_reuseport(true)?;
    socket.bind(addr)?;
    socket.listen(backlog)
}

fn report(result: Result<Result<(), HttpError>, tokio::task::JoinError>) {
    match result {
        Ok(Ok(())) => debug!("finished process, connection shutdown"),
        Ok(Err(e)) => error!("connection has error, cause {}, connection shutdown", e),
        Err(e) if e.is_cancelled() => debug!("connection aborted"),
        Err(e) => error!(cause = %e, "connection task failed"),
    }
}

/// Polls `future` exactly once.
async fn poll_once<F>(mut future: std::pin::Pin<&mut F>) -> bool
where
    F: Future<Output = ()>,
{
    poll_fn(|cx| Poll::Ready(future.as_mut().poll(cx).is_ready())).await
}
