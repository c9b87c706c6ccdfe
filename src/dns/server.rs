use crate::config::SharedConfig;
use crate::dns::resolver::Resolver;
use crate::error::Error;
use crate::records::SharedRecords;
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::UdpSocket;
use tracing::{debug, error, warn};
use trust_dns_proto::op::Message;

/// Largest datagram read from the socket. Anything beyond is truncated by the kernel.
pub const MAX_DATAGRAM_LEN: usize = 512;

/// A bound UDP DNS server.
pub struct Server {
    socket: Arc<UdpSocket>,
    resolver: Arc<Resolver>,
}

/// Bind the UDP socket from `config` and build a server answering from `records`.
///
/// # Errors
///
/// Returns an error if the socket can't be bound.
pub async fn new(config: SharedConfig, records: Arc<SharedRecords>) -> anyhow::Result<Server> {
    let socket = UdpSocket::bind(config.dns_udp_bind_addr).await?;
    Ok(Server {
        socket: Arc::new(socket),
        resolver: Arc::new(Resolver::new(records)),
    })
}

impl Server {
    /// The address the server socket is bound to.
    ///
    /// # Errors
    ///
    /// Returns the underlying socket error.
    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.socket.local_addr()
    }

    /// Receive datagrams forever, handing each one to its own task.
    ///
    /// Receive errors are logged and skipped: they never stop the loop.
    pub async fn block_until_done(self) {
        let mut buf = [0u8; MAX_DATAGRAM_LEN];
        loop {
            let (len, src) = match self.socket.recv_from(&mut buf).await {
                Ok(received) => received,
                Err(err) => {
                    warn!("error while reading from UDP: {err}");
                    continue;
                }
            };
            let datagram = buf[..len].to_vec();
            let socket = self.socket.clone();
            let resolver = self.resolver.clone();
            tokio::spawn(async move {
                handle_datagram(&socket, &resolver, src, &datagram).await;
            });
        }
    }
}

async fn handle_datagram(
    socket: &UdpSocket,
    resolver: &Resolver,
    src: SocketAddr,
    datagram: &[u8],
) {
    let reply = match respond(resolver, datagram) {
        Ok(Some(reply)) => reply,
        Ok(None) => {
            debug!("received DNS message with no question from {src}");
            return;
        }
        Err(err @ Error::DNSError(_)) => {
            debug!("dropping DNS message from {src}: {err}");
            return;
        }
        Err(err) => {
            error!("dropping query from {src}: {err}");
            return;
        }
    };
    if let Err(err) = socket.send_to(&reply, src).await {
        warn!("failed to send DNS response to {src}: {err}");
    }
}

/// Decode, resolve and encode one request. `Ok(None)` means nothing is sent back.
pub(crate) fn respond(resolver: &Resolver, datagram: &[u8]) -> Result<Option<Vec<u8>>, Error> {
    let request = Message::from_vec(datagram)?;
    match resolver.resolve(&request)? {
        Some(response) => Ok(Some(response.to_vec()?)),
        None => Ok(None),
    }
}
