use std::net::SocketAddr;

use socket2::{Domain, Protocol, Socket, Type};
use tokio::net::UdpSocket;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::message::Message;

/// UDP endpoint that feeds datagrams to the codec and sends encoded replies.
///
/// Holds no protocol state; a malformed datagram is logged and dropped
/// without affecting the next one.
pub struct Listener {
    socket: UdpSocket,
    buffer_size: usize,
}

impl Listener {
    pub async fn bind(config: &Config) -> Result<Self> {
        config.validate()?;
        let socket = Self::create_socket(config)?;

        info!("Listening on {}", socket.local_addr()?);

        Ok(Self {
            socket,
            buffer_size: config.recv_buffer_size,
        })
    }

    fn create_socket(config: &Config) -> Result<UdpSocket> {
        let socket = Socket::new(Domain::IPV4, Type::DGRAM, Some(Protocol::UDP))
            .map_err(|error| Error::Socket(format!("Failed to create socket: {}", error)))?;

        socket
            .set_reuse_address(true)
            .map_err(|error| Error::Socket(format!("Failed to set SO_REUSEADDR: {}", error)))?;

        if config.broadcast {
            socket
                .set_broadcast(true)
                .map_err(|error| Error::Socket(format!("Failed to set SO_BROADCAST: {}", error)))?;
        }

        socket
            .set_nonblocking(true)
            .map_err(|error| Error::Socket(format!("Failed to set non-blocking: {}", error)))?;

        let bind_addr = config.socket_addr();
        socket.bind(&bind_addr.into()).map_err(|error| {
            Error::Socket(format!("Failed to bind to {}: {}", bind_addr, error))
        })?;

        let std_socket: std::net::UdpSocket = socket.into();
        let tokio_socket = UdpSocket::from_std(std_socket).map_err(|error| {
            Error::Socket(format!("Failed to convert to tokio socket: {}", error))
        })?;

        Ok(tokio_socket)
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.socket.local_addr()?)
    }

    /// Waits for one datagram and decodes it.
    ///
    /// The outer `Result` fails only on socket errors; the inner one carries
    /// the decode outcome for that datagram. A datagram longer than the
    /// configured buffer is rejected with [`Error::OversizedDatagram`].
    pub async fn recv(&self) -> Result<(SocketAddr, Result<Message>)> {
        // One spare byte tells a full buffer apart from a truncated read.
        let mut buffer = vec![0u8; self.buffer_size + 1];
        let (size, source) = self.socket.recv_from(&mut buffer).await?;
        if size > self.buffer_size {
            let limit = self.buffer_size;
            return Ok((source, Err(Error::OversizedDatagram { limit })));
        }
        Ok((source, Message::decode(&buffer[..size])))
    }

    /// Returns the next well-formed message, dropping malformed datagrams.
    pub async fn next_message(&self) -> Result<(SocketAddr, Message)> {
        loop {
            match self.recv().await? {
                (source, Ok(message)) => return Ok((source, message)),
                (source, Err(error)) => {
                    warn!("Dropping datagram from {}: {}", source, error);
                }
            }
        }
    }

    /// Encodes `message` and sends it to `target`.
    pub async fn send(&self, message: &Message, target: SocketAddr) -> Result<usize> {
        let data = message.encode()?;
        Ok(self.socket.send_to(&data, target).await?)
    }

    /// Logs every decoded message until the socket fails.
    pub async fn run(&self) -> Result<()> {
        info!("Ready");

        loop {
            match self.next_message().await {
                Ok((source, message)) => {
                    let message_type = message
                        .message_type()
                        .map_or_else(|| "BOOTP".to_string(), |kind| kind.to_string());
                    info!(
                        "{} from {} xid={:#010x} op={} chaddr={} options={}",
                        message_type,
                        source,
                        message.xid,
                        message.op,
                        message.hardware_address(),
                        message.options.len()
                    );
                }
                Err(error) => {
                    error!("Error receiving datagram: {}", error);
                    return Err(error);
                }
            }
        }
    }
}
