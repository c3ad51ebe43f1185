use serde::{Deserialize, Serialize};
use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
use std::path::Path;

use crate::error::{Error, Result};
use crate::message::OPTIONS_OFFSET;

/// Well-known BOOTP/DHCP server port.
pub const DHCP_SERVER_PORT: u16 = 67;

/// Largest UDP payload a datagram can carry.
const MAX_DATAGRAM_SIZE: usize = 65535;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub bind_address: Ipv4Addr,
    pub port: u16,
    pub recv_buffer_size: usize,
    pub broadcast: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: Ipv4Addr::UNSPECIFIED,
            port: DHCP_SERVER_PORT,
            recv_buffer_size: 1500,
            broadcast: true,
        }
    }
}

impl Config {
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            config.validate()?;
            Ok(config)
        } else {
            let config = Config::default();
            config.save(path)?;
            Ok(config)
        }
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Rejects receive buffers too small for a minimal message or larger
    /// than any UDP datagram.
    pub fn validate(&self) -> Result<()> {
        if self.recv_buffer_size < OPTIONS_OFFSET {
            return Err(Error::InvalidConfig(format!(
                "recv_buffer_size must be at least {} bytes",
                OPTIONS_OFFSET
            )));
        }

        if self.recv_buffer_size > MAX_DATAGRAM_SIZE {
            return Err(Error::InvalidConfig(format!(
                "recv_buffer_size must not exceed {} bytes",
                MAX_DATAGRAM_SIZE
            )));
        }

        Ok(())
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::V4(SocketAddrV4::new(self.bind_address, self.port))
    }
}
