//! UDP command transport.
//!
//! Implements [`DatagramPort`] over a non-blocking `std::net::UdpSocket`
//! (ESP-IDF ships lwIP behind the std socket API, so the same code runs on
//! target and host).  Each successful receive records the sender; echoes
//! and status replies go back to that most recent peer.

use std::io::ErrorKind;
use std::net::{Ipv4Addr, SocketAddr, UdpSocket};

use log::{info, warn};

use crate::app::ports::DatagramPort;
use crate::error::TransportError;

pub struct UdpTransport {
    socket: UdpSocket,
    peer: Option<SocketAddr>,
}

impl UdpTransport {
    /// Bind to `0.0.0.0:port` and switch to non-blocking mode.
    pub fn bind(port: u16) -> Result<Self, TransportError> {
        Self::bind_addr(SocketAddr::from((Ipv4Addr::UNSPECIFIED, port)))
    }

    pub fn bind_addr(addr: SocketAddr) -> Result<Self, TransportError> {
        let socket = UdpSocket::bind(addr).map_err(|e| {
            warn!("udp: bind {} failed: {}", addr, e);
            TransportError::BindFailed
        })?;
        socket.set_nonblocking(true).map_err(|e| {
            warn!("udp: set_nonblocking failed: {}", e);
            TransportError::BindFailed
        })?;
        info!("udp: listening on {}", addr);
        Ok(Self { socket, peer: None })
    }

    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.socket.local_addr().ok()
    }

    /// Sender of the most recent datagram.
    pub fn peer(&self) -> Option<SocketAddr> {
        self.peer
    }
}

impl DatagramPort for UdpTransport {
    fn try_recv(&mut self, buf: &mut [u8]) -> Result<Option<usize>, TransportError> {
        match self.socket.recv_from(buf) {
            Ok((len, from)) => {
                self.peer = Some(from);
                Ok(Some(len))
            }
            Err(e) if e.kind() == ErrorKind::WouldBlock => Ok(None),
            Err(e) => {
                warn!("udp: recv failed: {}", e);
                Err(TransportError::ReceiveFailed)
            }
        }
    }

    fn reply(&mut self, data: &[u8]) -> Result<(), TransportError> {
        let peer = self.peer.ok_or(TransportError::NoPeer)?;
        self.socket.send_to(data, peer).map_err(|e| {
            warn!("udp: send to {} failed: {}", peer, e);
            TransportError::SendFailed
        })?;
        Ok(())
    }
}
