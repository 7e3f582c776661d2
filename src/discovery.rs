//! Passive discovery of a thermostat on the local network.
//!
//! The device announces itself by broadcasting a UDP datagram to port
//! 11000 roughly every ten seconds, payload `ONE <device id>`. This
//! path is independent of the portal session.

use std::io::ErrorKind;
use std::net::UdpSocket;
use std::time::Duration;

use tracing::debug;

use crate::Result;
use crate::types::DiscoveredOne;

/// Port the thermostat broadcasts its announcements to.
pub const DISCOVERY_PORT: u16 = 11000;

const ANNOUNCE_PREFIX: &str = "ONE ";
const ANNOUNCE_LEN: usize = 37;

/// Wait for a single broadcast announcement.
///
/// Blocks up to `timeout`. A timeout, or a datagram that is not an
/// announcement, is a normal "nothing found" `Ok(None)`; only socket
/// failures are errors. The socket is released on every exit path.
pub fn discover(timeout: Duration) -> Result<Option<DiscoveredOne>> {
    let socket = UdpSocket::bind(("0.0.0.0", DISCOVERY_PORT))?;
    wait_for_announcement(socket, timeout)
}

fn wait_for_announcement(socket: UdpSocket, timeout: Duration) -> Result<Option<DiscoveredOne>> {
    socket.set_broadcast(true)?;
    socket.set_read_timeout(Some(timeout))?;

    let mut buf = [0u8; ANNOUNCE_LEN];
    let (len, source) = match socket.recv_from(&mut buf) {
        Ok(received) => received,
        Err(e) if matches!(e.kind(), ErrorKind::WouldBlock | ErrorKind::TimedOut) => {
            debug!(?timeout, "no announcement received");
            return Ok(None);
        }
        Err(e) => return Err(e.into()),
    };

    let message = String::from_utf8_lossy(&buf[..len]);
    let Some(rest) = message.strip_prefix(ANNOUNCE_PREFIX) else {
        debug!(payload = %message, %source, "ignoring unrecognized broadcast");
        return Ok(None);
    };
    let Some(device_id) = rest.split_whitespace().next() else {
        return Ok(None);
    };

    debug!(device_id = %device_id, %source, "discovered thermostat");
    Ok(Some(DiscoveredOne {
        address: source.ip(),
        device_id: device_id.to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use std::net::UdpSocket;
    use std::time::Duration;

    use super::wait_for_announcement;

    // Bind to an ephemeral port so parallel tests never collide; the
    // datagram queues in the receive buffer before the wait starts.
    fn listener_with_payload(payload: &[u8]) -> UdpSocket {
        let socket = UdpSocket::bind("127.0.0.1:0").unwrap();
        let port = socket.local_addr().unwrap().port();
        let sender = UdpSocket::bind("127.0.0.1:0").unwrap();
        sender.send_to(payload, ("127.0.0.1", port)).unwrap();
        socket
    }

    #[test]
    fn announcement_yields_device_id_and_source() {
        let socket = listener_with_payload(b"ONE 6808-1401-3109_15-30-001-544");
        let found = wait_for_announcement(socket, Duration::from_secs(5))
            .unwrap()
            .expect("should discover the announced device");

        assert_eq!(found.device_id, "6808-1401-3109_15-30-001-544");
        assert!(found.address.is_loopback());
    }

    #[test]
    fn unrecognized_payload_yields_none() {
        let socket = listener_with_payload(b"TWO 6808-1401-3109_15-30-001-544");
        let found = wait_for_announcement(socket, Duration::from_secs(5)).unwrap();
        assert_eq!(found, None);
    }

    #[test]
    fn prefix_without_device_id_yields_none() {
        let socket = listener_with_payload(b"ONE ");
        let found = wait_for_announcement(socket, Duration::from_secs(5)).unwrap();
        assert_eq!(found, None);
    }

    #[test]
    fn timeout_yields_none_not_error() {
        let socket = UdpSocket::bind("127.0.0.1:0").unwrap();
        let found = wait_for_announcement(socket, Duration::from_millis(200)).unwrap();
        assert_eq!(found, None);
    }
}
