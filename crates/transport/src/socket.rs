use std::io::{Read, Write};
use std::os::unix::net::UnixStream;

use serde_json::Value;
use tracing::{debug, trace};

use crate::config::TransportConfig;
use crate::error::TransportError;
use crate::Transport;

/// Largest reply frame the client will accept, in bytes.
///
/// A full-cluster file listing is the biggest reply in practice and stays
/// well below this; anything larger indicates a corrupted length prefix.
pub const MAX_REPLY_LENGTH: u64 = 64 * 1024 * 1024;

/// Unix-socket client for the cluster manager's control socket.
///
/// Each [`execute`](Transport::execute) call opens a fresh connection,
/// writes one length-prefixed request frame, reads one length-prefixed
/// reply frame, and decodes it as JSON. Frames carry a 4-byte little-endian
/// length prefix in both directions. The configured timeout applies to the
/// read and write halves of every exchange.
#[derive(Clone, Debug)]
pub struct SocketTransport {
    config: TransportConfig,
}

impl SocketTransport {
    /// Creates a client over the given configuration.
    #[must_use]
    pub const fn new(config: TransportConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration this client connects with.
    #[must_use]
    pub const fn config(&self) -> &TransportConfig {
        &self.config
    }

    fn connect(&self) -> Result<UnixStream, TransportError> {
        let path = self.config.socket_path();
        let stream = UnixStream::connect(path).map_err(|source| TransportError::Connect {
            path: path.to_path_buf(),
            source,
        })?;
        let timeout = Some(self.config.timeout());
        stream.set_read_timeout(timeout)?;
        stream.set_write_timeout(timeout)?;
        Ok(stream)
    }
}

impl Transport for SocketTransport {
    fn execute(&mut self, request: &str) -> Result<Value, TransportError> {
        let mut stream = self.connect()?;
        debug!(socket = %self.config.socket_path().display(), len = request.len(), "sending control request");
        write_frame(&mut stream, request.as_bytes())?;
        let reply = read_frame(&mut stream)?;
        trace!(len = reply.len(), "received control reply");
        serde_json::from_slice(&reply).map_err(TransportError::Decode)
    }
}

/// Writes one length-prefixed frame.
pub(crate) fn write_frame<W: Write>(writer: &mut W, payload: &[u8]) -> Result<(), TransportError> {
    let length = u32::try_from(payload.len()).map_err(|_| TransportError::FrameTooLarge {
        length: payload.len() as u64,
        max: MAX_REPLY_LENGTH,
    })?;
    writer.write_all(&length.to_le_bytes())?;
    writer.write_all(payload)?;
    writer.flush()?;
    Ok(())
}

/// Reads one length-prefixed frame, enforcing [`MAX_REPLY_LENGTH`].
pub(crate) fn read_frame<R: Read>(reader: &mut R) -> Result<Vec<u8>, TransportError> {
    let mut prefix = [0u8; 4];
    reader.read_exact(&mut prefix)?;
    let length = u64::from(u32::from_le_bytes(prefix));
    if length > MAX_REPLY_LENGTH {
        return Err(TransportError::FrameTooLarge { length, max: MAX_REPLY_LENGTH });
    }
    let length = usize::try_from(length)
        .map_err(|_| TransportError::FrameTooLarge { length, max: MAX_REPLY_LENGTH })?;
    let mut payload = vec![0u8; length];
    reader.read_exact(&mut payload)?;
    Ok(payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::os::unix::net::UnixListener;
    use std::thread;
    use std::time::Duration;

    use serde_json::json;

    #[test]
    fn frames_round_trip_through_a_buffer() {
        let mut buffer = Vec::new();
        write_frame(&mut buffer, b"get_nodes").unwrap();

        let mut cursor = Cursor::new(buffer);
        assert_eq!(read_frame(&mut cursor).unwrap(), b"get_nodes");
    }

    #[test]
    fn oversized_length_prefixes_are_rejected() {
        let mut frame = Vec::new();
        frame.extend_from_slice(&u32::MAX.to_le_bytes());
        let mut cursor = Cursor::new(frame);

        let err = read_frame(&mut cursor).unwrap_err();
        assert!(matches!(err, TransportError::FrameTooLarge { .. }));
    }

    #[test]
    fn execute_exchanges_one_frame_each_way() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("control.sock");
        let listener = UnixListener::bind(&path).unwrap();

        let server = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let request = read_frame(&mut stream).unwrap();
            assert_eq!(request, b"get_health node01");
            let reply = serde_json::to_vec(&json!({"node01": {"status": "connected"}})).unwrap();
            write_frame(&mut stream, &reply).unwrap();
        });

        let config = TransportConfig::builder()
            .socket_path(&path)
            .timeout(Duration::from_secs(5))
            .build();
        let mut transport = SocketTransport::new(config);
        let reply = transport.execute("get_health node01").unwrap();

        assert_eq!(reply, json!({"node01": {"status": "connected"}}));
        server.join().unwrap();
    }

    #[test]
    fn connect_failure_names_the_socket_path() {
        let config = TransportConfig::builder()
            .socket_path("/nonexistent/control.sock")
            .build();
        let mut transport = SocketTransport::new(config);

        let err = transport.execute("get_nodes").unwrap_err();
        assert!(matches!(err, TransportError::Connect { .. }));
        assert!(err.to_string().contains("/nonexistent/control.sock"));
    }
}
