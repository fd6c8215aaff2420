use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Compiled-in default path of the manager's control socket.
pub const DEFAULT_SOCKET_PATH: &str = "/var/run/cluster/control.sock";

/// Environment variable overriding the control socket path.
pub const SOCKET_PATH_ENV: &str = "CLUSTERCTL_SOCKET";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Immutable configuration for a [`SocketTransport`](crate::SocketTransport).
///
/// Built through [`TransportConfigBuilder`]; once constructed the values
/// never change, so a configuration can be shared freely across calls.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TransportConfig {
    socket_path: PathBuf,
    timeout: Duration,
}

impl TransportConfig {
    /// Creates a new [`TransportConfigBuilder`].
    #[must_use]
    pub fn builder() -> TransportConfigBuilder {
        TransportConfigBuilder::default()
    }

    /// Returns the control socket path.
    #[must_use]
    pub fn socket_path(&self) -> &Path {
        &self.socket_path
    }

    /// Returns the per-call I/O timeout applied to connect, read, and write.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Builder assembling a [`TransportConfig`].
#[derive(Clone, Debug, Default)]
pub struct TransportConfigBuilder {
    socket_path: Option<PathBuf>,
    timeout: Option<Duration>,
}

impl TransportConfigBuilder {
    /// Overrides the control socket path.
    #[must_use]
    pub fn socket_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.socket_path = Some(path.into());
        self
    }

    /// Overrides the per-call I/O timeout.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Finalises the configuration.
    ///
    /// When no explicit path was supplied, the [`SOCKET_PATH_ENV`]
    /// environment variable is consulted before falling back to
    /// [`DEFAULT_SOCKET_PATH`].
    #[must_use]
    pub fn build(self) -> TransportConfig {
        let socket_path = self
            .socket_path
            .or_else(|| env::var_os(SOCKET_PATH_ENV).map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SOCKET_PATH));
        TransportConfig {
            socket_path,
            timeout: self.timeout.unwrap_or(DEFAULT_TIMEOUT),
        }
    }
}
