#![deny(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(missing_docs)]

//! Command-line front end for the cluster control plane.
//!
//! [`run`] parses the argument vector, configures a
//! [`SocketTransport`](transport::SocketTransport) from the global options,
//! dispatches to the matching [`ClusterClient`](control::ClusterClient)
//! operation, and renders the result as pretty-printed JSON on stdout.
//! Diagnostics go to stderr; the returned exit code distinguishes usage
//! errors (2) and missing nodes (3) from runtime failures (1).

mod frontend;

pub use frontend::{Action, action, build_command, transport_config};

use std::ffi::OsString;
use std::io::{self, Write};

use clap::error::ErrorKind;
use control::{ClusterClient, ControlError};
use serde_json::Value;
use tracing_subscriber::EnvFilter;
use transport::{SocketTransport, Transport};

/// Runs the CLI over the provided argument iterator and output handles,
/// returning the process exit code.
pub fn run<I, S, Out, Err>(arguments: I, stdout: &mut Out, stderr: &mut Err) -> i32
where
    I: IntoIterator<Item = S>,
    S: Into<OsString> + Clone,
    Out: Write,
    Err: Write,
{
    init_tracing();

    let matches = match build_command().try_get_matches_from(arguments) {
        Ok(matches) => matches,
        Err(error) => {
            let rendered = error.render();
            return match error.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                    let _ = write!(stdout, "{rendered}");
                    0
                }
                _ => {
                    let _ = write!(stderr, "{rendered}");
                    2
                }
            };
        }
    };

    let Some(action) = action(&matches) else {
        let _ = writeln!(stderr, "clusterctl: unknown subcommand");
        return 2;
    };
    let config = transport_config(&matches);
    tracing::debug!(?action, socket = %config.socket_path().display(), "dispatching");
    let transport = SocketTransport::new(config);

    match execute(transport, &action, stdout) {
        Ok(()) => 0,
        Err(CliError::Control(error)) => {
            let _ = writeln!(stderr, "clusterctl: {error}");
            error.exit_code()
        }
        Err(CliError::Output(error)) => {
            let _ = writeln!(stderr, "clusterctl: failed to write output: {error}");
            1
        }
    }
}

/// Dispatches one parsed action against the given transport.
///
/// Separated from [`run`] so tests can drive the dispatch with a scripted
/// transport instead of a live socket.
pub fn execute<T, Out>(transport: T, action: &Action, stdout: &mut Out) -> Result<(), CliError>
where
    T: Transport,
    Out: Write,
{
    let mut client = ClusterClient::new(transport);
    let rendered = match action {
        Action::Nodes { filter_nodes } => to_json(&client.list_nodes(filter_nodes.as_ref())?)?,
        Action::Query { query } => to_json(&client.query_nodes(query)?)?,
        Action::Node { name, select } => to_json(&client.get_node(name, select.as_ref())?)?,
        Action::Health { filter_node } => client.health_check(filter_node.as_deref())?,
        Action::Sync { filter_node } => client.sync(filter_node.as_deref())?,
        Action::Files { query } => client.list_files(query)?,
        Action::Agents { filter_status, filter_node } => {
            to_json(&client.list_agents(filter_status.as_deref(), filter_node.as_deref())?)?
        }
    };
    serde_json::to_writer_pretty(&mut *stdout, &rendered).map_err(io::Error::from)?;
    writeln!(stdout)?;
    Ok(())
}

/// Errors the dispatch layer can produce.
#[derive(Debug)]
pub enum CliError {
    /// The operation itself failed.
    Control(ControlError),
    /// The result could not be written to stdout.
    Output(io::Error),
}

impl From<ControlError> for CliError {
    fn from(error: ControlError) -> Self {
        Self::Control(error)
    }
}

impl From<io::Error> for CliError {
    fn from(error: io::Error) -> Self {
        Self::Output(error)
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<Value, CliError> {
    serde_json::to_value(value).map_err(|error| CliError::Output(io::Error::from(error)))
}

fn init_tracing() {
    // Repeated calls (e.g. from tests) keep the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use transport::ScriptedTransport;

    #[test]
    fn execute_renders_listing_results_as_json() {
        let transport = ScriptedTransport::new().reply(
            "get_nodes",
            json!({"node01": {"type": "master", "version": "4.2", "ip": "10.0.0.1"}}),
        );
        let mut output = Vec::new();

        execute(transport, &Action::Nodes { filter_nodes: None }, &mut output).unwrap();

        let rendered: Value = serde_json::from_slice(&output).unwrap();
        assert_eq!(rendered["items"]["node01"]["type"], "master");
        assert_eq!(rendered["node_error"], json!([]));
    }

    #[test]
    fn execute_maps_control_errors_through() {
        let transport = ScriptedTransport::new().reply("get_nodes", json!({}));
        let mut output = Vec::new();

        let err = execute(
            transport,
            &Action::Node { name: "ghost".to_owned(), select: None },
            &mut output,
        )
        .unwrap_err();

        match err {
            CliError::Control(control) => assert_eq!(control.exit_code(), 3),
            CliError::Output(other) => panic!("expected a control error, got {other:?}"),
        }
        assert!(output.is_empty());
    }

    #[test]
    fn run_reports_usage_errors_with_exit_code_two() {
        let mut stdout = Vec::new();
        let mut stderr = Vec::new();
        let code = run(["clusterctl", "bogus-subcommand"], &mut stdout, &mut stderr);
        assert_eq!(code, 2);
        assert!(!stderr.is_empty());
    }

    #[test]
    fn run_prints_help_on_stdout() {
        let mut stdout = Vec::new();
        let mut stderr = Vec::new();
        let code = run(["clusterctl", "--help"], &mut stdout, &mut stderr);
        assert_eq!(code, 0);
        assert!(String::from_utf8_lossy(&stdout).contains("clusterctl"));
    }
}
