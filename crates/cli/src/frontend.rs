//! Argument surface of the `clusterctl` binary.
//!
//! Each subcommand maps 1:1 onto a control-plane operation; the shared
//! `--socket` and `--timeout` options configure the transport. List-valued
//! options are comma-separated. A leading `!` on `--search` negates the
//! match and a leading `-` on the first `--sort` field selects descending
//! order, mirroring the platform's REST query conventions.

use std::collections::BTreeSet;
use std::time::Duration;

use clap::{Arg, ArgAction, ArgMatches, Command, value_parser};
use control::{NodeQuery, Search, Sort};
use protocol::FileQuery;
use transport::TransportConfig;

/// One fully parsed invocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    /// Raw node listing, optionally restricted to a subset.
    Nodes {
        /// Requested node names, or every node when absent.
        filter_nodes: Option<BTreeSet<String>>,
    },
    /// Validated, projected node listing.
    Query {
        /// Pipeline parameters.
        query: NodeQuery,
    },
    /// Single node by exact name.
    Node {
        /// The node name to fetch.
        name: String,
        /// Optional field projection.
        select: Option<BTreeSet<String>>,
    },
    /// Cluster health check.
    Health {
        /// Optional server-side node filter.
        filter_node: Option<String>,
    },
    /// Synchronization trigger.
    Sync {
        /// Optional node restriction.
        filter_node: Option<String>,
    },
    /// Synchronized file listing.
    Files {
        /// File and node restrictions.
        query: FileQuery,
    },
    /// Agent listing through the distributed API proxy.
    Agents {
        /// Optional status filter.
        filter_status: Option<String>,
        /// Optional node filter.
        filter_node: Option<String>,
    },
}

/// Builds the clap command tree.
#[must_use]
pub fn build_command() -> Command {
    Command::new("clusterctl")
        .about("Query and control the monitoring cluster")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("socket")
                .long("socket")
                .value_name("PATH")
                .global(true)
                .help("Path of the cluster manager control socket"),
        )
        .arg(
            Arg::new("timeout")
                .long("timeout")
                .value_name("SECONDS")
                .global(true)
                .value_parser(value_parser!(u64))
                .help("Per-request I/O timeout"),
        )
        .subcommand(
            Command::new("nodes").about("List cluster nodes").arg(
                Arg::new("filter-node")
                    .long("filter-node")
                    .value_name("NAMES")
                    .value_delimiter(',')
                    .action(ArgAction::Append)
                    .help("Restrict the listing to these nodes; misses land in node_error"),
            ),
        )
        .subcommand(
            Command::new("query")
                .about("Filtered, projected node listing")
                .arg(Arg::new("filter-type").long("filter-type").value_name("TYPE"))
                .arg(
                    Arg::new("select")
                        .long("select")
                        .value_name("FIELDS")
                        .value_delimiter(',')
                        .action(ArgAction::Append),
                )
                .arg(Arg::new("search").long("search").value_name("[!]TEXT"))
                .arg(
                    Arg::new("sort")
                        .long("sort")
                        .value_name("[-]FIELDS")
                        .value_delimiter(',')
                        .allow_hyphen_values(true)
                        .action(ArgAction::Append),
                )
                .arg(
                    Arg::new("offset")
                        .long("offset")
                        .value_name("N")
                        .value_parser(value_parser!(usize))
                        .default_value("0"),
                )
                .arg(
                    Arg::new("limit")
                        .long("limit")
                        .value_name("N")
                        .value_parser(value_parser!(usize)),
                ),
        )
        .subcommand(
            Command::new("node")
                .about("Fetch one node by name")
                .arg(Arg::new("name").value_name("NAME").required(true))
                .arg(
                    Arg::new("select")
                        .long("select")
                        .value_name("FIELDS")
                        .value_delimiter(',')
                        .action(ArgAction::Append),
                ),
        )
        .subcommand(
            Command::new("health")
                .about("Cluster health check")
                .arg(Arg::new("filter-node").long("filter-node").value_name("NAME")),
        )
        .subcommand(
            Command::new("sync")
                .about("Trigger synchronization")
                .arg(Arg::new("filter-node").long("filter-node").value_name("NAME")),
        )
        .subcommand(
            Command::new("files")
                .about("List synchronized files")
                .arg(
                    Arg::new("files")
                        .long("files")
                        .value_name("NAMES")
                        .value_delimiter(',')
                        .action(ArgAction::Append),
                )
                .arg(
                    Arg::new("nodes")
                        .long("nodes")
                        .value_name("NAMES")
                        .value_delimiter(',')
                        .action(ArgAction::Append),
                ),
        )
        .subcommand(
            Command::new("agents")
                .about("List agents attached to cluster nodes")
                .arg(Arg::new("status").long("status").value_name("STATUS"))
                .arg(Arg::new("node").long("node").value_name("NAME")),
        )
}

/// Extracts the transport configuration from the global options.
#[must_use]
pub fn transport_config(matches: &ArgMatches) -> TransportConfig {
    let mut builder = TransportConfig::builder();
    if let Some(path) = matches.get_one::<String>("socket") {
        builder = builder.socket_path(path);
    }
    if let Some(seconds) = matches.get_one::<u64>("timeout") {
        builder = builder.timeout(Duration::from_secs(*seconds));
    }
    builder.build()
}

/// Maps parsed matches onto an [`Action`].
///
/// clap enforces that exactly one known subcommand is present, so an
/// unknown one here is unreachable in practice; it falls back to the help
/// path in the caller.
#[must_use]
pub fn action(matches: &ArgMatches) -> Option<Action> {
    let (name, sub) = matches.subcommand()?;
    let action = match name {
        "nodes" => Action::Nodes { filter_nodes: string_set(sub, "filter-node") },
        "query" => Action::Query { query: node_query(sub) },
        "node" => Action::Node {
            name: sub.get_one::<String>("name").cloned().unwrap_or_default(),
            select: string_set(sub, "select"),
        },
        "health" => Action::Health { filter_node: sub.get_one::<String>("filter-node").cloned() },
        "sync" => Action::Sync { filter_node: sub.get_one::<String>("filter-node").cloned() },
        "files" => Action::Files {
            query: FileQuery::new(string_list(sub, "files"), string_list(sub, "nodes")),
        },
        "agents" => Action::Agents {
            filter_status: sub.get_one::<String>("status").cloned(),
            filter_node: sub.get_one::<String>("node").cloned(),
        },
        _ => return None,
    };
    Some(action)
}

fn node_query(matches: &ArgMatches) -> NodeQuery {
    let mut query = NodeQuery::default();
    if let Some(filter_type) = matches.get_one::<String>("filter-type") {
        query = query.with_filter_type(filter_type.clone());
    }
    if let Some(fields) = string_set(matches, "select") {
        query = query.with_select(fields);
    }
    if let Some(spec) = matches.get_one::<String>("search") {
        query = query.with_search(parse_search(spec));
    }
    if let Some(fields) = string_list(matches, "sort") {
        query = query.with_sort(parse_sort(fields));
    }
    query.offset = matches.get_one::<usize>("offset").copied().unwrap_or(0);
    query.limit = matches.get_one::<usize>("limit").copied();
    query
}

/// `!text` keeps the records that do NOT match `text`.
fn parse_search(spec: &str) -> Search {
    spec.strip_prefix('!')
        .map_or_else(|| Search::matching(spec), Search::excluding)
}

/// A leading `-` on the first field selects descending order; the prefix is
/// accepted on any field for convenience.
fn parse_sort(fields: Vec<String>) -> Sort {
    let descending = fields.first().is_some_and(|field| field.starts_with('-'));
    let fields = fields
        .into_iter()
        .map(|field| field.strip_prefix('-').map_or(field.clone(), ToOwned::to_owned))
        .collect();
    if descending { Sort::descending(fields) } else { Sort::ascending(fields) }
}

fn string_list(matches: &ArgMatches, id: &str) -> Option<Vec<String>> {
    matches
        .get_many::<String>(id)
        .map(|values| values.cloned().collect())
}

fn string_set(matches: &ArgMatches, id: &str) -> Option<BTreeSet<String>> {
    matches
        .get_many::<String>(id)
        .map(|values| values.cloned().collect())
}
