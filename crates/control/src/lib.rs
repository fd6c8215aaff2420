#![deny(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(missing_docs)]

//! # Overview
//!
//! `control` is the query layer between callers and the cluster manager:
//! it builds one request per operation, hands it to a
//! [`Transport`](transport::Transport), aggregates the per-node replies
//! (including partial failures), and projects the aggregated set through a
//! fixed filter → select → search → sort → paginate pipeline.
//!
//! # Design
//!
//! - [`aggregate`] restricts a raw node reply to the requested subset and
//!   accounts for requested-but-missing nodes in `node_error` instead of
//!   failing the call.
//! - [`validate`] owns the immutable allow-lists for select fields and node
//!   types and fails fast, before any data is touched.
//! - [`projection`] applies the pipeline stages in their fixed order;
//!   `total_items` is always the pre-pagination count.
//! - [`ClusterClient`] exposes the operations: listing queries never raise
//!   for individual missing nodes, while [`ClusterClient::get_node`] raises
//!   [`ControlError::NodeNotFound`] for a zero-match name. That asymmetry
//!   is contract, not accident.
//!
//! # Errors
//!
//! Every failure is a [`ControlError`]: transport failures and manager
//! error markers surface verbatim as `Transport`, malformed caller input as
//! the validation variants, and replies of the wrong JSON shape as
//! `MalformedReply`. Nothing in this crate retries.
//!
//! # Examples
//!
//! ```
//! use control::{ClusterClient, NodeQuery, Search};
//! use transport::ScriptedTransport;
//!
//! let transport = ScriptedTransport::new().reply(
//!     "get_nodes",
//!     serde_json::json!({
//!         "master": {"type": "master", "version": "4.1", "ip": "10.0.0.1"},
//!         "worker": {"type": "client", "version": "4.1", "ip": "10.0.0.2"},
//!     }),
//! );
//! let mut client = ClusterClient::new(transport);
//!
//! let query = NodeQuery::default()
//!     .with_filter_type("client")
//!     .with_search(Search::matching("worker"));
//! let page = client.query_nodes(&query).expect("listing succeeds");
//!
//! assert_eq!(page.total_items, 1);
//! assert_eq!(page.items[0].name(), "worker");
//! ```

pub mod aggregate;
mod agents;
mod client;
mod error;
mod node;
pub mod projection;
mod query;
pub mod validate;

pub use agents::{Agent, AgentPage};
pub use client::ClusterClient;
pub use error::ControlError;
pub use node::{NodeListing, NodePage, NodeRecord, NodeSet};
pub use query::{NodeQuery, Search, Sort, SortOrder};
