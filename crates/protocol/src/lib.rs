#![deny(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(missing_docs)]

//! Request payload builders for the cluster manager's control socket.
//!
//! Every operation the control plane supports is addressed by a textual
//! request whose leading token selects the opcode, optionally followed by an
//! opcode-specific argument blob. The opcode spellings are wire contract
//! with the deployed cluster manager and must never change:
//!
//! - [`OP_GET_NODES`] — cluster membership listing, no arguments.
//! - [`OP_GET_HEALTH`] — health check, optional node name argument.
//! - [`OP_SYNC`] — synchronization trigger, optional node name argument.
//! - [`OP_GET_FILES`] — file listing, JSON argument blob (see [`FileQuery`]).
//! - [`OP_DAPI`] — distributed API proxy, JSON envelope (see [`AgentQuery`]).
//!
//! This crate performs no I/O; it only formats and parses payloads so the
//! transport and control layers can stay agnostic of the wire text.
//!
//! # Examples
//!
//! ```
//! use protocol::{FileQuery, list_nodes_request, sync_request};
//!
//! assert_eq!(list_nodes_request(), "get_nodes");
//! assert_eq!(sync_request(Some("node01")), "sync node01");
//!
//! let query = FileQuery::new(Some(vec!["a.conf".into()]), None);
//! let request = query.to_request().expect("plain lists always encode");
//! assert_eq!(FileQuery::parse_request(&request).unwrap(), query);
//! ```

mod dapi;
mod error;
mod files;
mod request;

pub use dapi::{AGENT_SELECT_FIELDS, AGENTS_FUNCTION, AgentQuery, FILTER_WILDCARD};
pub use error::RequestError;
pub use files::FileQuery;
pub use request::{
    OP_DAPI, OP_GET_FILES, OP_GET_HEALTH, OP_GET_NODES, OP_SYNC, health_request,
    list_nodes_request, split_opcode, sync_request,
};
