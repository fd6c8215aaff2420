use crate::error::RequestError;

/// Opcode for the cluster membership listing.
///
/// The manager's line parser keys on the opcode token alone; any node subset
/// filter is applied client-side after the response arrives.
pub const OP_GET_NODES: &str = "get_nodes";

/// Opcode for the cluster health check.
pub const OP_GET_HEALTH: &str = "get_health";

/// Opcode for the synchronization trigger.
pub const OP_SYNC: &str = "sync";

/// Opcode for the file listing. Carries a JSON argument blob.
pub const OP_GET_FILES: &str = "get_files";

/// Opcode for the distributed API proxy. Carries a JSON envelope.
pub const OP_DAPI: &str = "dapi";

/// Builds the cluster membership listing request.
#[must_use]
pub fn list_nodes_request() -> String {
    OP_GET_NODES.to_owned()
}

/// Builds a health check request, embedding the node filter when present.
///
/// The filter is honoured server-side: the manager restricts the health
/// report to the named node before replying.
#[must_use]
pub fn health_request(filter_node: Option<&str>) -> String {
    with_optional_node(OP_GET_HEALTH, filter_node)
}

/// Builds a synchronization request.
///
/// An absent filter requests a cluster-wide sync; a present one restricts
/// the sync to the named node, mirroring [`health_request`].
#[must_use]
pub fn sync_request(filter_node: Option<&str>) -> String {
    with_optional_node(OP_SYNC, filter_node)
}

fn with_optional_node(opcode: &str, filter_node: Option<&str>) -> String {
    match filter_node {
        Some(node) => format!("{opcode} {node}"),
        None => opcode.to_owned(),
    }
}

/// Splits a request into its opcode token and the remaining argument blob.
///
/// The argument blob is everything after the first ASCII space, untouched,
/// so JSON arguments containing spaces survive intact. Returns
/// [`RequestError::MissingOpcode`] when the text holds no token at all.
pub fn split_opcode(request: &str) -> Result<(&str, Option<&str>), RequestError> {
    let trimmed = request.trim_start();
    if trimmed.is_empty() {
        return Err(RequestError::MissingOpcode);
    }
    match trimmed.split_once(' ') {
        Some((opcode, args)) => Ok((opcode, Some(args))),
        None => Ok((trimmed, None)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_nodes_request_is_bare_opcode() {
        assert_eq!(list_nodes_request(), "get_nodes");
    }

    #[test]
    fn health_request_embeds_node_filter() {
        assert_eq!(health_request(Some("worker-3")), "get_health worker-3");
    }

    #[test]
    fn health_request_without_filter_is_bare() {
        assert_eq!(health_request(None), "get_health");
    }

    #[test]
    fn sync_request_matches_health_pattern() {
        assert_eq!(sync_request(None), "sync");
        assert_eq!(sync_request(Some("node01")), "sync node01");
    }

    #[test]
    fn split_opcode_keeps_spaces_inside_arguments() {
        let (opcode, args) = split_opcode("dapi {\"a\": \"b c\"}").unwrap();
        assert_eq!(opcode, "dapi");
        assert_eq!(args, Some("{\"a\": \"b c\"}"));
    }

    #[test]
    fn split_opcode_handles_bare_opcodes() {
        let (opcode, args) = split_opcode("get_nodes").unwrap();
        assert_eq!(opcode, "get_nodes");
        assert_eq!(args, None);
    }

    #[test]
    fn split_opcode_rejects_empty_requests() {
        assert!(matches!(split_opcode("   "), Err(RequestError::MissingOpcode)));
    }
}
