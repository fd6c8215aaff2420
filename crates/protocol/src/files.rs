use serde::{Deserialize, Serialize};

use crate::error::RequestError;
use crate::request::{OP_GET_FILES, split_opcode};

/// Structured argument blob for the `get_files` opcode.
///
/// Earlier deployments joined the file list and node list into one string
/// with a reserved separator token, which is ambiguous whenever an argument
/// contains the separator. The payload is a self-describing JSON object
/// instead, so both lists round-trip exactly regardless of their content.
/// Absent lists are omitted from the serialized form and mean "all".
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct FileQuery {
    /// Restrict the listing to these file names, or all files when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub files: Option<Vec<String>>,
    /// Restrict the listing to these nodes, or the whole cluster when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nodes: Option<Vec<String>>,
}

impl FileQuery {
    /// Creates a query over the given optional file and node lists.
    #[must_use]
    pub const fn new(files: Option<Vec<String>>, nodes: Option<Vec<String>>) -> Self {
        Self { files, nodes }
    }

    /// Renders the full request text: the `get_files` opcode followed by the
    /// JSON argument blob.
    pub fn to_request(&self) -> Result<String, RequestError> {
        let args = serde_json::to_string(self).map_err(RequestError::Encode)?;
        Ok(format!("{OP_GET_FILES} {args}"))
    }

    /// Parses a `get_files` request back into the original query.
    ///
    /// This is the reference decoder for the argument blob: for every query
    /// `q`, `FileQuery::parse_request(&q.to_request()?)` yields `q` exactly.
    pub fn parse_request(request: &str) -> Result<Self, RequestError> {
        let (opcode, args) = split_opcode(request)?;
        if opcode != OP_GET_FILES {
            return Err(RequestError::UnexpectedOpcode {
                expected: OP_GET_FILES,
                found: opcode.to_owned(),
            });
        }
        let args = args.ok_or(RequestError::MissingArguments(OP_GET_FILES))?;
        serde_json::from_str(args).map_err(RequestError::Decode)
    }
}
