//! Errors reported by host capabilities.

use thiserror::Error;

use crate::node::NodeId;

#[derive(Debug, Error)]
pub enum HostError {
    #[error("node `{0}` does not exist")]
    UnknownNode(NodeId),

    #[error("no page registered at `{0}`")]
    UnknownPage(String),

    #[error("host rejected operation: {0}")]
    Rejected(String),
}
