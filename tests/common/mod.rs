//! Shared helpers for integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use rmcp::handler::server::wrapper::Parameters;
use std::sync::{Arc, Mutex};

use blockhost::error::BlockhostError;
use blockhost::host::{HostAdapter, PaintOp};
use blockhost::mcp::types::GroupedInput;
use blockhost::mcp::BlockhostServer;

/// Host adapter that records every paint op it receives.
#[derive(Default)]
pub struct RecordingHost {
    pub ops: Mutex<Vec<PaintOp>>,
}

#[async_trait]
impl HostAdapter for RecordingHost {
    async fn paint(&self, ops: &[PaintOp]) -> Result<(), BlockhostError> {
        self.ops.lock().unwrap().extend(ops.iter().cloned());
        Ok(())
    }
}

/// Host adapter that rejects everything, as if no project were open.
pub struct FailingHost;

#[async_trait]
impl HostAdapter for FailingHost {
    async fn paint(&self, _ops: &[PaintOp]) -> Result<(), BlockhostError> {
        Err(BlockhostError::Host("no project open".to_string()))
    }
}

/// Server wired to a recording host, returned together for assertions.
pub fn recording_server() -> (BlockhostServer, Arc<RecordingHost>) {
    let host = Arc::new(RecordingHost::default());
    (BlockhostServer::new(host.clone()), host)
}

/// Build a grouped tool input from an operation name and a JSON params object.
pub fn grouped(operation: &str, params: serde_json::Value) -> Parameters<GroupedInput> {
    let params = match params {
        serde_json::Value::Object(map) => map,
        other => panic!("params must be a JSON object, got {}", other),
    };
    Parameters(GroupedInput {
        operation: operation.to_string(),
        params,
    })
}
