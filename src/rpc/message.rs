//! One-way invocation message carried inside `MSG_INVOKE` frames.
//!
//! Payload is msgpack with named fields, so the frontend sees a map:
//! `{"id": 7, "method": "generatorDone", "params": [true, "done", "/out"]}`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::Result;

/// A named remote procedure call with positional parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invocation {
    /// Per-channel sequence number in allocation order. Concurrent clones of
    /// one channel may enqueue ids out of order; a single clone never does.
    pub id: u64,
    pub method: String,
    #[serde(default)]
    pub params: Vec<Value>,
}

impl Invocation {
    pub fn new(id: u64, method: impl Into<String>, params: Vec<Value>) -> Self {
        Self {
            id,
            method: method.into(),
            params,
        }
    }
}

/// Encode an invocation to msgpack.
pub fn encode(invocation: &Invocation) -> Result<Vec<u8>> {
    Ok(rmp_serde::to_vec_named(invocation)?)
}

/// Decode an invocation from msgpack.
pub fn decode(bytes: &[u8]) -> Result<Invocation> {
    Ok(rmp_serde::from_slice(bytes)?)
}
