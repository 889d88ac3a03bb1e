//! Workspace commands: annotation preview and copy.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use oadoc::DocumentError;
use serde_json::Value;
use tracing::debug;

use crate::document::OpenDocument;

pub const PREVIEW_COMMAND: &str = "oadoc.preview";
pub const COPY_COMMAND: &str = "oadoc.copyAnnotation";

/// Commands advertised in the server capabilities.
pub fn commands() -> Vec<String> {
    vec![PREVIEW_COMMAND.to_string(), COPY_COMMAND.to_string()]
}

/// Annotation for the document's current text.
///
/// Fails when the text does not parse; the last good endpoint is not used.
pub fn render_document(doc: &OpenDocument) -> Result<String, DocumentError> {
    doc.parse().map(|endpoint| oadoc::render_annotation(&endpoint))
}

/// Document URI passed as the first command argument.
pub fn command_uri(arguments: &[Value]) -> Option<&str> {
    match arguments.first()? {
        Value::String(uri) => Some(uri),
        Value::Object(map) => map.get("uri")?.as_str(),
        _ => None,
    }
}

/// Transient "Copied!" acknowledgment.
///
/// Each copy bumps a generation; the timer started by a copy only clears the
/// acknowledgment if no newer copy happened in the meantime.
#[derive(Debug, Default)]
pub struct CopyAck {
    generation: AtomicU64,
    active: AtomicU64,
}

impl CopyAck {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a copy. Returns the generation to pass to [`CopyAck::clear`].
    pub fn mark(&self) -> u64 {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.active.store(generation, Ordering::SeqCst);
        generation
    }

    /// Clear the acknowledgment if `generation` is still the latest copy.
    pub fn clear(&self, generation: u64) -> bool {
        self.active
            .compare_exchange(generation, 0, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst) != 0
    }

    /// Clear `generation` after `delay`.
    pub async fn expire_after(self: Arc<Self>, generation: u64, delay: Duration) {
        tokio::time::sleep(delay).await;
        if self.clear(generation) {
            debug!(generation, "copy acknowledgment expired");
        }
    }
}
