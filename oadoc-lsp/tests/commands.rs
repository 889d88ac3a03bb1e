use std::sync::Arc;
use std::time::Duration;

use oadoc::DocumentFormat;
use oadoc_lsp::commands::{self, CopyAck, COPY_COMMAND, PREVIEW_COMMAND};
use oadoc_lsp::document::OpenDocument;

#[test]
fn advertises_both_commands() {
    assert_eq!(commands::commands(), vec![PREVIEW_COMMAND, COPY_COMMAND]);
}

#[test]
fn renders_current_text() {
    let doc = OpenDocument::new("method: patch\npath: /items/1\n", DocumentFormat::Yaml);
    let annotation = commands::render_document(&doc).unwrap();
    assert!(annotation.contains("@OA\\Patch("));
}

#[test]
fn broken_text_is_an_error_even_with_a_good_version() {
    let mut doc = OpenDocument::new("method: get\npath: /x\n", DocumentFormat::Yaml);
    assert!(doc.update("method: get\npath: [\n").is_err());

    assert!(doc.last_annotation().is_some());
    assert!(commands::render_document(&doc).is_err());
}

#[tokio::test]
async fn acknowledgment_expires() {
    let ack = Arc::new(CopyAck::new());
    let generation = ack.mark();
    assert!(ack.is_active());

    Arc::clone(&ack)
        .expire_after(generation, Duration::from_millis(10))
        .await;
    assert!(!ack.is_active());
}

#[tokio::test]
async fn newer_copy_outlives_older_timer() {
    let ack = Arc::new(CopyAck::new());
    let first = ack.mark();
    let timer = tokio::spawn(Arc::clone(&ack).expire_after(first, Duration::from_millis(10)));
    let second = ack.mark();

    timer.await.unwrap();
    assert!(ack.is_active());

    assert!(ack.clear(second));
    assert!(!ack.is_active());
}
