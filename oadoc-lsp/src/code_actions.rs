//! Code actions that edit the endpoint through the store.
//!
//! Every edit parses the document, applies one store operation and rewrites the
//! whole document in its own format.

use std::collections::HashMap;

use oadoc::document;
use oadoc::{EndpointStore, StoreError};
use tower_lsp::lsp_types::*;
use tracing::warn;

use crate::commands::{COPY_COMMAND, PREVIEW_COMMAND};
use crate::document::OpenDocument;
use crate::parser::{section_at, EntryLines, Section};
use crate::utils::document_end;

/// Get available code actions for the given range
///
/// Returns nothing when the document does not parse.
pub fn get_code_actions(doc: &OpenDocument, range: Range, uri: Url) -> Vec<CodeActionOrCommand> {
    let Ok(endpoint) = doc.parse() else {
        return Vec::new();
    };
    let store = EndpointStore::new(endpoint);
    let entries = EntryLines::scan(&doc.text, store.endpoint());
    let cursor = range.start.line as usize;
    let section = section_at(&doc.text, cursor);

    let mut actions = Vec::new();

    let location = store.allowed().default_location();
    push_edit(
        &mut actions,
        doc,
        &store,
        &uri,
        format!("Add {location} parameter"),
        |store| {
            store.add_parameter();
            Ok(())
        },
    );
    push_edit(&mut actions, doc, &store, &uri, "Add response".to_string(), |store| {
        store.add_response();
        Ok(())
    });
    if store.allowed().body {
        push_edit(&mut actions, doc, &store, &uri, "Add body field".to_string(), |store| {
            store.add_field();
            Ok(())
        });
    }

    match section {
        Section::Parameters => {
            if let Some(index) = nearest_entry(entries.parameters.as_deref(), cursor) {
                let name = store.endpoint().parameters[index].name.clone();
                push_edit(
                    &mut actions,
                    doc,
                    &store,
                    &uri,
                    format!("Remove parameter `{name}`"),
                    move |store| store.remove_parameter(index).map(drop),
                );
            }
        }
        Section::Responses => {
            if let Some(index) = nearest_entry(entries.responses.as_deref(), cursor) {
                let code = store.endpoint().responses[index].code_or_default().to_string();
                push_edit(
                    &mut actions,
                    doc,
                    &store,
                    &uri,
                    format!("Remove response `{code}`"),
                    move |store| store.remove_response(index).map(drop),
                );
            }
        }
        Section::Fields => {
            let path = entries.fields.as_ref().and_then(|fields| {
                fields
                    .iter()
                    .filter(|(_, line)| *line <= cursor)
                    .max_by_key(|(_, line)| *line)
                    .map(|(path, _)| path.clone())
            });
            if let Some((path, field)) =
                path.and_then(|path| store.field(&path).map(|field| (path, field)))
            {
                let label = if field.property.is_empty() {
                    "unnamed field".to_string()
                } else {
                    format!("`{}`", field.property)
                };

                if field.schema_type().is_container() {
                    let child_path = path.clone();
                    push_edit(
                        &mut actions,
                        doc,
                        &store,
                        &uri,
                        format!("Add child to {label}"),
                        move |store| store.add_child(&child_path).map(drop),
                    );
                }
                push_edit(
                    &mut actions,
                    doc,
                    &store,
                    &uri,
                    format!("Remove field {label}"),
                    move |store| store.remove_field(&path).map(drop),
                );
            }
        }
        Section::Other => {}
    }

    let arguments = Some(vec![serde_json::Value::String(uri.to_string())]);
    actions.push(CodeActionOrCommand::Command(Command {
        title: "Copy annotation".to_string(),
        command: COPY_COMMAND.to_string(),
        arguments: arguments.clone(),
    }));
    actions.push(CodeActionOrCommand::Command(Command {
        title: "Preview annotation".to_string(),
        command: PREVIEW_COMMAND.to_string(),
        arguments,
    }));

    actions
}

/// Index of the entry whose anchor line is closest above or on `cursor`.
fn nearest_entry(lines: Option<&[usize]>, cursor: usize) -> Option<usize> {
    lines?
        .iter()
        .enumerate()
        .filter(|(_, line)| **line <= cursor)
        .max_by_key(|(_, line)| **line)
        .map(|(index, _)| index)
}

fn push_edit<F>(
    actions: &mut Vec<CodeActionOrCommand>,
    doc: &OpenDocument,
    store: &EndpointStore,
    uri: &Url,
    title: String,
    apply: F,
) where
    F: FnOnce(&mut EndpointStore) -> Result<(), StoreError>,
{
    let mut edited = store.clone();
    if let Err(err) = apply(&mut edited) {
        warn!(error = %err, action = %title, "code action does not apply");
        return;
    }

    let new_text = match document::to_string_pretty(edited.endpoint(), doc.format) {
        Ok(text) => text,
        Err(err) => {
            warn!(error = %err, action = %title, "failed to serialize endpoint");
            return;
        }
    };

    let (end_line, end_character) = document_end(&doc.text);
    let edit = TextEdit {
        range: Range {
            start: Position {
                line: 0,
                character: 0,
            },
            end: Position {
                line: end_line,
                character: end_character,
            },
        },
        new_text,
    };

    let mut changes = HashMap::new();
    changes.insert(uri.clone(), vec![edit]);

    actions.push(CodeActionOrCommand::CodeAction(CodeAction {
        title,
        kind: Some(CodeActionKind::REFACTOR),
        edit: Some(WorkspaceEdit {
            changes: Some(changes),
            ..Default::default()
        }),
        ..Default::default()
    }));
}
