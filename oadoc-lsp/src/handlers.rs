use oadoc::DocumentFormat;
use tower_lsp::lsp_types::*;

use crate::completion;
use crate::config::ServerConfig;
use crate::diagnostics;
use crate::docs;
use crate::document::OpenDocument;
use crate::parser::key_at_line;
use crate::utils::{byte_index_to_utf16_col, utf16_pos_to_byte_index};

/// Handle completion request for a text document
pub fn text_document_completion(content: &str, position: Position) -> Option<CompletionResponse> {
    let pos = completion::Position {
        line: position.line as usize,
        character: position.character as usize,
    };

    let items = completion::get_completions(content, pos);

    if items.is_empty() {
        return None;
    }

    let lsp_items: Vec<CompletionItem> = items
        .into_iter()
        .map(|item| {
            let kind = match item.kind {
                completion::CompletionItemKind::Property => CompletionItemKind::PROPERTY,
                completion::CompletionItemKind::Value => CompletionItemKind::ENUM_MEMBER,
            };

            CompletionItem {
                label: item.label,
                kind: Some(kind),
                detail: item.detail,
                documentation: item.documentation.map(|doc| {
                    Documentation::MarkupContent(MarkupContent {
                        kind: MarkupKind::Markdown,
                        value: doc,
                    })
                }),
                ..Default::default()
            }
        })
        .collect();

    Some(CompletionResponse::Array(lsp_items))
}

/// Handle hover request for a text document
///
/// On a known key the key's documentation is shown. Anywhere else the hover
/// previews the annotation generated from the document, or from the last
/// version that parsed while the text is broken.
pub fn text_document_hover(doc: &OpenDocument, position: Position) -> Option<Hover> {
    let line_idx = position.line as usize;
    let line = doc.text.lines().nth(line_idx)?;
    let char_idx = utf16_pos_to_byte_index(line, position.character as usize)?;

    if let Some(found) = key_at_line(line) {
        if char_idx >= found.start && char_idx <= found.end {
            if let Some(documentation) = docs::key_documentation(&found.name) {
                return Some(markdown_hover(
                    documentation.to_string(),
                    Some(Range {
                        start: Position {
                            line: position.line,
                            character: byte_index_to_utf16_col(line, found.start) as u32,
                        },
                        end: Position {
                            line: position.line,
                            character: byte_index_to_utf16_col(line, found.end) as u32,
                        },
                    }),
                ));
            }
        }
    }

    let preview = match doc.parse() {
        Ok(endpoint) => annotation_preview(&oadoc::render_annotation(&endpoint), false),
        Err(_) => annotation_preview(&doc.last_annotation()?, true),
    };

    Some(markdown_hover(preview, None))
}

/// Markdown block showing a generated annotation.
pub fn annotation_preview(annotation: &str, stale: bool) -> String {
    let note = if stale {
        "\n\n_From the last version of the document that parsed._"
    } else {
        ""
    };
    format!("**Generated annotation**{note}\n\n```php\n{annotation}\n```")
}

fn markdown_hover(value: String, range: Option<Range>) -> Hover {
    Hover {
        contents: HoverContents::Markup(MarkupContent {
            kind: MarkupKind::Markdown,
            value,
        }),
        range,
    }
}

/// Handle document change and return diagnostics
pub fn text_document_did_change(
    content: &str,
    format: DocumentFormat,
    config: &ServerConfig,
) -> Vec<Diagnostic> {
    let diagnostics_list = diagnostics::validate_document(content, format, config);
    let lines: Vec<&str> = content.lines().collect();

    diagnostics_list
        .into_iter()
        .map(|diag| {
            let severity = match diag.severity {
                diagnostics::DiagnosticSeverity::Error => DiagnosticSeverity::ERROR,
                diagnostics::DiagnosticSeverity::Warning => DiagnosticSeverity::WARNING,
                diagnostics::DiagnosticSeverity::Hint => DiagnosticSeverity::HINT,
            };

            // Get the line content to convert byte indices to UTF-16 positions
            let line = lines.get(diag.line).copied().unwrap_or("");
            let line_utf16_len = byte_index_to_utf16_col(line, line.len());

            let char_start = diag
                .char_start
                .map(|idx| byte_index_to_utf16_col(line, idx))
                .unwrap_or(0);
            let char_end = diag
                .char_end
                .map(|idx| byte_index_to_utf16_col(line, idx))
                .unwrap_or(line_utf16_len)
                .max(char_start);

            Diagnostic {
                range: Range {
                    start: Position {
                        line: diag.line as u32,
                        character: char_start as u32,
                    },
                    end: Position {
                        line: diag.line as u32,
                        character: char_end as u32,
                    },
                },
                severity: Some(severity),
                source: Some("oadoc-lsp".to_string()),
                message: diag.message,
                ..Default::default()
            }
        })
        .collect()
}
