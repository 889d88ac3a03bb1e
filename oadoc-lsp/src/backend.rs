use std::collections::HashMap;
use std::sync::Arc;

use oadoc::DocumentFormat;
use serde_json::Value;
use tokio::sync::RwLock;
use tower_lsp::jsonrpc::{Error, Result};
use tower_lsp::lsp_types::*;
use tower_lsp::{Client, LanguageServer};
use tracing::{debug, info, warn};

use crate::commands::{self, CopyAck, COPY_COMMAND, PREVIEW_COMMAND};
use crate::config::ServerConfig;
use crate::document::OpenDocument;
use crate::handlers;

pub struct Backend {
    client: Client,
    documents: Arc<RwLock<HashMap<String, OpenDocument>>>,
    config: Arc<RwLock<ServerConfig>>,
    copy_ack: Arc<CopyAck>,
}

impl Backend {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            documents: Arc::new(RwLock::new(HashMap::new())),
            config: Arc::new(RwLock::new(ServerConfig::default())),
            copy_ack: Arc::new(CopyAck::new()),
        }
    }

    /// Whether a "Copied!" acknowledgment is currently showing
    pub fn copy_acknowledged(&self) -> bool {
        self.copy_ack.is_active()
    }

    async fn on_change(&self, uri: Url, text: String, version: i32) {
        let key = uri.to_string();
        let config = self.config.read().await.clone();

        let diagnostics = {
            let mut documents = self.documents.write().await;
            let doc = documents
                .entry(key)
                .or_insert_with(|| OpenDocument::new("", DocumentFormat::from_path(uri.path())));
            if let Err(err) = doc.update(text) {
                debug!(%uri, error = %err, "keeping last parsed endpoint");
            }
            handlers::text_document_did_change(&doc.text, doc.format, &config)
        };

        self.client
            .publish_diagnostics(uri, diagnostics, Some(version))
            .await;
    }

    async fn run_command(&self, command: &str, arguments: &[Value]) -> Result<Option<Value>> {
        let uri = commands::command_uri(arguments)
            .ok_or_else(|| Error::invalid_params("expected a document URI argument"))?;

        let rendered = {
            let documents = self.documents.read().await;
            let doc = documents
                .get(uri)
                .ok_or_else(|| Error::invalid_params(format!("document {uri} is not open")))?;
            commands::render_document(doc)
        };

        let annotation = match rendered {
            Ok(annotation) => annotation,
            Err(err) => {
                let message = format!("Could not generate annotation: {err}");
                self.client.show_message(MessageType::ERROR, &message).await;
                return Err(Error::invalid_params(message));
            }
        };

        if command == COPY_COMMAND {
            let generation = self.copy_ack.mark();
            let delay = self.config.read().await.copy_ack();
            tokio::spawn(Arc::clone(&self.copy_ack).expire_after(generation, delay));
            self.client.show_message(MessageType::INFO, "Copied!").await;
        }

        Ok(Some(Value::String(annotation)))
    }
}

#[tower_lsp::async_trait]
impl LanguageServer for Backend {
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        *self.config.write().await =
            ServerConfig::from_init_options(params.initialization_options.as_ref());

        Ok(InitializeResult {
            server_info: Some(ServerInfo {
                name: "oadoc-lsp".to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
            capabilities: ServerCapabilities {
                text_document_sync: Some(TextDocumentSyncCapability::Kind(
                    TextDocumentSyncKind::FULL,
                )),
                completion_provider: Some(CompletionOptions {
                    trigger_characters: Some(vec![
                        "\"".to_string(),
                        ":".to_string(),
                        " ".to_string(),
                    ]),
                    ..Default::default()
                }),
                hover_provider: Some(HoverProviderCapability::Simple(true)),
                code_action_provider: Some(CodeActionProviderCapability::Simple(true)),
                execute_command_provider: Some(ExecuteCommandOptions {
                    commands: commands::commands(),
                    ..Default::default()
                }),
                ..Default::default()
            },
        })
    }

    async fn initialized(&self, _: InitializedParams) {
        info!("oadoc-lsp initialized");
        self.client
            .log_message(MessageType::INFO, "oadoc LSP initialized")
            .await;
    }

    async fn shutdown(&self) -> Result<()> {
        info!("shutting down");
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let doc = params.text_document;
        debug!(uri = %doc.uri, "document opened");
        self.on_change(doc.uri, doc.text, doc.version).await;
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        if let Some(change) = params.content_changes.into_iter().last() {
            self.on_change(
                params.text_document.uri,
                change.text,
                params.text_document.version,
            )
            .await;
        }
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        let uri = params.text_document.uri;
        self.documents.write().await.remove(uri.as_str());
        self.client.publish_diagnostics(uri, Vec::new(), None).await;
    }

    async fn completion(&self, params: CompletionParams) -> Result<Option<CompletionResponse>> {
        let uri = params.text_document_position.text_document.uri.to_string();
        let position = params.text_document_position.position;

        let documents = self.documents.read().await;
        let doc = match documents.get(&uri) {
            Some(doc) => doc,
            None => return Ok(None),
        };

        Ok(handlers::text_document_completion(&doc.text, position))
    }

    async fn hover(&self, params: HoverParams) -> Result<Option<Hover>> {
        let uri = params
            .text_document_position_params
            .text_document
            .uri
            .to_string();
        let position = params.text_document_position_params.position;

        let documents = self.documents.read().await;
        let doc = match documents.get(&uri) {
            Some(doc) => doc,
            None => return Ok(None),
        };

        Ok(handlers::text_document_hover(doc, position))
    }

    async fn code_action(&self, params: CodeActionParams) -> Result<Option<CodeActionResponse>> {
        let uri = params.text_document.uri.to_string();

        let documents = self.documents.read().await;
        let doc = match documents.get(&uri) {
            Some(doc) => doc,
            None => return Ok(None),
        };

        let actions =
            crate::code_actions::get_code_actions(doc, params.range, params.text_document.uri);

        if actions.is_empty() {
            Ok(None)
        } else {
            Ok(Some(actions))
        }
    }

    async fn execute_command(&self, params: ExecuteCommandParams) -> Result<Option<Value>> {
        match params.command.as_str() {
            PREVIEW_COMMAND | COPY_COMMAND => {
                self.run_command(&params.command, &params.arguments).await
            }
            other => {
                warn!(command = other, "unknown command");
                Err(Error::method_not_found())
            }
        }
    }
}
