//! LSP backend: request handlers over the analysis engine.

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use dashmap::DashMap;
use tower_lsp::lsp_types::{
    CompletionOptions, CompletionParams, CompletionResponse, DidChangeTextDocumentParams,
    DidCloseTextDocumentParams, DidOpenTextDocumentParams, DidSaveTextDocumentParams,
    InitializeParams, InitializeResult, InitializedParams, SemanticTokenType, SemanticTokens,
    SemanticTokensFullOptions, SemanticTokensLegend, SemanticTokensOptions, SemanticTokensParams,
    SemanticTokensResult, SemanticTokensServerCapabilities, ServerCapabilities,
    TextDocumentSyncCapability, TextDocumentSyncKind, Url,
};
use tower_lsp::{Client, LanguageServer, jsonrpc};
use tracing::{debug, error, info, warn};
use tree_sitter::Point;

use crate::analysis::{
    collect_tokens, encode_tokens, resolve_completions, token_legend, validate_json,
    validate_markdown,
};
use crate::document::LspDocument;
use crate::language::DocumentLanguage;
use crate::parser::parse_document;

/// Maps an analysis defect onto a failed request.
///
/// Defect-class errors must surface to the caller instead of producing
/// corrupted or partial output.
fn defect(err: impl std::fmt::Display) -> jsonrpc::Error {
    error!("Analysis defect: {err}");
    jsonrpc::Error::internal_error()
}

#[derive(Debug)]
pub struct TentirisBackend {
    client: Client,
    documents_by_uri: DashMap<Url, Arc<LspDocument>>,
    serial_document_id: AtomicU32,
    legend: Vec<SemanticTokenType>,
}

impl TentirisBackend {
    pub fn new(client: Client) -> Self {
        TentirisBackend {
            client,
            documents_by_uri: DashMap::new(),
            serial_document_id: AtomicU32::new(0),
            legend: token_legend(),
        }
    }

    fn next_document_id(&self) -> u32 {
        self.serial_document_id.fetch_add(1, Ordering::SeqCst)
    }

    fn get_document(&self, uri: &Url) -> Option<Arc<LspDocument>> {
        self.documents_by_uri.get(uri).map(|doc| Arc::clone(&doc))
    }

    /// Validates `text` per the document's language and publishes the
    /// resulting diagnostics unless the document has moved past `version`.
    async fn validate(&self, document: &LspDocument, text: &str, version: i32) {
        let uri = document.uri().await;
        let diagnostics = match document.language {
            DocumentLanguage::Json => validate_json(text),
            DocumentLanguage::Markdown => match validate_markdown(text) {
                Ok(diagnostics) => diagnostics,
                Err(e) => {
                    error!("Validation failed for URI={}: {}", uri, e);
                    return;
                }
            },
        };
        if document.version().await == version {
            self.client
                .publish_diagnostics(uri, diagnostics, Some(version))
                .await;
        }
    }
}

#[tower_lsp::async_trait]
impl LanguageServer for TentirisBackend {
    async fn initialize(&self, params: InitializeParams) -> jsonrpc::Result<InitializeResult> {
        info!("Received initialize from process {:?}", params.process_id);

        Ok(InitializeResult {
            capabilities: ServerCapabilities {
                text_document_sync: Some(TextDocumentSyncCapability::Kind(
                    TextDocumentSyncKind::INCREMENTAL,
                )),
                completion_provider: Some(CompletionOptions {
                    trigger_characters: Some(vec![",".to_string()]),
                    all_commit_characters: None,
                    resolve_provider: Some(false),
                    completion_item: None,
                    work_done_progress_options: Default::default(),
                }),
                semantic_tokens_provider: Some(
                    SemanticTokensServerCapabilities::SemanticTokensOptions(
                        SemanticTokensOptions {
                            legend: SemanticTokensLegend {
                                token_types: self.legend.clone(),
                                token_modifiers: vec![],
                            },
                            full: Some(SemanticTokensFullOptions::Bool(true)),
                            range: None,
                            ..Default::default()
                        },
                    ),
                ),
                ..Default::default()
            },
            ..Default::default()
        })
    }

    async fn initialized(&self, _params: InitializedParams) {
        info!("Server initialized");
    }

    async fn shutdown(&self) -> jsonrpc::Result<()> {
        info!("Received shutdown request");
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let uri = params.text_document.uri.clone();
        let text = params.text_document.text;
        let version = params.text_document.version;
        let language = DocumentLanguage::detect(&params.text_document.language_id, &uri);
        let id = self.next_document_id();

        let document = Arc::new(LspDocument::new(id, uri.clone(), language, &text, version));
        self.documents_by_uri
            .insert(uri.clone(), Arc::clone(&document));
        info!(
            "Opened document: URI={}, id={}, version={}, language={:?}",
            uri, id, version, language
        );

        self.validate(&document, &text, version).await;
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        let uri = params.text_document.uri;
        let version = params.text_document.version;
        debug!("textDocument/didChange: URI={}, version={}", uri, version);

        let Some(document) = self.get_document(&uri) else {
            warn!("Failed to find document with URI={}", uri);
            return;
        };
        match document.apply(params.content_changes, version).await {
            Some(text) => self.validate(&document, &text, version).await,
            None => warn!("Failed to apply changes to document with URI={}", uri),
        }
    }

    async fn did_save(&self, params: DidSaveTextDocumentParams) {
        // Validated on open and on every change; nothing further to check.
        debug!("textDocument/didSave: URI={}", params.text_document.uri);
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        let uri = params.text_document.uri;
        match self.documents_by_uri.remove(&uri) {
            Some((_, document)) => info!("Closed document: URI={}, id={}", uri, document.id),
            None => warn!("Closed document not found: URI={}", uri),
        }
        self.client.publish_diagnostics(uri, Vec::new(), None).await;
    }

    async fn completion(
        &self,
        params: CompletionParams,
    ) -> jsonrpc::Result<Option<CompletionResponse>> {
        let uri = params.text_document_position.text_document.uri;
        let position = params.text_document_position.position;
        debug!("Completion request at {}:{:?}", uri, position);

        let Some(document) = self.get_document(&uri) else {
            debug!("Document not found: {}", uri);
            return Ok(None);
        };

        let text = document.text().await;
        let tree = parse_document(&text).map_err(defect)?;
        let point = Point {
            row: position.line as usize,
            column: position.character as usize,
        };
        let items = resolve_completions(&tree, point).map_err(defect)?;
        debug!("Returning {} completion items", items.len());
        Ok(Some(CompletionResponse::Array(items)))
    }

    async fn semantic_tokens_full(
        &self,
        params: SemanticTokensParams,
    ) -> jsonrpc::Result<Option<SemanticTokensResult>> {
        let uri = params.text_document.uri;
        debug!("Semantic tokens request for: {}", uri);

        let Some(document) = self.get_document(&uri) else {
            debug!("Document not found: {}", uri);
            return Ok(None);
        };
        if document.language != DocumentLanguage::Markdown {
            return Ok(None);
        }

        let text = document.text().await;
        let tree = parse_document(&text).map_err(defect)?;
        let tokens = collect_tokens(tree.root_node()).map_err(defect)?;
        let data = encode_tokens(&tokens, &self.legend).map_err(defect)?;
        debug!("Generated {} semantic tokens", data.len());

        Ok(Some(SemanticTokensResult::Tokens(SemanticTokens {
            result_id: None,
            data,
        })))
    }
}
