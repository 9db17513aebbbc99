use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use utoipa::ToSchema;

/// Image part received in a multipart request, already buffered to the
/// temp-upload directory by the parsing layer. The command service owns
/// removing the temp copy, exactly once, on every exit path.
#[derive(Debug, Clone)]
pub struct ImagemRecebida {
    pub path: PathBuf,
    pub nome_original: String,
    pub mime: String,
}

/// Raw multipart form fields, before validation. Everything is optional
/// here; the command service probes each field independently so every
/// absence produces its own 422 message.
#[derive(Debug, Clone, Default)]
pub struct ProdutoForm {
    pub farmacia: Option<String>,
    pub nome: Option<String>,
    pub nome_quimico: Option<String>,
    pub preco: Option<String>,
    pub quantidade: Option<String>,
    pub validade: Option<String>,
    pub lote: Option<String>,
    pub label: Option<String>,
    pub imagem: Option<ImagemRecebida>,
}

/// Validated create payload handed to the command repository, image
/// already uploaded and resolved to its public URL.
#[derive(Debug, Clone)]
pub struct CreateProdutoRequest {
    pub farmacia_id: i32,
    pub nome: String,
    pub nome_quimico: String,
    pub preco: f64,
    pub quantidade: i64,
    pub validade: String,
    pub lote: String,
    pub label: String,
    pub imagem_url: String,
}

/// Full-replace update payload: `None` clears the stored column. The
/// pharmacy reference is immutable and therefore absent here; the image
/// URL is pre-resolved by the service (new upload or carried forward).
#[derive(Debug, Clone)]
pub struct UpdateProdutoRequest {
    pub produto_id: i32,
    pub nome: Option<String>,
    pub nome_quimico: Option<String>,
    pub preco: Option<f64>,
    pub quantidade: Option<i64>,
    pub validade: Option<String>,
    pub lote: Option<String>,
    pub label: Option<String>,
    pub imagem_url: Option<String>,
}

/// Documentation-only schema for the multipart endpoints.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CadastrarProdutoForm {
    #[schema(example = "1")]
    pub farmacia: String,
    #[schema(example = "Dipirona 500mg")]
    pub nome: String,
    #[schema(example = "Metamizol")]
    pub nome_quimico: String,
    #[schema(example = "12.50")]
    pub preco: String,
    #[schema(example = "100")]
    pub quantidade: String,
    #[schema(example = "2026-12-31")]
    pub validade: String,
    #[schema(example = "L-2025-044")]
    pub lote: String,
    #[schema(example = "Genérico")]
    pub label: String,
    #[schema(value_type = String, format = Binary)]
    pub imagem: String,
}
