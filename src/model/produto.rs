use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Persisted catalog entry. Every data column is nullable because the
/// PATCH operation has full-replace semantics: an omitted field clears
/// the stored value instead of preserving it.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Produto {
    pub produto_id: i32,
    pub farmacia_id: i32,
    pub nome: Option<String>,
    pub nome_quimico: Option<String>,
    pub preco: Option<f64>,
    pub quantidade: Option<i64>,
    pub validade: Option<String>,
    pub lote: Option<String>,
    pub label: Option<String>,
    pub imagem_url: Option<String>,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}

/// Product row joined with its owning pharmacy, for the read paths that
/// expand the pharmacy name (and postal code on fetch-by-id).
#[derive(Debug, Clone, FromRow)]
pub struct ProdutoComFarmacia {
    #[sqlx(flatten)]
    pub produto: Produto,
    pub farmacia_nome: Option<String>,
    pub farmacia_cep: Option<String>,
}
