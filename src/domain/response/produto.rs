use crate::model::produto::ProdutoComFarmacia;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct FarmaciaResumo {
    pub id: i32,
    pub nome: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cep: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct ProdutoResponse {
    pub id: i32,
    pub farmacia: FarmaciaResumo,
    pub nome: Option<String>,
    pub nome_quimico: Option<String>,
    pub preco: Option<f64>,
    pub quantidade: Option<i64>,
    pub validade: Option<String>,
    pub lote: Option<String>,
    pub label: Option<String>,
    pub imagem_url: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl From<ProdutoComFarmacia> for ProdutoResponse {
    fn from(row: ProdutoComFarmacia) -> Self {
        let produto = row.produto;
        ProdutoResponse {
            id: produto.produto_id,
            farmacia: FarmaciaResumo {
                id: produto.farmacia_id,
                nome: row.farmacia_nome,
                cep: row.farmacia_cep,
            },
            nome: produto.nome,
            nome_quimico: produto.nome_quimico,
            preco: produto.preco,
            quantidade: produto.quantidade,
            validade: produto.validade,
            lote: produto.lote,
            label: produto.label,
            imagem_url: produto.imagem_url,
            created_at: produto.created_at.map(|dt| dt.to_string()),
            updated_at: produto.updated_at.map(|dt| dt.to_string()),
        }
    }
}
