use crate::{
    abstract_trait::produto::repository::ProdutoCommandRepositoryTrait,
    config::ConnectionPool,
    domain::requests::produto::{CreateProdutoRequest, UpdateProdutoRequest},
    errors::RepositoryError,
    model::produto::Produto as ProdutoModel,
};
use async_trait::async_trait;
use tracing::{error, info};

const RETURNING_COLUMNS: &str = r#"
    RETURNING
        produto_id,
        farmacia_id,
        nome,
        nome_quimico,
        preco,
        quantidade,
        validade,
        lote,
        label,
        imagem_url,
        created_at,
        updated_at
"#;

pub struct ProdutoCommandRepository {
    db: ConnectionPool,
}

impl ProdutoCommandRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProdutoCommandRepositoryTrait for ProdutoCommandRepository {
    async fn create_produto(
        &self,
        req: &CreateProdutoRequest,
    ) -> Result<ProdutoModel, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let sql = format!(
            r#"
            INSERT INTO produtos
                (farmacia_id, nome, nome_quimico, preco, quantidade,
                 validade, lote, label, imagem_url, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9,
                    current_timestamp, current_timestamp)
            {RETURNING_COLUMNS}
            "#
        );

        let result = sqlx::query_as::<_, ProdutoModel>(&sql)
            .bind(req.farmacia_id)
            .bind(&req.nome)
            .bind(&req.nome_quimico)
            .bind(req.preco)
            .bind(req.quantidade)
            .bind(&req.validade)
            .bind(&req.lote)
            .bind(&req.label)
            .bind(&req.imagem_url)
            .fetch_one(&mut *conn)
            .await
            .map_err(|err| {
                error!("❌ Failed to create product '{}': {err:?}", req.nome);
                RepositoryError::from(err)
            })?;

        info!(
            "✅ Created product ID {} ({})",
            result.produto_id,
            result.nome.as_deref().unwrap_or_default()
        );
        Ok(result)
    }

    async fn update_produto(
        &self,
        req: &UpdateProdutoRequest,
    ) -> Result<ProdutoModel, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        // Full replace: every column is overwritten with the supplied
        // value, NULL included. Only farmacia_id survives untouched.
        let sql = format!(
            r#"
            UPDATE produtos
            SET nome = $2,
                nome_quimico = $3,
                preco = $4,
                quantidade = $5,
                validade = $6,
                lote = $7,
                label = $8,
                imagem_url = $9,
                updated_at = current_timestamp
            WHERE produto_id = $1
            {RETURNING_COLUMNS}
            "#
        );

        let result = sqlx::query_as::<_, ProdutoModel>(&sql)
            .bind(req.produto_id)
            .bind(&req.nome)
            .bind(&req.nome_quimico)
            .bind(req.preco)
            .bind(req.quantidade)
            .bind(&req.validade)
            .bind(&req.lote)
            .bind(&req.label)
            .bind(&req.imagem_url)
            .fetch_optional(&mut *conn)
            .await
            .map_err(|err| {
                error!("❌ Failed to update product ID {}: {err:?}", req.produto_id);
                RepositoryError::from(err)
            })?
            .ok_or(RepositoryError::NotFound)?;

        info!("🔄 Updated product ID {}", result.produto_id);
        Ok(result)
    }

    async fn delete_produto(&self, id: i32) -> Result<(), RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let result = sqlx::query("DELETE FROM produtos WHERE produto_id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await
            .map_err(|err| {
                error!("❌ Failed to delete product ID {id}: {err:?}");
                RepositoryError::from(err)
            })?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        info!("🗑️ Deleted product ID {id}");
        Ok(())
    }
}
