use crate::{
    abstract_trait::produto::repository::ProdutoQueryRepositoryTrait,
    config::ConnectionPool,
    errors::RepositoryError,
    model::produto::ProdutoComFarmacia,
};
use async_trait::async_trait;
use tracing::{error, info};

const SELECT_COM_FARMACIA: &str = r#"
    SELECT
        p.produto_id,
        p.farmacia_id,
        p.nome,
        p.nome_quimico,
        p.preco,
        p.quantidade,
        p.validade,
        p.lote,
        p.label,
        p.imagem_url,
        p.created_at,
        p.updated_at,
        f.nome AS farmacia_nome,
        f.cep AS farmacia_cep
    FROM produtos p
    LEFT JOIN farmacias f ON f.farmacia_id = p.farmacia_id
"#;

#[derive(Clone)]
pub struct ProdutoQueryRepository {
    db: ConnectionPool,
}

impl ProdutoQueryRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProdutoQueryRepositoryTrait for ProdutoQueryRepository {
    async fn find_all(&self) -> Result<Vec<ProdutoComFarmacia>, RepositoryError> {
        info!("🔍 Fetching all products");

        let mut conn = self.db.acquire().await.map_err(|e| {
            error!("❌ Failed to acquire DB connection: {e:?}");
            RepositoryError::from(e)
        })?;

        let sql = format!("{SELECT_COM_FARMACIA} ORDER BY p.produto_id");
        let rows = sqlx::query_as::<_, ProdutoComFarmacia>(&sql)
            .fetch_all(&mut *conn)
            .await
            .map_err(|e| {
                error!("❌ Failed to fetch products: {e:?}");
                RepositoryError::from(e)
            })?;

        Ok(rows)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<ProdutoComFarmacia>, RepositoryError> {
        info!("🆔 Fetching product by ID: {id}");

        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let sql = format!("{SELECT_COM_FARMACIA} WHERE p.produto_id = $1");
        let result = sqlx::query_as::<_, ProdutoComFarmacia>(&sql)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
            .map_err(RepositoryError::from)?;

        Ok(result)
    }

    async fn find_by_farmacia(
        &self,
        farmacia_id: i32,
    ) -> Result<Vec<ProdutoComFarmacia>, RepositoryError> {
        info!("🏥 Fetching products for pharmacy ID: {farmacia_id}");

        let mut conn = self.db.acquire().await.map_err(|e| {
            error!("❌ Failed to acquire DB connection: {e:?}");
            RepositoryError::from(e)
        })?;

        let sql = format!("{SELECT_COM_FARMACIA} WHERE p.farmacia_id = $1 ORDER BY p.produto_id");
        let rows = sqlx::query_as::<_, ProdutoComFarmacia>(&sql)
            .bind(farmacia_id)
            .fetch_all(&mut *conn)
            .await
            .map_err(|e| {
                error!("❌ Failed to fetch products for pharmacy {farmacia_id}: {e:?}");
                RepositoryError::from(e)
            })?;

        Ok(rows)
    }
}
