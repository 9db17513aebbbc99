use crate::{
    abstract_trait::produto::{
        repository::DynProdutoQueryRepository, service::ProdutoQueryServiceTrait,
    },
    domain::response::{api::ApiResponse, produto::ProdutoResponse},
    errors::ServiceError,
};
use async_trait::async_trait;
use tracing::{error, info};

#[derive(Clone)]
pub struct ProdutoQueryService {
    query: DynProdutoQueryRepository,
}

impl ProdutoQueryService {
    pub fn new(query: DynProdutoQueryRepository) -> Self {
        Self { query }
    }
}

#[async_trait]
impl ProdutoQueryServiceTrait for ProdutoQueryService {
    async fn find_all(&self) -> Result<ApiResponse<Vec<ProdutoResponse>>, ServiceError> {
        info!("🔍 Finding all products");

        let rows = self.query.find_all().await.map_err(|e| {
            error!("❌ Failed to fetch all products: {e:?}");
            ServiceError::Repo(e)
        })?;

        // An empty catalog answers 404, not an empty 200. Compatibility
        // contract inherited from the existing API.
        if rows.is_empty() {
            info!("📭 No products registered");
            return Err(ServiceError::NotFound("Não há produtos cadastrados".into()));
        }

        let data: Vec<ProdutoResponse> = rows
            .into_iter()
            .map(|row| {
                // List rows expand only the pharmacy name.
                let mut response = ProdutoResponse::from(row);
                response.farmacia.cep = None;
                response
            })
            .collect();

        info!("✅ Found {} products", data.len());
        Ok(ApiResponse::success("Produtos recuperados com sucesso", data))
    }

    async fn find_by_id(&self, id: i32) -> Result<ApiResponse<ProdutoResponse>, ServiceError> {
        info!("🆔 Finding product by ID: {id}");

        let produto = match self.query.find_by_id(id).await {
            Ok(Some(row)) => row,
            Ok(None) => {
                info!("📭 Product not found with ID: {id}");
                return Err(ServiceError::NotFound("Produto inexistente".into()));
            }
            Err(e) => {
                error!("❌ Database error while finding product ID {id}: {e:?}");
                return Err(ServiceError::Repo(e));
            }
        };

        Ok(ApiResponse::success(
            "Produto recuperado com sucesso",
            ProdutoResponse::from(produto),
        ))
    }

    async fn find_by_farmacia(
        &self,
        farmacia_id: i32,
    ) -> Result<ApiResponse<Vec<ProdutoResponse>>, ServiceError> {
        info!("🏥 Finding products for pharmacy ID: {farmacia_id}");

        let rows = self.query.find_by_farmacia(farmacia_id).await.map_err(|e| {
            error!("❌ Failed to fetch products for pharmacy {farmacia_id}: {e:?}");
            ServiceError::Repo(e)
        })?;

        if rows.is_empty() {
            info!("📭 No products for pharmacy ID: {farmacia_id}");
            return Err(ServiceError::NotFound(
                "Nenhum produto encontrado para esta farmácia.".into(),
            ));
        }

        let data: Vec<ProdutoResponse> = rows
            .into_iter()
            .map(|row| {
                let mut response = ProdutoResponse::from(row);
                response.farmacia.cep = None;
                response
            })
            .collect();

        info!(
            "✅ Found {} products for pharmacy {farmacia_id}",
            data.len()
        );
        Ok(ApiResponse::success("Produtos recuperados com sucesso", data))
    }
}
