use crate::{
    domain::response::{api::ApiResponse, produto::ProdutoResponse},
    errors::ServiceError,
};
use async_trait::async_trait;
use std::sync::Arc;

pub type DynProdutoQueryService = Arc<dyn ProdutoQueryServiceTrait + Send + Sync>;

#[async_trait]
pub trait ProdutoQueryServiceTrait {
    async fn find_all(&self) -> Result<ApiResponse<Vec<ProdutoResponse>>, ServiceError>;
    async fn find_by_id(&self, id: i32) -> Result<ApiResponse<ProdutoResponse>, ServiceError>;
    async fn find_by_farmacia(
        &self,
        farmacia_id: i32,
    ) -> Result<ApiResponse<Vec<ProdutoResponse>>, ServiceError>;
}
