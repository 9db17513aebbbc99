use crate::{
    domain::{requests::produto::ProdutoForm, response::api::ApiResponse},
    errors::ServiceError,
};
use async_trait::async_trait;
use std::sync::Arc;

pub type DynProdutoCommandService = Arc<dyn ProdutoCommandServiceTrait + Send + Sync>;

#[async_trait]
pub trait ProdutoCommandServiceTrait {
    async fn create_produto(&self, form: &ProdutoForm) -> Result<ApiResponse<()>, ServiceError>;
    async fn update_produto(
        &self,
        id: i32,
        form: &ProdutoForm,
    ) -> Result<ApiResponse<()>, ServiceError>;
    async fn delete_produto(&self, id: i32) -> Result<ApiResponse<()>, ServiceError>;
}
