use crate::{
    domain::requests::produto::{CreateProdutoRequest, UpdateProdutoRequest},
    errors::RepositoryError,
    model::produto::Produto as ProdutoModel,
};
use async_trait::async_trait;
use std::sync::Arc;

pub type DynProdutoCommandRepository = Arc<dyn ProdutoCommandRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait ProdutoCommandRepositoryTrait {
    async fn create_produto(
        &self,
        req: &CreateProdutoRequest,
    ) -> Result<ProdutoModel, RepositoryError>;
    async fn update_produto(
        &self,
        req: &UpdateProdutoRequest,
    ) -> Result<ProdutoModel, RepositoryError>;
    async fn delete_produto(&self, id: i32) -> Result<(), RepositoryError>;
}
