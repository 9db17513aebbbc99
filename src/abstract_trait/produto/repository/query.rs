use crate::{errors::RepositoryError, model::produto::ProdutoComFarmacia};
use async_trait::async_trait;
use std::sync::Arc;

pub type DynProdutoQueryRepository = Arc<dyn ProdutoQueryRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait ProdutoQueryRepositoryTrait {
    async fn find_all(&self) -> Result<Vec<ProdutoComFarmacia>, RepositoryError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<ProdutoComFarmacia>, RepositoryError>;
    async fn find_by_farmacia(
        &self,
        farmacia_id: i32,
    ) -> Result<Vec<ProdutoComFarmacia>, RepositoryError>;
}
