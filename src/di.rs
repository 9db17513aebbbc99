use crate::{
    abstract_trait::{
        produto::service::{DynProdutoCommandService, DynProdutoQueryService},
        upload::DynUploadRelay,
    },
    config::ConnectionPool,
    repository::{ProdutoCommandRepository, ProdutoQueryRepository},
    service::{ProdutoCommandService, ProdutoQueryService},
    storage::TempStore,
};
use std::{fmt, sync::Arc};

#[derive(Clone)]
pub struct DependenciesInject {
    pub produto_query: DynProdutoQueryService,
    pub produto_command: DynProdutoCommandService,
}

impl fmt::Debug for DependenciesInject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DependenciesInject")
            .field("produto_query", &"ProdutoQueryService")
            .field("produto_command", &"ProdutoCommandService")
            .finish()
    }
}

#[derive(Clone)]
pub struct DependenciesInjectDeps {
    pub pool: ConnectionPool,
    pub relay: DynUploadRelay,
    pub temp: TempStore,
}

impl DependenciesInject {
    pub fn new(deps: DependenciesInjectDeps) -> Self {
        let DependenciesInjectDeps { pool, relay, temp } = deps;

        let produto_query_repo = Arc::new(ProdutoQueryRepository::new(pool.clone()));
        let produto_command_repo = Arc::new(ProdutoCommandRepository::new(pool.clone()));

        let produto_query: DynProdutoQueryService =
            Arc::new(ProdutoQueryService::new(produto_query_repo.clone()));

        let produto_command: DynProdutoCommandService = Arc::new(ProdutoCommandService::new(
            produto_command_repo,
            produto_query_repo,
            relay,
            temp,
        ));

        Self {
            produto_query,
            produto_command,
        }
    }
}
