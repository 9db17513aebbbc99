mod command;
mod query;

pub use self::command::{DynProdutoCommandRepository, ProdutoCommandRepositoryTrait};
pub use self::query::{DynProdutoQueryRepository, ProdutoQueryRepositoryTrait};
