mod command;
mod query;

pub use self::command::{DynProdutoCommandService, ProdutoCommandServiceTrait};
pub use self::query::{DynProdutoQueryService, ProdutoQueryServiceTrait};
