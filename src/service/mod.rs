pub mod command;
pub mod query;

pub use self::command::ProdutoCommandService;
pub use self::query::ProdutoQueryService;
