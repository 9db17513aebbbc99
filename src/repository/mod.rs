pub mod command;
pub mod query;

pub use self::command::ProdutoCommandRepository;
pub use self::query::ProdutoQueryRepository;
