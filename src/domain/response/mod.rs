pub mod api;
pub mod produto;

pub use self::api::ApiResponse;
pub use self::produto::{FarmaciaResumo, ProdutoResponse};
