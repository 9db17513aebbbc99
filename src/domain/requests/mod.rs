pub mod produto;

pub use self::produto::{
    CadastrarProdutoForm, CreateProdutoRequest, ImagemRecebida, ProdutoForm, UpdateProdutoRequest,
};
