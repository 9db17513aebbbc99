pub mod produto;
pub mod upload;
