pub mod produto;
