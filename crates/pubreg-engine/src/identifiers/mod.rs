pub mod doi;
pub mod isbn;

pub use doi::Doi;
pub use isbn::Isbn;
