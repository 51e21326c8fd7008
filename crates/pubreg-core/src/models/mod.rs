pub mod context;
pub mod identifiers;
pub mod instance;
pub mod record;

pub use context::*;
pub use identifiers::*;
pub use instance::*;
pub use record::*;
