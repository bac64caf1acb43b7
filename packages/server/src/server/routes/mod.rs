// HTTP routes
pub mod companies;
pub mod health;
pub mod search;

pub use companies::*;
pub use health::*;
pub use search::*;
