pub mod countries;
pub mod error;
pub mod health;
pub mod records;
pub mod routes;

pub use countries::*;
pub use error::*;
pub use health::*;
pub use records::*;
pub use routes::*;
