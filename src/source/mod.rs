pub mod error;
pub mod http;
pub mod traits;

pub use error::FetchError;
pub use http::HttpListingsSource;
pub use traits::ListingsSource;
