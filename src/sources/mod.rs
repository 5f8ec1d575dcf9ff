pub mod http;
pub mod traits;

pub use http::HttpNewsSource;
pub use traits::NewsSource;
