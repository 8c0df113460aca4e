pub mod http;
pub mod resource;
pub mod resources;

pub use http::{ApiPath, HttpClient};
pub use resource::{Resource, ResourceClient};
