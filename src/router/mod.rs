mod layer;
mod options;
mod service;

pub use layer::RouteLayer;
pub use options::{RouterOptions, RouterOptionsBuilder, RouterOptionsError};
pub use service::{RouteMatch, Router};
