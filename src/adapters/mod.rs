// Adapters layer: concrete implementations of the domain ports.

pub mod http;
pub mod throttle;

pub use http::OpenFoodFactsClient;
pub use throttle::{FixedDelay, NoDelay};
