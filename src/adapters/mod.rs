// Adapters layer: concrete implementations of the domain ports.

pub mod venue_http;

pub use venue_http::HttpVenueDirectory;
