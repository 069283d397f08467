// Composition root.
//
// Responsibilities
// - Read config from flags and environment.
// - Instantiate the SQLite adapters and wire them into the application state.
// - Build the HTTP router from every bounded context's routes.

pub mod config;
pub mod errors;
pub mod extract;
pub mod http;
pub mod state;
