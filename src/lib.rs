// Draw engine and roster
pub mod core;

// Environment configuration
pub mod config;

// Request-level errors
pub mod error;

// Middleware
pub mod middleware;

// Services (locking and orchestration)
pub mod services;

// Persistence backends
pub mod store;

// API models (requests/responses)
pub mod models;

// HTTP routes
pub mod routes;

// Application state
pub mod state;
