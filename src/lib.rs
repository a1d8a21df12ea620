// [rust] Library root - the binary and the integration tests both build on these modules
pub mod config; // Configuration management and environment variable handling
pub mod db; // Graph database gateway, queries, and response models
pub mod generator; // Synthetic record generation
pub mod instance; // Host identity reported by /health and /whoami
pub mod web; // HTTP routing and handlers
