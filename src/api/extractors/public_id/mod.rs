/**
 * Responsibility
 *  - Bundle core and types; only types are visible to handlers
 */
mod core;
mod types;

pub use types::*;
