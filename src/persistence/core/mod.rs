// ============================================================================
// Persistence Core - Generic Entity Abstractions
// ============================================================================
//
// No domain-specific code lives here; aggregates in src/domain/ implement
// these traits.
//
// ============================================================================

pub mod entity;

pub use entity::Entity;
