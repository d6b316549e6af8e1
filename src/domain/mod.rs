// ============================================================================
// Domain Layer - Business Logic
// ============================================================================
//
// Each aggregate has its own subdirectory with value objects, errors, the
// aggregate implementation and the repository that persists it.
//
// This layer only reaches persistence through the traits in
// src/persistence/.
//
// ============================================================================

pub mod boat;
