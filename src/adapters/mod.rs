// ============================================================================
// Outbound Adapters
// ============================================================================
//
// HTTP implementations of the domain ports. One submodule per remote party.
//
// ============================================================================

pub mod store;
pub mod vendor;
