// ============================================================================
// Domain Layer
// ============================================================================
//
// Order data model, the integration result, the fault taxonomy and the ports
// implemented by the vendor/store adapters. Nothing in here performs I/O.
//
// ============================================================================

pub mod errors;
pub mod order;
pub mod ports;

pub use errors::*;
pub use order::*;
pub use ports::*;
