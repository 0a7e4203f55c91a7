// ============================================================================
// Order Domain
// ============================================================================
//
// - Value objects (Address, OrderItem, Customer, Shipping, Payment)
// - Entity (Order)
// - Result (OrderIntegrationResult)
//
// ============================================================================

pub mod entity;
pub mod result;
pub mod value_objects;

pub use entity::*;
pub use result::*;
pub use value_objects::*;
