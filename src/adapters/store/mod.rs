pub mod auth;
pub mod notifier;

pub use auth::StoreAuthAdapter;
pub use notifier::StoreNotifierAdapter;
