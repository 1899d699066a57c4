pub mod config;
pub mod error;
pub mod identity;
pub mod models;
pub mod service;
pub mod token;
pub mod traits;

#[cfg(test)]
mod testutil;

pub use config::{AuthConfig, JwtConfig};
pub use error::AppError;
pub use identity::StaticIdentityProvider;
pub use models::{Credentials, Item, ItemChanges};
pub use service::ItemService;
pub use token::{Claims, TokenService};
pub use traits::{IdentityProvider, ItemStore};
