//! Service configuration model.
//!
//! Value types describing how a tenant's logical service maps onto concrete
//! network endpoints, plus the system-wide defaults used when a tenant has no
//! override. These types are owned by the storage layer; the resolver and the
//! health tracker only ever hold transient copies.

mod endpoint;
mod error;
mod health_check;
mod key;
mod service;

pub use endpoint::*;
pub use error::*;
pub use health_check::*;
pub use key::*;
pub use service::*;
