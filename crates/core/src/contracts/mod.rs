//! Deployed contract addresses.
//!
//! Contracts are referenced by logical role. A `ContractSet` maps every role
//! to an address for one network; the `ContractRegistry` keys sets by chain
//! id and is frozen once the server starts.

mod error;
mod manifest;
mod registry;

pub use error::ContractError;
pub use manifest::DeploymentManifest;
pub use registry::{ContractRegistry, ContractRole, ContractSet};
