//! # PharmReturn Compliance Utilities
//!
//! The controlled-substance compliance core: the NDC identifier
//! normalizer ([`ndc`]) and the DEA Form 222 generator ([`form222`]),
//! plus configuration, logging and error handling shared by the services.

pub mod config;
pub mod logging;
pub mod error;
pub mod validation;
pub mod ndc;
pub mod form222;

pub use self::config::*;
pub use self::logging::*;
pub use self::error::*;
pub use self::validation::*;
pub use self::ndc::*;
pub use self::form222::*;
