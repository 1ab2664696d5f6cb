//! Resource module
//!
//! Resource kinds, their descriptors, and the instances decoded from the API.
//!
//! # Overview
//!
//! - `ResourceKind` - the closed set of registered kinds
//! - `ResourceDescriptor` - endpoint template, required parameters, capabilities
//! - `Resource` - one object: kind tag, JSON fields, hydration flag

mod descriptor;
mod object;

pub use descriptor::{Capabilities, ResourceDescriptor, ResourceKind};
pub use object::Resource;
