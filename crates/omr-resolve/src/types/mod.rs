//! # Type Table Mapper
//!
//! Two disjoint tables. Properties and action parameters are separate type
//! surfaces that happen to share some primitive names, so each has its own
//! pure mapping function and neither consults the other.

pub mod parameter;
pub mod property;

pub use parameter::project_parameter_type;
pub use property::project_property_type;
