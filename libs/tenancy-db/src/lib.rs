#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! SeaORM translation of tenancy access decisions.
//!
//! ```ignore
//! use sea_orm::{EntityTrait, QueryFilter};
//! use tenancy_access::{Collection, Operation};
//! use tenancy_db::build_condition;
//!
//! let decision = policy.evaluate(Collection::Pages, Operation::Read, &ctx);
//! let pages = page::Entity::find()
//!     .filter(build_condition::<page::Entity>(&decision))
//!     .all(&db)
//!     .await?;
//! ```

pub mod cond;

pub use cond::{ScopableEntity, build_condition, constraint_condition};
