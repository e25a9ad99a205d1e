#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Tenant-scoped access control for the CMS collections.
//!
//! Every predicate takes a [`RequestContext`](tenancy_security::RequestContext)
//! and returns an [`AccessDecision`]: grant everything, deny everything, or a
//! [`Constraint`] the host must `AND` onto its datastore query.
//!
//! - [`AccessPolicy`] - dispatch by collection and operation
//! - [`collections`] - Tenants, Users and Pages predicates
//! - [`combinators`] - shared `super-admin` and tenant-scoping helpers
//! - [`fields`] - field-level overrides (roles, memberships)
//! - [`hooks`] - tenant inheritance for newly created users
//! - [`config`] - figment-backed [`TenancyConfig`]

pub mod collections;
pub mod combinators;
pub mod config;
pub mod constraint;
pub mod decision;
pub mod error;
pub mod fields;
pub mod hooks;
pub mod policy;

pub use collections::{Collection, CollectionAccess, Operation, Pages, Tenants, Users};
pub use config::{ConfigError, TenancyConfig};
pub use constraint::Constraint;
pub use decision::{AccessDecision, AccessScope};
pub use error::AccessError;
pub use fields::{FieldGuard, FieldOperation};
pub use hooks::TenantInheritance;
pub use policy::AccessPolicy;
