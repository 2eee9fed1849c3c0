//! Statement data model.
//!
//! Canonical forms:
//! - Targets: values sorted in code-point order, `negated` set when the
//!   field came from `NotResource`, `NotAction` or `NotPrincipal`.
//! - Principals: map entries flattened to `Kind:value`, e.g. `AWS:123` or
//!   `Service:s3.amazonaws.com`; a bare `*` stays `*`.
//! - Unparseable statements: only the raw expression text is kept.

mod effect;
mod permission_grant;
mod statement;
mod targets;

pub use effect::Effect;
pub use permission_grant::ResourcePermissionGrant;
pub use statement::{RenderedStatement, Statement};
pub use targets::{TargetKind, Targets, render_targets};
