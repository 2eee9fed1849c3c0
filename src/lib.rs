pub use coerce::force_list_of_strings;
pub use diff::{SUMMARY_HEADER, StatementChanges, default_principal, default_resource};
pub use error::StatementError;
pub use intrinsics::render_intrinsics;
pub use parser::{
    parse_policy_document, parse_resource_permission_grant, parse_statement,
    parse_statement_list,
};
pub use render::render_condition;
pub use types::{
    Effect, RenderedStatement, ResourcePermissionGrant, Statement, TargetKind, Targets,
    render_targets,
};

mod coerce;
mod diff;
mod error;
mod intrinsics;
mod parser;
mod render;
mod types;
