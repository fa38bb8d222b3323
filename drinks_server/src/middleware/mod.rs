mod permission;

pub use permission::{RequirePermissionFactory, RequirePermissionService};
