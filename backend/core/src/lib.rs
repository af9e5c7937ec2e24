pub mod domain;
pub mod error;
pub mod traits;
pub mod types;

pub use domain::{ActionDomain, Control, Data};
pub use error::{AdaptError, CheckError, TokenSource, ValidationError};
pub use traits::RuleSource;
pub use types::{
    DenyAssignmentRecord, PermissionRecord, PermissionSet, RoleAssignmentRecord, RuleSnapshot,
};
