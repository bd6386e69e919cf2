mod admin_set;
mod domain_repository;
mod errors;
mod file_set;
mod permissions;
mod work;

pub use admin_set::{AccessGrant, AccessLevel, AdminSet, Agent, PermissionTemplate};
pub use domain_repository::{BinaryStore, DomainRepository, InMemoryBinaryStore, InMemoryDomainRepository};
pub use errors::{DomainError, FieldError, ValidationErrors};
pub use file_set::{content_checksum, FileNode, FileSet, FileUse, VersionRecord};
pub use permissions::{Ability, Action, PermissionContext};
pub use work::{Visibility, Work};
