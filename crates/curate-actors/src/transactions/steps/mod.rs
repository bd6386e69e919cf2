mod add_to_works;
mod apply_attributes;
mod apply_permission_template;
mod ensure_admin_set;
mod persist;
mod set_default_visibility;
mod set_depositor;
mod stamp_timestamps;

pub use add_to_works::AddToWorks;
pub use apply_attributes::ApplyAttributes;
pub use apply_permission_template::ApplyPermissionTemplate;
pub use ensure_admin_set::EnsureAdminSet;
pub use persist::Persist;
pub use set_default_visibility::SetDefaultVisibility;
pub use set_depositor::SetDepositor;
pub use stamp_timestamps::StampTimestamps;
