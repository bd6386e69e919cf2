use crate::errors::DepositError;
use crate::transactions::create_work::StepArgs;
use curate_domain::{DomainRepository, PermissionTemplate, Work};
use std::sync::Arc;
use transact::Step;

/// Garantiza que la obra quede bajo un admin set con plantilla de permisos.
///
/// Sin admin set: se asigna el del sistema por defecto, creándolo (y a su
/// plantilla) si aún no existen. Con admin set explícito: debe existir y
/// tener plantilla, de lo contrario la creación falla.
pub struct EnsureAdminSet {
  pub(crate) repo: Arc<dyn DomainRepository>,
}

impl Step<Work, StepArgs, DepositError> for EnsureAdminSet {
  fn name(&self) -> &str {
    "ensure_admin_set"
  }

  fn call(&self, work: &mut Work, _args: &StepArgs) -> Result<(), DepositError> {
    match work.admin_set_id {
      None => {
        let set = self.repo.find_or_create_default_admin_set()?;
        if self.repo.find_permission_template(&set.id())?.is_none() {
          self.repo.save_permission_template(PermissionTemplate::new(set.id()))?;
        }
        work.admin_set_id = Some(set.id());
        Ok(())
      }
      Some(set_id) => {
        if self.repo.find_admin_set(&set_id)?.is_none() {
          return Err(DepositError::MissingDependency(format!("admin set {}", set_id)));
        }
        if self.repo.find_permission_template(&set_id)?.is_none() {
          return Err(DepositError::MissingDependency(format!("el admin set {} no tiene plantilla de permisos", set_id)));
        }
        Ok(())
      }
    }
  }
}
