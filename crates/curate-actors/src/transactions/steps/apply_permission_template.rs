use crate::errors::DepositError;
use crate::transactions::create_work::StepArgs;
use curate_domain::{Action, DomainRepository, Work};
use std::sync::Arc;
use transact::Step;

/// Copia las concesiones de la plantilla del admin set sobre la obra, de
/// forma aditiva: agentes Manage reciben edición, agentes View lectura.
/// Las concesiones ya presentes en la obra no se tocan ni se eliminan;
/// aplicar dos veces converge sin cambios.
///
/// Si los argumentos traen un contexto de permisos, la identidad debe
/// tener derecho de depósito sobre el admin set.
pub struct ApplyPermissionTemplate {
  pub(crate) repo: Arc<dyn DomainRepository>,
}

impl Step<Work, StepArgs, DepositError> for ApplyPermissionTemplate {
  fn name(&self) -> &str {
    "apply_permission_template"
  }

  fn call(&self, work: &mut Work, args: &StepArgs) -> Result<(), DepositError> {
    let set_id = work.admin_set_id
                     .ok_or(DepositError::MissingDependency("la obra no tiene admin set asignado".to_string()))?;

    if let Some(ability) = &args.ability {
      if !ability.can(Action::Deposit, &set_id) {
        return Err(DepositError::Authorization(format!("sin derecho de depósito sobre el admin set {}", set_id)));
      }
    }

    let template = self.repo
                       .find_permission_template(&set_id)?
                       .ok_or(DepositError::MissingDependency(format!("plantilla de permisos del admin set {}", set_id)))?;

    // La visibilidad por defecto de la plantilla aplica sólo si la obra no
    // trae una explícita; el paso posterior cubre el resto con `restricted`.
    if work.visibility.is_none() {
      work.visibility = template.visibility;
    }

    for user in template.manage_users() {
      push_unique(&mut work.edit_users, user);
    }
    for group in template.manage_groups() {
      push_unique(&mut work.edit_groups, group);
    }
    for user in template.view_users() {
      push_unique(&mut work.read_users, user);
    }
    for group in template.view_groups() {
      push_unique(&mut work.read_groups, group);
    }
    Ok(())
  }
}

fn push_unique(list: &mut Vec<String>, value: String) {
  if !list.contains(&value) {
    list.push(value);
  }
}
