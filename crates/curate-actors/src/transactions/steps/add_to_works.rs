use crate::errors::DepositError;
use crate::transactions::create_work::StepArgs;
use curate_domain::{DomainRepository, Work};
use std::sync::Arc;
use transact::Step;

/// Adjunta la obra como miembro de cada obra padre indicada en
/// `work_ids`. La pertenencia se registra en el borrador
/// (`member_of_ids`); los padres no se reescriben aquí, así el paso no
/// toca el almacén. Idempotente: ids ya presentes se saltan.
pub struct AddToWorks {
  pub(crate) repo: Arc<dyn DomainRepository>,
}

impl Step<Work, StepArgs, DepositError> for AddToWorks {
  fn name(&self) -> &str {
    "add_to_works"
  }

  fn call(&self, work: &mut Work, args: &StepArgs) -> Result<(), DepositError> {
    for parent_id in &args.work_ids {
      if self.repo.find_work(parent_id)?.is_none() {
        return Err(DepositError::NotFound(format!("obra padre {}", parent_id)));
      }
      if !work.member_of_ids.contains(parent_id) {
        work.member_of_ids.push(*parent_id);
      }
    }
    Ok(())
  }
}
