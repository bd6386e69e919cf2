use crate::errors::DepositError;
use crate::transactions::create_work::StepArgs;
use curate_domain::{DomainRepository, Work};
use std::sync::Arc;
use transact::Step;

/// Paso final y único con efecto sobre el almacén: valida la obra y la
/// guarda. Una obra inválida queda sin persistir, con su colección de
/// errores poblada como valor del fallo.
pub struct Persist {
  pub(crate) repo: Arc<dyn DomainRepository>,
}

impl Step<Work, StepArgs, DepositError> for Persist {
  fn name(&self) -> &str {
    "persist"
  }

  fn call(&self, work: &mut Work, _args: &StepArgs) -> Result<(), DepositError> {
    if !work.validate() {
      return Err(DepositError::Validation(work.errors().clone()));
    }
    self.repo.save_work(work)?;
    Ok(())
  }
}
