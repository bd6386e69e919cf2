use crate::errors::DepositError;
use crate::transactions::create_work::StepArgs;
use curate_domain::Work;
use transact::Step;

/// Asigna la identidad depositante: la explícita de los argumentos o, en su
/// defecto, la del contexto de permisos ambiente.
pub struct SetDepositor;

impl Step<Work, StepArgs, DepositError> for SetDepositor {
  fn name(&self) -> &str {
    "set_depositor"
  }

  fn call(&self, work: &mut Work, args: &StepArgs) -> Result<(), DepositError> {
    let depositor = args.depositor
                        .clone()
                        .or_else(|| args.ability.as_ref().and_then(|a| a.user_key().map(String::from)));
    match depositor {
      Some(user_key) => {
        work.depositor = Some(user_key);
        Ok(())
      }
      None => {
        work.record_error("depositor", "no se pudo resolver una identidad depositante");
        Err(DepositError::Validation(work.errors().clone()))
      }
    }
  }
}
