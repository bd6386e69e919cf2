use crate::errors::DepositError;
use crate::transactions::create_work::StepArgs;
use curate_domain::{Visibility, Work};
use transact::Step;

/// Fija `restricted` cuando la obra no trae visibilidad. Una visibilidad
/// suministrada explícitamente nunca se pisa.
pub struct SetDefaultVisibility;

impl Step<Work, StepArgs, DepositError> for SetDefaultVisibility {
  fn name(&self) -> &str {
    "set_default_visibility"
  }

  fn call(&self, work: &mut Work, _args: &StepArgs) -> Result<(), DepositError> {
    if work.visibility.is_none() {
      work.visibility = Some(Visibility::Restricted);
    }
    Ok(())
  }
}
