use crate::errors::DepositError;
use crate::services::TimeService;
use crate::transactions::create_work::StepArgs;
use curate_domain::Work;
use std::sync::Arc;
use transact::Step;

/// Estampa fechas con la fuente de tiempo inyectada: la de subida sólo si
/// falta, la de modificación siempre.
pub struct StampTimestamps {
  pub(crate) clock: Arc<dyn TimeService>,
}

impl Step<Work, StepArgs, DepositError> for StampTimestamps {
  fn name(&self) -> &str {
    "stamp_timestamps"
  }

  fn call(&self, work: &mut Work, _args: &StepArgs) -> Result<(), DepositError> {
    let now = self.clock.time_in_utc();
    if work.date_uploaded.is_none() {
      work.date_uploaded = Some(now);
    }
    work.date_modified = Some(now);
    Ok(())
  }
}
