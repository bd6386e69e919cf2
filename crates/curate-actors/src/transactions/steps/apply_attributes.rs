use crate::errors::DepositError;
use crate::transactions::create_work::StepArgs;
use curate_domain::Work;
use transact::Step;

/// Mezcla el mapa de atributos suministrado sobre la obra. Claves no
/// reconocidas o valores mal tipados fallan con la colección de errores de
/// la propia obra.
pub struct ApplyAttributes;

impl Step<Work, StepArgs, DepositError> for ApplyAttributes {
  fn name(&self) -> &str {
    "apply_attributes"
  }

  fn call(&self, work: &mut Work, args: &StepArgs) -> Result<(), DepositError> {
    if let Some(attributes) = &args.attributes {
      work.apply_attributes(attributes)?;
    }
    Ok(())
  }
}
