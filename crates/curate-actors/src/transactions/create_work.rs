use crate::errors::DepositError;
use crate::services::TimeService;
use crate::transactions::steps::{AddToWorks, ApplyAttributes, ApplyPermissionTemplate, EnsureAdminSet, Persist,
                                 SetDefaultVisibility, SetDepositor, StampTimestamps};
use curate_domain::{DomainRepository, PermissionContext, Work};
use indexmap::IndexMap;
use serde_json::Value as JsonValue;
use std::sync::Arc;
use transact::{Step, Transaction, TransactionError};
use uuid::Uuid;

/// Argumentos nombrados de los pasos de creación. Cada paso toma de aquí
/// sólo lo que le concierne; los overrides por invocación se dirigen con
/// `with_step_args(nombre_de_paso, StepArgs { ... })`.
#[derive(Clone, Default)]
pub struct StepArgs {
  /// Identidad depositante explícita (paso `set_depositor`).
  pub depositor: Option<String>,
  /// Atributos a aplicar sobre la obra (paso `apply_attributes`).
  pub attributes: Option<IndexMap<String, JsonValue>>,
  /// Obras padre a las que adjuntar la nueva obra (paso `add_to_works`).
  pub work_ids: Vec<Uuid>,
  /// Contexto de permisos ambiente: resuelve la identidad depositante y
  /// autoriza el depósito en el admin set.
  pub ability: Option<Arc<dyn PermissionContext>>,
}

/// Transacción concreta de creación de obras: asigna depositante, aplica
/// atributos, garantiza admin set y plantilla, hereda permisos, fija la
/// visibilidad por defecto, adjunta a obras padre, estampa fechas y
/// persiste. Los siete primeros pasos mutan sólo en memoria; únicamente el
/// paso final toca el almacén.
pub fn create_work(repo: Arc<dyn DomainRepository>,
                   clock: Arc<dyn TimeService>)
                   -> Result<Transaction<Work, StepArgs, DepositError>, TransactionError> {
  let steps: Vec<Arc<dyn Step<Work, StepArgs, DepositError>>> =
    vec![Arc::new(SetDepositor),
         Arc::new(ApplyAttributes),
         Arc::new(EnsureAdminSet { repo: repo.clone() }),
         Arc::new(ApplyPermissionTemplate { repo: repo.clone() }),
         Arc::new(SetDefaultVisibility),
         Arc::new(AddToWorks { repo: repo.clone() }),
         Arc::new(StampTimestamps { clock }),
         Arc::new(Persist { repo })];
  Transaction::new(steps)
}
