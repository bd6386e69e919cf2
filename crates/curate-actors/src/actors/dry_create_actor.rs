use crate::environment::Environment;
use crate::errors::DepositError;
use crate::stack::Actor;
use crate::transactions::StepArgs;
use curate_domain::Work;
use std::sync::Arc;
use transact::Transaction;

/// Manejador de fallos de creación: recibe el fallo antes de que la pila lo
/// colapse a booleano. Su valor de retorno se ignora.
pub type ErrorHandler = Box<dyn Fn(&DepositError) + Send + Sync>;

/// Actor que cortocircuita el resto de la pila en `create`, reemplazándolo
/// por la transacción de creación configurada. `update` y `destroy` se
/// reenvían sin tocar.
pub struct DryCreateActor {
  next: Arc<dyn Actor>,
  transaction: Transaction<Work, StepArgs, DepositError>,
  error_handler: ErrorHandler,
}

impl DryCreateActor {
  pub fn new(next: Arc<dyn Actor>,
             transaction: Transaction<Work, StepArgs, DepositError>,
             error_handler: ErrorHandler)
             -> Self {
    Self { next, transaction, error_handler }
  }
}

impl Actor for DryCreateActor {
  /// Descarta los actores restantes en favor de la transacción de
  /// creación. Éxito es `true`; un fallo pasa por el manejador exactamente
  /// una vez y devuelve `false`, ignorando lo que el manejador retorne.
  fn create(&self, env: &mut Environment) -> bool {
    match self.transaction.call(&mut env.curation_concern) {
      Ok(()) => true,
      Err(err) => {
        (self.error_handler)(&err);
        false
      }
    }
  }

  fn update(&self, env: &mut Environment) -> bool {
    self.next.update(env)
  }

  fn destroy(&self, env: &mut Environment) -> bool {
    self.next.destroy(env)
  }
}
