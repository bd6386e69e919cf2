// Archivo: transaction.rs
// Propósito: implementar el valor `Transaction`: secuencia ordenada de
// pasos más el mapa nombre-de-paso -> argumentos. Se construye una vez y se
// reutiliza en muchas invocaciones; los overrides producen valores nuevos.
use crate::step::Step;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

/// Errores de construcción de una transacción.
#[derive(Error, Debug)]
pub enum TransactionError {
    /// Dos pasos declararon el mismo nombre; los overrides serían ambiguos.
    #[error("Paso duplicado en la transacción: {0}")]
    DuplicateStep(String),
}

/// Secuencia ordenada de pasos con argumentos por defecto por paso.
///
/// `call` ejecuta los pasos en el orden declarado y corta en el primer
/// fallo, que se devuelve sin modificar. Los pasos anteriores al fallo ya
/// mutaron el objeto en memoria; ese estado parcial se conserva a propósito
/// (la persistencia es responsabilidad del paso final del dominio).
pub struct Transaction<T, A, E> {
    steps: Vec<Arc<dyn Step<T, A, E>>>,
    step_args: HashMap<String, A>,
}

impl<T, A, E> Clone for Transaction<T, A, E> where A: Clone
{
    fn clone(&self) -> Self {
        Self { steps: self.steps.clone(),
               step_args: self.step_args.clone() }
    }
}

impl<T, A, E> Transaction<T, A, E> where A: Clone + Default
{
    /// Crea la transacción con los pasos dados, en orden. Falla si dos
    /// pasos comparten nombre.
    pub fn new(steps: Vec<Arc<dyn Step<T, A, E>>>) -> Result<Self, TransactionError> {
        let mut seen: Vec<&str> = Vec::with_capacity(steps.len());
        for step in &steps {
            if seen.contains(&step.name()) {
                return Err(TransactionError::DuplicateStep(step.name().to_string()));
            }
            seen.push(step.name());
        }
        Ok(Self { steps,
                  step_args: HashMap::new() })
    }

    /// Nombres de los pasos, en orden de ejecución.
    pub fn step_names(&self) -> Vec<&str> {
        self.steps.iter().map(|s| s.name()).collect()
    }

    /// Builder puro: devuelve una transacción nueva con los argumentos del
    /// paso `name` sustituidos por `args`. La transacción receptora y las
    /// invocaciones en curso no se ven afectadas.
    pub fn with_step_args(&self, name: impl Into<String>, args: A) -> Self {
        let name = name.into();
        if !self.steps.iter().any(|s| s.name() == name) {
            log::warn!("override de argumentos para un paso desconocido: {}", name);
        }
        let mut next = self.clone();
        next.step_args.insert(name, args);
        next
    }

    /// Ejecuta los pasos en orden sobre `target`. Los argumentos efectivos
    /// de cada paso son el override registrado para su nombre o, en su
    /// defecto, el valor por defecto del tipo de argumentos.
    pub fn call(&self, target: &mut T) -> Result<(), E> {
        let default_args = A::default();
        for step in &self.steps {
            log::debug!("transacción: ejecutando paso {}", step.name());
            let args = self.step_args.get(step.name()).unwrap_or(&default_args);
            step.call(target, args)?;
        }
        Ok(())
    }
}
