//! Crate `transact` — motor genérico de transacciones por pasos
//!
//! Este crate define el contrato `Step` (paso nombrado y parametrizable) y el
//! valor `Transaction` (secuencia ordenada de pasos con argumentos por
//! defecto por paso). Es agnóstico del dominio: genérico sobre el objeto
//! objetivo `T`, el tipo de argumentos `A` y el tipo de fallo `E`.
//!
//! Diseño resumido:
//! - Orientación railway: cada paso devuelve `Result<(), E>`; el primer
//!   `Err` corta la secuencia y se propaga sin modificar. El tipo suma
//!   `Result` del lenguaje, con sus combinadores `map`/`and_then`/`or_else`,
//!   es el raíl; no hay truthiness de por medio.
//! - Overrides puros: `with_step_args` devuelve una transacción nueva con
//!   los argumentos del paso nombrado sustituidos; la original no se toca.
//! - Mutación parcial: un fallo deja en el objeto las mutaciones en memoria
//!   de los pasos ya ejecutados. La persistencia ocurre sólo en el paso que
//!   el dominio designe como final.
//!
//! Ejemplo rápido:
//! ```rust
//! use std::sync::Arc;
//! use transact::{Step, Transaction};
//!
//! struct Saluda;
//! impl Step<Vec<String>, Option<String>, String> for Saluda {
//!     fn name(&self) -> &str { "saluda" }
//!     fn call(&self, target: &mut Vec<String>, args: &Option<String>) -> Result<(), String> {
//!         target.push(args.clone().unwrap_or_else(|| "hola".to_string()));
//!         Ok(())
//!     }
//! }
//!
//! let steps: Vec<Arc<dyn Step<Vec<String>, Option<String>, String>>> = vec![Arc::new(Saluda)];
//! let tx = Transaction::new(steps).unwrap();
//! let mut trace = Vec::new();
//! tx.call(&mut trace).unwrap();
//! assert_eq!(trace, vec!["hola".to_string()]);
//! ```
pub mod step;
pub mod transaction;

pub use step::*;
pub use transaction::*;
