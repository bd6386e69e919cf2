use crate::environment::Environment;
use curate_domain::DomainRepository;
use std::sync::Arc;

/// Interceptor de operaciones sobre una obra. Cadena de responsabilidad
/// síncrona: cada actor hace su parte y reenvía explícitamente al `next`
/// que recibió al construirse, o corta devolviendo sin reenviar.
///
/// Las tres operaciones son independientes: un actor puede interceptar una
/// y reenviar las otras sin tocarlas. El resultado booleano del actor
/// siguiente se devuelve sin re-envolver.
pub trait Actor: Send + Sync {
  fn create(&self, env: &mut Environment) -> bool;
  fn update(&self, env: &mut Environment) -> bool;
  fn destroy(&self, env: &mut Environment) -> bool;
}

/// Cierre afirmativo de la cadena: no hace nada y devuelve `true`. Útil
/// como terminal en pruebas y como tope de pilas parciales.
pub struct Terminator;

impl Actor for Terminator {
  fn create(&self, _env: &mut Environment) -> bool {
    true
  }

  fn update(&self, _env: &mut Environment) -> bool {
    true
  }

  fn destroy(&self, _env: &mut Environment) -> bool {
    true
  }
}

/// Persistidor terminal: guarda la obra del Environment en crear/actualizar
/// y la elimina en destruir. Un fallo del almacén se colapsa a `false`.
pub struct Persister {
  repo: Arc<dyn DomainRepository>,
}

impl Persister {
  pub fn new(repo: Arc<dyn DomainRepository>) -> Self {
    Self { repo }
  }

  fn save(&self, env: &mut Environment) -> bool {
    match self.repo.save_work(&mut env.curation_concern) {
      Ok(_) => true,
      Err(e) => {
        log::warn!("fallo al guardar la obra {}: {}", env.curation_concern.id(), e);
        false
      }
    }
  }
}

impl Actor for Persister {
  fn create(&self, env: &mut Environment) -> bool {
    self.save(env)
  }

  fn update(&self, env: &mut Environment) -> bool {
    self.save(env)
  }

  fn destroy(&self, env: &mut Environment) -> bool {
    match self.repo.delete_work(&env.curation_concern.id()) {
      Ok(()) => true,
      Err(e) => {
        log::warn!("fallo al eliminar la obra {}: {}", env.curation_concern.id(), e);
        false
      }
    }
  }
}

/// Capa de la pila: una función que envuelve al actor siguiente y devuelve
/// el actor compuesto.
pub type Layer = Box<dyn Fn(Arc<dyn Actor>) -> Arc<dyn Actor> + Send + Sync>;

/// Pila ordenada de actores. Las capas se registran de afuera hacia
/// adentro: la primera capa añadida es la más externa y ve la operación
/// antes que las demás. `build` compone la cadena sobre el actor terminal.
pub struct ActorStack {
  layers: Vec<Layer>,
}

impl ActorStack {
  pub fn new() -> Self {
    Self { layers: Vec::new() }
  }

  /// Registra una capa. El orden importa: una capa que desvía (dry-create)
  /// colocada primero impide que corran las posteriores.
  pub fn use_layer<F>(&mut self, layer: F)
    where F: Fn(Arc<dyn Actor>) -> Arc<dyn Actor> + Send + Sync + 'static
  {
    self.layers.push(Box::new(layer));
  }

  /// Compone la cadena terminando en `terminal` y devuelve el actor cabeza.
  pub fn build(&self, terminal: Arc<dyn Actor>) -> Arc<dyn Actor> {
    self.layers.iter().rev().fold(terminal, |next, layer| layer(next))
  }
}

impl Default for ActorStack {
  fn default() -> Self {
    Self::new()
  }
}
