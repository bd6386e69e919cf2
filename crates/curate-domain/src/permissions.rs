// permissions.rs
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

/// Acciones consultables sobre un objeto del repositorio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
  Read,
  Edit,
  Deposit,
  Destroy,
}

/// Contexto de permisos de la identidad actuante. Lo consultan el actor de
/// orden (altas de miembros) y el paso de plantilla de permisos de la
/// transacción de creación.
pub trait PermissionContext: Send + Sync {
  /// user key de la identidad, si hay una sesión asociada.
  fn user_key(&self) -> Option<&str>;

  /// ¿Puede la identidad ejecutar `action` sobre el objeto `target`?
  fn can(&self, action: Action, target: &Uuid) -> bool;
}

/// Implementación basada en concesiones explícitas, suficiente para el
/// cableado en memoria y las pruebas. Un admin puede todo.
#[derive(Debug, Clone, Default)]
pub struct Ability {
  user_key: Option<String>,
  admin: bool,
  grants: HashSet<(Action, Uuid)>,
}

impl Ability {
  pub fn for_user(user_key: impl Into<String>) -> Self {
    Self { user_key: Some(user_key.into()), admin: false, grants: HashSet::new() }
  }

  pub fn admin(user_key: impl Into<String>) -> Self {
    Self { user_key: Some(user_key.into()), admin: true, grants: HashSet::new() }
  }

  /// Identidad anónima sin concesiones.
  pub fn guest() -> Self {
    Self::default()
  }

  /// Builder: concede `action` sobre `target`.
  pub fn grant(mut self, action: Action, target: Uuid) -> Self {
    self.grants.insert((action, target));
    self
  }
}

impl PermissionContext for Ability {
  fn user_key(&self) -> Option<&str> {
    self.user_key.as_deref()
  }

  fn can(&self, action: Action, target: &Uuid) -> bool {
    if self.admin {
      return true;
    }
    // Edit implica Read sobre el mismo objeto.
    if self.grants.contains(&(action, *target)) {
      return true;
    }
    action == Action::Read && self.grants.contains(&(Action::Edit, *target))
  }
}
