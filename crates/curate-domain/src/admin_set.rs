// admin_set.rs
use crate::work::Visibility;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Título del admin set por defecto. Configurable vía entorno para
/// instalaciones que quieran otro nombre.
static DEFAULT_ADMIN_SET_TITLE: Lazy<String> =
  Lazy::new(|| std::env::var("CURATEFLOW_DEFAULT_ADMIN_SET").unwrap_or_else(|_| "Conjunto administrativo por defecto".to_string()));

/// Contenedor de política bajo el cual se archivan las obras. Aporta la
/// visibilidad por defecto y, a través de su plantilla de permisos, los
/// derechos heredados.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminSet {
  id: Uuid,
  pub title: String,
  default_set: bool,
}

impl AdminSet {
  pub fn new(title: impl Into<String>) -> Self {
    Self { id: Uuid::new_v4(), title: title.into(), default_set: false }
  }

  /// Construye el admin set por defecto del sistema.
  pub fn default_set() -> Self {
    Self { id: Uuid::new_v4(), title: DEFAULT_ADMIN_SET_TITLE.clone(), default_set: true }
  }

  pub fn id(&self) -> Uuid {
    self.id
  }

  pub fn is_default(&self) -> bool {
    self.default_set
  }
}

impl fmt::Display for AdminSet {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "AdminSet(id: {}, title: {})", self.id, self.title)
  }
}

/// Agente de una concesión de acceso: usuario individual o grupo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Agent {
  User(String),
  Group(String),
}

/// Nivel de acceso concedido por una plantilla.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccessLevel {
  Manage,
  Deposit,
  View,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessGrant {
  pub agent: Agent,
  pub access: AccessLevel,
}

/// Plantilla de permisos asociada a un admin set (`source_id`). Las obras
/// archivadas bajo el admin set heredan estas concesiones de forma aditiva
/// (Manage otorga edición, View otorga lectura) y, si la plantilla la trae,
/// una visibilidad por defecto.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionTemplate {
  id: Uuid,
  pub source_id: Uuid,
  /// Visibilidad por defecto para obras bajo este admin set, si se fijó.
  pub visibility: Option<Visibility>,
  pub grants: Vec<AccessGrant>,
}

impl PermissionTemplate {
  pub fn new(source_id: Uuid) -> Self {
    Self { id: Uuid::new_v4(), source_id, visibility: None, grants: Vec::new() }
  }

  pub fn id(&self) -> Uuid {
    self.id
  }

  /// Builder: fija la visibilidad por defecto de la plantilla.
  pub fn with_visibility(mut self, visibility: Visibility) -> Self {
    self.visibility = Some(visibility);
    self
  }

  /// Builder: añade una concesión y devuelve la plantilla.
  pub fn with_grant(mut self, agent: Agent, access: AccessLevel) -> Self {
    self.grants.push(AccessGrant { agent, access });
    self
  }

  fn agents_with(&self, access: AccessLevel) -> impl Iterator<Item = &Agent> {
    self.grants.iter().filter(move |g| g.access == access).map(|g| &g.agent)
  }

  pub fn manage_users(&self) -> Vec<String> {
    self.agents_with(AccessLevel::Manage)
        .filter_map(|a| match a {
          Agent::User(u) => Some(u.clone()),
          Agent::Group(_) => None,
        })
        .collect()
  }

  pub fn manage_groups(&self) -> Vec<String> {
    self.agents_with(AccessLevel::Manage)
        .filter_map(|a| match a {
          Agent::Group(g) => Some(g.clone()),
          Agent::User(_) => None,
        })
        .collect()
  }

  pub fn view_users(&self) -> Vec<String> {
    self.agents_with(AccessLevel::View)
        .filter_map(|a| match a {
          Agent::User(u) => Some(u.clone()),
          Agent::Group(_) => None,
        })
        .collect()
  }

  pub fn view_groups(&self) -> Vec<String> {
    self.agents_with(AccessLevel::View)
        .filter_map(|a| match a {
          Agent::Group(g) => Some(g.clone()),
          Agent::User(_) => None,
        })
        .collect()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_default_set_flag() {
    let set = AdminSet::default_set();
    assert!(set.is_default());
    assert!(!AdminSet::new("otro").is_default());
  }

  #[test]
  fn test_template_partitions_grants() {
    let set = AdminSet::new("colección");
    let template = PermissionTemplate::new(set.id())
      .with_grant(Agent::User("mgr@example.org".into()), AccessLevel::Manage)
      .with_grant(Agent::Group("managers".into()), AccessLevel::Manage)
      .with_grant(Agent::User("reader@example.org".into()), AccessLevel::View)
      .with_grant(Agent::Group("readers".into()), AccessLevel::View)
      .with_grant(Agent::User("dep@example.org".into()), AccessLevel::Deposit);

    assert_eq!(template.manage_users(), vec!["mgr@example.org".to_string()]);
    assert_eq!(template.manage_groups(), vec!["managers".to_string()]);
    assert_eq!(template.view_users(), vec!["reader@example.org".to_string()]);
    assert_eq!(template.view_groups(), vec!["readers".to_string()]);
  }
}
