use curate_domain::{PermissionContext, Work};
use indexmap::IndexMap;
use serde_json::Value as JsonValue;
use std::sync::Arc;

/// Valor por operación que agrupa el objeto objetivo, el contexto de
/// permisos de la identidad actuante y los atributos a aplicar.
///
/// El Environment se construye por operación y se descarta al volver la
/// pila. Es inmutable salvo por la obra que referencia, que los actores y
/// pasos mutan en el sitio a través de `&mut`.
pub struct Environment {
  pub curation_concern: Work,
  pub ability: Arc<dyn PermissionContext>,
  pub attributes: IndexMap<String, JsonValue>,
}

impl Environment {
  pub fn new(curation_concern: Work, ability: Arc<dyn PermissionContext>, attributes: IndexMap<String, JsonValue>) -> Self {
    Self { curation_concern, ability, attributes }
  }

  /// user key de la identidad actuante, si la hay.
  pub fn user_key(&self) -> Option<&str> {
    self.ability.user_key()
  }
}
