use crate::environment::Environment;
use crate::stack::Actor;
use curate_domain::{Action, DomainRepository};
use std::sync::Arc;
use uuid::Uuid;

/// Reconcilia la lista ordenada de miembros de la obra contra los
/// `member_ids` solicitados en los atributos de la operación.
///
/// Cada alta se autoriza contra el contexto de permisos; un id que no
/// resuelve o no es editable por la identidad veta la operación completa
/// (rechazo en bloque, sin detalle por id y sin altas parciales). Tras la
/// reconciliación reenvía: persistir la lista final es asunto de la cadena
/// aguas abajo.
pub struct OrderActor {
  next: Arc<dyn Actor>,
  repo: Arc<dyn DomainRepository>,
}

impl OrderActor {
  pub fn new(next: Arc<dyn Actor>, repo: Arc<dyn DomainRepository>) -> Self {
    Self { next, repo }
  }

  fn reconcile(&self, env: &mut Environment) -> Option<bool> {
    let requested = match requested_member_ids(env) {
      None => return None, // sin atributo member_ids: nada que reconciliar
      Some(Err(bad)) => {
        log::warn!("member_ids malformado en la petición: {}", bad);
        return Some(false);
      }
      Some(Ok(ids)) => ids,
    };

    let current = &env.curation_concern.member_ids;
    // Validar todas las altas antes de mutar: el veto no deja altas
    // parciales.
    for id in requested.iter().filter(|id| !current.contains(*id)) {
      match self.repo.find_work(id) {
        Ok(Some(_)) => {}
        Ok(None) => {
          log::warn!("member_ids referencia una obra inexistente: {}", id);
          return Some(false);
        }
        Err(e) => {
          log::warn!("fallo al resolver el miembro {}: {}", id, e);
          return Some(false);
        }
      }
      if !env.ability.can(Action::Edit, id) {
        log::warn!("alta de miembro no autorizada sobre {}", id);
        return Some(false);
      }
    }

    // La lista final es exactamente la solicitada, en su orden; los ids
    // ausentes de la petición quedan desvinculados.
    env.curation_concern.member_ids = requested;
    Some(true)
  }
}

impl Actor for OrderActor {
  fn create(&self, env: &mut Environment) -> bool {
    self.next.create(env)
  }

  fn update(&self, env: &mut Environment) -> bool {
    match self.reconcile(env) {
      Some(false) => false,
      _ => self.next.update(env),
    }
  }

  fn destroy(&self, env: &mut Environment) -> bool {
    self.next.destroy(env)
  }
}

// `member_ids` llega como lista de UUIDs en texto. `None` si el atributo no
// viene; `Some(Err)` si viene con forma inválida.
fn requested_member_ids(env: &Environment) -> Option<Result<Vec<Uuid>, String>> {
  let value = env.attributes.get("member_ids")?;
  let items = match value.as_array() {
    Some(items) => items,
    None => return Some(Err("se esperaba una lista".to_string())),
  };
  let mut ids = Vec::with_capacity(items.len());
  for item in items {
    let parsed = item.as_str().and_then(|s| Uuid::parse_str(s).ok());
    match parsed {
      Some(id) => ids.push(id),
      None => return Some(Err(format!("id de miembro inválido: {}", item))),
    }
  }
  Some(Ok(ids))
}
