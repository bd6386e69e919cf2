use chrono::{TimeZone, Utc};
use curate_actors::{create_work, DepositError, FixedTime, StepArgs, UtcTime};
use curate_domain::{Ability, AccessLevel, Action, AdminSet, Agent, DomainRepository, InMemoryDomainRepository,
                    PermissionTemplate, Visibility, Work};
use indexmap::IndexMap;
use serde_json::json;
use std::sync::Arc;
use transact::Transaction;

type CreateWorkTx = Transaction<Work, StepArgs, DepositError>;

fn setup() -> (Arc<InMemoryDomainRepository>, CreateWorkTx) {
  let repo = Arc::new(InMemoryDomainRepository::new());
  let tx = create_work(repo.clone(), Arc::new(UtcTime)).expect("pasos únicos");
  (repo, tx)
}

fn depositor_args() -> StepArgs {
  StepArgs { depositor: Some("depositor@example.org".to_string()), ..Default::default() }
}

#[test]
fn invalid_work_is_a_failure_and_stays_unpersisted() {
  let (_repo, tx) = setup();
  let mut work = Work::new_draft(); // sin título
  let tx = tx.with_step_args("set_depositor", depositor_args());

  let err = tx.call(&mut work).expect_err("obra inválida");
  match err {
    DepositError::Validation(errors) => assert!(!errors.is_empty()),
    other => panic!("se esperaba Validation, se obtuvo {:?}", other),
  }
  assert!(!work.is_persisted());
  assert!(!work.errors().is_empty());
}

#[test]
fn missing_depositor_is_a_validation_failure() {
  let (_repo, tx) = setup();
  let mut work = Work::with_title("obra");

  let err = tx.call(&mut work).expect_err("sin identidad resoluble");
  match err {
    DepositError::Validation(errors) => assert_eq!(errors.fields(), vec!["depositor"]),
    other => panic!("se esperaba Validation, se obtuvo {:?}", other),
  }
  assert!(!work.is_persisted());
}

#[test]
fn sets_the_depositor_from_step_args() {
  let (_repo, tx) = setup();
  let mut work = Work::with_title("obra");
  let tx = tx.with_step_args("set_depositor", depositor_args());

  tx.call(&mut work).expect("éxito");
  assert_eq!(work.depositor.as_deref(), Some("depositor@example.org"));
}

#[test]
fn resolves_the_depositor_from_the_ambient_ability() {
  let (_repo, tx) = setup();
  let mut work = Work::with_title("obra");
  let ability = Arc::new(Ability::admin("admin@example.org"));
  let tx = tx.with_step_args("set_depositor", StepArgs { ability: Some(ability), ..Default::default() });

  tx.call(&mut work).expect("éxito");
  assert_eq!(work.depositor.as_deref(), Some("admin@example.org"));
}

#[test]
fn applies_attributes_and_default_policy_state() {
  let (repo, tx) = setup();
  let mut work = Work::with_title("obra válida");
  let mut attributes = IndexMap::new();
  attributes.insert("creator".to_string(), json!(["Moomin"]));
  attributes.insert("subject".to_string(), json!(["Snorks"]));

  let tx = tx.with_step_args("set_depositor", depositor_args())
             .with_step_args("apply_attributes", StepArgs { attributes: Some(attributes), ..Default::default() });
  tx.call(&mut work).expect("éxito");

  assert_eq!(work.creator, vec!["Moomin".to_string()]);
  assert_eq!(work.subject, vec!["Snorks".to_string()]);
  // estado de política por defecto
  assert_eq!(work.effective_visibility().as_str(), "restricted");
  let default_set = repo.find_or_create_default_admin_set().unwrap();
  assert_eq!(work.admin_set_id, Some(default_set.id()));
  assert!(work.is_persisted());
}

#[test]
fn unknown_attribute_keys_are_a_failure() {
  let (_repo, tx) = setup();
  let mut work = Work::new_draft();
  let mut attributes = IndexMap::new();
  attributes.insert("title".to_string(), json!(["moomin"]));
  attributes.insert("not_real".to_string(), json!(["very fake"]));

  let tx = tx.with_step_args("set_depositor", depositor_args())
             .with_step_args("apply_attributes", StepArgs { attributes: Some(attributes), ..Default::default() });
  let err = tx.call(&mut work).expect_err("atributo no reconocido");
  match err {
    DepositError::Validation(errors) => assert_eq!(errors.fields(), vec!["not_real"]),
    other => panic!("se esperaba Validation, se obtuvo {:?}", other),
  }
  assert!(!work.is_persisted());
}

#[test]
fn stamps_times_through_the_injected_clock() {
  let repo = Arc::new(InMemoryDomainRepository::new());
  let xmas = Utc.with_ymd_and_hms(2018, 12, 25, 11, 30, 0).unwrap();
  let tx = create_work(repo, Arc::new(FixedTime(xmas))).expect("pasos únicos")
    .with_step_args("set_depositor", depositor_args());

  let mut work = Work::with_title("obra");
  tx.call(&mut work).expect("éxito");
  assert_eq!(work.date_uploaded, Some(xmas));
  assert_eq!(work.date_modified, Some(xmas));
}

#[test]
fn keeps_an_explicitly_set_visibility() {
  let (_repo, tx) = setup();
  let mut work = Work::with_title("obra");
  work.visibility = Some(Visibility::Open);

  let tx = tx.with_step_args("set_depositor", depositor_args());
  tx.call(&mut work).expect("éxito");
  assert_eq!(work.visibility, Some(Visibility::Open));
}

#[test]
fn explicit_admin_set_without_template_is_a_failure() {
  let (repo, tx) = setup();
  let set = AdminSet::new("colección sin plantilla");
  let set_id = repo.save_admin_set(set).unwrap();

  let mut work = Work::with_title("obra");
  work.admin_set_id = Some(set_id);

  let tx = tx.with_step_args("set_depositor", depositor_args());
  let err = tx.call(&mut work).expect_err("falta la plantilla");
  match err {
    DepositError::MissingDependency(_) => {}
    other => panic!("se esperaba MissingDependency, se obtuvo {:?}", other),
  }
  assert!(!work.is_persisted());
}

#[test]
fn retains_an_explicit_admin_set_with_template() {
  let (repo, tx) = setup();
  let set = AdminSet::new("colección");
  let set_id = repo.save_admin_set(set).unwrap();
  repo.save_permission_template(PermissionTemplate::new(set_id)).unwrap();

  let mut work = Work::with_title("obra");
  work.admin_set_id = Some(set_id);

  let tx = tx.with_step_args("set_depositor", depositor_args());
  tx.call(&mut work).expect("éxito");
  assert_eq!(work.admin_set_id, Some(set_id));
}

#[test]
fn template_visibility_default_applies_only_when_unset() {
  let (repo, tx) = setup();
  let set = AdminSet::new("colección abierta");
  let set_id = repo.save_admin_set(set).unwrap();
  repo.save_permission_template(PermissionTemplate::new(set_id).with_visibility(Visibility::Open)).unwrap();

  let mut work = Work::with_title("obra");
  work.admin_set_id = Some(set_id);
  tx.with_step_args("set_depositor", depositor_args()).call(&mut work).expect("éxito");
  assert_eq!(work.visibility, Some(Visibility::Open));

  // una visibilidad explícita nunca se pisa
  let mut work2 = Work::with_title("obra 2");
  work2.admin_set_id = Some(set_id);
  work2.visibility = Some(Visibility::Restricted);
  tx.with_step_args("set_depositor", depositor_args()).call(&mut work2).expect("éxito");
  assert_eq!(work2.visibility, Some(Visibility::Restricted));
}

#[test]
fn copies_template_grants_additively_and_idempotently() {
  let (repo, tx) = setup();
  let set = AdminSet::new("colección con plantilla");
  let set_id = repo.save_admin_set(set).unwrap();
  let template = PermissionTemplate::new(set_id)
    .with_grant(Agent::User("mgr@example.org".into()), AccessLevel::Manage)
    .with_grant(Agent::Group("managers".into()), AccessLevel::Manage)
    .with_grant(Agent::User("reader@example.org".into()), AccessLevel::View)
    .with_grant(Agent::Group("readers".into()), AccessLevel::View);
  repo.save_permission_template(template).unwrap();

  let mut work = Work::with_title("obra");
  work.admin_set_id = Some(set_id);
  work.edit_users.push("previa@example.org".to_string());

  let tx = tx.with_step_args("set_depositor", depositor_args());
  tx.call(&mut work).expect("éxito");

  assert_eq!(work.edit_users,
             vec!["previa@example.org".to_string(), "mgr@example.org".to_string()]);
  assert_eq!(work.edit_groups, vec!["managers".to_string()]);
  assert_eq!(work.read_users, vec!["reader@example.org".to_string()]);
  assert_eq!(work.read_groups, vec!["readers".to_string()]);

  // segunda pasada: las concesiones convergen, nada se duplica
  tx.call(&mut work).expect("éxito");
  assert_eq!(work.edit_users.len(), 2);
  assert_eq!(work.edit_groups.len(), 1);
  assert_eq!(work.read_users.len(), 1);
  assert_eq!(work.read_groups.len(), 1);
}

#[test]
fn deposit_right_on_the_admin_set_is_enforced_when_ability_present() {
  let (repo, tx) = setup();
  let set = AdminSet::new("colección restringida");
  let set_id = repo.save_admin_set(set).unwrap();
  repo.save_permission_template(PermissionTemplate::new(set_id)).unwrap();

  let mut work = Work::with_title("obra");
  work.admin_set_id = Some(set_id);

  let sin_derecho = Arc::new(Ability::for_user("user@example.org"));
  let err = tx.with_step_args("set_depositor", depositor_args())
              .with_step_args("apply_permission_template",
                              StepArgs { ability: Some(sin_derecho), ..Default::default() })
              .call(&mut work)
              .expect_err("sin derecho de depósito");
  match err {
    DepositError::Authorization(_) => {}
    other => panic!("se esperaba Authorization, se obtuvo {:?}", other),
  }
  assert!(!work.is_persisted());

  // con la concesión de depósito la creación procede
  let con_derecho = Arc::new(Ability::for_user("user@example.org").grant(Action::Deposit, set_id));
  tx.with_step_args("set_depositor", depositor_args())
    .with_step_args("apply_permission_template", StepArgs { ability: Some(con_derecho), ..Default::default() })
    .call(&mut work)
    .expect("éxito");
  assert!(work.is_persisted());
}

#[test]
fn attaches_the_work_to_parent_works() {
  let (repo, tx) = setup();
  let mut parent_a = Work::with_title("padre a");
  let mut parent_b = Work::with_title("padre b");
  repo.save_work(&mut parent_a).unwrap();
  repo.save_work(&mut parent_b).unwrap();

  let mut work = Work::with_title("obra");
  let tx = tx.with_step_args("set_depositor", depositor_args())
             .with_step_args("add_to_works",
                             StepArgs { work_ids: vec![parent_a.id(), parent_b.id()], ..Default::default() });
  tx.call(&mut work).expect("éxito");
  assert_eq!(work.member_of_ids, vec![parent_a.id(), parent_b.id()]);
}

#[test]
fn unknown_parent_work_is_not_found() {
  let (_repo, tx) = setup();
  let mut work = Work::with_title("obra");
  let tx = tx.with_step_args("set_depositor", depositor_args())
             .with_step_args("add_to_works", StepArgs { work_ids: vec![uuid::Uuid::new_v4()], ..Default::default() });
  let err = tx.call(&mut work).expect_err("padre inexistente");
  match err {
    DepositError::NotFound(_) => {}
    other => panic!("se esperaba NotFound, se obtuvo {:?}", other),
  }
  assert!(!work.is_persisted());
}

#[test]
fn with_step_args_does_not_leak_into_the_base_transaction() {
  let (_repo, tx) = setup();
  let mut attributes = IndexMap::new();
  attributes.insert("creator".to_string(), json!(["Moomin"]));
  let _configured = tx.with_step_args("apply_attributes", StepArgs { attributes: Some(attributes), ..Default::default() });

  // la transacción base sigue sin atributos: el creador queda vacío
  let mut work = Work::with_title("obra");
  tx.with_step_args("set_depositor", depositor_args()).call(&mut work).expect("éxito");
  assert!(work.creator.is_empty());
}
