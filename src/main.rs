use curate_actors::{create_work, Actor, ActorStack, AuditService, AuditStatus, DryCreateActor, Environment,
                    FileActor, FileUpload, InMemoryJobDispatcher, Job, JobDispatcher, OrderActor, Persister,
                    RecordingNotifier, StepArgs, UtcTime};
use curate_domain::{Ability, DomainRepository, FileSet, FileUse, InMemoryBinaryStore, InMemoryDomainRepository};
use indexmap::IndexMap;
use serde_json::json;
use std::error::Error;
use std::io::{self, Write};
use std::sync::Arc;
use uuid::Uuid;

/// Pequeño menú interactivo para administrar obras del repositorio usando
/// el cableado en memoria del workspace.
///
/// Opciones soportadas:
/// 1) Ver obras (tabla con id, título y visibilidad)
/// 2) Crear obra (a través de la pila de actores)
/// 3) Actualizar miembros de una obra
/// 4) Adjuntar archivo (ingesta con versión y trabajos diferidos)
/// 5) Procesar cola de trabajos
/// 6) Salir
fn main() -> Result<(), Box<dyn Error>> {
    // Cargar variables de entorno (.env) si existen
    dotenvy::dotenv().ok();
    let depositor = std::env::var("CURATEFLOW_DEPOSITOR").unwrap_or_else(|_| "cli@local".to_string());

    let repo = Arc::new(InMemoryDomainRepository::new());
    let storage = Arc::new(InMemoryBinaryStore::new());
    let jobs = Arc::new(InMemoryJobDispatcher::new());
    let notifier = Arc::new(RecordingNotifier::new());

    loop {
        println!("\n== Curate CLI menu ==");
        println!("1) Ver obras (tabla con id y título)");
        println!("2) Crear obra");
        println!("3) Actualizar miembros de una obra");
        println!("4) Adjuntar archivo a un file set nuevo");
        println!("5) Procesar cola de trabajos");
        println!("6) Salir");
        print!("Elige una opción: ");
        io::stdout().flush().ok();

        let mut choice = String::new();
        io::stdin().read_line(&mut choice)?;
        match choice.trim() {
            "1" => {
                match repo.list_works() {
                    Ok(works) => {
                        println!("\nID                                   | VISIBILIDAD   | TÍTULO");
                        println!("-------------------------------------------------------------------");
                        for w in works {
                            let title = w.title.first().cloned().unwrap_or_else(|| "<sin título>".into());
                            println!("{} | {:<13} | {}", w.id(), w.effective_visibility().to_string(), title);
                        }
                    }
                    Err(e) => eprintln!("Error listando obras: {}", e),
                }
            }
            "2" => {
                let title = prompt("Título de la obra: ")?;
                if title.trim().is_empty() {
                    eprintln!("El título no puede estar vacío");
                    continue;
                }
                let creator = prompt("Creador (enter para omitir): ")?;

                let mut attributes = IndexMap::new();
                attributes.insert("title".to_string(), json!([title.trim()]));
                if !creator.trim().is_empty() {
                    attributes.insert("creator".to_string(), json!([creator.trim()]));
                }

                let ability = Arc::new(Ability::admin(depositor.clone()));
                let tx = match create_work(repo.clone(), Arc::new(UtcTime)) {
                    Ok(tx) => tx,
                    Err(e) => {
                        eprintln!("Error construyendo la transacción: {}", e);
                        continue;
                    }
                };
                let tx = tx.with_step_args("set_depositor",
                                           StepArgs { ability: Some(ability.clone()), ..Default::default() })
                           .with_step_args("apply_attributes",
                                           StepArgs { attributes: Some(attributes.clone()), ..Default::default() });

                let mut stack = ActorStack::new();
                stack.use_layer(move |next| {
                    let handler: curate_actors::ErrorHandler =
                        Box::new(|err| eprintln!("Creación rechazada: {}", err.user_message()));
                    Arc::new(DryCreateActor::new(next, tx.clone(), handler)) as Arc<dyn Actor>
                });
                let head = stack.build(Arc::new(Persister::new(repo.clone())));

                let draft = curate_domain::Work::new_draft();
                let mut env = Environment::new(draft, ability, attributes);
                if head.create(&mut env) {
                    println!("Obra creada: {}", env.curation_concern.id());
                }
            }
            "3" => {
                let work_id = match parse_uuid(&prompt("Id de la obra (UUID): ")?) {
                    Some(id) => id,
                    None => { eprintln!("UUID inválido"); continue; }
                };
                let work = match repo.find_work(&work_id) {
                    Ok(Some(w)) => w,
                    Ok(None) => { eprintln!("Obra no encontrada"); continue; }
                    Err(e) => { eprintln!("Error buscando la obra: {}", e); continue; }
                };
                let ids_s = prompt("Ids de miembros (UUIDs separados por coma, vacío para ninguno): ")?;
                let member_ids: Vec<String> = ids_s.trim()
                                                   .split(',')
                                                   .map(str::trim)
                                                   .filter(|s| !s.is_empty())
                                                   .map(String::from)
                                                   .collect();

                let mut attributes = IndexMap::new();
                attributes.insert("member_ids".to_string(), json!(member_ids));

                let mut stack = ActorStack::new();
                let order_repo = repo.clone();
                stack.use_layer(move |next| Arc::new(OrderActor::new(next, order_repo.clone())) as Arc<dyn Actor>);
                let head = stack.build(Arc::new(Persister::new(repo.clone())));

                let mut env = Environment::new(work, Arc::new(Ability::admin(depositor.clone())), attributes);
                if head.update(&mut env) {
                    println!("Miembros actuales: {:?}", env.curation_concern.member_ids);
                } else {
                    eprintln!("Actualización rechazada");
                }
            }
            "4" => {
                let name = prompt("Nombre del archivo (ej: tesis.pdf): ")?;
                let content = prompt("Contenido (texto): ")?;

                let file_set = FileSet::new(Some(name.trim().to_string()));
                if let Err(e) = repo.save_file_set(file_set.clone()) {
                    eprintln!("Error creando el file set: {}", e);
                    continue;
                }
                let actor = FileActor::new(file_set.id(),
                                           FileUse::OriginalFile,
                                           depositor.clone(),
                                           repo.clone(),
                                           storage.clone(),
                                           jobs.clone());
                let upload = FileUpload::new(name.trim(), "text/plain", content.trim().as_bytes().to_vec());
                match actor.ingest(&upload) {
                    Some(node) => {
                        println!("Nodo creado: {} (file set {})", node.id(), file_set.id());
                        // encolar también la auditoría de integridad
                        jobs.enqueue(Job::Audit { file_node_id: node.id(), user_key: depositor.clone() });
                    }
                    None => eprintln!("Ingesta fallida"),
                }
            }
            "5" => {
                // Drena la cola simulando al ejecutor externo de trabajos.
                let audit = AuditService::new(repo.clone(), storage.clone(), notifier.clone());
                while let Some(job) = jobs.claim() {
                    match job {
                        Job::Characterize { file_node_id } => {
                            println!("[jobs] caracterizando nodo {}", file_node_id);
                        }
                        Job::CreateDerivatives { file_node_id } => {
                            println!("[jobs] generando derivados del nodo {}", file_node_id);
                        }
                        Job::Audit { file_node_id, user_key } => {
                            match audit.audit(&file_node_id, &user_key) {
                                Ok(AuditStatus::Pass) => println!("[jobs] auditoría superada: {}", file_node_id),
                                Ok(AuditStatus::Fail) => println!("[jobs] AUDITORÍA FALLIDA: {}", file_node_id),
                                Err(e) => eprintln!("[jobs] error auditando {}: {}", file_node_id, e),
                            }
                        }
                    }
                }
                for msg in notifier.messages() {
                    println!("[notificación para {}] {}", msg.user_key, msg.subject);
                }
            }
            "6" => {
                println!("Saliendo...");
                break;
            }
            other => {
                println!("Opción inválida: {}", other);
            }
        }
    }

    Ok(())
}

fn prompt(msg: &str) -> io::Result<String> {
    print!("{}", msg);
    io::stdout().flush()?;
    let mut s = String::new();
    io::stdin().read_line(&mut s)?;
    Ok(s)
}

fn parse_uuid(s: &str) -> Option<Uuid> {
    Uuid::parse_str(s.trim()).ok()
}
