//! curate-actors: pila de actores y transacciones del repositorio
//!
//! Crate que define la pila de interceptores de operaciones sobre obras
//! (`Actor`, `ActorStack`), el `Environment` por operación, la transacción
//! concreta de creación (`transactions::create_work`) con sus pasos, y los
//! servicios de ingesta, versionado y auditoría de archivos. Usa
//! `transact::Transaction` como motor y `curate_domain` como dominio.

pub mod actors;
pub mod environment;
pub mod errors;
pub mod jobs;
pub mod services;
pub mod stack;
pub mod transactions;

pub use actors::{DryCreateActor, ErrorHandler, FileActor, FileUpload, OrderActor};
pub use environment::Environment;
pub use errors::DepositError;
pub use jobs::{InMemoryJobDispatcher, Job, JobDispatcher, Notification, Notifier, RecordingNotifier};
pub use services::{AuditService, AuditStatus, FileNodeBuilder, FixedTime, TimeService, UtcTime, VersioningService};
pub use stack::{Actor, ActorStack, Persister, Terminator};
pub use transactions::{create_work, StepArgs};
