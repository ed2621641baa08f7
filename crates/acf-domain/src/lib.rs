//! Crate `acf-domain` — tipos y reglas puras del ciclo ACF
//!
//! Este crate define el modelo de dominio del tracker (el `Item` y sus
//! campos enumerados), la política de autorización por campo
//! (`allowed_fields` / `authorize_patch`), el motor de clasificación
//! (cuadrante + estado normalizado) y la metadata estática de las cinco
//! etapas del ciclo.
//!
//! Diseño resumido:
//! - Validación centralizada: cada campo enumerado tiene un único punto de
//!   parseo (`FromStr`) usado tanto por la ruta de mutación como por el
//!   motor de clasificación.
//! - Las funciones de clasificación son puras y sólo se invocan en rutas de
//!   lectura; el cuadrante nunca se persiste.
//! - La política de campos descarta en silencio los campos no permitidos;
//!   el rechazo ocurre únicamente cuando el patch filtrado queda vacío.

mod classify;
mod errors;
mod fields;
mod item;
mod policy;
mod stages;

pub use classify::{classify_quadrant, normalize_status, BlankStatusPolicy, ClassifyConfig, Quadrant, ResourceSide,
                   ScopeSide, StatusBucket, UnknownStatusPolicy};
pub use errors::DomainError;
pub use fields::{Action, ExecStatus, Factor, ItemField, Resources, Scope, TimeHorizon};
pub use item::{parse_step, parse_step_value, Item};
pub use policy::{allowed_fields, authorize_patch, can_manage, FieldPatch, Role};
pub use stages::{stage_for, stages, StageInfo, STEP_MAX};
