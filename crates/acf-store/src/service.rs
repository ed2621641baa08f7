// Archivo: service.rs
// Propósito: implementar `ItemService`, la capa que aplica la política de
// autorización por campo antes de cada mutación y estampa `updated_at`.
// Esta capa es la que invocan handlers HTTP, CLI o workers.
use crate::errors::{Result, TrackerError};
use crate::repository::ItemRepository;
use acf_domain::{authorize_patch, can_manage, parse_step_value, FieldPatch, Item, Role};
use chrono::Utc;
use log::debug;
use std::sync::Arc;
use uuid::Uuid;

/// Servicio de alto nivel sobre el store de items.
///
/// Orquesta política + repositorio. Cada operación es terminal: un error
/// nunca se reintenta internamente y el patch filtrado se aplica completo
/// o no se aplica nada.
pub struct ItemService<R>
    where R: ItemRepository
{
    repo: Arc<R>,
}

impl<R> ItemService<R> where R: ItemRepository
{
    /// Crea el servicio inyectando el repositorio.
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Crea un item nuevo en la etapa 0. Restringido a admin/manager;
    /// requiere título no vacío. El número visible sale de la secuencia
    /// del repositorio (`AC-NNN`).
    pub fn create(&self, role: Role, title: &str) -> Result<Item> {
        if !can_manage(role) {
            return Err(TrackerError::Forbidden(format!("el rol {} no puede crear items", role)));
        }
        let seq = self.repo.next_sequence()?;
        let number = format!("AC-{:03}", seq);
        let item = Item::new(title, number, Utc::now())?;
        self.repo.insert(item.clone())?;
        debug!("item creado: {} ({})", item.number, item.id);
        Ok(item)
    }

    /// Aplica un patch de campos al item `id`.
    ///
    /// Primero filtra por rol (descarte silencioso de lo no permitido);
    /// si no queda nada, `InvalidRequest`. Los valores pasan por los
    /// parsers centrales del dominio: un valor inválido aborta el patch
    /// completo sin aplicar nada. Con todo válido, aplica el conjunto
    /// entero, estampa `updated_at` y persiste.
    pub fn patch(&self, role: Role, id: &Uuid, requested: FieldPatch) -> Result<Item> {
        let filtered = authorize_patch(role, requested);
        if filtered.is_empty() {
            return Err(TrackerError::InvalidRequest("sin campos válidos".to_string()));
        }

        let mut item = self.repo
                           .get(id)?
                           .ok_or_else(|| TrackerError::NotFound(format!("item {}", id)))?;
        for (field, value) in &filtered {
            item.apply(*field, value)?;
        }
        item.updated_at = Utc::now();

        if !self.repo.update(&item)? {
            // la fila desapareció entre get y update
            return Err(TrackerError::NotFound(format!("item {}", id)));
        }
        debug!("patch aplicado a {}: {} campos", item.number, filtered.len());
        Ok(item)
    }

    /// Mueve el item a la etapa `step`. Ruta de autorización distinta del
    /// patch genérico: sólo admin/manager, con validación propia del
    /// dominio entero [0,4].
    pub fn set_step(&self, role: Role, id: &Uuid, step: i64) -> Result<Item> {
        if !can_manage(role) {
            return Err(TrackerError::Forbidden(format!("el rol {} no puede mover items de etapa", role)));
        }
        let step = parse_step_value(step).map_err(|_| TrackerError::InvalidRequest("paso inválido".to_string()))?;

        let mut item = self.repo
                           .get(id)?
                           .ok_or_else(|| TrackerError::NotFound(format!("item {}", id)))?;
        item.current_step = step;
        item.updated_at = Utc::now();
        if !self.repo.update(&item)? {
            return Err(TrackerError::NotFound(format!("item {}", id)));
        }
        Ok(item)
    }

    /// Borra físicamente el item. Sólo admin/manager. Idempotente:
    /// devuelve cuántas filas se borraron (0 o 1); un id inexistente no
    /// es un error.
    pub fn delete(&self, role: Role, id: &Uuid) -> Result<usize> {
        if !can_manage(role) {
            return Err(TrackerError::Forbidden(format!("el rol {} no puede borrar items", role)));
        }
        let removed = self.repo.remove(id)?;
        Ok(if removed { 1 } else { 0 })
    }

    /// Lista items (todos o filtrados por etapa), el más reciente primero.
    pub fn list(&self, step: Option<u8>) -> Result<Vec<Item>> {
        self.repo.list(step)
    }
}
