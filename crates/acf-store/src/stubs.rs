// Archivo: stubs.rs
// Propósito: implementación en memoria del `ItemRepository` para pruebas
// y wiring rápido. No es durable.
use crate::errors::{Result, TrackerError};
use crate::repository::ItemRepository;
use acf_domain::Item;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use uuid::Uuid;

/// Repositorio en memoria: mapa id → (orden de inserción, item) detrás de
/// un mutex, más un contador para la secuencia de numeración.
pub struct InMemoryItemRepository {
    items: Mutex<HashMap<Uuid, (u64, Item)>>,
    insert_seq: Mutex<u64>,
    number_seq: Mutex<u64>,
}

impl InMemoryItemRepository {
    /// Crea una nueva instancia vacía.
    pub fn new() -> Self {
        Self { items: Mutex::new(HashMap::new()),
               insert_seq: Mutex::new(0),
               number_seq: Mutex::new(0) }
    }

    /// Helper para mapear `Mutex::lock()` en un `Result` con
    /// `TrackerError::Storage`.
    fn lock<'a, T>(&'a self, m: &'a Mutex<T>) -> Result<MutexGuard<'a, T>> {
        m.lock().map_err(|e| TrackerError::Storage(format!("mutex poisoned: {:?}", e)))
    }
}

impl Default for InMemoryItemRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl ItemRepository for InMemoryItemRepository {
    fn insert(&self, item: Item) -> Result<()> {
        let mut seq = self.lock(&self.insert_seq)?;
        let mut items = self.lock(&self.items)?;
        *seq += 1;
        items.insert(item.id, (*seq, item));
        Ok(())
    }

    fn get(&self, id: &Uuid) -> Result<Option<Item>> {
        let items = self.lock(&self.items)?;
        Ok(items.get(id).map(|(_, it)| it.clone()))
    }

    fn update(&self, item: &Item) -> Result<bool> {
        let mut items = self.lock(&self.items)?;
        match items.get_mut(&item.id) {
            Some(slot) => {
                slot.1 = item.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn remove(&self, id: &Uuid) -> Result<bool> {
        let mut items = self.lock(&self.items)?;
        Ok(items.remove(id).is_some())
    }

    fn list(&self, step: Option<u8>) -> Result<Vec<Item>> {
        let items = self.lock(&self.items)?;
        let mut rows: Vec<(u64, Item)> = items.values()
                                              .filter(|(_, it)| step.map_or(true, |s| it.current_step == s))
                                              .cloned()
                                              .collect();
        // Orden inverso de creación, estable por secuencia de inserción.
        rows.sort_by(|a, b| b.0.cmp(&a.0));
        Ok(rows.into_iter().map(|(_, it)| it).collect())
    }

    fn next_sequence(&self) -> Result<u64> {
        let mut seq = self.lock(&self.number_seq)?;
        *seq += 1;
        Ok(*seq)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn item(title: &str, number: &str) -> Item {
        Item::new(title, number.into(), Utc::now()).unwrap()
    }

    #[test]
    fn insert_get_update_remove() {
        let repo = InMemoryItemRepository::new();
        let it = item("Uno", "AC-001");
        let id = it.id;
        repo.insert(it.clone()).unwrap();
        assert_eq!(repo.get(&id).unwrap().unwrap().title, "Uno");

        let mut edited = it;
        edited.title = "Uno bis".into();
        assert!(repo.update(&edited).unwrap());
        assert_eq!(repo.get(&id).unwrap().unwrap().title, "Uno bis");

        assert!(repo.remove(&id).unwrap());
        assert!(!repo.remove(&id).unwrap());
        assert!(repo.get(&id).unwrap().is_none());
    }

    #[test]
    fn update_missing_returns_false() {
        let repo = InMemoryItemRepository::new();
        let ghost = item("Fantasma", "AC-009");
        assert!(!repo.update(&ghost).unwrap());
    }

    #[test]
    fn list_is_reverse_creation_order() {
        let repo = InMemoryItemRepository::new();
        let a = item("A", "AC-001");
        let b = item("B", "AC-002");
        let c = item("C", "AC-003");
        repo.insert(a).unwrap();
        repo.insert(b.clone()).unwrap();
        repo.insert(c).unwrap();

        let all = repo.list(None).unwrap();
        let titles: Vec<&str> = all.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["C", "B", "A"]);

        // estable tras un borrado intercalado
        repo.remove(&b.id).unwrap();
        let titles: Vec<String> = repo.list(None).unwrap().into_iter().map(|i| i.title).collect();
        assert_eq!(titles, vec!["C".to_string(), "A".to_string()]);
    }

    #[test]
    fn list_filters_by_step() {
        let repo = InMemoryItemRepository::new();
        let mut a = item("A", "AC-001");
        a.current_step = 2;
        repo.insert(a).unwrap();
        repo.insert(item("B", "AC-002")).unwrap();

        assert_eq!(repo.list(Some(2)).unwrap().len(), 1);
        assert_eq!(repo.list(Some(4)).unwrap().len(), 0);
        assert_eq!(repo.list(None).unwrap().len(), 2);
    }

    #[test]
    fn sequence_is_monotonic() {
        let repo = InMemoryItemRepository::new();
        assert_eq!(repo.next_sequence().unwrap(), 1);
        assert_eq!(repo.next_sequence().unwrap(), 2);
        assert_eq!(repo.next_sequence().unwrap(), 3);
    }
}
