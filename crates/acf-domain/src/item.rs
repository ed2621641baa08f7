// Archivo: item.rs
// Propósito: el registro `Item` — la unidad de trabajo que avanza por el
// ciclo de cinco etapas — y su único punto de aplicación de valores de
// patch.
use crate::fields::{Action, ExecStatus, Factor, ItemField, Resources, Scope, TimeHorizon};
use crate::stages::STEP_MAX;
use crate::DomainError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use uuid::Uuid;

/// Unidad de trabajo del tracker.
///
/// `id` y `number` son inmutables después de la creación; los campos de
/// clasificación son opcionales (sin asignar hasta que un rol autorizado
/// los fije). `updated_at` se refresca en cada mutación exitosa — eso lo
/// hace la capa de servicio, no este tipo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: Uuid,
    pub number: String,
    pub title: String,
    pub factor: Option<Factor>,
    pub action: Option<Action>,
    pub scope: Option<Scope>,
    pub time: Option<TimeHorizon>,
    pub resources: Option<Resources>,
    pub exec_status: Option<ExecStatus>,
    pub notes: Option<String>,
    pub current_step: u8,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Item {
    /// Crea un item nuevo en la etapa 0 con todos los campos de
    /// clasificación sin asignar. Falla si el título está vacío.
    pub fn new(title: &str, number: String, now: DateTime<Utc>) -> Result<Self, DomainError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(DomainError::Validation("el título no puede estar vacío".to_string()));
        }
        Ok(Self { id: Uuid::new_v4(),
                  number,
                  title: title.to_string(),
                  factor: None,
                  action: None,
                  scope: None,
                  time: None,
                  resources: None,
                  exec_status: None,
                  notes: None,
                  current_step: 0,
                  created_at: now,
                  updated_at: now })
    }

    /// Aplica el valor de un campo de patch ya autorizado.
    ///
    /// Reglas de valor:
    /// - Campos enumerados: string canónico; `""` o `null` limpian el campo.
    /// - `title`: string no vacío.
    /// - `notes`: string libre; `""` o `null` limpian.
    /// - `current_step`: entero en `[0,4]`.
    ///
    /// Un valor inválido rechaza el campo completo con
    /// `DomainError::Validation`; el servicio aborta el patch entero.
    pub fn apply(&mut self, field: ItemField, value: &JsonValue) -> Result<(), DomainError> {
        match field {
            ItemField::Title => {
                let s = expect_str(field, value)?;
                let s = s.trim();
                if s.is_empty() {
                    return Err(DomainError::Validation("el título no puede estar vacío".to_string()));
                }
                self.title = s.to_string();
            }
            ItemField::Factor => self.factor = parse_optional(field, value)?,
            ItemField::Action => self.action = parse_optional(field, value)?,
            ItemField::Scope => self.scope = parse_optional(field, value)?,
            ItemField::Time => self.time = parse_optional(field, value)?,
            ItemField::Resources => self.resources = parse_optional(field, value)?,
            ItemField::ExecStatus => self.exec_status = parse_optional(field, value)?,
            ItemField::Notes => {
                self.notes = match value {
                    JsonValue::Null => None,
                    JsonValue::String(s) if s.is_empty() => None,
                    JsonValue::String(s) => Some(s.clone()),
                    other => {
                        return Err(DomainError::Validation(format!("notes debe ser string, recibido: {}", other)))
                    }
                };
            }
            ItemField::CurrentStep => self.current_step = parse_step(value)?,
        }
        Ok(())
    }
}

/// Valida un valor JSON como paso del ciclo (`0..=4`).
pub fn parse_step(value: &JsonValue) -> Result<u8, DomainError> {
    let n = value.as_i64()
                 .ok_or_else(|| DomainError::Validation(format!("paso inválido: {}", value)))?;
    parse_step_value(n)
}

/// Valida un entero como paso del ciclo (`0..=4`).
pub fn parse_step_value(n: i64) -> Result<u8, DomainError> {
    if !(0..=STEP_MAX as i64).contains(&n) {
        return Err(DomainError::Validation(format!("paso inválido: {}", n)));
    }
    Ok(n as u8)
}

fn expect_str<'a>(field: ItemField, value: &'a JsonValue) -> Result<&'a str, DomainError> {
    value.as_str()
         .ok_or_else(|| DomainError::Validation(format!("{} debe ser string, recibido: {}", field, value)))
}

/// Parseo común de los campos enumerados opcionales: `null` y `""` limpian,
/// cualquier otro string pasa por el `FromStr` del enum.
fn parse_optional<T>(field: ItemField, value: &JsonValue) -> Result<Option<T>, DomainError>
    where T: std::str::FromStr<Err = DomainError>
{
    match value {
        JsonValue::Null => Ok(None),
        JsonValue::String(s) if s.trim().is_empty() => Ok(None),
        JsonValue::String(s) => s.parse::<T>().map(Some),
        other => Err(DomainError::Validation(format!("{} debe ser string, recibido: {}", field, other))),
    }
}
