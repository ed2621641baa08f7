// Archivo: policy.rs
// Propósito: roles y política de autorización por campo.
//
// La política es una función pura: interseca los campos pedidos con los
// permitidos para el rol y descarta el resto en silencio. El rechazo
// (`no valid fields`) ocurre en la capa de servicio únicamente cuando el
// resultado queda vacío — nunca por campo individual.
use crate::fields::ItemField;
use crate::DomainError;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

/// Rol adjunto a la sesión autenticada. Se consulta al momento de mutar;
/// nunca se persiste por item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Manager,
    Team,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Manager => "manager",
            Self::Team => "team",
        }
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "manager" => Ok(Self::Manager),
            "team" => Ok(Self::Team),
            other => Err(DomainError::Validation(format!("rol inválido: '{}'", other))),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Patch parcial: mapa campo → valor JSON solicitado.
pub type FieldPatch = BTreeMap<ItemField, JsonValue>;

/// Campos que `role` puede mutar vía patch genérico.
///
/// - `team`: exactamente `{exec_status, notes}`.
/// - `admin` / `manager`: los nueve campos parchables.
///
/// `id`, `number` y los timestamps no aparecen nunca: no existen como
/// variante de `ItemField`.
pub fn allowed_fields(role: Role) -> BTreeSet<ItemField> {
    let team = [ItemField::ExecStatus, ItemField::Notes];
    match role {
        Role::Team => team.into_iter().collect(),
        Role::Admin | Role::Manager => {
            let mut set: BTreeSet<ItemField> = team.into_iter().collect();
            set.extend([ItemField::Title,
                        ItemField::Factor,
                        ItemField::Action,
                        ItemField::Scope,
                        ItemField::Time,
                        ItemField::Resources,
                        ItemField::CurrentStep]);
            set
        }
    }
}

/// Filtra `requested` a los campos permitidos para `role`.
///
/// Política deliberadamente permisiva: los campos no permitidos se
/// descartan sin error. Si el resultado queda vacío, el llamador debe
/// señalar `InvalidRequest` en vez de hacer una escritura no-op.
pub fn authorize_patch(role: Role, requested: FieldPatch) -> FieldPatch {
    let allowed = allowed_fields(role);
    requested.into_iter().filter(|(k, _)| allowed.contains(k)).collect()
}

/// True si el rol puede administrar items (crear, borrar, mover de etapa).
pub fn can_manage(role: Role) -> bool {
    matches!(role, Role::Admin | Role::Manager)
}
