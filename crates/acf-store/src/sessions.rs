// Archivo: sessions.rs
// Propósito: proveedor de identidad — sesiones por token opaco con
// expiración explícita, detrás de un trait inyectable. El core nunca ve
// credenciales; sólo recibe `Identity`.
use crate::errors::{Result, TrackerError};
use acf_domain::Role;
use chrono::{DateTime, Duration, Utc};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use uuid::Uuid;

/// Identidad autenticada: usuario + rol. Es todo lo que el core consulta.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub username: String,
    pub role: Role,
}

/// Colaborador de identidad: resuelve un token de sesión a una
/// `Identity` o falla con `Unauthenticated`.
pub trait IdentityProvider: Send + Sync {
    fn authenticate(&self, token: &str) -> Result<Identity>;
}

struct SessionEntry {
    identity: Identity,
    expires_at: DateTime<Utc>,
}

struct UserEntry {
    password: String,
    role: Role,
}

/// Proveedor de sesiones en memoria para desarrollo y pruebas.
///
/// Login con usuario/contraseña que emite tokens opacos (uuid v4) con
/// TTL fijo. Las contraseñas son texto plano de desarrollo, igual que el
/// MVP original; el endurecimiento de autenticación queda fuera de
/// alcance.
pub struct InMemorySessionProvider {
    users: Mutex<HashMap<String, UserEntry>>,
    sessions: Mutex<HashMap<String, SessionEntry>>,
    ttl: Duration,
}

impl InMemorySessionProvider {
    /// Crea un proveedor vacío con el TTL de sesión dado.
    pub fn new(ttl: Duration) -> Self {
        Self { users: Mutex::new(HashMap::new()),
               sessions: Mutex::new(HashMap::new()),
               ttl }
    }

    /// Proveedor con los tres usuarios de desarrollo sembrados
    /// (admin/admin123, manager/manager123, team/team123) y TTL de 8h.
    pub fn with_default_users() -> Self {
        let provider = Self::new(Duration::hours(8));
        provider.register_user("admin", "admin123", Role::Admin);
        provider.register_user("manager", "manager123", Role::Manager);
        provider.register_user("team", "team123", Role::Team);
        provider
    }

    /// Registra (o reemplaza) un usuario local.
    pub fn register_user(&self, username: &str, password: &str, role: Role) {
        let mut users = self.users.lock().unwrap_or_else(|e| e.into_inner());
        users.insert(username.to_string(), UserEntry { password: password.to_string(), role });
    }

    /// Valida credenciales y emite un token de sesión nuevo.
    pub fn login(&self, username: &str, password: &str) -> Result<String> {
        let role = {
            let users = self.lock(&self.users)?;
            match users.get(username) {
                Some(u) if u.password == password => u.role,
                _ => return Err(TrackerError::Unauthenticated("credenciales inválidas".to_string())),
            }
        };
        let token = Uuid::new_v4().simple().to_string();
        let entry = SessionEntry { identity: Identity { username: username.to_string(), role },
                                   expires_at: Utc::now() + self.ttl };
        self.lock(&self.sessions)?.insert(token.clone(), entry);
        debug!("sesión emitida para {} ({})", username, role);
        Ok(token)
    }

    /// Invalida el token. Devuelve `true` si la sesión existía.
    pub fn logout(&self, token: &str) -> Result<bool> {
        Ok(self.lock(&self.sessions)?.remove(token).is_some())
    }

    fn lock<'a, T>(&'a self, m: &'a Mutex<T>) -> Result<MutexGuard<'a, T>> {
        m.lock().map_err(|e| TrackerError::Storage(format!("mutex poisoned: {:?}", e)))
    }
}

impl IdentityProvider for InMemorySessionProvider {
    /// Resuelve el token. Una sesión expirada se elimina y cuenta como
    /// no autenticada.
    fn authenticate(&self, token: &str) -> Result<Identity> {
        let mut sessions = self.lock(&self.sessions)?;
        match sessions.get(token) {
            Some(entry) if entry.expires_at > Utc::now() => Ok(entry.identity.clone()),
            Some(_) => {
                sessions.remove(token);
                Err(TrackerError::Unauthenticated("sesión expirada".to_string()))
            }
            None => Err(TrackerError::Unauthenticated("sesión inválida".to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_issues_distinct_tokens() {
        let p = InMemorySessionProvider::with_default_users();
        let t1 = p.login("admin", "admin123").unwrap();
        let t2 = p.login("admin", "admin123").unwrap();
        assert_ne!(t1, t2);
        assert_eq!(p.authenticate(&t1).unwrap().role, Role::Admin);
    }

    #[test]
    fn bad_credentials_are_unauthenticated() {
        let p = InMemorySessionProvider::with_default_users();
        assert!(matches!(p.login("admin", "nope"), Err(TrackerError::Unauthenticated(_))));
        assert!(matches!(p.login("ghost", "x"), Err(TrackerError::Unauthenticated(_))));
    }

    #[test]
    fn unknown_token_is_unauthenticated() {
        let p = InMemorySessionProvider::with_default_users();
        assert!(matches!(p.authenticate("deadbeef"), Err(TrackerError::Unauthenticated(_))));
    }

    #[test]
    fn expired_session_is_dropped() {
        let p = InMemorySessionProvider::new(Duration::seconds(-1));
        p.register_user("team", "team123", Role::Team);
        let t = p.login("team", "team123").unwrap();
        assert!(matches!(p.authenticate(&t), Err(TrackerError::Unauthenticated(_))));
        // ya fue eliminada; un segundo intento sigue fallando
        assert!(matches!(p.authenticate(&t), Err(TrackerError::Unauthenticated(_))));
    }

    #[test]
    fn logout_invalidates_token() {
        let p = InMemorySessionProvider::with_default_users();
        let t = p.login("manager", "manager123").unwrap();
        assert!(p.logout(&t).unwrap());
        assert!(!p.logout(&t).unwrap());
        assert!(p.authenticate(&t).is_err());
    }
}
