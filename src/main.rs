use std::error::Error;
use std::io::{self, Write};
use std::str::FromStr;
use std::sync::Arc;

use acf_domain::{classify_quadrant, ClassifyConfig, FieldPatch, ItemField, Role};
use acf_export::{items_to_csv, matrix_report, status_report};
use acf_persistence::SqliteItemRepository;
use acf_store::sessions::{IdentityProvider, InMemorySessionProvider};
use acf_store::ItemService;
use serde_json::json;
use uuid::Uuid;

/// Pequeño menú interactivo para administrar items del ciclo ACF usando
/// el repositorio SQLite de `acf-persistence`.
///
/// Opciones soportadas:
/// 1) Ver items (tabla con number, etapa y cuadrante)
/// 2) Crear item
/// 3) Editar un campo de un item
/// 4) Cambiar la etapa de un item
/// 5) Eliminar item
/// 6) Exportar CSV
/// 7) Ver matriz / estados
/// 8) Salir
fn main() -> Result<(), Box<dyn Error>> {
    // Inicializar repo desde el entorno (ACF_DB_PATH) y sembrar si hace falta
    let repo = Arc::new(SqliteItemRepository::new_from_env()?);
    repo.seed_if_empty()?;
    let service = ItemService::new(repo);
    let sessions = InMemorySessionProvider::with_default_users();
    let cfg = ClassifyConfig::default();

    // Login con los usuarios de desarrollo sembrados
    let token = loop {
        let username = prompt("Usuario: ")?;
        let password = prompt("Contraseña: ")?;
        match sessions.login(username.trim(), password.trim()) {
            Ok(t) => break t,
            Err(e) => eprintln!("{}", e),
        }
    };
    let identity = sessions.authenticate(&token)?;
    let role: Role = identity.role;
    println!("Sesión iniciada como {} ({})", identity.username, role);

    loop {
        println!("\n== ACF tracker ==");
        println!("1) Ver items");
        println!("2) Crear item");
        println!("3) Editar campo de un item");
        println!("4) Cambiar etapa");
        println!("5) Eliminar item");
        println!("6) Exportar CSV");
        println!("7) Matriz y estados");
        println!("8) Salir");
        print!("Elige una opción: ");
        io::stdout().flush().ok();

        let mut choice = String::new();
        io::stdin().read_line(&mut choice)?;
        match choice.trim() {
            "1" => match service.list(None) {
                Ok(items) => {
                    println!("\nID                                   | NUMBER  | ETAPA | CUADRANTE         | TITLE");
                    println!("--------------------------------------------------------------------------------------");
                    for it in items {
                        let quadrant = classify_quadrant(it.scope, it.resources, &cfg);
                        println!("{} | {} | {}     | {:<17} | {}", it.id, it.number, it.current_step,
                                 format!("{:?}", quadrant), it.title);
                    }
                }
                Err(e) => eprintln!("Error listando items: {}", e),
            },
            "2" => {
                let title = prompt("Título: ")?;
                match service.create(role, title.trim()) {
                    Ok(it) => println!("Item creado: {} ({})", it.number, it.id),
                    Err(e) => eprintln!("Error creando item: {}", e),
                }
            }
            "3" => {
                let id = match read_uuid("Item id (UUID): ")? {
                    Some(u) => u,
                    None => continue,
                };
                let field_s = prompt("Campo (title/factor/action/scope/time/resources/current_step/exec_status/notes): ")?;
                let field = match ItemField::from_str(field_s.trim()) {
                    Ok(f) => f,
                    Err(e) => { eprintln!("{}", e); continue; }
                };
                let value_s = prompt("Valor (enter para limpiar): ")?;
                let value = if field == ItemField::CurrentStep {
                    match value_s.trim().parse::<i64>() {
                        Ok(n) => json!(n),
                        Err(_) => { eprintln!("Paso inválido"); continue; }
                    }
                } else {
                    json!(value_s.trim())
                };
                let mut patch = FieldPatch::new();
                patch.insert(field, value);
                match service.patch(role, &id, patch) {
                    Ok(it) => println!("Item actualizado: {}", it.number),
                    Err(e) => eprintln!("Error aplicando patch: {}", e),
                }
            }
            "4" => {
                let id = match read_uuid("Item id (UUID): ")? {
                    Some(u) => u,
                    None => continue,
                };
                let step_s = prompt("Nueva etapa (0..4): ")?;
                let step: i64 = match step_s.trim().parse() {
                    Ok(n) => n,
                    Err(_) => { eprintln!("Etapa inválida"); continue; }
                };
                match service.set_step(role, &id, step) {
                    Ok(it) => println!("{} ahora en etapa {}", it.number, it.current_step),
                    Err(e) => eprintln!("Error cambiando etapa: {}", e),
                }
            }
            "5" => {
                let id = match read_uuid("Item id a eliminar (UUID): ")? {
                    Some(u) => u,
                    None => continue,
                };
                let confirm = prompt(&format!("Confirma borrado de {}? escribir 'yes' para confirmar: ", id))?;
                if confirm.trim().to_lowercase() == "yes" {
                    match service.delete(role, &id) {
                        Ok(n) => println!("Items eliminados: {}", n),
                        Err(e) => eprintln!("Error eliminando item: {}", e),
                    }
                } else {
                    println!("Borrado cancelado");
                }
            }
            "6" => match service.list(None) {
                Ok(items) => println!("{}", items_to_csv(&items)),
                Err(e) => eprintln!("Error exportando: {}", e),
            },
            "7" => match service.list(None) {
                Ok(items) => {
                    let matrix = matrix_report(&items, &cfg);
                    let status = status_report(&items, &cfg);
                    println!("Matriz:  quick_wins={} strategic={} minimal={} risk={} sin_asignar={}",
                             matrix.quick_wins, matrix.strategic_projects, matrix.minimal_effort, matrix.risk_zone,
                             matrix.unassigned);
                    println!("Estados: not_started={} in_progress={} completed={} delayed={} unknown={}",
                             status.not_started, status.in_progress, status.completed, status.delayed,
                             status.unknown);
                }
                Err(e) => eprintln!("Error generando reportes: {}", e),
            },
            "8" => {
                sessions.logout(&token)?;
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

fn read_uuid(msg: &str) -> io::Result<Option<Uuid>> {
    let s = prompt(msg)?;
    match Uuid::parse_str(s.trim()) {
        Ok(u) => Ok(Some(u)),
        Err(_) => {
            eprintln!("UUID inválido");
            Ok(None)
        }
    }
}

fn prompt(msg: &str) -> io::Result<String> {
    print!("{}", msg);
    io::stdout().flush()?;
    let mut s = String::new();
    io::stdin().read_line(&mut s)?;
    Ok(s)
}
