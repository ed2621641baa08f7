// Archivo: csv.rs
// Propósito: render CSV de items con el encabezado fijo del tracker.
// Todos los campos van entre comillas dobles, con `"` duplicada.
use acf_domain::Item;

const HEADER: [&str; 10] =
    ["number", "title", "factor", "action", "scope", "time", "resources", "exec_status", "notes", "current_step"];

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

fn row(item: &Item) -> String {
    let step = item.current_step.to_string();
    let cells: [&str; 10] = [&item.number,
                             &item.title,
                             item.factor.map(|v| v.as_str()).unwrap_or(""),
                             item.action.map(|v| v.as_str()).unwrap_or(""),
                             item.scope.map(|v| v.as_str()).unwrap_or(""),
                             item.time.map(|v| v.as_str()).unwrap_or(""),
                             item.resources.map(|v| v.as_str()).unwrap_or(""),
                             item.exec_status.map(|v| v.as_str()).unwrap_or(""),
                             item.notes.as_deref().unwrap_or(""),
                             &step];
    cells.iter().map(|c| quote(c)).collect::<Vec<_>>().join(",")
}

/// Render CSV completo: fila de encabezado más una fila por item, en el
/// orden recibido (el llamador ya lista en orden inverso de creación).
pub fn items_to_csv(items: &[Item]) -> String {
    let mut lines = Vec::with_capacity(items.len() + 1);
    lines.push(HEADER.iter().map(|h| quote(h)).collect::<Vec<_>>().join(","));
    lines.extend(items.iter().map(row));
    lines.join("\n")
}
