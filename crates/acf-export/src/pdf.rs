// Archivo: pdf.rs
// Propósito: export PDF mínimo — una página de texto plano con
// `number  title` por línea, suficiente para descargas rápidas. Se
// generan los objetos a mano y la tabla xref con offsets reales.
use acf_domain::Item;

const PAGE_TOP: i32 = 750;
const LINE_HEIGHT: i32 = 14;

fn escape_text(s: &str) -> String {
    s.replace('\\', "\\\\").replace('(', "\\(").replace(')', "\\)")
}

fn content_stream(items: &[Item]) -> String {
    let mut ops = String::new();
    ops.push_str("BT\n/F1 12 Tf\n");
    ops.push_str(&format!("50 {} Td\n", PAGE_TOP));
    if items.is_empty() {
        ops.push_str("(Sin items) Tj\n");
    }
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            ops.push_str(&format!("0 -{} Td\n", LINE_HEIGHT));
        }
        let line = format!("{}  {}", item.number, item.title);
        ops.push_str(&format!("({}) Tj\n", escape_text(&line)));
    }
    ops.push_str("ET");
    ops
}

/// Genera un PDF de una página listando los items recibidos.
pub fn items_to_pdf(items: &[Item]) -> Vec<u8> {
    let stream = content_stream(items);
    let objects = vec!["<< /Type /Catalog /Pages 2 0 R >>".to_string(),
                       "<< /Type /Pages /Kids [3 0 R] /Count 1 >>".to_string(),
                       "<< /Type /Page /Parent 2 0 R /Resources << /Font << /F1 4 0 R >> >> \
                        /Contents 5 0 R /MediaBox [0 0 612 792] >>".to_string(),
                       "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>".to_string(),
                       format!("<< /Length {} >>\nstream\n{}\nendstream", stream.len(), stream)];

    let mut out = String::from("%PDF-1.4\n");
    let mut offsets = Vec::with_capacity(objects.len());
    for (i, body) in objects.iter().enumerate() {
        offsets.push(out.len());
        out.push_str(&format!("{} 0 obj\n{}\nendobj\n", i + 1, body));
    }

    let xref_at = out.len();
    out.push_str(&format!("xref\n0 {}\n", objects.len() + 1));
    out.push_str("0000000000 65535 f \n");
    for off in &offsets {
        out.push_str(&format!("{:010} 00000 n \n", off));
    }
    out.push_str(&format!("trailer\n<< /Root 1 0 R /Size {} >>\nstartxref\n{}\n%%EOF",
                          objects.len() + 1,
                          xref_at));
    out.into_bytes()
}
