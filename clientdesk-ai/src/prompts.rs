// Prompt builders for the two advisor calls. Prompts are Spanish because the
// status labels and the front-end are.

use chrono::{DateTime, Utc};
use clientdesk_common::models::client::days_between;
use clientdesk_common::models::{ClientSnapshot, InteractionSnapshot};

pub const SUMMARY_HISTORY_LEN: usize = 5;
pub const CATEGORIZE_HISTORY_LEN: usize = 3;
pub const SUMMARY_WORD_BUDGET: usize = 80;

/// `dd/mm/yyyy`, the es-AR short date.
pub fn format_date(epoch_ms: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(epoch_ms)
        .map(|dt| dt.format("%d/%m/%Y").to_string())
        .unwrap_or_else(|| "fecha desconocida".to_string())
}

fn history_block(interactions: &[&InteractionSnapshot]) -> String {
    if interactions.is_empty() {
        return "Sin interacciones registradas".to_string();
    }
    interactions
        .iter()
        .map(|i| format!("- {}: {}", format_date(i.occurred_at), i.description))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn summary_prompt(client: &ClientSnapshot, now_ms: i64) -> String {
    let days = days_between(client.last_interaction_at, now_ms);
    let months = days / 30;
    let history = history_block(&client.recent_interactions(SUMMARY_HISTORY_LEN));

    format!(
        r#"Analiza este cliente de CRM y proporciona un resumen de estado y recomendación de prioridad:

INFORMACIÓN DEL CLIENTE:
- Nombre: {name}
- Estado actual: {status}
- Prioridad actual: {priority}
- Teléfono: {phone}
- Última interacción: {last}
- Días desde última interacción: {days} días
- Meses sin contacto: {months} meses
- Número total de interacciones: {count}

HISTORIAL DE INTERACCIONES:
{history}

ANÁLISIS REQUERIDO:
1. RESUMEN DE ESTADO: tiempo desde la última interacción, frecuencia de interacciones, estado actual frente a la actividad.
2. RECOMENDACIÓN DE PRIORIDAD: sugiere una prioridad (Alta, Media, Baja) según riesgo de pérdida, potencial de venta y urgencia de seguimiento.
3. JUSTIFICACIÓN: explica brevemente la prioridad recomendada.

FORMATO DE RESPUESTA:
Responde en español, máximo {budget} palabras, de manera profesional y directa. Incluye:
- Estado actual del cliente (1-2 líneas)
- Prioridad recomendada (Alta/Media/Baja)
- Justificación breve (1 línea)
- Acción sugerida (1 línea)"#,
        name = client.name,
        status = client.status,
        priority = client.priority,
        phone = client.phone,
        last = format_date(client.last_interaction_at),
        days = days,
        months = months,
        count = client.interactions.len(),
        history = history,
        budget = SUMMARY_WORD_BUDGET,
    )
}

pub fn categorize_prompt(client: &ClientSnapshot, now_ms: i64) -> String {
    let days = days_between(client.last_interaction_at, now_ms);
    let months = days / 30;
    let history = history_block(&client.recent_interactions(CATEGORIZE_HISTORY_LEN));

    format!(
        r#"Analiza este cliente y determina su estado correcto basándote en su historial de interacciones:

INFORMACIÓN DEL CLIENTE:
- Nombre: {name}
- Estado actual: {status}
- Última interacción: {last}
- Días desde última interacción: {days} días
- Meses sin contacto: {months} meses
- Número de interacciones: {count}

HISTORIAL DE INTERACCIONES:
{history}

CRITERIOS DE CATEGORIZACIÓN:
- "Activo": Interacción en últimos 14 días O más de 3 interacciones registradas
- "Potencial": Interacción entre 15-30 días Y 1-3 interacciones
- "Inactivo": Más de 30 días sin interacción O sin interacciones registradas

RESPUESTA REQUERIDA:
Proporciona tu respuesta en el siguiente formato JSON:
{{
  "category": "Activo|Potencial|Inactivo",
  "justification": "Explicación breve de por qué se mantiene o cambia el estado actual"
}}

La justificación debe explicar:
- Si el estado actual es correcto o necesita cambio
- Razón específica basada en el tiempo y frecuencia de interacciones
- Breve recomendación de seguimiento"#,
        name = client.name,
        status = client.status,
        last = format_date(client.last_interaction_at),
        days = days,
        months = months,
        count = client.interactions.len(),
        history = history,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use clientdesk_common::models::client::MILLIS_PER_DAY;
    use clientdesk_common::models::{ClientPriority, ClientStatus};

    fn snapshot(interactions: Vec<(i64, &str)>) -> ClientSnapshot {
        ClientSnapshot {
            name: "Carlos Rodríguez".into(),
            phone: "+54 11 2345-6789".into(),
            status: ClientStatus::Potential,
            priority: ClientPriority::Medium,
            last_interaction_at: 0,
            interactions: interactions
                .into_iter()
                .map(|(at, d)| InteractionSnapshot { occurred_at: at, description: d.into() })
                .collect(),
        }
    }

    #[test]
    fn dates_use_day_month_year() {
        assert_eq!(format_date(0), "01/01/1970");
        assert_eq!(format_date(40 * MILLIS_PER_DAY), "10/02/1970");
    }

    #[test]
    fn categorize_prompt_lists_three_newest_interactions() {
        let client = snapshot(vec![
            (1 * MILLIS_PER_DAY, "uno"),
            (4 * MILLIS_PER_DAY, "cuatro"),
            (2 * MILLIS_PER_DAY, "dos"),
            (3 * MILLIS_PER_DAY, "tres"),
        ]);
        let prompt = categorize_prompt(&client, 45 * MILLIS_PER_DAY);
        assert!(prompt.contains("Días desde última interacción: 45 días"));
        assert!(prompt.contains("Meses sin contacto: 1 meses"));
        assert!(prompt.contains("Número de interacciones: 4"));
        assert!(prompt.contains("cuatro"));
        assert!(prompt.contains("dos"));
        assert!(!prompt.contains("uno"));
        assert!(prompt.find("cuatro") < prompt.find("tres"));
        assert!(prompt.contains("\"category\": \"Activo|Potencial|Inactivo\""));
    }

    #[test]
    fn summary_prompt_handles_empty_history() {
        let prompt = summary_prompt(&snapshot(vec![]), 5 * MILLIS_PER_DAY);
        assert!(prompt.contains("Sin interacciones registradas"));
        assert!(prompt.contains("Prioridad actual: Media"));
        assert!(prompt.contains("máximo 80 palabras"));
    }
}
