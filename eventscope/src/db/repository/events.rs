use libsql::{params, Connection, Row, Value};

use crate::config::PLACEHOLDERS_TOKEN;
use crate::error::Result;
use crate::models::{EventRecord, EventText};

/// Queries over the events table. The batch query must select ten columns
/// in [`EventRecord`] field order; the text query selects name, venue name,
/// description and subtitle.
pub struct EventRepository;

impl EventRepository {
    /// Expand the batch query template with one positional placeholder per
    /// id: `?1, ?2, ..., ?n`.
    pub fn build_batch_query(template: &str, count: usize) -> String {
        let mut placeholders = String::new();
        for i in 0..count {
            if i > 0 {
                placeholders.push_str(", ");
            }
            placeholders.push('?');
            placeholders.push_str(&(i + 1).to_string());
        }

        template.replace(PLACEHOLDERS_TOKEN, &placeholders)
    }

    pub async fn get_by_ids(
        conn: &Connection,
        batch_query: &str,
        ids: &[String],
    ) -> Result<Vec<EventRecord>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let sql = Self::build_batch_query(batch_query, ids.len());
        let params: Vec<Value> = ids.iter().map(|id| Value::from(id.clone())).collect();

        let mut rows = conn.query(&sql, libsql::params_from_iter(params)).await?;
        let mut results = Vec::new();
        while let Some(row) = rows.next().await? {
            results.push(Self::row_to_event(&row)?);
        }
        Ok(results)
    }

    pub async fn get_text(
        conn: &Connection,
        text_fields_query: &str,
        id: &str,
    ) -> Result<Option<EventText>> {
        let mut rows = conn.query(text_fields_query, params![id]).await?;

        if let Some(row) = rows.next().await? {
            Ok(Some(EventText {
                name: column_text(&row, 0)?,
                venue_name: column_text(&row, 1)?,
                description: column_text(&row, 2)?,
                subtitle: column_text(&row, 3)?,
            }))
        } else {
            Ok(None)
        }
    }

    fn row_to_event(row: &Row) -> Result<EventRecord> {
        Ok(EventRecord {
            event_id: column_text(row, 0)?,
            name: column_text(row, 1)?,
            subtitle: column_text(row, 2)?,
            user_id: column_text(row, 3)?,
            user_name: column_text(row, 4)?,
            datetime: column_text(row, 5)?,
            venue_name: column_text(row, 6)?,
            address: column_text(row, 7)?,
            seats_sold: column_text(row, 8)?,
            seats_max: column_text(row, 9)?,
        })
    }
}

/// Read any column as text; NULL becomes an empty string.
fn column_text(row: &Row, idx: i32) -> Result<String> {
    Ok(match row.get_value(idx)? {
        Value::Null => String::new(),
        Value::Integer(i) => i.to_string(),
        Value::Real(f) => f.to_string(),
        Value::Text(s) => s,
        Value::Blob(b) => String::from_utf8_lossy(&b).into_owned(),
    })
}
