use anyhow::Context;
use rusqlite::types::ValueRef;
use rusqlite::{Connection, Row};
use serde_json::{Map, Value};

// ── Events ──

/// Every row of the `events` table as a JSON object keyed by column name.
pub fn list_events(conn: &Connection) -> anyhow::Result<Vec<Value>> {
    let mut stmt = conn
        .prepare("SELECT * FROM events ORDER BY id")
        .context("failed to prepare events query")?;

    let columns: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();

    let rows = stmt.query_map([], |row| row_to_json(row, &columns))?;

    let mut events = vec![];
    for row in rows {
        events.push(row.context("failed to read event row")?);
    }
    Ok(events)
}

fn row_to_json(row: &Row<'_>, columns: &[String]) -> rusqlite::Result<Value> {
    let mut obj = Map::with_capacity(columns.len());
    for (i, name) in columns.iter().enumerate() {
        let value = match row.get_ref(i)? {
            ValueRef::Null => Value::Null,
            ValueRef::Integer(n) => Value::from(n),
            ValueRef::Real(f) => Value::from(f),
            ValueRef::Text(t) => Value::from(String::from_utf8_lossy(t).into_owned()),
            // No catalog column holds binary data worth exposing.
            ValueRef::Blob(_) => Value::Null,
        };
        obj.insert(name.clone(), value);
    }
    Ok(Value::Object(obj))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn seeded() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE events (
                id INTEGER PRIMARY KEY,
                eventName TEXT,
                eventDate TEXT,
                numTickets INTEGER,
                price REAL
            );
            INSERT INTO events (id, eventName, eventDate, numTickets, price) VALUES
                (2, 'Rock Festival', '2025-11-08', 0, 25.5),
                (1, 'Jazz Concert Night', '2025-11-01', 40, NULL);",
        )
        .unwrap();
        conn
    }

    #[test]
    fn test_list_events_orders_by_id() {
        let events = list_events(&seeded()).unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(
            events[0],
            json!({"id": 1, "eventName": "Jazz Concert Night", "eventDate": "2025-11-01", "numTickets": 40, "price": null})
        );
        assert_eq!(events[1]["price"], json!(25.5));
    }

    #[test]
    fn test_missing_table_is_error() {
        let conn = Connection::open_in_memory().unwrap();
        assert!(list_events(&conn).is_err());
    }
}
