use crate::adapters::migrations;
use crate::domain::model::{Client, Planet, Ticket, TicketInsert};
use crate::domain::ports::{ClientRepository, PlanetRepository, TicketRepository};
use crate::utils::error::{Result, SpaceTravelError};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Params, Row};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;

const TICKET_SELECT: &str = "SELECT t.id, t.created_at_ms, c.id, c.name, f.id, f.name, d.id, d.name \
     FROM ticket t \
     JOIN client c ON c.id = t.client_id \
     JOIN planet f ON f.id = t.from_planet_id \
     JOIN planet d ON d.id = t.to_planet_id";

/// SQLite-backed implementation of all three repository ports.
///
/// Clones share one connection. Every write runs in its own transaction.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        tracing::debug!("Opening database at {}", path.display());
        Self::configure(Connection::open(path)?)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::configure(Connection::open_in_memory()?)
    }

    fn configure(conn: Connection) -> Result<Self> {
        conn.execute_batch(
            "PRAGMA foreign_keys = ON;
             PRAGMA busy_timeout = 5000;",
        )?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub async fn migrate(&self) -> Result<u32> {
        let mut conn = self.conn.lock().await;
        migrations::migrate(&mut conn)
    }

    pub async fn schema_version(&self) -> Result<u32> {
        let conn = self.conn.lock().await;
        migrations::current_version(&conn)
    }
}

fn to_millis(at: DateTime<Utc>) -> i64 {
    at.timestamp_millis()
}

fn client_from_row(row: &Row<'_>) -> rusqlite::Result<Client> {
    Ok(Client {
        id: row.get(0)?,
        name: row.get(1)?,
    })
}

fn planet_from_row(row: &Row<'_>) -> rusqlite::Result<Planet> {
    Ok(Planet {
        id: row.get(0)?,
        name: row.get(1)?,
    })
}

fn ticket_from_row(row: &Row<'_>) -> rusqlite::Result<Ticket> {
    let millis: i64 = row.get(1)?;
    let created_at = DateTime::from_timestamp_millis(millis).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            1,
            Type::Integer,
            format!("created_at_ms out of range: {}", millis).into(),
        )
    })?;

    Ok(Ticket {
        id: row.get(0)?,
        created_at,
        client: Client {
            id: row.get(2)?,
            name: row.get(3)?,
        },
        from_planet: Planet {
            id: row.get(4)?,
            name: row.get(5)?,
        },
        to_planet: Planet {
            id: row.get(6)?,
            name: row.get(7)?,
        },
    })
}

fn query_tickets<P: Params>(conn: &Connection, filter: &str, params: P) -> Result<Vec<Ticket>> {
    let sql = format!("{} {} ORDER BY t.id", TICKET_SELECT, filter);
    let mut stmt = conn.prepare(&sql)?;
    let tickets = stmt
        .query_map(params, ticket_from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(tickets)
}

fn query_ticket(conn: &Connection, id: i64) -> Result<Option<Ticket>> {
    let sql = format!("{} WHERE t.id = ?1", TICKET_SELECT);
    Ok(conn
        .query_row(&sql, params![id], ticket_from_row)
        .optional()?)
}

fn missing_row(entity: &str, id: impl std::fmt::Display) -> SpaceTravelError {
    SpaceTravelError::not_found(format!("{} not found for ID: {}", entity, id))
}

#[async_trait]
impl ClientRepository for SqliteStore {
    async fn save(&self, name: &str) -> Result<Client> {
        let mut conn = self.conn.lock().await;
        let tx = conn.transaction()?;
        tx.execute("INSERT INTO client (name) VALUES (?1)", params![name])?;
        let client = Client {
            id: tx.last_insert_rowid(),
            name: name.to_string(),
        };
        tx.commit()?;
        tracing::debug!("Client saved: {}", client.id);
        Ok(client)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Client>> {
        let conn = self.conn.lock().await;
        Ok(conn
            .query_row(
                "SELECT id, name FROM client WHERE id = ?1",
                params![id],
                client_from_row,
            )
            .optional()?)
    }

    async fn find_all(&self) -> Result<Vec<Client>> {
        let conn = self.conn.lock().await;
        let mut stmt = conn.prepare("SELECT id, name FROM client ORDER BY id")?;
        let clients = stmt
            .query_map([], client_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(clients)
    }

    async fn update(&self, client: &Client) -> Result<Client> {
        let mut conn = self.conn.lock().await;
        let tx = conn.transaction()?;
        let changed = tx.execute(
            "UPDATE client SET name = ?2 WHERE id = ?1",
            params![client.id, client.name],
        )?;
        if changed == 0 {
            return Err(missing_row("Client", client.id));
        }
        tx.commit()?;
        Ok(client.clone())
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let mut conn = self.conn.lock().await;
        let tx = conn.transaction()?;
        tx.execute("DELETE FROM client WHERE id = ?1", params![id])?;
        tx.commit()?;
        tracing::debug!("Client deleted: {}", id);
        Ok(())
    }
}

#[async_trait]
impl PlanetRepository for SqliteStore {
    async fn save(&self, planet: &Planet) -> Result<Planet> {
        let mut conn = self.conn.lock().await;
        let tx = conn.transaction()?;
        tx.execute(
            "INSERT INTO planet (id, name) VALUES (?1, ?2)",
            params![planet.id, planet.name],
        )?;
        tx.commit()?;
        tracing::debug!("Planet saved: {}", planet.id);
        Ok(planet.clone())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Planet>> {
        let conn = self.conn.lock().await;
        Ok(conn
            .query_row(
                "SELECT id, name FROM planet WHERE id = ?1",
                params![id],
                planet_from_row,
            )
            .optional()?)
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Planet>> {
        let conn = self.conn.lock().await;
        Ok(conn
            .query_row(
                "SELECT id, name FROM planet WHERE name = ?1",
                params![name],
                planet_from_row,
            )
            .optional()?)
    }

    async fn find_all(&self) -> Result<Vec<Planet>> {
        let conn = self.conn.lock().await;
        let mut stmt = conn.prepare("SELECT id, name FROM planet ORDER BY id")?;
        let planets = stmt
            .query_map([], planet_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(planets)
    }

    async fn update(&self, planet: &Planet) -> Result<Planet> {
        let mut conn = self.conn.lock().await;
        let tx = conn.transaction()?;
        let changed = tx.execute(
            "UPDATE planet SET name = ?2 WHERE id = ?1",
            params![planet.id, planet.name],
        )?;
        if changed == 0 {
            return Err(missing_row("Planet", &planet.id));
        }
        tx.commit()?;
        Ok(planet.clone())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let mut conn = self.conn.lock().await;
        let tx = conn.transaction()?;
        tx.execute("DELETE FROM planet WHERE id = ?1", params![id])?;
        tx.commit()?;
        tracing::debug!("Planet deleted: {}", id);
        Ok(())
    }
}

#[async_trait]
impl TicketRepository for SqliteStore {
    async fn save(&self, ticket: &TicketInsert) -> Result<Ticket> {
        let mut conn = self.conn.lock().await;
        let tx = conn.transaction()?;
        tx.execute(
            "INSERT INTO ticket (created_at_ms, client_id, from_planet_id, to_planet_id) \
             VALUES (?1, ?2, ?3, ?4)",
            params![
                to_millis(ticket.created_at),
                ticket.client_id,
                ticket.from_planet_id,
                ticket.to_planet_id
            ],
        )?;
        let id = tx.last_insert_rowid();
        let saved = query_ticket(&tx, id)?.ok_or_else(|| missing_row("Ticket", id))?;
        tx.commit()?;
        tracing::debug!("Ticket saved for client: {}", ticket.client_id);
        Ok(saved)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Ticket>> {
        let conn = self.conn.lock().await;
        query_ticket(&conn, id)
    }

    async fn find_all(&self) -> Result<Vec<Ticket>> {
        let conn = self.conn.lock().await;
        query_tickets(&conn, "", params![])
    }

    async fn find_all_by_client(&self, client_id: i64) -> Result<Vec<Ticket>> {
        let conn = self.conn.lock().await;
        query_tickets(&conn, "WHERE t.client_id = ?1", params![client_id])
    }

    async fn find_all_by_from_planet(&self, planet_id: &str) -> Result<Vec<Ticket>> {
        let conn = self.conn.lock().await;
        query_tickets(&conn, "WHERE t.from_planet_id = ?1", params![planet_id])
    }

    async fn find_all_by_to_planet(&self, planet_id: &str) -> Result<Vec<Ticket>> {
        let conn = self.conn.lock().await;
        query_tickets(&conn, "WHERE t.to_planet_id = ?1", params![planet_id])
    }

    async fn find_all_created_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Ticket>> {
        let conn = self.conn.lock().await;
        query_tickets(
            &conn,
            "WHERE t.created_at_ms >= ?1 AND t.created_at_ms < ?2",
            params![to_millis(start), to_millis(end)],
        )
    }

    async fn update_from_planet(&self, id: i64, planet_id: &str) -> Result<Ticket> {
        let mut conn = self.conn.lock().await;
        let tx = conn.transaction()?;
        let changed = tx.execute(
            "UPDATE ticket SET from_planet_id = ?2 WHERE id = ?1",
            params![id, planet_id],
        )?;
        if changed == 0 {
            return Err(missing_row("Ticket", id));
        }
        let updated = query_ticket(&tx, id)?.ok_or_else(|| missing_row("Ticket", id))?;
        tx.commit()?;
        Ok(updated)
    }

    async fn update_to_planet(&self, id: i64, planet_id: &str) -> Result<Ticket> {
        let mut conn = self.conn.lock().await;
        let tx = conn.transaction()?;
        let changed = tx.execute(
            "UPDATE ticket SET to_planet_id = ?2 WHERE id = ?1",
            params![id, planet_id],
        )?;
        if changed == 0 {
            return Err(missing_row("Ticket", id));
        }
        let updated = query_ticket(&tx, id)?.ok_or_else(|| missing_row("Ticket", id))?;
        tx.commit()?;
        Ok(updated)
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let mut conn = self.conn.lock().await;
        let tx = conn.transaction()?;
        tx.execute("DELETE FROM ticket WHERE id = ?1", params![id])?;
        tx.commit()?;
        tracing::debug!("Ticket deleted: {}", id);
        Ok(())
    }

    async fn delete_all_by_client_id(&self, client_id: i64) -> Result<usize> {
        let mut conn = self.conn.lock().await;
        let tx = conn.transaction()?;
        let removed = tx.execute("DELETE FROM ticket WHERE client_id = ?1", params![client_id])?;
        tx.commit()?;
        tracing::debug!("Deleted {} tickets with clientId = {}", removed, client_id);
        Ok(removed)
    }

    async fn delete_all_by_from_planet_id(&self, planet_id: &str) -> Result<usize> {
        let mut conn = self.conn.lock().await;
        let tx = conn.transaction()?;
        let removed = tx.execute(
            "DELETE FROM ticket WHERE from_planet_id = ?1",
            params![planet_id],
        )?;
        tx.commit()?;
        tracing::debug!("Deleted {} tickets with fromPlanetId = {}", removed, planet_id);
        Ok(removed)
    }

    async fn delete_all_by_to_planet_id(&self, planet_id: &str) -> Result<usize> {
        let mut conn = self.conn.lock().await;
        let tx = conn.transaction()?;
        let removed = tx.execute(
            "DELETE FROM ticket WHERE to_planet_id = ?1",
            params![planet_id],
        )?;
        tx.commit()?;
        tracing::debug!("Deleted {} tickets with toPlanetId = {}", removed, planet_id);
        Ok(removed)
    }
}
