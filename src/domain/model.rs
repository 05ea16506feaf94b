use chrono::{DateTime, Days, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Planet {
    pub id: String,
    pub name: String,
}

impl Planet {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    pub id: i64,
    pub created_at: DateTime<Utc>,
    pub client: Client,
    pub from_planet: Planet,
    pub to_planet: Planet,
}

impl fmt::Display for Ticket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Ticket {}: client={}, from={}, to={}, createdAt={}",
            self.id,
            self.client.id,
            self.from_planet.id,
            self.to_planet.id,
            self.created_at.to_rfc3339()
        )
    }
}

/// Ticket as handed to the ticket service before it is persisted.
///
/// References are optional so that a caller can hand over an incomplete
/// ticket and get `InvalidInput` back instead of a type error at the
/// call site.
#[derive(Debug, Clone, Default)]
pub struct NewTicket {
    pub client: Option<Client>,
    pub from_planet: Option<Planet>,
    pub to_planet: Option<Planet>,
    pub created_at: Option<DateTime<Utc>>,
}

impl NewTicket {
    pub fn new(client: Client, from_planet: Planet, to_planet: Planet) -> Self {
        Self {
            client: Some(client),
            from_planet: Some(from_planet),
            to_planet: Some(to_planet),
            created_at: None,
        }
    }

    pub fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }
}

/// Row written by `TicketRepository::save`; every field is already validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketInsert {
    pub client_id: i64,
    pub from_planet_id: String,
    pub to_planet_id: String,
    pub created_at: DateTime<Utc>,
}

/// Half-open UTC interval `[date 00:00, date+1 00:00)`.
pub fn day_bounds(date: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = date.and_hms_opt(0, 0, 0).unwrap_or_default().and_utc();
    let end = date
        .checked_add_days(Days::new(1))
        .and_then(|next| next.and_hms_opt(0, 0, 0))
        .map(|next| next.and_utc())
        .unwrap_or(DateTime::<Utc>::MAX_UTC);
    (start, end)
}
