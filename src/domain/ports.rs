use crate::domain::model::{Client, Planet, Ticket, TicketInsert};
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

// Each call is one atomic unit: it commits or rolls back on its own.

#[async_trait]
pub trait ClientRepository: Send + Sync {
    async fn save(&self, name: &str) -> Result<Client>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Client>>;
    async fn find_all(&self) -> Result<Vec<Client>>;
    async fn update(&self, client: &Client) -> Result<Client>;
    async fn delete(&self, id: i64) -> Result<()>;
}

#[async_trait]
pub trait PlanetRepository: Send + Sync {
    async fn save(&self, planet: &Planet) -> Result<Planet>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Planet>>;
    async fn find_by_name(&self, name: &str) -> Result<Option<Planet>>;
    async fn find_all(&self) -> Result<Vec<Planet>>;
    async fn update(&self, planet: &Planet) -> Result<Planet>;
    async fn delete(&self, id: &str) -> Result<()>;
}

#[async_trait]
pub trait TicketRepository: Send + Sync {
    async fn save(&self, ticket: &TicketInsert) -> Result<Ticket>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Ticket>>;
    async fn find_all(&self) -> Result<Vec<Ticket>>;
    async fn find_all_by_client(&self, client_id: i64) -> Result<Vec<Ticket>>;
    async fn find_all_by_from_planet(&self, planet_id: &str) -> Result<Vec<Ticket>>;
    async fn find_all_by_to_planet(&self, planet_id: &str) -> Result<Vec<Ticket>>;
    /// Tickets with `start <= created_at < end`.
    async fn find_all_created_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Ticket>>;
    async fn update_from_planet(&self, id: i64, planet_id: &str) -> Result<Ticket>;
    async fn update_to_planet(&self, id: i64, planet_id: &str) -> Result<Ticket>;
    async fn delete(&self, id: i64) -> Result<()>;
    // Bulk deletes report the number of removed rows; zero is not an error here.
    async fn delete_all_by_client_id(&self, client_id: i64) -> Result<usize>;
    async fn delete_all_by_from_planet_id(&self, planet_id: &str) -> Result<usize>;
    async fn delete_all_by_to_planet_id(&self, planet_id: &str) -> Result<usize>;
}
