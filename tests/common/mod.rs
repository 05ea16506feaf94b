#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use space_travel::core::{ClientRepository, PlanetRepository, TicketRepository};
use space_travel::domain::model::TicketInsert;
use space_travel::{
    Client, ClientService, NewTicket, Planet, PlanetService, Result, SqliteStore, Ticket,
    TicketService,
};

pub struct Services {
    pub store: SqliteStore,
    pub clients: ClientService<SqliteStore, SqliteStore>,
    pub planets: PlanetService<SqliteStore, SqliteStore>,
    pub tickets: TicketService<SqliteStore, SqliteStore>,
}

impl Services {
    pub async fn client(&self, name: &str) -> Client {
        self.clients.create(name).await.unwrap()
    }

    pub async fn planet(&self, id: &str, name: &str) -> Planet {
        self.planets.create(id, name).await.unwrap()
    }

    pub async fn ticket(&self, client: &Client, from: &Planet, to: &Planet) -> Ticket {
        self.tickets
            .create(NewTicket::new(client.clone(), from.clone(), to.clone()))
            .await
            .unwrap()
    }

    pub async fn ticket_at(
        &self,
        client: &Client,
        from: &Planet,
        to: &Planet,
        created_at: DateTime<Utc>,
    ) -> Ticket {
        self.tickets
            .create(NewTicket::new(client.clone(), from.clone(), to.clone()).created_at(created_at))
            .await
            .unwrap()
    }
}

pub async fn migrated_store() -> SqliteStore {
    let store = SqliteStore::open_in_memory().unwrap();
    store.migrate().await.unwrap();
    store
}

pub async fn services() -> Services {
    let store = migrated_store().await;
    Services {
        clients: ClientService::new(store.clone(), store.clone()),
        planets: PlanetService::new(store.clone(), store.clone()),
        tickets: TicketService::new(store.clone(), store.clone()),
        store,
    }
}

pub fn utc(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap()
}

/// Store double for checks that must fail before any persistence call.
#[derive(Clone)]
pub struct UnreachableStore;

#[async_trait]
impl ClientRepository for UnreachableStore {
    async fn save(&self, _name: &str) -> Result<Client> {
        unreachable!("persistence reached")
    }
    async fn find_by_id(&self, _id: i64) -> Result<Option<Client>> {
        unreachable!("persistence reached")
    }
    async fn find_all(&self) -> Result<Vec<Client>> {
        unreachable!("persistence reached")
    }
    async fn update(&self, _client: &Client) -> Result<Client> {
        unreachable!("persistence reached")
    }
    async fn delete(&self, _id: i64) -> Result<()> {
        unreachable!("persistence reached")
    }
}

#[async_trait]
impl PlanetRepository for UnreachableStore {
    async fn save(&self, _planet: &Planet) -> Result<Planet> {
        unreachable!("persistence reached")
    }
    async fn find_by_id(&self, _id: &str) -> Result<Option<Planet>> {
        unreachable!("persistence reached")
    }
    async fn find_by_name(&self, _name: &str) -> Result<Option<Planet>> {
        unreachable!("persistence reached")
    }
    async fn find_all(&self) -> Result<Vec<Planet>> {
        unreachable!("persistence reached")
    }
    async fn update(&self, _planet: &Planet) -> Result<Planet> {
        unreachable!("persistence reached")
    }
    async fn delete(&self, _id: &str) -> Result<()> {
        unreachable!("persistence reached")
    }
}

#[async_trait]
impl TicketRepository for UnreachableStore {
    async fn save(&self, _ticket: &TicketInsert) -> Result<Ticket> {
        unreachable!("persistence reached")
    }
    async fn find_by_id(&self, _id: i64) -> Result<Option<Ticket>> {
        unreachable!("persistence reached")
    }
    async fn find_all(&self) -> Result<Vec<Ticket>> {
        unreachable!("persistence reached")
    }
    async fn find_all_by_client(&self, _client_id: i64) -> Result<Vec<Ticket>> {
        unreachable!("persistence reached")
    }
    async fn find_all_by_from_planet(&self, _planet_id: &str) -> Result<Vec<Ticket>> {
        unreachable!("persistence reached")
    }
    async fn find_all_by_to_planet(&self, _planet_id: &str) -> Result<Vec<Ticket>> {
        unreachable!("persistence reached")
    }
    async fn find_all_created_between(
        &self,
        _start: DateTime<Utc>,
        _end: DateTime<Utc>,
    ) -> Result<Vec<Ticket>> {
        unreachable!("persistence reached")
    }
    async fn update_from_planet(&self, _id: i64, _planet_id: &str) -> Result<Ticket> {
        unreachable!("persistence reached")
    }
    async fn update_to_planet(&self, _id: i64, _planet_id: &str) -> Result<Ticket> {
        unreachable!("persistence reached")
    }
    async fn delete(&self, _id: i64) -> Result<()> {
        unreachable!("persistence reached")
    }
    async fn delete_all_by_client_id(&self, _client_id: i64) -> Result<usize> {
        unreachable!("persistence reached")
    }
    async fn delete_all_by_from_planet_id(&self, _planet_id: &str) -> Result<usize> {
        unreachable!("persistence reached")
    }
    async fn delete_all_by_to_planet_id(&self, _planet_id: &str) -> Result<usize> {
        unreachable!("persistence reached")
    }
}
