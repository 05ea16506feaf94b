use crate::domain::model::Client;
use crate::domain::ports::{ClientRepository, TicketRepository};
use crate::utils::error::{Result, SpaceTravelError};
use crate::utils::validation::{validate_client_name, validate_record_id};

const CLIENT_ID: &str = "Client ID";

pub struct ClientService<C: ClientRepository, T: TicketRepository> {
    clients: C,
    tickets: T,
}

impl<C: ClientRepository, T: TicketRepository> ClientService<C, T> {
    pub fn new(clients: C, tickets: T) -> Self {
        Self { clients, tickets }
    }

    pub async fn create(&self, name: &str) -> Result<Client> {
        let name = validate_client_name(name)?;
        tracing::info!("Creating client: {}", name);
        self.clients.save(name).await
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Client> {
        let id = validate_record_id(CLIENT_ID, Some(id))?;
        self.clients
            .find_by_id(id)
            .await?
            .ok_or_else(|| SpaceTravelError::not_found(format!("Client not found with ID: {}", id)))
    }

    pub async fn find_all(&self) -> Result<Vec<Client>> {
        self.clients.find_all().await
    }

    /// Replaces the name. Rejecting an unchanged name is up to the caller.
    pub async fn update(&self, id: i64, name: &str) -> Result<Client> {
        let id = validate_record_id(CLIENT_ID, Some(id))?;
        let name = validate_client_name(name)?;

        let mut client = self.clients.find_by_id(id).await?.ok_or_else(|| {
            SpaceTravelError::not_found(format!(
                "Attempted to update nonexistent client with id: {}",
                id
            ))
        })?;

        client.name = name.to_string();
        tracing::info!("Updating client {} to new name '{}'", id, name);
        self.clients.update(&client).await
    }

    /// Deletes the client's tickets first, then the client itself.
    pub async fn delete(&self, id: i64) -> Result<()> {
        let id = validate_record_id(CLIENT_ID, Some(id))?;

        if self.clients.find_by_id(id).await?.is_none() {
            tracing::warn!("Attempted to delete nonexistent client: {}", id);
            return Err(SpaceTravelError::not_found(format!(
                "Attempted to delete nonexistent client with id: {}",
                id
            )));
        }

        tracing::info!("Deleting client with ID: {}", id);
        let removed = self.tickets.delete_all_by_client_id(id).await?;
        if removed > 0 {
            tracing::info!("Removed {} tickets of client {}", removed, id);
        }
        self.clients.delete(id).await
    }
}
