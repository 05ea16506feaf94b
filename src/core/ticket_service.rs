use crate::domain::model::{day_bounds, NewTicket, Planet, Ticket, TicketInsert};
use crate::domain::ports::{PlanetRepository, TicketRepository};
use crate::utils::error::{Result, SpaceTravelError};
use crate::utils::validation::{validate_planet_id, validate_record_id, validate_ticket_legs};
use chrono::{NaiveDate, Utc};

const TICKET_ID: &str = "Ticket ID";
const CLIENT_ID: &str = "Client ID";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Leg {
    From,
    To,
}

impl Leg {
    fn label(self) -> &'static str {
        match self {
            Leg::From => "fromPlanet",
            Leg::To => "toPlanet",
        }
    }

    fn opposite(self) -> Leg {
        match self {
            Leg::From => Leg::To,
            Leg::To => Leg::From,
        }
    }

    fn of(self, ticket: &Ticket) -> &Planet {
        match self {
            Leg::From => &ticket.from_planet,
            Leg::To => &ticket.to_planet,
        }
    }
}

pub struct TicketService<T: TicketRepository, P: PlanetRepository> {
    tickets: T,
    planets: P,
}

impl<T: TicketRepository, P: PlanetRepository> TicketService<T, P> {
    pub fn new(tickets: T, planets: P) -> Self {
        Self { tickets, planets }
    }

    /// Checks structure only. The caller has already resolved the client
    /// and both planets.
    pub async fn create(&self, ticket: NewTicket) -> Result<Ticket> {
        let (client, from, to) = validate_ticket_legs(&ticket)?;

        let insert = TicketInsert {
            client_id: client.id,
            from_planet_id: from.id.clone(),
            to_planet_id: to.id.clone(),
            created_at: ticket.created_at.unwrap_or_else(Utc::now),
        };

        tracing::info!(
            "Creating ticket: client={}, from={}, to={}",
            insert.client_id,
            insert.from_planet_id,
            insert.to_planet_id
        );
        self.tickets.save(&insert).await
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Ticket> {
        let id = validate_record_id(TICKET_ID, Some(id))?;
        self.tickets
            .find_by_id(id)
            .await?
            .ok_or_else(|| SpaceTravelError::not_found(format!("Ticket with id {} not found.", id)))
    }

    pub async fn find_all(&self) -> Result<Vec<Ticket>> {
        self.tickets.find_all().await
    }

    pub async fn find_all_by_client(&self, client_id: i64) -> Result<Vec<Ticket>> {
        self.tickets.find_all_by_client(client_id).await
    }

    pub async fn find_all_by_from_planet(&self, planet_id: &str) -> Result<Vec<Ticket>> {
        self.tickets.find_all_by_from_planet(planet_id).await
    }

    pub async fn find_all_by_to_planet(&self, planet_id: &str) -> Result<Vec<Ticket>> {
        self.tickets.find_all_by_to_planet(planet_id).await
    }

    /// Tickets created on `date`, in UTC.
    pub async fn find_all_by_date(&self, date: NaiveDate) -> Result<Vec<Ticket>> {
        let (start, end) = day_bounds(date);
        tracing::debug!("Listing tickets created in [{}, {})", start, end);
        self.tickets.find_all_created_between(start, end).await
    }

    pub async fn update_from_planet(&self, id: i64, planet_id: &str) -> Result<Ticket> {
        self.update_leg(Leg::From, id, planet_id).await
    }

    pub async fn update_to_planet(&self, id: i64, planet_id: &str) -> Result<Ticket> {
        self.update_leg(Leg::To, id, planet_id).await
    }

    async fn update_leg(&self, leg: Leg, id: i64, planet_id: &str) -> Result<Ticket> {
        let id = validate_record_id(TICKET_ID, Some(id))?;
        let planet_id = validate_planet_id(planet_id)?;

        let planet = self.planets.find_by_id(planet_id).await?.ok_or_else(|| {
            let prefix = match leg {
                Leg::From => "From",
                Leg::To => "To",
            };
            SpaceTravelError::not_found(format!("{} planet not found with id: {}", prefix, planet_id))
        })?;

        let ticket = self.tickets.find_by_id(id).await?.ok_or_else(|| {
            SpaceTravelError::not_found(format!(
                "Attempted to update nonexistent ticket with id: {}",
                id
            ))
        })?;

        let other = leg.opposite();
        if other.of(&ticket).id == planet.id {
            return Err(SpaceTravelError::invalid_input(format!(
                "Entered {} ID is identical to {} ID: {}",
                leg.label(),
                other.label(),
                planet.id
            )));
        }

        tracing::info!("Updating {} of ticket {} to '{}'", leg.label(), id, planet.id);
        match leg {
            Leg::From => self.tickets.update_from_planet(id, &planet.id).await,
            Leg::To => self.tickets.update_to_planet(id, &planet.id).await,
        }
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        let id = validate_record_id(TICKET_ID, Some(id))?;
        if self.tickets.find_by_id(id).await?.is_none() {
            tracing::warn!("Attempted to delete nonexistent ticket: {}", id);
            return Err(SpaceTravelError::not_found(format!(
                "Attempted to delete nonexistent ticket with id: {}",
                id
            )));
        }

        tracing::info!("Deleting ticket with ID: {}", id);
        self.tickets.delete(id).await
    }

    /// Unlike [`TicketService::find_all_by_client`], an empty match is an error.
    pub async fn delete_all_by_client_id(&self, client_id: i64) -> Result<usize> {
        let client_id = validate_record_id(CLIENT_ID, Some(client_id))?;
        let tickets = self.tickets.find_all_by_client(client_id).await?;
        self.delete_matched(tickets, "clientId", &client_id.to_string())
            .await
    }

    pub async fn delete_all_by_from_planet_id(&self, planet_id: &str) -> Result<usize> {
        let planet_id = validate_planet_id(planet_id)?;
        let tickets = self.tickets.find_all_by_from_planet(planet_id).await?;
        self.delete_matched(tickets, "fromPlanetId", planet_id).await
    }

    pub async fn delete_all_by_to_planet_id(&self, planet_id: &str) -> Result<usize> {
        let planet_id = validate_planet_id(planet_id)?;
        let tickets = self.tickets.find_all_by_to_planet(planet_id).await?;
        self.delete_matched(tickets, "toPlanetId", planet_id).await
    }

    async fn delete_matched(&self, tickets: Vec<Ticket>, key: &str, value: &str) -> Result<usize> {
        if tickets.is_empty() {
            tracing::warn!("Attempted to delete tickets for nonexistent {}: {}", key, value);
            return Err(SpaceTravelError::not_found(format!(
                "No tickets found for {}: {}",
                key, value
            )));
        }

        for ticket in &tickets {
            tracing::info!("Deleting ticket {} for {}={}", ticket.id, key, value);
            self.tickets.delete(ticket.id).await?;
        }
        Ok(tickets.len())
    }
}
