use crate::cli::command::{
    self, ClientCommand, Command, PlanetCommand, TicketCommand, TicketFilter, HELP,
};
use crate::core::{ClientService, NewTicket, PlanetService, TicketService};
use crate::domain::model::Ticket;
use crate::domain::ports::{ClientRepository, PlanetRepository, TicketRepository};
use crate::utils::error::{Result, SpaceTravelError};
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Routes parsed commands to the entity services. It never touches the
/// store directly.
pub struct Dispatcher<S>
where
    S: ClientRepository + PlanetRepository + TicketRepository + Clone,
{
    clients: ClientService<S, S>,
    planets: PlanetService<S, S>,
    tickets: TicketService<S, S>,
}

impl<S> Dispatcher<S>
where
    S: ClientRepository + PlanetRepository + TicketRepository + Clone,
{
    pub fn new(store: S) -> Self {
        Self {
            clients: ClientService::new(store.clone(), store.clone()),
            planets: PlanetService::new(store.clone(), store.clone()),
            tickets: TicketService::new(store.clone(), store),
        }
    }

    pub fn clients(&self) -> &ClientService<S, S> {
        &self.clients
    }

    pub fn planets(&self) -> &PlanetService<S, S> {
        &self.planets
    }

    pub fn tickets(&self) -> &TicketService<S, S> {
        &self.tickets
    }

    pub async fn execute_line<W: Write>(&self, line: &str, out: &mut W) -> Result<Flow> {
        match command::parse(line)? {
            Some(command) => self.execute(command, out).await,
            None => Ok(Flow::Continue),
        }
    }

    pub async fn execute<W: Write>(&self, command: Command, out: &mut W) -> Result<Flow> {
        match command {
            Command::Help => writeln!(out, "{}", HELP)?,
            Command::Exit => return Ok(Flow::Exit),
            Command::Client(cmd) => self.client(cmd, out).await?,
            Command::Planet(cmd) => self.planet(cmd, out).await?,
            Command::Ticket(cmd) => self.ticket(cmd, out).await?,
        }
        Ok(Flow::Continue)
    }

    async fn client<W: Write>(&self, cmd: ClientCommand, out: &mut W) -> Result<()> {
        match cmd {
            ClientCommand::Create { name } => {
                let client = self.clients.create(&name).await?;
                writeln!(out, "Created client with ID: {}", client.id)?;
            }
            ClientCommand::List => {
                let clients = self.clients.find_all().await?;
                if clients.is_empty() {
                    writeln!(out, "No clients found.")?;
                }
                for client in clients {
                    writeln!(out, "{}: {}", client.id, client.name)?;
                }
            }
            ClientCommand::Get { id } => {
                let client = self.clients.find_by_id(id).await?;
                writeln!(out, "Client with id {}: {}", client.id, client.name)?;
            }
            ClientCommand::Update { id, name } => {
                let current = self.clients.find_by_id(id).await?;
                if current.name == name {
                    return Err(SpaceTravelError::invalid_input(format!(
                        "Entered name '{}' is the same as the current client name. Please enter a different name.",
                        name
                    )));
                }
                let updated = self.clients.update(id, &name).await?;
                writeln!(out, "Updated client with ID: {}", updated.id)?;
            }
            ClientCommand::Delete { id } => {
                self.clients.delete(id).await?;
                writeln!(out, "Deleted client with ID: {}", id)?;
            }
        }
        Ok(())
    }

    async fn planet<W: Write>(&self, cmd: PlanetCommand, out: &mut W) -> Result<()> {
        match cmd {
            PlanetCommand::Create { id, name } => {
                if self.planets.find_optional_by_name(&name).await?.is_some() {
                    return Err(SpaceTravelError::invalid_input(format!(
                        "A planet with the name '{}' already exists. Please choose a different name.",
                        name
                    )));
                }
                let planet = self.planets.create(&id, &name).await?;
                writeln!(out, "Created planet with ID: {}", planet.id)?;
            }
            PlanetCommand::List => {
                let planets = self.planets.find_all().await?;
                if planets.is_empty() {
                    writeln!(out, "No planets found.")?;
                }
                for planet in planets {
                    writeln!(out, "{}: {}", planet.id, planet.name)?;
                }
            }
            PlanetCommand::Get { token } => {
                let planet = self.planets.resolve(&token).await?;
                writeln!(out, "Planet with id {}: {}", planet.id, planet.name)?;
            }
            PlanetCommand::Update { id, name } => {
                let current = self.planets.find_by_id(&id).await?;
                if current.name == name {
                    return Err(SpaceTravelError::invalid_input(format!(
                        "Entered name '{}' is the same as the current planet name. Please enter a different name.",
                        name
                    )));
                }
                if self.planets.find_optional_by_name(&name).await?.is_some() {
                    return Err(SpaceTravelError::invalid_input(format!(
                        "The planet with the name '{}' already exists. Please choose a different name.",
                        name
                    )));
                }
                let updated = self.planets.update(&id, &name).await?;
                writeln!(out, "Updated planet with ID: {}", updated.id)?;
            }
            PlanetCommand::Delete { id } => {
                self.planets.delete(&id).await?;
                writeln!(out, "Deleted planet with ID: {}", id)?;
            }
        }
        Ok(())
    }

    async fn ticket<W: Write>(&self, cmd: TicketCommand, out: &mut W) -> Result<()> {
        match cmd {
            TicketCommand::Create {
                client_id,
                from_planet_id,
                to_planet_id,
            } => {
                if from_planet_id == to_planet_id {
                    return Err(SpaceTravelError::invalid_input(
                        "You entered the same from and to planet ID. Please enter different planet IDs.",
                    ));
                }
                let client = self.clients.find_by_id(client_id).await?;
                let from = self.planets.find_by_id(&from_planet_id).await?;
                let to = self.planets.find_by_id(&to_planet_id).await?;

                let ticket = self.tickets.create(NewTicket::new(client, from, to)).await?;
                writeln!(out, "Created: {}", ticket)?;
            }
            TicketCommand::List(filter) => self.list_tickets(filter, out).await?,
            TicketCommand::Get { id } => {
                let ticket = self.tickets.find_by_id(id).await?;
                writeln!(out, "{}", ticket)?;
            }
            TicketCommand::UpdateFrom { id, planet_id } => {
                let current = self.tickets.find_by_id(id).await?;
                if current.from_planet.id == planet_id {
                    return Err(SpaceTravelError::invalid_input(
                        "You entered the same from planet ID. Please enter different planet IDs.",
                    ));
                }
                let updated = self.tickets.update_from_planet(id, &planet_id).await?;
                writeln!(out, "Updated ticket {} from planet to {}", updated.id, planet_id)?;
            }
            TicketCommand::UpdateTo { id, planet_id } => {
                let current = self.tickets.find_by_id(id).await?;
                if current.to_planet.id == planet_id {
                    return Err(SpaceTravelError::invalid_input(
                        "You entered the same to planet ID. Please enter different planet IDs.",
                    ));
                }
                let updated = self.tickets.update_to_planet(id, &planet_id).await?;
                writeln!(out, "Updated ticket {} to planet to {}", updated.id, planet_id)?;
            }
            TicketCommand::Delete { id } => {
                self.tickets.delete(id).await?;
                writeln!(out, "Deleted ticket {}", id)?;
            }
            TicketCommand::DeleteByClient { client_id } => {
                let removed = self.tickets.delete_all_by_client_id(client_id).await?;
                writeln!(out, "Deleted {} tickets for client {}", removed, client_id)?;
            }
            TicketCommand::DeleteFrom { planet_id } => {
                let removed = self.tickets.delete_all_by_from_planet_id(&planet_id).await?;
                writeln!(out, "Deleted {} tickets from planet {}", removed, planet_id)?;
            }
            TicketCommand::DeleteTo { planet_id } => {
                let removed = self.tickets.delete_all_by_to_planet_id(&planet_id).await?;
                writeln!(out, "Deleted {} tickets to planet {}", removed, planet_id)?;
            }
        }
        Ok(())
    }

    async fn list_tickets<W: Write>(&self, filter: TicketFilter, out: &mut W) -> Result<()> {
        match filter {
            TicketFilter::All => {
                let tickets = self.tickets.find_all().await?;
                write_tickets(out, &tickets, "No tickets found.")?;
            }
            TicketFilter::Client(client_id) => {
                let tickets = self.tickets.find_all_by_client(client_id).await?;
                let empty = format!("No tickets found for client {}", client_id);
                write_tickets(out, &tickets, &empty)?;
            }
            TicketFilter::Date(date) => {
                let tickets = self.tickets.find_all_by_date(date).await?;
                let empty = format!("No tickets found on date {}", date);
                write_tickets(out, &tickets, &empty)?;
            }
            TicketFilter::Planet(planet_id) => {
                let departing = self.tickets.find_all_by_from_planet(&planet_id).await?;
                let arriving = self.tickets.find_all_by_to_planet(&planet_id).await?;

                if departing.is_empty() && arriving.is_empty() {
                    return Err(SpaceTravelError::not_found(format!(
                        "No tickets found for planet {}",
                        planet_id
                    )));
                }
                if !departing.is_empty() {
                    writeln!(out, "Tickets from planet: {}", planet_id)?;
                    write_tickets(out, &departing, "")?;
                }
                if !arriving.is_empty() {
                    writeln!(out, "Tickets to planet: {}", planet_id)?;
                    write_tickets(out, &arriving, "")?;
                }
            }
        }
        Ok(())
    }
}

fn write_tickets<W: Write>(out: &mut W, tickets: &[Ticket], empty_message: &str) -> Result<()> {
    if tickets.is_empty() {
        writeln!(out, "{}", empty_message)?;
    }
    for ticket in tickets {
        writeln!(out, "{}", ticket)?;
    }
    Ok(())
}
