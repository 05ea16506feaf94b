pub mod client_service;
pub mod planet_service;
pub mod ticket_service;

pub use client_service::ClientService;
pub use planet_service::PlanetService;
pub use ticket_service::TicketService;

pub use crate::domain::model::{Client, NewTicket, Planet, Ticket};
pub use crate::domain::ports::{ClientRepository, PlanetRepository, TicketRepository};
pub use crate::utils::error::Result;
