pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliCommand, CliConfig};

pub use adapters::SqliteStore;
pub use cli::{Dispatcher, Flow};
pub use config::AppConfig;
pub use self::core::{ClientService, PlanetService, TicketService};
pub use domain::model::{Client, NewTicket, Planet, Ticket};
pub use utils::error::{Result, SpaceTravelError};
