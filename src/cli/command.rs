use crate::utils::error::{Result, SpaceTravelError};
use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Exit,
    Client(ClientCommand),
    Planet(PlanetCommand),
    Ticket(TicketCommand),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientCommand {
    Create { name: String },
    List,
    Get { id: i64 },
    Update { id: i64, name: String },
    Delete { id: i64 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanetCommand {
    Create { id: String, name: String },
    List,
    Get { token: String },
    Update { id: String, name: String },
    Delete { id: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TicketCommand {
    Create {
        client_id: i64,
        from_planet_id: String,
        to_planet_id: String,
    },
    List(TicketFilter),
    Get { id: i64 },
    UpdateFrom { id: i64, planet_id: String },
    UpdateTo { id: i64, planet_id: String },
    Delete { id: i64 },
    DeleteByClient { client_id: i64 },
    DeleteFrom { planet_id: String },
    DeleteTo { planet_id: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TicketFilter {
    All,
    Client(i64),
    Date(NaiveDate),
    Planet(String),
}

impl TicketFilter {
    /// An integer selects a client, `YYYY-MM-DD` a date, anything else a planet.
    pub fn from_arg(arg: &str) -> Self {
        if let Ok(client_id) = arg.parse::<i64>() {
            return TicketFilter::Client(client_id);
        }
        if let Ok(date) = NaiveDate::parse_from_str(arg, "%Y-%m-%d") {
            return TicketFilter::Date(date);
        }
        TicketFilter::Planet(arg.to_string())
    }
}

pub const HELP: &str = "\
Commands:
 help                                                       - Show this help
 exit                                                       - Exit program

 client create <name>                                       - Create new client
 client list                                                - List all clients
 client get <id>                                            - Get client by ID
 client update <id> <new_name>                              - Update client by ID
 client delete <id>                                         - Delete client and its tickets

 planet create <id> <name>                                  - Create new planet
 planet list                                                - List all planets
 planet get <id|name>                                       - Get planet by ID, then by name
 planet update <id> <new_name>                              - Update planet by ID
 planet delete <id>                                         - Delete planet and its tickets

 ticket create <client_id> <from_planet_id> <to_planet_id>  - Create new ticket
 ticket list                                                - List all tickets
 ticket list <client_id>                                    - List tickets of a client
 ticket list <planet_id>                                    - List tickets from and to a planet
 ticket list <created_at> (YYYY-MM-DD)                      - List tickets created on a date (UTC)
 ticket get <ticket_id>                                     - Get ticket by ID
 ticket update-from <ticket_id> <new_from_planet_id>        - Change departure planet
 ticket update-to <ticket_id> <new_to_planet_id>            - Change arrival planet
 ticket delete <ticket_id>                                  - Delete ticket by ID
 ticket delete-client <client_id>                           - Delete all tickets of a client
 ticket delete-from <from_planet_id>                        - Delete all tickets from a planet
 ticket delete-to <to_planet_id>                            - Delete all tickets to a planet";

/// Parses one shell line. Blank lines yield `None`.
pub fn parse(line: &str) -> Result<Option<Command>> {
    let args: Vec<&str> = line.split_whitespace().collect();
    let Some(first) = args.first() else {
        return Ok(None);
    };

    let entity = first.to_lowercase();
    let action = args.get(1).map(|a| a.to_lowercase()).unwrap_or_default();

    let command = match entity.as_str() {
        "help" => Command::Help,
        "exit" => Command::Exit,
        "client" => Command::Client(parse_client(&action, &args)?),
        "planet" => Command::Planet(parse_planet(&action, &args)?),
        "ticket" => Command::Ticket(parse_ticket(&action, &args)?),
        _ => {
            return Err(SpaceTravelError::invalid_input(
                "Unknown command. Type 'help' for list.",
            ))
        }
    };
    Ok(Some(command))
}

fn parse_client(action: &str, args: &[&str]) -> Result<ClientCommand> {
    match action {
        "create" => {
            require(args.len() >= 3, "client create <name>")?;
            Ok(ClientCommand::Create {
                name: join_rest(args, 2),
            })
        }
        "list" => Ok(ClientCommand::List),
        "get" => {
            require(args.len() == 3, "client get <id>")?;
            Ok(ClientCommand::Get {
                id: parse_id("client", args[2])?,
            })
        }
        "update" => {
            require(args.len() >= 4, "client update <id> <new_name>")?;
            Ok(ClientCommand::Update {
                id: parse_id("client", args[2])?,
                name: join_rest(args, 3),
            })
        }
        "delete" => {
            require(args.len() == 3, "client delete <id>")?;
            Ok(ClientCommand::Delete {
                id: parse_id("client", args[2])?,
            })
        }
        _ => Err(SpaceTravelError::invalid_input(
            "Unknown client action. Type 'help' for list.",
        )),
    }
}

fn parse_planet(action: &str, args: &[&str]) -> Result<PlanetCommand> {
    match action {
        "create" => {
            require(args.len() >= 4, "planet create <id> <name>")?;
            Ok(PlanetCommand::Create {
                id: args[2].to_string(),
                name: join_rest(args, 3),
            })
        }
        "list" => Ok(PlanetCommand::List),
        "get" => {
            require(args.len() == 3, "planet get <input> (id or name)")?;
            Ok(PlanetCommand::Get {
                token: args[2].to_string(),
            })
        }
        "update" => {
            require(args.len() >= 4, "planet update <id> <new_name>")?;
            Ok(PlanetCommand::Update {
                id: args[2].to_string(),
                name: join_rest(args, 3),
            })
        }
        "delete" => {
            require(args.len() == 3, "planet delete <id>")?;
            Ok(PlanetCommand::Delete {
                id: args[2].to_string(),
            })
        }
        _ => Err(SpaceTravelError::invalid_input(
            "Unknown planet action. Type 'help' for list.",
        )),
    }
}

fn parse_ticket(action: &str, args: &[&str]) -> Result<TicketCommand> {
    match action {
        "create" => {
            require(
                args.len() == 5,
                "ticket create <client_id> <from_planet_id> <to_planet_id>",
            )?;
            Ok(TicketCommand::Create {
                client_id: parse_id("client", args[2])?,
                from_planet_id: args[3].to_string(),
                to_planet_id: args[4].to_string(),
            })
        }
        "list" => match args.len() {
            2 => Ok(TicketCommand::List(TicketFilter::All)),
            3 => Ok(TicketCommand::List(TicketFilter::from_arg(args[2]))),
            _ => Err(usage("ticket list [<client_id>|<planet_id>|<created_at>]")),
        },
        "get" => {
            require(args.len() == 3, "ticket get <id>")?;
            Ok(TicketCommand::Get {
                id: parse_id("ticket", args[2])?,
            })
        }
        "update-from" => {
            require(args.len() == 4, "ticket update-from <ticket_id> <from_planet_id>")?;
            Ok(TicketCommand::UpdateFrom {
                id: parse_id("ticket", args[2])?,
                planet_id: args[3].to_string(),
            })
        }
        "update-to" => {
            require(args.len() == 4, "ticket update-to <ticket_id> <to_planet_id>")?;
            Ok(TicketCommand::UpdateTo {
                id: parse_id("ticket", args[2])?,
                planet_id: args[3].to_string(),
            })
        }
        "delete" => {
            require(args.len() == 3, "ticket delete <ticket_id>")?;
            Ok(TicketCommand::Delete {
                id: parse_id("ticket", args[2])?,
            })
        }
        "delete-client" => {
            require(args.len() == 3, "ticket delete-client <client_id>")?;
            Ok(TicketCommand::DeleteByClient {
                client_id: parse_id("client", args[2])?,
            })
        }
        "delete-from" => {
            require(args.len() == 3, "ticket delete-from <planet_id>")?;
            Ok(TicketCommand::DeleteFrom {
                planet_id: args[2].to_string(),
            })
        }
        "delete-to" => {
            require(args.len() == 3, "ticket delete-to <planet_id>")?;
            Ok(TicketCommand::DeleteTo {
                planet_id: args[2].to_string(),
            })
        }
        _ => Err(SpaceTravelError::invalid_input(
            "Unknown ticket action. Type 'help' for list.",
        )),
    }
}

fn require(ok: bool, usage_line: &str) -> Result<()> {
    if ok {
        Ok(())
    } else {
        Err(usage(usage_line))
    }
}

fn usage(usage_line: &str) -> SpaceTravelError {
    SpaceTravelError::invalid_input(format!("Invalid usage. Please use: {}", usage_line))
}

fn join_rest(args: &[&str], from: usize) -> String {
    args[from..].join(" ")
}

fn parse_id(entity: &str, raw: &str) -> Result<i64> {
    raw.parse::<i64>().map_err(|_| {
        SpaceTravelError::invalid_input(format!("Invalid {} ID format: {}", entity, raw))
    })
}
