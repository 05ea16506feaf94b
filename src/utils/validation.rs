use crate::domain::model::{Client, NewTicket, Planet};
use crate::utils::error::{Result, SpaceTravelError};

pub const CLIENT_NAME_MIN: usize = 3;
pub const CLIENT_NAME_MAX: usize = 200;
pub const PLANET_NAME_MAX: usize = 500;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Checks a client name and returns it trimmed.
pub fn validate_client_name(name: &str) -> Result<&str> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(SpaceTravelError::invalid_input("Client name cannot be empty"));
    }
    let length = trimmed.chars().count();
    if length < CLIENT_NAME_MIN {
        return Err(SpaceTravelError::invalid_input(format!(
            "Client name must be at least {} characters long",
            CLIENT_NAME_MIN
        )));
    }
    if length > CLIENT_NAME_MAX {
        return Err(SpaceTravelError::invalid_input(format!(
            "Client name must be not longer than {} characters",
            CLIENT_NAME_MAX
        )));
    }
    Ok(trimmed)
}

/// Checks a planet name and returns it trimmed.
pub fn validate_planet_name(name: &str) -> Result<&str> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(SpaceTravelError::invalid_input("Planet name must not be empty"));
    }
    if trimmed.chars().count() > PLANET_NAME_MAX {
        return Err(SpaceTravelError::invalid_input(format!(
            "Planet name must be not longer than {} characters",
            PLANET_NAME_MAX
        )));
    }
    Ok(trimmed)
}

/// Client and ticket ids are system-assigned and strictly positive.
pub fn validate_record_id(field_name: &str, id: Option<i64>) -> Result<i64> {
    match id {
        Some(id) if id > 0 => Ok(id),
        _ => Err(SpaceTravelError::invalid_input(format!(
            "{} must be a positive number",
            field_name
        ))),
    }
}

pub fn validate_planet_id(id: &str) -> Result<&str> {
    validate_non_empty_string("Planet ID", id)?;
    Ok(id)
}

/// Structural check of a ticket: all references present, legs distinct.
/// Hands back the checked client and legs.
pub fn validate_ticket_legs(ticket: &NewTicket) -> Result<(&Client, &Planet, &Planet)> {
    let (Some(client), Some(from), Some(to)) =
        (&ticket.client, &ticket.from_planet, &ticket.to_planet)
    else {
        return Err(SpaceTravelError::invalid_input(
            "Client, fromPlanet and toPlanet must not be null",
        ));
    };
    if from.id == to.id {
        return Err(SpaceTravelError::invalid_input(format!(
            "fromPlanet and toPlanet must differ, both are '{}'",
            from.id
        )));
    }
    Ok((client, from, to))
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(SpaceTravelError::invalid_input(format!(
            "{} must not be empty",
            field_name
        )));
    }
    Ok(())
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(SpaceTravelError::Config {
            message: format!("{}: path cannot be empty", field_name),
        });
    }

    if path.contains('\0') {
        return Err(SpaceTravelError::Config {
            message: format!("{}: path contains null bytes", field_name),
        });
    }

    Ok(())
}

pub fn validate_one_of(field_name: &str, value: &str, allowed: &[&str]) -> Result<()> {
    if allowed.iter().any(|candidate| candidate.eq_ignore_ascii_case(value)) {
        return Ok(());
    }
    Err(SpaceTravelError::Config {
        message: format!(
            "{}: unsupported value '{}'. Allowed values: {}",
            field_name,
            value,
            allowed.join(", ")
        ),
    })
}
