use crate::domain::model::Planet;
use crate::domain::ports::{PlanetRepository, TicketRepository};
use crate::utils::error::{Result, SpaceTravelError};
use crate::utils::validation::{validate_planet_id, validate_planet_name};

pub struct PlanetService<P: PlanetRepository, T: TicketRepository> {
    planets: P,
    tickets: T,
}

impl<P: PlanetRepository, T: TicketRepository> PlanetService<P, T> {
    pub fn new(planets: P, tickets: T) -> Self {
        Self { planets, tickets }
    }

    /// Only id uniqueness is enforced here; callers pre-check the name
    /// with [`PlanetService::find_optional_by_name`].
    pub async fn create(&self, id: &str, name: &str) -> Result<Planet> {
        let id = validate_planet_id(id)?;
        let name = validate_planet_name(name)?;

        if self.planets.find_by_id(id).await?.is_some() {
            return Err(SpaceTravelError::DuplicateId { id: id.to_string() });
        }

        tracing::info!("Creating planet: {} - {}", id, name);
        self.planets.save(&Planet::new(id, name)).await
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Planet> {
        let id = validate_planet_id(id)?;
        self.planets
            .find_by_id(id)
            .await?
            .ok_or_else(|| SpaceTravelError::not_found(format!("Planet not found with ID: {}", id)))
    }

    pub async fn find_by_name(&self, name: &str) -> Result<Planet> {
        self.find_optional_by_name(name).await?.ok_or_else(|| {
            SpaceTravelError::not_found(format!("Planet not found with name: {}", name.trim()))
        })
    }

    pub async fn find_optional_by_name(&self, name: &str) -> Result<Option<Planet>> {
        let name = validate_planet_name(name)?;
        self.planets.find_by_name(name).await
    }

    pub async fn find_all(&self) -> Result<Vec<Planet>> {
        self.planets.find_all().await
    }

    /// Looks a token up as an id first, then as a name.
    ///
    /// Only a miss moves on to the next interpretation; storage failures
    /// propagate as they are.
    pub async fn resolve(&self, token: &str) -> Result<Planet> {
        match self.find_by_id(token).await {
            Ok(planet) => return Ok(planet),
            Err(e) if is_miss(&e) => {
                tracing::debug!("No planet with id '{}', trying it as a name", token)
            }
            Err(e) => return Err(e),
        }

        match self.find_by_name(token).await {
            Ok(planet) => Ok(planet),
            Err(e) if is_miss(&e) => Err(SpaceTravelError::not_found(format!(
                "No planet found with ID or name: {}",
                token
            ))),
            Err(e) => Err(e),
        }
    }

    /// Replaces the name. Uniqueness and no-op checks are up to the caller.
    pub async fn update(&self, id: &str, name: &str) -> Result<Planet> {
        let id = validate_planet_id(id)?;
        let name = validate_planet_name(name)?;

        let mut planet = self.planets.find_by_id(id).await?.ok_or_else(|| {
            SpaceTravelError::not_found(format!(
                "Attempted to update nonexistent planet with id: {}",
                id
            ))
        })?;

        planet.name = name.to_string();
        tracing::info!("Updating planet {} to new name '{}'", id, name);
        self.planets.update(&planet).await
    }

    /// Deletes tickets leaving from and arriving at the planet, then the planet.
    pub async fn delete(&self, id: &str) -> Result<()> {
        let id = validate_planet_id(id)?;

        if self.planets.find_by_id(id).await?.is_none() {
            tracing::warn!("Attempted to delete nonexistent planet: {}", id);
            return Err(SpaceTravelError::not_found(format!(
                "Attempted to delete nonexistent planet with id: {}",
                id
            )));
        }

        tracing::info!("Deleting planet with ID: {}", id);
        let departing = self.tickets.delete_all_by_from_planet_id(id).await?;
        let arriving = self.tickets.delete_all_by_to_planet_id(id).await?;
        if departing + arriving > 0 {
            tracing::info!(
                "Removed {} departing and {} arriving tickets of planet {}",
                departing,
                arriving,
                id
            );
        }
        self.planets.delete(id).await
    }
}

// A token that is not a valid name cannot name a planet either.
fn is_miss(err: &SpaceTravelError) -> bool {
    matches!(
        err,
        SpaceTravelError::NotFound { .. } | SpaceTravelError::InvalidInput { .. }
    )
}
