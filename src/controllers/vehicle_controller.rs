use validator::Validate;

use crate::dto::vehicle_dto::{VehicleFilters, VehicleRequest};
use crate::models::Vehicle;
use crate::repositories::VehicleRepository;
use crate::utils::errors::{not_found_error, AppError, AppResult};

pub struct VehicleController {
    repository: VehicleRepository,
}

impl VehicleController {
    pub fn new(repository: VehicleRepository) -> Self {
        Self { repository }
    }

    pub async fn create(&self, request: VehicleRequest) -> AppResult<Vehicle> {
        request.validate()?;
        let record = serde_json::to_value(&request)
            .map_err(|e| AppError::Internal(format!("Error encoding vehicle: {}", e)))?;
        Ok(self.repository.create(record).await?)
    }

    pub async fn get_by_id(&self, id: &str) -> AppResult<Vehicle> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Vehicle", id))
    }

    /// Listado con filtros exactos (distingue mayúsculas, como json-server)
    pub async fn list(&self, filters: VehicleFilters) -> AppResult<Vec<Vehicle>> {
        let vehicles = self.repository.find_all().await?;

        Ok(vehicles
            .into_iter()
            .filter(|v| {
                filters
                    .vehicle_type
                    .as_deref()
                    .map_or(true, |t| v.vehicle_type.as_deref() == Some(t))
            })
            .filter(|v| {
                filters
                    .location
                    .as_deref()
                    .map_or(true, |l| v.location.as_deref() == Some(l))
            })
            .collect())
    }

    pub async fn update(&self, id: &str, request: VehicleRequest) -> AppResult<Vehicle> {
        request.validate()?;
        let record = serde_json::to_value(&request)
            .map_err(|e| AppError::Internal(format!("Error encoding vehicle: {}", e)))?;

        self.repository
            .replace(id, record)
            .await?
            .ok_or_else(|| not_found_error("Vehicle", id))
    }

    pub async fn delete(&self, id: &str) -> AppResult<()> {
        if self.repository.delete(id).await? {
            Ok(())
        } else {
            Err(not_found_error("Vehicle", id))
        }
    }
}
