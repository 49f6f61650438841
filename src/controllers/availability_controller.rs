//! Controlador de disponibilidad
//!
//! Los dos endpoints comparten una única resolución; aquí sólo se adapta el
//! resultado a la forma lista o a la forma resumen.

use crate::dto::availability_dto::{
    AppliedFilters, AvailabilityListResponse, AvailabilityParams, AvailabilitySummaryResponse,
};
use crate::services::{Availability, AvailabilityQuery, AvailabilityService};
use crate::utils::errors::AppResult;
use crate::utils::validation::format_day;

pub struct AvailabilityController {
    service: AvailabilityService,
}

impl AvailabilityController {
    pub fn new(service: AvailabilityService) -> Self {
        Self { service }
    }

    pub async fn list(&self, params: AvailabilityParams) -> AppResult<AvailabilityListResponse> {
        self.resolve(params).await.map(to_list_response)
    }

    pub async fn summary(&self, params: AvailabilityParams) -> AppResult<AvailabilitySummaryResponse> {
        self.resolve(params).await.map(to_summary_response)
    }

    async fn resolve(&self, params: AvailabilityParams) -> AppResult<Availability> {
        let query = AvailabilityQuery::from_params(
            params.date.as_deref(),
            params.vehicle_type.as_deref(),
            params.location.as_deref(),
        )?;
        self.service.resolve_availability(query).await
    }
}

/// Filtros tal como los envió el cliente; los parámetros ausentes se omiten
fn applied_filters(query: &AvailabilityQuery) -> AppliedFilters {
    AppliedFilters {
        vehicle_type: query.requested_type.clone(),
        location: query.requested_location.clone(),
    }
}

pub fn to_list_response(availability: Availability) -> AvailabilityListResponse {
    AvailabilityListResponse {
        success: true,
        count: availability.available_count(),
        date: format_day(availability.query.date),
        filters: applied_filters(&availability.query),
        booked_vehicle_ids: availability.booked_vehicle_ids,
        total_matching_type_location: availability.total_matching,
        vehicles: availability.available,
    }
}

pub fn to_summary_response(availability: Availability) -> AvailabilitySummaryResponse {
    AvailabilitySummaryResponse {
        success: true,
        date: format_day(availability.query.date),
        filters: applied_filters(&availability.query),
        total: availability.total_matching,
        available: availability.available_count(),
        booked: availability.booked_count(),
        available_vehicles: availability.available,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::availability_service::resolve;
    use chrono::NaiveDate;
    use serde_json::json;

    #[test]
    fn test_both_shapes_agree() {
        let vehicles = serde_json::from_value(json!([
            { "id": 1, "type": "van", "location": "Colombo" },
            { "id": 2, "type": "Van", "location": "Kandy" },
            { "id": 3, "type": "car", "location": "Colombo" }
        ]))
        .unwrap();
        let bookings: Vec<crate::models::Booking> = serde_json::from_value(json!([
            { "id": 10, "vehicleId": 2, "date": "2024-05-01" }
        ]))
        .unwrap();
        let query = AvailabilityQuery::for_day(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()).with_type("van");

        let availability = resolve(vehicles, &bookings, query);
        let list = to_list_response(availability.clone());
        let summary = to_summary_response(availability);

        assert_eq!(list.vehicles, summary.available_vehicles);
        assert_eq!(list.count, summary.available);
        assert_eq!(list.total_matching_type_location, summary.total);
        assert_eq!(summary.booked, summary.total - summary.available);
        assert_eq!(list.filters, summary.filters);
        assert_eq!(
            serde_json::to_value(&list.filters).unwrap(),
            json!({ "type": "van" })
        );
    }

    #[test]
    fn test_filters_echo_what_was_sent() {
        let query =
            AvailabilityQuery::from_params(Some("2024-05-01"), Some(" Van "), Some("")).unwrap();
        let summary = to_summary_response(resolve(Vec::new(), &[], query));

        assert_eq!(
            serde_json::to_value(&summary.filters).unwrap(),
            json!({ "type": " Van ", "location": "" })
        );
    }
}
