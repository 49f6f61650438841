use chrono::NaiveDate;
use proptest::prelude::*;
use serde_json::{json, Value};

use rental_availability::controllers::availability_controller::{
    to_list_response, to_summary_response,
};
use rental_availability::models::{Booking, Vehicle};
use rental_availability::services::availability_service::resolve;
use rental_availability::services::AvailabilityQuery;

const TYPES: [&str; 5] = ["van", "Van", "VAN", "car", "suv"];
const LOCATIONS: [&str; 3] = ["Colombo", "kandy", "Galle"];
const DAYS: [&str; 3] = ["2024-05-01", "2024-05-02", "2024-05-03"];

fn vehicle_strategy() -> impl Strategy<Value = (usize, usize)> {
    (0..TYPES.len(), 0..LOCATIONS.len())
}

fn booking_strategy() -> impl Strategy<Value = (i64, usize)> {
    (1i64..12, 0..DAYS.len())
}

fn catalog(specs: &[(usize, usize)]) -> Vec<Vehicle> {
    let records: Vec<Value> = specs
        .iter()
        .enumerate()
        .map(|(i, (t, l))| json!({ "id": i + 1, "type": TYPES[*t], "location": LOCATIONS[*l] }))
        .collect();
    serde_json::from_value(Value::Array(records)).unwrap()
}

fn bookings(specs: &[(i64, usize)]) -> Vec<Booking> {
    let records: Vec<Value> = specs
        .iter()
        .enumerate()
        .map(|(i, (vehicle, d))| json!({ "id": i + 100, "vehicleId": vehicle, "date": DAYS[*d] }))
        .collect();
    serde_json::from_value(Value::Array(records)).unwrap()
}

fn day(d: usize) -> NaiveDate {
    NaiveDate::parse_from_str(DAYS[d], "%Y-%m-%d").unwrap()
}

fn query(d: usize, vehicle_type: Option<&str>, location: Option<&str>) -> AvailabilityQuery {
    let mut query = AvailabilityQuery::for_day(day(d));
    if let Some(t) = vehicle_type {
        query = query.with_type(t);
    }
    if let Some(l) = location {
        query = query.with_location(l);
    }
    query
}

proptest! {
    #[test]
    fn counts_add_up(
        vehicles in prop::collection::vec(vehicle_strategy(), 0..10),
        booked in prop::collection::vec(booking_strategy(), 0..15),
        d in 0..DAYS.len(),
        t in prop::option::of(0..TYPES.len()),
        l in prop::option::of(0..LOCATIONS.len()),
    ) {
        let q = query(d, t.map(|i| TYPES[i]), l.map(|i| LOCATIONS[i]));
        let expected_total = catalog(&vehicles).iter().filter(|v| q.matches(v)).count();

        let summary = to_summary_response(resolve(catalog(&vehicles), &bookings(&booked), q));

        prop_assert_eq!(summary.total, expected_total);
        prop_assert_eq!(summary.available + summary.booked, summary.total);
        prop_assert_eq!(summary.available, summary.available_vehicles.len());
    }

    #[test]
    fn shapes_agree_and_repeat(
        vehicles in prop::collection::vec(vehicle_strategy(), 0..10),
        booked in prop::collection::vec(booking_strategy(), 0..15),
        d in 0..DAYS.len(),
        t in prop::option::of(0..TYPES.len()),
    ) {
        let q = query(d, t.map(|i| TYPES[i]), None);

        let first = resolve(catalog(&vehicles), &bookings(&booked), q.clone());
        let second = resolve(catalog(&vehicles), &bookings(&booked), q);
        prop_assert_eq!(&first, &second);

        let list = to_list_response(first.clone());
        let summary = to_summary_response(first);
        prop_assert_eq!(serde_json::to_value(&list.vehicles).unwrap(), serde_json::to_value(&summary.available_vehicles).unwrap());
        prop_assert_eq!(list.count, summary.available);
        prop_assert_eq!(list.total_matching_type_location, summary.total);
    }

    #[test]
    fn omitting_type_is_union_of_types(
        vehicles in prop::collection::vec(vehicle_strategy(), 0..10),
        booked in prop::collection::vec(booking_strategy(), 0..15),
        d in 0..DAYS.len(),
    ) {
        let everything = resolve(catalog(&vehicles), &bookings(&booked), query(d, None, None));

        let per_type: usize = ["van", "car", "suv"]
            .iter()
            .map(|t| resolve(catalog(&vehicles), &bookings(&booked), query(d, Some(*t), None)).available_count())
            .sum();

        prop_assert_eq!(everything.available_count(), per_type);
    }

    #[test]
    fn type_filter_ignores_case(
        vehicles in prop::collection::vec(vehicle_strategy(), 0..10),
        booked in prop::collection::vec(booking_strategy(), 0..15),
        d in 0..DAYS.len(),
    ) {
        let lower = resolve(catalog(&vehicles), &bookings(&booked), query(d, Some("van"), None));
        let upper = resolve(catalog(&vehicles), &bookings(&booked), query(d, Some("VAN"), None));

        prop_assert_eq!(lower.available, upper.available);
        prop_assert_eq!(lower.total_matching, upper.total_matching);
    }
}
