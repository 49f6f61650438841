//! Repositorios
//!
//! El trait `CollectionStore`, sus backends y los repositorios tipados que
//! usan los servicios.

pub mod booking_repository;
pub mod collection_store;
pub mod http_store;
pub mod memory_store;
pub mod postgres_store;
pub mod user_repository;
pub mod vehicle_repository;

pub use booking_repository::BookingRepository;
pub use collection_store::{CollectionStore, StoreError, StoreResult};
pub use http_store::HttpStore;
pub use memory_store::MemoryStore;
pub use postgres_store::PostgresStore;
pub use user_repository::UserRepository;
pub use vehicle_repository::VehicleRepository;
