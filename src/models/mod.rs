//! Modelos del sistema
//!
//! Registros tipados decodificados desde las colecciones JSON del store.

pub mod booking;
pub mod record_id;
pub mod user;
pub mod vehicle;

pub use booking::{Booking, BOOKINGS};
pub use record_id::RecordId;
pub use user::{PublicUser, User, USERS};
pub use vehicle::{Vehicle, VEHICLES};
