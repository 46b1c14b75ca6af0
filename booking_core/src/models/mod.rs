pub mod booking;
pub mod contact;
pub mod request;

pub use booking::{Booking, CreateBookingRequest};
pub use contact::{Contact, CreateContactRequest};
pub use request::CreatedResponse;
