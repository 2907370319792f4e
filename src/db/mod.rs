//! Persistence module split across logical submodules.

mod attendees;
mod connection;

pub use attendees::{
    delete_attendee, fetch_all_attendees, fetch_attendee, insert_attendee, search_attendees,
};
pub use connection::Store;
