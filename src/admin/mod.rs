//! Admin console view-models. Each one holds the list it last fetched and only
//! touches it after the backend confirmed a change.

pub mod orders;
pub mod products;
pub mod users;
