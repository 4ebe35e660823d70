pub mod budget;
pub mod calendar;
pub mod edit;
pub mod error;
pub mod itinerary;
pub mod night_type;
pub mod reconcile;
pub mod slug;
pub mod stop;
pub mod summary;
