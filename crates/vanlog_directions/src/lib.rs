pub mod error;
pub mod features;
pub mod mapbox;
pub mod overlay;
pub mod provider;
