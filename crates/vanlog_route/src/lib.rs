pub mod bezier_spline;
pub mod features;
pub mod geo_utils;
pub mod segment;
pub mod single_path;
pub mod summary;
pub mod toll;
pub mod units;
pub mod waypoint;
