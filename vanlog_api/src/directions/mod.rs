pub mod directions;
pub mod geocode;
pub mod route_geometry;
