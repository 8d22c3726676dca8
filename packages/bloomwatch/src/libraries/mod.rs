pub mod leaflet;
pub mod phenology;
