mod config_repository;
mod region_repository;

pub use {config_repository::ConfigRepository, region_repository::RegionRepository};
