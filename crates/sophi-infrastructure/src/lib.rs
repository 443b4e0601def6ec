pub mod config_service;
pub mod export;
pub mod in_memory_data_repository;
pub mod json_data_repository;
pub mod paths;
pub mod storage;

pub use config_service::ConfigService;
pub use in_memory_data_repository::InMemoryDataRepository;
pub use json_data_repository::JsonDataRepository;
pub use paths::SophiPaths;
