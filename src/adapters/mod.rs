// Adapters layer: concrete implementations for external systems (page query service, storage, export).

pub mod agentql;
pub mod export;
pub mod storage;
