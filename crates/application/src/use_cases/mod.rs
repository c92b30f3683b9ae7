pub mod clients;
pub mod discovery;

pub use clients::{
    AddClientUseCase, DeleteClientUseCase, FindClientUseCase, FindOutcome, GetClientsUseCase,
    UpdateClientUseCase,
};
pub use discovery::{
    EnrichWhoisUseCase, SweepRuntimeClientsUseCase, SyncArpCacheUseCase,
    SyncDhcpLeasesUseCase, SyncHostnamesUseCase,
};
