pub mod add_client;
pub mod delete_client;
pub mod find_client;
pub mod get_clients;
pub mod update_client;

pub use add_client::AddClientUseCase;
pub use delete_client::DeleteClientUseCase;
pub use find_client::{FindClientUseCase, FindOutcome};
pub use get_clients::GetClientsUseCase;
pub use update_client::UpdateClientUseCase;
