pub mod clients;

pub use clients::ClientsController;
