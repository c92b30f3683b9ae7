pub mod client;

pub use client::{
    ClientJson, ClientListJson, FoundClientJson, RuntimeClientJson, RuntimeMatchJson,
    UpdateClientRequest,
};
