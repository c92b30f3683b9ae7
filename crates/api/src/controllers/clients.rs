use kestrel_dns_application::ports::AccessPolicy;
use kestrel_dns_application::use_cases::{
    AddClientUseCase, DeleteClientUseCase, FindClientUseCase, FindOutcome, GetClientsUseCase,
    UpdateClientUseCase,
};
use kestrel_dns_application::ClientRegistry;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::dto::{
    ClientJson, ClientListJson, FoundClientJson, RuntimeClientJson, RuntimeMatchJson,
    UpdateClientRequest,
};
use crate::ApiError;

/// Client CRUD for the control layer.
pub struct ClientsController {
    get_clients: GetClientsUseCase,
    add_client: AddClientUseCase,
    update_client: UpdateClientUseCase,
    delete_client: DeleteClientUseCase,
    find_client: FindClientUseCase,
}

impl ClientsController {
    pub fn new(registry: Arc<ClientRegistry>, access: Arc<dyn AccessPolicy>) -> Self {
        Self {
            get_clients: GetClientsUseCase::new(registry.clone()),
            add_client: AddClientUseCase::new(registry.clone()),
            update_client: UpdateClientUseCase::new(registry.clone()),
            delete_client: DeleteClientUseCase::new(registry.clone()),
            find_client: FindClientUseCase::new(registry, access),
        }
    }

    pub fn list(&self) -> ClientListJson {
        let snapshot = self.get_clients.execute();

        let clients = snapshot
            .clients
            .iter()
            .map(|client| ClientJson::from_client(client))
            .collect();
        let auto_clients = snapshot
            .runtime
            .iter()
            .map(RuntimeClientJson::from_runtime)
            .collect();

        debug!("Clients listed");
        ClientListJson::new(clients, auto_clients)
    }

    pub fn add(&self, data: ClientJson) -> Result<ClientJson, ApiError> {
        let client = data.into_client(None).map_err(|e| {
            warn!(error = %e, "Rejected client document");
            ApiError::from(e)
        })?;

        let added = self.add_client.execute(client).map_err(|e| {
            warn!(error = %e, "Failed to add client");
            ApiError::from(e)
        })?;

        Ok(ClientJson::from_client(&added))
    }

    pub fn delete(&self, name: &str) -> Result<(), ApiError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ApiError::BadRequest("client name is required".to_string()));
        }

        self.delete_client.execute(name).map_err(ApiError::from)
    }

    pub fn update(&self, req: UpdateClientRequest) -> Result<ClientJson, ApiError> {
        let name = req.name.trim();
        if name.is_empty() {
            return Err(ApiError::BadRequest("client name is required".to_string()));
        }

        let prev = self.update_client.current(name)?;
        let client = req.data.into_client(Some(prev.as_ref()))?;

        let updated = self.update_client.execute(name, client).map_err(|e| {
            warn!(name, error = %e, "Failed to update client");
            ApiError::from(e)
        })?;

        Ok(ClientJson::from_client(&updated))
    }

    /// Resolves every token, reporting persistent matches, runtime matches
    /// and unknown clients together with their access decision.
    pub fn find(&self, tokens: &[String]) -> BTreeMap<String, FoundClientJson> {
        tokens
            .iter()
            .map(|token| {
                let outcome = self.find_client.execute(token);
                let access = outcome.access().clone();

                let (client, runtime) = match outcome {
                    FindOutcome::Persistent { client, .. } => {
                        (Some(ClientJson::from_client(&client)), None)
                    }
                    FindOutcome::Runtime { client, .. } => {
                        (None, Some(RuntimeMatchJson::from_runtime(token, &client)))
                    }
                    FindOutcome::Unknown { .. } => (None, Some(RuntimeMatchJson::unknown(token))),
                };

                let found = FoundClientJson {
                    client,
                    runtime,
                    disallowed: access.disallowed,
                    disallowed_rule: access.rule.unwrap_or_default(),
                };
                (token.clone(), found)
            })
            .collect()
    }
}
