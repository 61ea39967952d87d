//! Canonical client/address state and its mutation entry points.
//!
//! [`ClientesState`] is a reducer: intents and completed calls mutate it and
//! queue [`Effect`]s. Nothing here performs I/O; the runtime drains the effects
//! with [`ClientesState::take_effects`] and feeds results back through
//! [`ClientesState::apply`].

use crate::commands::{Command, Outcome, SaveKind};
use crate::config::SearchPolicy;
use crate::notifications::{NotificationLevel, NotificationSlot};
use minegocio_core::{
    validate_cliente, validate_nueva_direccion, validate_search, AddressSnapshot, Cliente,
    ClienteId, Direccion, NuevaDireccion, SearchContext, ValidationError,
};
use std::time::Duration;

pub const DEFAULT_NOTIFICATION_TTL: Duration = Duration::from_millis(2_800);

/// Side effect requested by the orchestrator.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Call(Command),
    ExpireNotification { generation: u64, after: Duration },
}

/// Yes/no gate for destructive operations.
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&str) -> bool,
{
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

pub fn delete_prompt(cliente: &Cliente) -> String {
    format!("¿Eliminar cliente {}?", cliente.label())
}

pub fn address_delete_prompt(direccion: &Direccion) -> String {
    format!("¿Eliminar dirección {}?", direccion.summary())
}

#[derive(Debug, Clone)]
pub struct ClientesState {
    pub results: Vec<Cliente>,
    pub editing: Option<Cliente>,
    pub viewing: Option<Cliente>,
    pub addresses: AddressSnapshot,
    pub notification: NotificationSlot,
    pub search_context: Option<SearchContext>,

    policy: SearchPolicy,
    notification_ttl: Duration,
    in_flight: usize,
    search_seq: u64,
    address_seq: u64,
    editing_revision: u64,
    viewing_revision: u64,
    effects: Vec<Effect>,
}

impl Default for ClientesState {
    fn default() -> Self {
        Self::new(SearchPolicy::default(), DEFAULT_NOTIFICATION_TTL)
    }
}

impl ClientesState {
    pub fn new(policy: SearchPolicy, notification_ttl: Duration) -> Self {
        Self {
            results: Vec::new(),
            editing: None,
            viewing: None,
            addresses: AddressSnapshot::default(),
            notification: NotificationSlot::new(),
            search_context: None,
            policy,
            notification_ttl,
            in_flight: 0,
            search_seq: 0,
            address_seq: 0,
            editing_revision: 0,
            viewing_revision: 0,
            effects: Vec::new(),
        }
    }

    /// Advisory only; intents are accepted while loading.
    pub fn is_loading(&self) -> bool {
        self.in_flight > 0
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Bumped whenever the form must reset from `editing`.
    pub fn editing_revision(&self) -> u64 {
        self.editing_revision
    }

    /// Bumped whenever `viewing` changes.
    pub fn viewing_revision(&self) -> u64 {
        self.viewing_revision
    }

    pub fn viewing_id(&self) -> Option<ClienteId> {
        self.viewing.as_ref().and_then(|c| c.id)
    }

    pub fn take_effects(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.effects)
    }

    pub fn has_pending_effects(&self) -> bool {
        !self.effects.is_empty()
    }

    pub fn notify(&mut self, level: NotificationLevel, message: impl Into<String>) {
        let generation = self.notification.show(level, message);
        self.effects.push(Effect::ExpireNotification {
            generation,
            after: self.notification_ttl,
        });
    }

    pub fn expire_notification(&mut self, generation: u64) {
        self.notification.expire(generation);
    }

    // ------------------------------------------------------------------
    // Intents
    // ------------------------------------------------------------------

    pub fn search(
        &mut self,
        empresa_id: &str,
        busqueda: &str,
    ) -> Result<(), ValidationError> {
        validate_search(empresa_id)?;
        self.run_search(SearchContext::new(empresa_id.trim(), busqueda.trim()));
        Ok(())
    }

    fn run_search(&mut self, context: SearchContext) {
        self.search_seq += 1;
        tracing::debug!(seq = self.search_seq, empresa_id = %context.empresa_id, "search");
        self.search_context = Some(context.clone());
        self.call(Command::Search {
            seq: self.search_seq,
            context,
        });
    }

    /// Create when the record has no id, update otherwise.
    pub fn submit(&mut self, cliente: Cliente) -> Result<(), ValidationError> {
        validate_cliente(&cliente)?;
        let kind = match cliente.id {
            Some(id) => SaveKind::Update(id),
            None => SaveKind::Create,
        };
        tracing::info!(?kind, "submit client");
        self.call(Command::Save { kind, cliente });
        Ok(())
    }

    /// Returns `Ok(false)` when the user declines.
    pub fn delete(
        &mut self,
        cliente: &Cliente,
        confirm: &dyn Confirm,
    ) -> Result<bool, ValidationError> {
        let id = cliente
            .id
            .ok_or(ValidationError::MissingIdentity { entity: "client" })?;
        if !confirm.confirm(&delete_prompt(cliente)) {
            return Ok(false);
        }
        tracing::info!(%id, "delete client");
        self.call(Command::DeleteClient { id });
        Ok(true)
    }

    /// Make `cliente` the viewed record and reload its addresses.
    pub fn select_for_addresses(&mut self, cliente: Cliente) {
        self.viewing = Some(cliente);
        self.addresses = AddressSnapshot::default();
        self.viewing_revision += 1;
        self.refresh_addresses();
    }

    pub fn clear_viewing(&mut self) {
        if self.viewing.take().is_some() {
            self.addresses = AddressSnapshot::default();
            self.viewing_revision += 1;
        }
    }

    pub fn refresh_addresses(&mut self) {
        let Some(viewing) = &self.viewing else {
            return;
        };
        let Some(cliente_id) = viewing.id else {
            self.notify(
                NotificationLevel::Error,
                "Error cargando direcciones: el cliente no tiene id",
            );
            return;
        };
        self.address_seq += 1;
        self.call(Command::LoadAddresses {
            seq: self.address_seq,
            cliente_id,
        });
    }

    pub fn add_address(&mut self, draft: NuevaDireccion) -> Result<(), ValidationError> {
        validate_nueva_direccion(&draft)?;
        self.call(Command::CreateAddress { draft });
        Ok(())
    }

    /// Delete a secondary address. The primary address is refused locally.
    pub fn delete_address(
        &mut self,
        direccion: &Direccion,
        confirm: &dyn Confirm,
    ) -> Result<bool, ValidationError> {
        if direccion.es_matriz {
            let err = ValidationError::PrimaryAddressImmutable;
            self.notify(NotificationLevel::Warning, err.to_string());
            return Err(err);
        }
        let id = direccion
            .id
            .ok_or(ValidationError::MissingIdentity { entity: "address" })?;
        if !confirm.confirm(&address_delete_prompt(direccion)) {
            return Ok(false);
        }
        self.call(Command::DeleteAddress { id });
        Ok(true)
    }

    pub fn edit(&mut self, cliente: Cliente) {
        self.editing = Some(cliente);
        self.editing_revision += 1;
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
        self.editing_revision += 1;
    }

    // ------------------------------------------------------------------
    // Results
    // ------------------------------------------------------------------

    pub fn apply(&mut self, outcome: Outcome) {
        self.finish_call();
        match outcome {
            Outcome::Searched { seq, result } => {
                if self.policy == SearchPolicy::LatestOnly && seq != self.search_seq {
                    tracing::warn!(seq, latest = self.search_seq, "dropping superseded search");
                    return;
                }
                match result {
                    Ok(clientes) => self.results = clientes,
                    Err(err) => {
                        self.results.clear();
                        self.notify(NotificationLevel::Error, format!("Error buscando: {}", err));
                    }
                }
            }
            Outcome::Saved { kind, result } => match result {
                Ok(saved_id) => {
                    let message = match (kind, saved_id) {
                        (SaveKind::Create, Some(id)) => format!("Cliente {} creado", id),
                        (SaveKind::Create, None) => "Cliente creado".to_string(),
                        (SaveKind::Update(id), saved) => {
                            format!("Cliente {} actualizado", saved.unwrap_or(id))
                        }
                    };
                    tracing::info!(?kind, ?saved_id, "client saved");
                    self.editing = None;
                    self.editing_revision += 1;
                    self.notify(NotificationLevel::Success, message);
                    if let Some(context) = self.search_context.clone() {
                        self.run_search(context);
                    }
                }
                Err(err) => {
                    self.notify(NotificationLevel::Error, format!("Error guardando: {}", err));
                }
            },
            Outcome::Deleted { id, result } => match result {
                Ok(()) => {
                    tracing::info!(%id, "client deleted");
                    self.results.retain(|c| c.id != Some(id));
                    if self.viewing_id() == Some(id) {
                        self.clear_viewing();
                    }
                    if self.editing.as_ref().and_then(|c| c.id) == Some(id) {
                        self.cancel_edit();
                    }
                    self.notify(NotificationLevel::Success, "Cliente eliminado");
                }
                Err(err) => {
                    self.notify(NotificationLevel::Error, format!("Error eliminando: {}", err));
                }
            },
            Outcome::AddressCreated { result } => match result {
                Ok(()) => {
                    self.notify(NotificationLevel::Success, "Dirección registrada");
                    self.refresh_addresses();
                }
                Err(err) => self.notify(
                    NotificationLevel::Error,
                    format!("Error creando dirección: {}", err),
                ),
            },
            Outcome::AddressDeleted { id, result } => match result {
                Ok(()) => {
                    tracing::info!(%id, "address deleted");
                    self.notify(NotificationLevel::Success, "Dirección eliminada");
                    self.refresh_addresses();
                }
                Err(err) => self.notify(
                    NotificationLevel::Error,
                    format!("Error eliminando dirección: {}", err),
                ),
            },
            Outcome::AddressesLoaded {
                seq,
                cliente_id,
                snapshot,
            } => {
                if self.viewing_id() != Some(cliente_id) {
                    tracing::warn!(%cliente_id, seq, "dropping addresses of a client no longer viewed");
                    return;
                }
                if seq != self.address_seq {
                    tracing::warn!(%cliente_id, seq, latest = self.address_seq, "dropping superseded address load");
                    return;
                }
                self.addresses = snapshot;
            }
        }
    }

    /// A call task died before producing an outcome.
    pub fn task_failed(&mut self, action: &str, reason: &str) {
        self.finish_call();
        tracing::warn!(action, reason, "task failed");
        self.notify(NotificationLevel::Error, format!("Error {}: {}", action, reason));
    }

    fn call(&mut self, command: Command) {
        self.in_flight += 1;
        self.effects.push(Effect::Call(command));
    }

    fn finish_call(&mut self) {
        self.in_flight = self.in_flight.saturating_sub(1);
    }
}
