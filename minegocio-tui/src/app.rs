//! Application shell: focus, view components and modal prompts around the
//! canonical [`ClientesState`].

use crate::config::TuiConfig;
use crate::events::TuiEvent;
use crate::keys::{map_key, Action, KeyMode};
use crate::nav::Pane;
use crate::persistence::PersistedState;
use crate::state::{address_delete_prompt, delete_prompt, ClientesState, Confirm};
use crate::theme::SynthBruteTheme;
use crate::views::{AddressPanel, RecordForm, RecordTable, SearchView};
use crossterm::event::KeyEvent;
use minegocio_core::{Cliente, Direccion, SearchContext, ValidationError};

#[derive(Debug, Clone, PartialEq)]
pub enum Modal {
    /// Blocking message, dismissed with Enter or Esc.
    Message { title: String, message: String },
    ConfirmDelete { cliente: Cliente, prompt: String },
    ConfirmDeleteAddress { direccion: Direccion, prompt: String },
}

/// The user's answer to a confirmation modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModalAnswer(pub bool);

impl Confirm for ModalAnswer {
    fn confirm(&self, _prompt: &str) -> bool {
        self.0
    }
}

#[derive(Debug, Clone)]
pub struct App {
    pub config: TuiConfig,
    pub theme: SynthBruteTheme,
    pub state: ClientesState,
    pub pane: Pane,
    pub search_view: SearchView,
    pub form: RecordForm,
    pub table: RecordTable,
    pub address_panel: AddressPanel,
    pub modal: Option<Modal>,
    synced_editing: u64,
    synced_viewing: u64,
}

impl App {
    pub fn new(config: TuiConfig) -> Self {
        let state = ClientesState::new(config.search_policy, config.notification_ttl());
        Self {
            config,
            theme: SynthBruteTheme::synthbrute(),
            synced_editing: state.editing_revision(),
            synced_viewing: state.viewing_revision(),
            state,
            pane: Pane::default(),
            search_view: SearchView::default(),
            form: RecordForm::default(),
            table: RecordTable::default(),
            address_panel: AddressPanel::default(),
            modal: None,
        }
    }

    pub fn restore(&mut self, persisted: &PersistedState) {
        self.pane = persisted.pane;
        if let Some(context) = &persisted.last_search {
            self.search_view = SearchView::from_context(context);
        }
    }

    pub fn snapshot(&self) -> PersistedState {
        let typed = self.search_view.submit().ok();
        PersistedState {
            last_search: self.state.search_context.clone().or(typed),
            pane: self.pane,
        }
    }

    /// Run the search configured under `[startup]`, if any.
    pub fn startup_search(&mut self) {
        let Some(empresa_id) = self.config.startup.empresa_id.clone() else {
            return;
        };
        let busqueda = self.config.startup.busqueda.clone().unwrap_or_default();
        self.search_view = SearchView::from_context(&SearchContext::new(&empresa_id, &busqueda));
        self.submit_search();
    }

    pub fn key_mode(&self) -> KeyMode {
        if self.modal.is_some() {
            return KeyMode::Modal;
        }
        match self.pane {
            Pane::Search | Pane::Form => KeyMode::TextEntry,
            Pane::Results => KeyMode::Navigation,
            Pane::Addresses if self.address_panel.is_editing_field() => KeyMode::TextEntry,
            Pane::Addresses => KeyMode::Navigation,
        }
    }

    /// Apply one event. Returns `true` when the app should quit.
    pub fn handle_event(&mut self, event: TuiEvent) -> bool {
        let quit = match event {
            TuiEvent::Input(key) => return self.handle_key(key),
            TuiEvent::Outcome(outcome) => {
                self.state.apply(*outcome);
                false
            }
            TuiEvent::NotificationExpired(generation) => {
                self.state.expire_notification(generation);
                false
            }
            TuiEvent::TaskFailed { action, message } => {
                self.state.task_failed(action, &message);
                false
            }
            TuiEvent::Tick | TuiEvent::Resize { .. } => false,
        };
        self.sync_views();
        quit
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match map_key(key, self.key_mode()) {
            Some(action) => self.handle_action(action),
            None => false,
        }
    }

    pub fn handle_action(&mut self, action: Action) -> bool {
        if action == Action::Quit {
            return true;
        }
        if self.modal.is_some() {
            match action {
                Action::Confirm => self.answer_modal(true),
                Action::Deny | Action::Cancel => self.answer_modal(false),
                _ => {}
            }
            self.sync_views();
            return false;
        }
        match action {
            Action::NextPane => self.pane = self.pane.next(),
            Action::PrevPane => self.pane = self.pane.previous(),
            _ => match self.pane {
                Pane::Search => self.search_action(action),
                Pane::Form => self.form_action(action),
                Pane::Results => self.results_action(action),
                Pane::Addresses => self.addresses_action(action),
            },
        }
        self.sync_views();
        false
    }

    fn search_action(&mut self, action: Action) {
        match action {
            Action::MoveUp | Action::MoveDown => self.search_view.toggle_field(),
            Action::Input(c) => self.search_view.input(c),
            Action::Backspace => self.search_view.backspace(),
            Action::Submit => self.submit_search(),
            _ => {}
        }
    }

    fn submit_search(&mut self) {
        let result = self
            .search_view
            .submit()
            .and_then(|context| self.state.search(&context.empresa_id, &context.busqueda));
        if let Err(err) = result {
            self.block(err);
        }
    }

    fn form_action(&mut self, action: Action) {
        match action {
            Action::MoveUp => self.form.previous_field(),
            Action::MoveDown => self.form.next_field(),
            Action::MoveLeft | Action::MoveRight => self.form.cycle(),
            Action::Input(c) => self.form.input(c),
            Action::Backspace => self.form.backspace(),
            Action::Submit => {
                let result = self
                    .form
                    .submit()
                    .and_then(|cliente| self.state.submit(cliente));
                if let Err(err) = result {
                    self.block(err);
                }
            }
            Action::Cancel => self.state.cancel_edit(),
            _ => {}
        }
    }

    fn results_action(&mut self, action: Action) {
        let len = self.state.results.len();
        match action {
            Action::MoveUp => self.table.move_up(),
            Action::MoveDown => self.table.move_down(len),
            Action::ViewAddresses | Action::Submit => {
                if let Some(cliente) = self.table.selected(&self.state.results).cloned() {
                    self.state.select_for_addresses(cliente);
                }
            }
            Action::EditItem => {
                if let Some(cliente) = self.table.selected(&self.state.results).cloned() {
                    self.state.edit(cliente);
                    self.pane = Pane::Form;
                }
            }
            Action::DeleteItem => {
                if let Some(cliente) = self.table.selected(&self.state.results).cloned() {
                    self.modal = Some(Modal::ConfirmDelete {
                        prompt: delete_prompt(&cliente),
                        cliente,
                    });
                }
            }
            Action::NewItem => {
                self.state.cancel_edit();
                self.pane = Pane::Form;
            }
            _ => {}
        }
    }

    fn addresses_action(&mut self, action: Action) {
        if self.address_panel.is_editing_field() {
            match action {
                Action::MoveUp => self.address_panel.move_up(),
                Action::MoveDown => self.address_panel.move_down(0),
                Action::Input(c) => self.address_panel.input(c),
                Action::Backspace => self.address_panel.backspace(),
                Action::Cancel => self.address_panel.focus_list(),
                Action::Submit => {
                    let result = self
                        .address_panel
                        .submit()
                        .and_then(|draft| self.state.add_address(draft));
                    if let Err(err) = result {
                        self.block(err);
                    }
                }
                _ => {}
            }
            return;
        }

        let len = self.state.addresses.adicionales.len();
        match action {
            Action::MoveUp => self.address_panel.move_up(),
            Action::MoveDown => self.address_panel.move_down(len),
            Action::Submit => self.address_panel.focus_form(),
            Action::Refresh => self.state.refresh_addresses(),
            Action::DeleteAddress => {
                let Some(direccion) = self
                    .address_panel
                    .selected(&self.state.addresses.adicionales)
                    .cloned()
                else {
                    return;
                };
                if direccion.es_matriz {
                    if let Err(err) = self.state.delete_address(&direccion, &ModalAnswer(false)) {
                        self.block(err);
                    }
                    return;
                }
                self.modal = Some(Modal::ConfirmDeleteAddress {
                    prompt: address_delete_prompt(&direccion),
                    direccion,
                });
            }
            _ => {}
        }
    }

    fn answer_modal(&mut self, yes: bool) {
        let result = match self.modal.take() {
            Some(Modal::ConfirmDelete { cliente, .. }) => {
                self.state.delete(&cliente, &ModalAnswer(yes)).map(drop)
            }
            Some(Modal::ConfirmDeleteAddress { direccion, .. }) => self
                .state
                .delete_address(&direccion, &ModalAnswer(yes))
                .map(drop),
            Some(Modal::Message { .. }) | None => Ok(()),
        };
        if let Err(err) = result {
            self.block(err);
        }
    }

    fn block(&mut self, err: ValidationError) {
        tracing::debug!(error = %err, "validation blocked intent");
        self.modal = Some(Modal::Message {
            title: "Datos incompletos".to_string(),
            message: err.to_string(),
        });
    }

    /// Reset the form and address panel when the records they depend on change.
    fn sync_views(&mut self) {
        if self.state.editing_revision() != self.synced_editing {
            self.form.reset(self.state.editing.as_ref());
            self.synced_editing = self.state.editing_revision();
        }
        if self.state.viewing_revision() != self.synced_viewing {
            self.address_panel.reset_for(self.state.viewing_id());
            self.synced_viewing = self.state.viewing_revision();
        }
        self.table.clamp(self.state.results.len());
        self.address_panel
            .clamp(self.state.addresses.adicionales.len());
    }
}
