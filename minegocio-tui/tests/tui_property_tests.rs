use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};
use minegocio_core::ClienteId;
use minegocio_test_utils::{cliente, direccion, list_payload, Endpoint, MockClientesApi};
use minegocio_tui::app::{App, Modal};
use minegocio_tui::commands::Command;
use minegocio_tui::config::{SearchPolicy, StartupConfig, TuiConfig};
use minegocio_tui::events::TuiEvent;
use minegocio_tui::keys::{map_key, Action, KeyMode};
use minegocio_tui::nav::Pane;
use minegocio_tui::notifications::NotificationLevel;
use minegocio_tui::persistence::PersistedState;
use minegocio_tui::runtime::run_inline;
use minegocio_tui::state::Effect;
use minegocio_tui::theme::{notification_color, SynthBruteTheme};
use minegocio_tui::views::AddressFocus;
use proptest::prelude::*;

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent {
        code,
        modifiers: KeyModifiers::NONE,
        kind: KeyEventKind::Press,
        state: KeyEventState::empty(),
    }
}

fn ctrl(c: char) -> KeyEvent {
    KeyEvent {
        code: KeyCode::Char(c),
        modifiers: KeyModifiers::CONTROL,
        kind: KeyEventKind::Press,
        state: KeyEventState::empty(),
    }
}

fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        app.handle_key(key(KeyCode::Char(c)));
    }
}

fn pending_calls(app: &mut App) -> Vec<Command> {
    app.state
        .take_effects()
        .into_iter()
        .filter_map(|effect| match effect {
            Effect::Call(command) => Some(command),
            Effect::ExpireNotification { .. } => None,
        })
        .collect()
}

fn app_with_results() -> App {
    let mut app = App::new(TuiConfig::default());
    app.state.results = vec![cliente(7, "Ana"), cliente(8, "Beto")];
    app.pane = Pane::Results;
    app
}

// ============================================================================
// CONFIG
// ============================================================================

#[test]
fn config_rejects_empty_log_path() {
    let config = TuiConfig {
        log_path: "".into(),
        ..TuiConfig::default()
    };
    assert!(config.validate().is_err());
}

#[test]
fn config_rejects_blank_startup_tenant() {
    let config = TuiConfig {
        startup: StartupConfig {
            empresa_id: Some(" ".to_string()),
            busqueda: None,
        },
        ..TuiConfig::default()
    };
    assert!(config.validate().is_err());
}

#[test]
fn config_file_round_trips_through_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tui.toml");
    std::fs::write(
        &path,
        "api_base_url = \"http://10.1.1.1:8080/api\"\nrequest_timeout_ms = 1500\n",
    )
    .unwrap();
    let config = TuiConfig::from_path(&path).unwrap();
    assert_eq!(config.request_timeout_ms, Some(1_500));
    assert_eq!(config.search_policy, SearchPolicy::LastWriteWins);
    assert!(config.validate().is_ok());
}

proptest! {
    #[test]
    fn config_positive_intervals_validate(ttl in 1u64..60_000, tick in 1u64..5_000) {
        let config = TuiConfig {
            notification_ttl_ms: ttl,
            tick_rate_ms: tick,
            ..TuiConfig::default()
        };
        prop_assert!(config.validate().is_ok());
    }
}

// ============================================================================
// KEYS & NAVIGATION
// ============================================================================

#[test]
fn ctrl_c_quits_in_every_mode() {
    for mode in [KeyMode::Navigation, KeyMode::TextEntry, KeyMode::Modal] {
        assert_eq!(map_key(ctrl('c'), mode), Some(Action::Quit));
    }
}

#[test]
fn q_quits_only_from_navigation() {
    assert_eq!(map_key(key(KeyCode::Char('q')), KeyMode::Navigation), Some(Action::Quit));
    assert_eq!(
        map_key(key(KeyCode::Char('q')), KeyMode::TextEntry),
        Some(Action::Input('q'))
    );
    assert_eq!(map_key(key(KeyCode::Char('q')), KeyMode::Modal), None);
}

#[test]
fn release_events_are_ignored() {
    let mut event = key(KeyCode::Enter);
    event.kind = KeyEventKind::Release;
    assert_eq!(map_key(event, KeyMode::Navigation), None);
}

#[test]
fn modal_answers() {
    assert_eq!(map_key(key(KeyCode::Char('y')), KeyMode::Modal), Some(Action::Confirm));
    assert_eq!(map_key(key(KeyCode::Char('n')), KeyMode::Modal), Some(Action::Deny));
    assert_eq!(map_key(key(KeyCode::Esc), KeyMode::Modal), Some(Action::Cancel));
}

proptest! {
    #[test]
    fn text_entry_routes_printable_chars(c in proptest::char::range(' ', '~')) {
        prop_assert_eq!(map_key(key(KeyCode::Char(c)), KeyMode::TextEntry), Some(Action::Input(c)));
    }

    #[test]
    fn pane_cycle_round_trips(start in 0usize..4, steps in 0usize..12) {
        let pane = Pane::from_index(start).unwrap();
        let mut forward = pane;
        for _ in 0..steps {
            forward = forward.next();
        }
        let mut back = forward;
        for _ in 0..steps {
            back = back.previous();
        }
        prop_assert_eq!(back, pane);
        prop_assert_eq!(forward.index(), (start + steps) % Pane::all().len());
    }
}

#[test]
fn notification_levels_have_distinct_colors() {
    let theme = SynthBruteTheme::synthbrute();
    assert_ne!(
        notification_color(NotificationLevel::Error, &theme),
        notification_color(NotificationLevel::Success, &theme)
    );
}

// ============================================================================
// APP
// ============================================================================

#[test]
fn search_without_tenant_blocks_with_modal() {
    let mut app = App::new(TuiConfig::default());
    assert_eq!(app.key_mode(), KeyMode::TextEntry);

    app.handle_key(key(KeyCode::Enter));

    assert!(matches!(app.modal, Some(Modal::Message { .. })));
    assert!(pending_calls(&mut app).is_empty());
    assert_eq!(app.key_mode(), KeyMode::Modal);

    app.handle_key(key(KeyCode::Esc));
    assert!(app.modal.is_none());
}

#[test]
fn typed_search_emits_search_command() {
    let mut app = App::new(TuiConfig::default());
    type_text(&mut app, "1");
    app.handle_key(key(KeyCode::Down));
    type_text(&mut app, "ana");
    app.handle_key(key(KeyCode::Enter));

    let calls = pending_calls(&mut app);
    assert_eq!(calls.len(), 1);
    assert!(matches!(
        &calls[0],
        Command::Search { context, .. } if context.empresa_id == "1" && context.busqueda == "ana"
    ));
    assert!(app.state.is_loading());
}

#[test]
fn delete_needs_confirmation() {
    let mut app = app_with_results();

    app.handle_key(key(KeyCode::Char('d')));
    assert!(matches!(app.modal, Some(Modal::ConfirmDelete { .. })));
    app.handle_key(key(KeyCode::Char('n')));
    assert!(app.modal.is_none());
    assert!(pending_calls(&mut app).is_empty());

    app.handle_key(key(KeyCode::Char('j')));
    app.handle_key(key(KeyCode::Char('d')));
    app.handle_key(key(KeyCode::Char('y')));
    assert_eq!(
        pending_calls(&mut app),
        vec![Command::DeleteClient { id: ClienteId(8) }]
    );
}

#[test]
fn edit_loads_form_and_escape_resets_it() {
    let mut app = app_with_results();

    app.handle_key(key(KeyCode::Char('e')));
    assert_eq!(app.pane, Pane::Form);
    assert_eq!(app.form.draft, cliente(7, "Ana"));
    assert!(!app.form.is_creating());

    type_text(&mut app, "9");
    app.handle_key(key(KeyCode::Esc));
    assert!(app.state.editing.is_none());
    assert!(app.form.is_creating());
    assert!(app.form.draft.empresa_id.is_empty());
}

#[test]
fn incomplete_new_client_is_blocked_locally() {
    let mut app = App::new(TuiConfig::default());
    app.pane = Pane::Form;
    type_text(&mut app, "1");
    app.handle_key(key(KeyCode::Enter));

    assert!(matches!(app.modal, Some(Modal::Message { .. })));
    assert!(pending_calls(&mut app).is_empty());
}

#[tokio::test]
async fn viewing_a_client_resets_address_panel_and_loads_addresses() {
    let api = MockClientesApi::new();
    api.respond(
        Endpoint::ListSecondaryAddresses,
        list_payload(&[direccion(2, 7, "Cuenca", false)]),
    );
    let mut app = app_with_results();

    app.handle_key(key(KeyCode::Char('v')));
    assert_eq!(app.address_panel.draft.cliente_id, Some(ClienteId(7)));
    run_inline(&mut app.state, &api).await;
    app.handle_event(TuiEvent::Tick);

    assert_eq!(app.state.addresses.adicionales.len(), 1);
    assert_eq!(api.count(Endpoint::ListAddresses), 1);

    app.pane = Pane::Addresses;
    app.handle_key(key(KeyCode::Char('x')));
    assert!(matches!(app.modal, Some(Modal::ConfirmDeleteAddress { .. })));
    app.handle_key(key(KeyCode::Char('y')));
    assert_eq!(run_inline(&mut app.state, &api).await, 2);
    assert_eq!(api.count(Endpoint::DeleteAddress), 1);
}

#[test]
fn address_form_submits_and_clears() {
    let mut app = app_with_results();
    app.handle_key(key(KeyCode::Char('v')));
    pending_calls(&mut app);
    app.pane = Pane::Addresses;

    app.handle_key(key(KeyCode::Enter));
    assert_eq!(app.address_panel.focus, AddressFocus::Field(0));
    assert_eq!(app.key_mode(), KeyMode::TextEntry);
    type_text(&mut app, "Azuay");
    app.handle_key(key(KeyCode::Down));
    type_text(&mut app, "Cuenca");
    app.handle_key(key(KeyCode::Down));
    type_text(&mut app, "Calle Larga 4");
    app.handle_key(key(KeyCode::Enter));

    let calls = pending_calls(&mut app);
    assert!(matches!(
        &calls[..],
        [Command::CreateAddress { draft }] if draft.ciudad == "Cuenca" && draft.cliente_id == Some(ClienteId(7))
    ));
    assert!(app.address_panel.draft.ciudad.is_empty());
    assert_eq!(app.address_panel.draft.cliente_id, Some(ClienteId(7)));
}

#[test]
fn primary_address_in_list_is_refused_without_prompt() {
    let mut app = app_with_results();
    app.handle_key(key(KeyCode::Char('v')));
    pending_calls(&mut app);
    app.state.addresses.adicionales = vec![direccion(1, 7, "Quito", true)];
    app.pane = Pane::Addresses;

    app.handle_key(key(KeyCode::Char('x')));

    assert!(matches!(app.modal, Some(Modal::Message { .. })));
    assert!(pending_calls(&mut app).is_empty());
    assert_eq!(
        app.state.notification.current().map(|n| n.level),
        Some(NotificationLevel::Warning)
    );
}

#[test]
fn expired_notification_event_clears_footer() {
    let mut app = App::new(TuiConfig::default());
    app.state.notify(NotificationLevel::Info, "hola");
    let generation = app.state.notification.generation();
    app.handle_event(TuiEvent::NotificationExpired(generation));
    assert!(app.state.notification.current().is_none());
}

#[test]
fn task_failure_event_notifies() {
    let mut app = App::new(TuiConfig::default());
    app.handle_event(TuiEvent::TaskFailed {
        action: "buscando",
        message: "join error".to_string(),
    });
    assert_eq!(
        app.state.notification.current().map(|n| n.message.as_str()),
        Some("Error buscando: join error")
    );
}

#[test]
fn startup_search_prefills_and_searches() {
    let config = TuiConfig {
        startup: StartupConfig {
            empresa_id: Some("3".to_string()),
            busqueda: Some("andina".to_string()),
        },
        ..TuiConfig::default()
    };
    let mut app = App::new(config);
    app.startup_search();
    assert_eq!(app.search_view.empresa_id, "3");
    assert_eq!(pending_calls(&mut app).len(), 1);
}

#[test]
fn snapshot_restores_search_inputs_and_pane() {
    let mut app = app_with_results();
    app.state.search("5", "beto").unwrap();
    let snapshot = app.snapshot();

    let mut restored = App::new(TuiConfig::default());
    restored.restore(&snapshot);
    assert_eq!(restored.pane, Pane::Results);
    assert_eq!(restored.search_view.empresa_id, "5");
    assert_eq!(restored.search_view.busqueda, "beto");
    assert_eq!(PersistedState::default().pane, Pane::Search);
}
