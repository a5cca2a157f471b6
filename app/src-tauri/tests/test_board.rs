//! FILENAME: tests/test_board.rs
//! Integration tests for the board views (sample data and spreadsheets).

mod common;

use app_lib::{board, BoardResponse};
use common::TestHarness;
use engine::BoardConfig;
use std::path::PathBuf;

// ============================================================================
// SAMPLE DATA
// ============================================================================

#[test]
fn test_board_is_loading_before_first_poll() {
    let harness = TestHarness::with_sample_data();
    assert_eq!(harness.current(), BoardResponse::Loading);
}

#[test]
fn test_sample_board_layout() {
    let harness = TestHarness::with_sample_data();
    harness.poll();

    let view = harness.board();
    assert_eq!(view.top.title, "TOP 5 PRIORIDADES");
    assert_eq!(
        harness.top_labels(),
        vec!["1. CV-2025-001", "2. PV-10580", "5. OP-98770", "6. PV-10588", "7. CV-2025-003"]
    );

    let titles: Vec<&str> = view.sections.iter().map(|s| s.title.as_str()).collect();
    assert_eq!(titles, vec!["PENDENTES", "AGUARDANDO MONTAGEM"]);

    let pending: Vec<&str> = view.sections[0].items.iter().map(|i| i.label.as_str()).collect();
    assert_eq!(pending, vec!["P2: PV-10580", "P6: PV-10588", "P7: CV-2025-003"]);

    assert_eq!(view.cards.len(), 4);
    assert_eq!(view.cards[0].title, "1º: CV-2025-001");
    assert_eq!(view.cards[0].status_label, "AGUARDANDO MONTAGEM");
    assert_eq!(view.cards[0].quantity_label, "QTD: 5");
    assert_eq!(view.cards[0].transfer_label, "PV: PV-T101");
    assert_eq!(view.active_count, 5);
    assert_eq!(view.cancelled_count, 1);
}

#[test]
fn test_sample_cancelled_modal() {
    let harness = TestHarness::with_sample_data();
    assert!(board::cancelled(&harness.state).unwrap().items.is_empty());

    harness.poll();
    let cancelled = board::cancelled(&harness.state).unwrap();
    assert_eq!(cancelled.items.len(), 1);
    assert_eq!(cancelled.items[0].order_id, "OP-98765");
    assert!(cancelled.items[0]
        .text
        .starts_with("Pedido: OP-98765  |  Serviço: Calibração e ajuste"));
    assert!(cancelled.items[0].text.ends_with("..."));
    assert_eq!(cancelled.empty_message, "Nenhum pedido cancelado.");
}

// ============================================================================
// SELECTION
// ============================================================================

#[test]
fn test_select_and_clear_order() {
    let harness = TestHarness::with_sample_data();
    harness.poll();

    match board::select(&harness.state, Some(" PV-10588 ".to_string())).unwrap() {
        BoardResponse::Ready { selected: Some(card), .. } => {
            assert_eq!(card.title, "6º: PV-10588");
            assert_eq!(card.description, "Corte e dobra de 3 chapas de alumínio.");
        }
        other => panic!("expected a selected card, got {:?}", other),
    }

    match board::select(&harness.state, None).unwrap() {
        BoardResponse::Ready { selected, .. } => assert!(selected.is_none()),
        other => panic!("expected a ready board, got {:?}", other),
    }
}

#[test]
fn test_selecting_inactive_order_shows_no_card() {
    let harness = TestHarness::with_sample_data();
    harness.poll();

    match board::select(&harness.state, Some("OP-98765".to_string())).unwrap() {
        BoardResponse::Ready { selected, .. } => assert!(selected.is_none()),
        other => panic!("expected a ready board, got {:?}", other),
    }
}

// ============================================================================
// SPREADSHEETS
// ============================================================================

#[test]
fn test_spreadsheets_merge_into_board() {
    let harness = TestHarness::with_files();
    harness.write_priorities(&[
        (2, "CV-002", 3.0, "Usinagem", "PV-T2"),
        (1, "CV-001", 5.0, "Montagem", "PV-T1"),
        (3, "CV-003", 1.0, "Corte", "PV-T3"),
    ]);
    harness.write_statuses(&[
        ("CV-001", "Aguardando Montagem"),
        ("CV-003", "Concluído"),
        ("CV-999", "Pendente"),
    ]);

    let result = harness.poll();
    assert_eq!(result.outcome, "reloaded");
    assert!(result.changed);
    assert!(result.board.is_ready());

    assert_eq!(harness.top_labels(), vec!["1. CV-001", "2. CV-002"]);
    let view = harness.board();
    assert_eq!(view.cards[1].status_label, "PENDENTE");
    assert_eq!(view.active_count, 2);
}

#[test]
fn test_unknown_status_gets_its_own_section() {
    let harness = TestHarness::with_files();
    harness.write_priorities(&[(1, "A", 1.0, "", ""), (2, "B", 1.0, "", "")]);
    harness.write_statuses(&[("B", "Em Teste")]);
    harness.poll();

    let view = harness.board();
    let titles: Vec<&str> = view.sections.iter().map(|s| s.title.as_str()).collect();
    assert_eq!(titles, vec!["PENDENTES", "AGUARDANDO MONTAGEM", "EM TESTE"]);
    assert_eq!(view.sections[2].items[0].label, "P2: B");
}

#[test]
fn test_ready_board_reports_update_time() {
    let harness = TestHarness::with_sample_data();
    harness.poll();

    match harness.current() {
        BoardResponse::Ready { updated_at: Some(time), warnings, notice, .. } => {
            assert_eq!(time.len(), 8);
            assert!(warnings.is_empty());
            assert!(notice.is_none());
        }
        other => panic!("expected a ready board, got {:?}", other),
    }
}

#[test]
fn test_ui_settings_carry_theme() {
    let harness = TestHarness::with_sample_data();
    let settings = board::ui_settings(&harness.state);

    assert_eq!(settings.title, "Painel de Produção MTEC");
    assert_eq!(settings.logo_text, "MTEC");
    assert_eq!(settings.logo_image, None);
    assert_eq!(settings.poll_interval_ms, 5000);
    assert!(settings.sample_mode);
    assert_eq!(settings.theme.accent, "#FF6600");

    let json = serde_json::to_value(&settings).unwrap();
    assert_eq!(json["theme"]["mutedText"], "#9E9E9E");
    assert_eq!(json["pollIntervalMs"], 5000);
}

#[test]
fn test_logo_image_is_inlined_when_present() {
    let config = BoardConfig {
        logo_path: Some(PathBuf::from("marca.png")),
        ..BoardConfig::sample()
    };
    let harness = TestHarness::with_config(config);
    std::fs::write(harness.dir.path().join("marca.png"), [0x89, b'P', b'N', b'G']).unwrap();

    let settings = board::ui_settings(&harness.state);
    assert_eq!(settings.logo_image.as_deref(), Some("data:image/png;base64,iVBORw=="));
    assert_eq!(settings.logo_text, "MTEC");
}

#[test]
fn test_logo_falls_back_to_text() {
    let unset = TestHarness::with_config(BoardConfig {
        logo_path: None,
        ..BoardConfig::sample()
    });
    assert_eq!(board::ui_settings(&unset.state).logo_image, None);

    let unknown_format = TestHarness::with_config(BoardConfig {
        logo_path: Some(PathBuf::from("marca.bmp")),
        ..BoardConfig::sample()
    });
    std::fs::write(unknown_format.dir.path().join("marca.bmp"), b"BM").unwrap();
    assert_eq!(board::ui_settings(&unknown_format.state).logo_image, None);
}
