mod common;

use common::{
    flow_cell, qc_protocol, running_position, two_position_manager, MockManager, MockPosition,
};
use minknow_client::{write_outcome, ClientError, FlowCellCheck, PositionSelector, PositionState};

fn started(calls: &common::CallLog) -> Vec<String> {
    calls
        .lock()
        .unwrap()
        .iter()
        .filter(|c| c.starts_with("start_protocol"))
        .cloned()
        .collect()
}

#[tokio::test]
async fn test_starts_platform_qc_on_named_position() {
    let manager = two_position_manager();
    let calls = manager.calls();

    let report = FlowCellCheck::new(manager, PositionSelector::Name("X2".to_string()))
        .run()
        .await
        .unwrap();

    assert_eq!(report.run_id, "run-X2");
    assert_eq!(report.position, "X2");
    assert_eq!(report.flow_cell_id, "FAQ00002");
    assert_eq!(
        started(&calls),
        vec!["start_protocol X2 platform_qc:FLO-MIN114: []".to_string()]
    );

    // Positions are matched by name without connecting to the ones skipped.
    assert!(!calls.lock().unwrap().contains(&"connect X1".to_string()));
}

#[tokio::test]
async fn test_starts_platform_qc_on_position_holding_flow_cell() {
    let manager = two_position_manager();
    let calls = manager.calls();

    let report = FlowCellCheck::new(
        manager,
        PositionSelector::FlowCellId("FAQ00001".to_string()),
    )
    .run()
    .await
    .unwrap();

    assert_eq!(report.position, "X1");
    assert_eq!(report.flow_cell_id, "FAQ00001");
    assert_eq!(
        started(&calls),
        vec!["start_protocol X1 platform_qc:FLO-MIN106: []".to_string()]
    );
    assert!(!calls.lock().unwrap().contains(&"connect X2".to_string()));
}

#[tokio::test]
async fn test_no_matching_position_starts_nothing() {
    let manager = two_position_manager();
    let calls = manager.calls();

    let err = FlowCellCheck::new(manager, PositionSelector::Name("X5".to_string()))
        .run()
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::NoMatchingPosition));
    assert_eq!(err.exit_code(), 1);
    assert_eq!(
        err.to_string(),
        "No matching position found for --position or --flow-cell-id"
    );
    assert!(started(&calls).is_empty());
}

#[tokio::test]
async fn test_unknown_flow_cell_id_starts_nothing() {
    let manager = two_position_manager();
    let calls = manager.calls();

    let err = FlowCellCheck::new(
        manager,
        PositionSelector::FlowCellId("FAQ99999".to_string()),
    )
    .run()
    .await
    .unwrap_err();

    assert!(matches!(err, ClientError::NoMatchingPosition));
    assert!(started(&calls).is_empty());
}

#[tokio::test]
async fn test_empty_position_fails_with_exit_one() {
    let mut empty = flow_cell("", "");
    empty.has_flow_cell = false;
    let manager = MockManager::new(vec![MockPosition {
        position: running_position("MN12345", 8000),
        flow_cell: empty,
        protocols: vec![qc_protocol("FLO-MIN106")],
    }]);
    let calls = manager.calls();

    let err = FlowCellCheck::new(manager, PositionSelector::Name("MN12345".to_string()))
        .run()
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "No flow cell present in position MN12345");
    assert_eq!(err.exit_code(), 1);
    assert!(err.is_instrument_state());
    assert!(started(&calls).is_empty());
}

#[tokio::test]
async fn test_user_specified_product_code_selects_protocol() {
    let mut info = flow_cell("FAQ00003", "FLO-MIN106");
    info.user_specified_product_code = "FLO-MIN114".to_string();
    info.user_specified_flow_cell_id = "bench-cell-3".to_string();
    let manager = MockManager::new(vec![MockPosition {
        position: running_position("X3", 8008),
        flow_cell: info,
        protocols: vec![qc_protocol("FLO-MIN106"), qc_protocol("FLO-MIN114")],
    }]);
    let calls = manager.calls();

    let report = FlowCellCheck::new(manager, PositionSelector::Name("X3".to_string()))
        .run()
        .await
        .unwrap();

    assert_eq!(report.user_specified_flow_cell_id, "bench-cell-3");
    assert_eq!(
        started(&calls),
        vec!["start_protocol X3 platform_qc:FLO-MIN114: []".to_string()]
    );
}

#[tokio::test]
async fn test_missing_protocol_is_reported() {
    let manager = MockManager::new(vec![MockPosition {
        position: running_position("X1", 8000),
        flow_cell: flow_cell("FAQ00001", "FLO-FLG001"),
        protocols: vec![qc_protocol("FLO-MIN106")],
    }]);
    let calls = manager.calls();

    let err = FlowCellCheck::new(manager, PositionSelector::Name("X1".to_string()))
        .run()
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::ProtocolNotFound { .. }));
    assert!(!err.is_instrument_state());
    assert!(started(&calls).is_empty());
}

#[tokio::test]
async fn test_flow_cell_search_skips_positions_that_are_not_running() {
    let mut resetting = running_position("X1", 8000);
    resetting.state = PositionState::Resetting;
    resetting.secure_port = None;

    let manager = MockManager::new(vec![
        MockPosition {
            position: resetting,
            flow_cell: flow_cell("FAQ00001", "FLO-MIN106"),
            protocols: vec![qc_protocol("FLO-MIN106")],
        },
        MockPosition {
            position: running_position("X2", 8004),
            flow_cell: flow_cell("FAQ00002", "FLO-MIN106"),
            protocols: vec![qc_protocol("FLO-MIN106")],
        },
    ]);
    let calls = manager.calls();

    let report = FlowCellCheck::new(
        manager,
        PositionSelector::FlowCellId("FAQ00002".to_string()),
    )
    .run()
    .await
    .unwrap();

    assert_eq!(report.position, "X2");
    assert!(!calls.lock().unwrap().contains(&"connect X1".to_string()));
}

#[tokio::test]
async fn test_named_position_that_is_not_running_fails() {
    let mut initialising = running_position("P2S_00001-A", 8000);
    initialising.state = PositionState::Initialising;
    initialising.secure_port = None;

    let manager = MockManager::new(vec![MockPosition {
        position: initialising,
        flow_cell: flow_cell("PAM00001", "FLO-PRO114M"),
        protocols: vec![],
    }]);

    let err = FlowCellCheck::new(
        manager,
        PositionSelector::Name("P2S_00001-A".to_string()),
    )
    .run()
    .await
    .unwrap_err();

    assert!(matches!(err, ClientError::PositionNotRunning { .. }));
    assert_eq!(err.exit_code(), 1);
}

#[tokio::test]
async fn test_report_prints_fields_in_order() {
    let mut info = flow_cell("FAQ00007", "FLO-MIN106");
    info.user_specified_flow_cell_id = "shelf-7".to_string();
    let manager = MockManager::new(vec![MockPosition {
        position: running_position("X4", 8012),
        flow_cell: info,
        protocols: vec![qc_protocol("FLO-MIN106")],
    }]);

    let report = FlowCellCheck::new(manager, PositionSelector::Name("X4".to_string()))
        .run()
        .await
        .unwrap();
    let printed = report.to_string();

    let order: Vec<usize> = [
        "run_id=run-X4",
        "position=X4",
        "flow_cell_id=FAQ00007",
        "user_specified_flow_cell_id=shelf-7",
    ]
    .iter()
    .map(|needle| printed.find(needle).unwrap())
    .collect();
    assert!(printed.starts_with("Started flow cell check:\n"));
    assert!(order.windows(2).all(|w| w[0] < w[1]));
}

#[tokio::test]
async fn test_empty_selector_matches_nothing() {
    for selector in [
        PositionSelector::Name(String::new()),
        PositionSelector::FlowCellId(String::new()),
    ] {
        let mut blank = flow_cell("", "");
        blank.has_flow_cell = false;
        let manager = MockManager::new(vec![MockPosition {
            position: running_position("MN12345", 8000),
            flow_cell: blank,
            protocols: vec![qc_protocol("FLO-MIN106")],
        }]);
        let calls = manager.calls();

        let err = FlowCellCheck::new(manager, selector).run().await.unwrap_err();

        assert!(matches!(err, ClientError::NoMatchingPosition));
        assert_eq!(err.exit_code(), 1);
        assert!(!calls.lock().unwrap().iter().any(|c| c.starts_with("connect")));
    }
}

async fn check_and_print(
    manager: MockManager,
    selector: PositionSelector,
) -> (String, String, i32) {
    let result = FlowCellCheck::new(manager, selector).run().await;
    let mut out = Vec::new();
    let mut err = Vec::new();
    let code = write_outcome(result, &mut out, &mut err).unwrap();
    (
        String::from_utf8(out).unwrap(),
        String::from_utf8(err).unwrap(),
        code,
    )
}

#[tokio::test]
async fn test_success_prints_report_to_stdout() {
    let (out, err, code) =
        check_and_print(two_position_manager(), PositionSelector::Name("X1".to_string())).await;

    assert_eq!(
        out,
        "Started flow cell check:\n    run_id=run-X1\n    position=X1\n    flow_cell_id=FAQ00001\n    user_specified_flow_cell_id=\n"
    );
    assert!(err.is_empty());
    assert_eq!(code, 0);
}

#[tokio::test]
async fn test_no_matching_position_prints_to_stdout_and_exits_one() {
    let (out, err, code) = check_and_print(
        two_position_manager(),
        PositionSelector::FlowCellId("FAQ99999".to_string()),
    )
    .await;

    assert_eq!(out, "No matching position found for --position or --flow-cell-id\n");
    assert!(err.is_empty());
    assert_eq!(code, 1);
}

#[tokio::test]
async fn test_no_flow_cell_prints_to_stdout_and_exits_one() {
    let mut empty = flow_cell("", "");
    empty.has_flow_cell = false;
    let manager = MockManager::new(vec![MockPosition {
        position: running_position("X1", 8000),
        flow_cell: empty,
        protocols: vec![qc_protocol("FLO-MIN106")],
    }]);

    let (out, err, code) = check_and_print(manager, PositionSelector::Name("X1".to_string())).await;

    assert_eq!(out, "No flow cell present in position X1\n");
    assert!(err.is_empty());
    assert_eq!(code, 1);
}

#[tokio::test]
async fn test_missing_protocol_prints_to_stderr_and_exits_one() {
    let manager = MockManager::new(vec![MockPosition {
        position: running_position("X1", 8000),
        flow_cell: flow_cell("FAQ00001", "FLO-FLG001"),
        protocols: vec![qc_protocol("FLO-MIN106")],
    }]);

    let (out, err, code) = check_and_print(manager, PositionSelector::Name("X1".to_string())).await;

    assert!(out.is_empty());
    assert!(err.starts_with("❌ No protocol found for product code 'FLO-FLG001'"));
    assert!(err.contains("💡 "));
    assert_eq!(code, 1);
}
