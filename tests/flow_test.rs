//! 読み取りフローのテスト
//!
//! 画像選択 -> 解析 -> 確認/手入力 -> 送信 の一連の遷移と、
//! 送信ペイロードの選択規則を検証する。

use meter_ai_common::{
    parse_analysis_response, Error, MeterSession, Phase, Verification,
};

/// 解析レスポンスを適用済みのセッションを作る
fn analyzed_session(body: &str) -> MeterSession {
    let mut session = MeterSession::new();
    session.select_image("meter.jpg", "image/jpeg").unwrap();
    let token = session.begin_analysis().unwrap();
    session.complete_analysis(token, parse_analysis_response(body));
    session
}

/// 画像選択直後のリセットで初期状態に戻る
#[test]
fn test_select_then_reset_restores_initial_state() {
    let mut session = MeterSession::new();
    session.select_image("meter.jpg", "image/jpeg").unwrap();
    session.reset();

    assert_eq!(session.phase(), Phase::Idle);
    assert!(session.image().is_none());
    assert_eq!(session.detected_reading(), None);
    assert_eq!(session.manual_reading(), "");
    assert_eq!(session.verification(), Verification::Unset);
    assert!(session.error().is_none());
    assert_eq!(session.current_step(), 1);
}

/// 数値のReadingは文字列化されて読み取り可能になる
#[test]
fn test_analyze_numeric_reading() {
    let session = analyzed_session(r#"{"Reading": 12345}"#);
    assert_eq!(session.detected_reading(), Some("12345"));
    assert_eq!(session.phase(), Phase::ReadingAvailable);
}

/// errorフィールドは失敗として扱われ、読み取り値は設定されない
#[test]
fn test_analyze_error_response() {
    let session = analyzed_session(r#"{"error": "blurry image"}"#);
    assert_eq!(session.detected_reading(), None);
    assert_eq!(session.phase(), Phase::ImageSelected);
    assert_eq!(
        session.error(),
        Some(&Error::AnalysisSemantic("blurry image".to_string()))
    );
}

/// 確認済みの自動読み取り値は、手入力の残存テキストに関わらず採用される
#[test]
fn test_confirmed_submission_uses_detected_reading() {
    let mut session = analyzed_session(r#"{"Reading": "04521"}"#);
    session.set_manual_reading("99999");
    session.confirm_reading(true).unwrap();

    let (_, payload) = session.begin_submission("2026-08-08T09:00:00Z").unwrap();
    assert_eq!(payload.reading, "04521");
    assert!(payload.is_automatic_reading);
    assert_eq!(payload.timestamp, "2026-08-08T09:00:00Z");
}

/// 却下後の手入力値が採用される
#[test]
fn test_rejected_submission_uses_manual_reading() {
    let mut session = analyzed_session(r#"{"Reading": "04521"}"#);
    session.confirm_reading(false).unwrap();
    assert_eq!(session.phase(), Phase::ManualEntry);

    session.set_manual_reading("987");
    let (_, payload) = session.begin_submission("2026-08-08T09:00:00Z").unwrap();
    assert_eq!(payload.reading, "987");
    assert!(!payload.is_automatic_reading);
}

/// HTTP 500での送信失敗後、同一入力なら同一ペイロードで再送できる
#[test]
fn test_submit_failure_preserves_payload_for_retry() {
    let mut session = analyzed_session(r#"{"Reading": "04521"}"#);
    session.confirm_reading(true).unwrap();

    let (token, first) = session.begin_submission("2026-08-08T09:00:00Z").unwrap();
    session.complete_submission(token, Err(Error::SubmissionHttp(500)));
    assert_eq!(session.phase(), Phase::SubmitFailed);
    assert_eq!(session.error(), Some(&Error::SubmissionHttp(500)));

    let (_, second) = session.begin_submission("2026-08-08T09:00:00Z").unwrap();
    assert_eq!(first, second);
}

/// 送信中の二重送信は拒否される
#[test]
fn test_double_submission_is_rejected() {
    let mut session = analyzed_session(r#"{"Reading": "04521"}"#);
    session.confirm_reading(true).unwrap();

    session.begin_submission("2026-08-08T09:00:00Z").unwrap();
    let second = session.begin_submission("2026-08-08T09:00:01Z");
    assert!(matches!(second, Err(Error::State(_))));
}

/// リセット後に届いた送信結果は無視される
#[test]
fn test_stale_submission_result_is_ignored() {
    let mut session = analyzed_session(r#"{"Reading": "04521"}"#);
    session.confirm_reading(true).unwrap();
    let (token, _) = session.begin_submission("2026-08-08T09:00:00Z").unwrap();

    session.reset();
    let applied = session.complete_submission(token, Ok(()));
    assert!(!applied);
    assert_eq!(session.phase(), Phase::Idle);
}

/// 画像差し替えで前回の解析結果・確認状態が残らない
#[test]
fn test_image_replacement_clears_stale_state() {
    let mut session = analyzed_session(r#"{"Reading": "04521"}"#);
    session.confirm_reading(false).unwrap();
    session.set_manual_reading("987");

    session.select_image("retake.png", "image/png").unwrap();
    assert_eq!(session.phase(), Phase::ImageSelected);
    assert_eq!(session.detected_reading(), None);
    assert_eq!(session.manual_reading(), "");
    assert_eq!(session.verification(), Verification::Unset);
}

/// 手入力の直接経路: 解析を介さず送信できる
#[test]
fn test_direct_manual_entry_flow() {
    let mut session = MeterSession::new();
    session.enter_manual_mode().unwrap();
    session.set_manual_reading("00777");

    let (token, payload) = session.begin_submission("2026-08-08T09:00:00Z").unwrap();
    assert_eq!(payload.reading, "00777");
    assert!(!payload.is_automatic_reading);

    session.complete_submission(token, Ok(()));
    assert_eq!(session.phase(), Phase::Submitted);
}

/// 空・数字以外の手入力では送信が始まらない
#[test]
fn test_invalid_manual_reading_blocks_submission() {
    let mut session = MeterSession::new();
    session.enter_manual_mode().unwrap();

    session.set_manual_reading("   ");
    assert!(session.begin_submission("2026-08-08T09:00:00Z").is_err());

    session.set_manual_reading("12a4");
    assert!(session.begin_submission("2026-08-08T09:00:00Z").is_err());
}
