//! 対話式の確認・訂正モジュール
//!
//! 検出された検針値の確認と、手入力値の取得を行う。

use dialoguer::{Confirm, Input};
use meter_ai_common::MeterSession;

use crate::error::Result;

/// 検出された検針値を対話で確認する
///
/// 承認なら Confirmed へ、却下なら手入力へ進む。
/// `auto_confirm` は `--yes` 指定時の無確認承認。
pub fn review_detected_reading(session: &mut MeterSession, auto_confirm: bool) -> Result<()> {
    let reading = session.detected_reading().unwrap_or_default().to_string();
    println!("検出された検針値: {}", reading);

    let verified = if auto_confirm {
        true
    } else {
        Confirm::new()
            .with_prompt("この読み取り値は正しいですか？")
            .default(true)
            .interact()?
    };

    session.confirm_reading(verified)?;

    if !verified {
        prompt_manual_reading(session)?;
    }
    Ok(())
}

/// 手入力値を取得してセッションへ設定する（数字のみ）
pub fn prompt_manual_reading(session: &mut MeterSession) -> Result<()> {
    let value: String = Input::new()
        .with_prompt("検針値を入力してください（数字のみ）")
        .validate_with(|input: &String| -> std::result::Result<(), &str> {
            let trimmed = input.trim();
            if trimmed.is_empty() {
                return Err("値を入力してください");
            }
            if !trimmed.chars().all(|c| c.is_ascii_digit()) {
                return Err("数字のみで入力してください");
            }
            Ok(())
        })
        .interact_text()?;

    session.set_manual_reading(&value);
    Ok(())
}

/// 送信失敗時に同一内容での再送を確認する
pub fn confirm_retry() -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt("同じ内容で再送しますか？")
        .default(true)
        .interact()?)
}

/// 解析失敗時に手入力への切り替えを確認する
pub fn confirm_manual_fallback() -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt("手入力に切り替えますか？（いいえで終了し、別の写真で再実行できます）")
        .default(true)
        .interact()?)
}
