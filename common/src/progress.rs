//! 解析中プログレスのモデル
//!
//! 実際の転送量とは連動しない時間ベースの近似値。
//! レスポンス到着まで90%で頭打ちにし、到着時に100%へスナップする。

/// 進捗タイマーの周期（ミリ秒）
pub const TICK_MILLIS: u32 = 100;

/// 1ティックあたりの増分
const TICK_STEP: u8 = 10;

/// レスポンス到着前の上限
const PENDING_CAP: u8 = 90;

/// 完了値
const COMPLETE: u8 = 100;

/// 解析中プログレス（0〜100）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnalysisProgress(u8);

impl AnalysisProgress {
    pub fn new() -> Self {
        Self(0)
    }

    /// 現在値（%）
    pub fn value(&self) -> u8 {
        self.0
    }

    /// タイマー1周期ぶん進める（90%で頭打ち）
    pub fn tick(&mut self) {
        self.0 = (self.0 + TICK_STEP).min(PENDING_CAP);
    }

    /// レスポンス到着時に100%へスナップ
    pub fn complete(&mut self) {
        self.0 = COMPLETE;
    }

    /// 全ての終了経路（成功・失敗・リセット）でゼロに戻す
    pub fn reset(&mut self) {
        self.0 = 0;
    }

    pub fn is_complete(&self) -> bool {
        self.0 == COMPLETE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_starts_at_zero() {
        assert_eq!(AnalysisProgress::new().value(), 0);
    }

    #[test]
    fn test_progress_is_monotonic_and_capped() {
        let mut progress = AnalysisProgress::new();
        let mut previous = 0;
        for _ in 0..20 {
            progress.tick();
            assert!(progress.value() >= previous);
            previous = progress.value();
        }
        // 何周期回してもレスポンス前は90%止まり
        assert_eq!(progress.value(), 90);
        assert!(!progress.is_complete());
    }

    #[test]
    fn test_progress_snaps_to_complete() {
        let mut progress = AnalysisProgress::new();
        progress.tick();
        progress.complete();
        assert_eq!(progress.value(), 100);
        assert!(progress.is_complete());
    }

    #[test]
    fn test_progress_reset() {
        let mut progress = AnalysisProgress::new();
        progress.tick();
        progress.complete();
        progress.reset();
        assert_eq!(progress.value(), 0);
    }
}
