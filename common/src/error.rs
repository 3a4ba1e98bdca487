//! エラー型定義

use thiserror::Error;

/// 読み取りフロー共通エラー型
///
/// 画面・CLIのどちらからも通知として表示されるため、
/// メッセージはそのままユーザー向けの文言になっている。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// 対応していないファイルが選択された（ネットワーク呼び出し前に棄却）
    #[error("Unsupported image file: {0}")]
    Selection(String),

    /// 解析エンドポイントが非2xxを返した
    #[error("Server error: {0}")]
    AnalysisHttp(u16),

    /// 解析レスポンスのボディがJSONとして解釈できない
    #[error("Invalid response format from server")]
    AnalysisFormat,

    /// 解析エンドポイントがエラーを報告した、または読み取り値が欠落
    #[error("{0}")]
    AnalysisSemantic(String),

    /// 送信エンドポイントが非2xxを返した
    #[error("Failed to submit reading")]
    SubmissionHttp(u16),

    /// 接続レベルの失敗（fetch拒否・DNS・タイムアウト等）
    #[error("Network error: {0}")]
    Network(String),

    /// 状態遷移ガード違反（UI側で操作を無効化しているため通常は到達しない）
    #[error("Invalid operation: {0}")]
    State(&'static str),
}

impl Error {
    /// 通知トーストに表示する文言
    ///
    /// 5xx系とネットワーク断は定型の案内文に置き換え、
    /// それ以外はエラー本文をそのまま見せる。
    pub fn user_message(&self) -> String {
        match self {
            Error::AnalysisHttp(status) if *status >= 500 => {
                "The server is temporarily unavailable. Please try again later or enter the reading manually.".to_string()
            }
            Error::Network(_) => {
                "Network connection error. Please check your internet connection and try again.".to_string()
            }
            Error::SubmissionHttp(_) => {
                "Failed to submit reading. Please try again or start over.".to_string()
            }
            other => other.to_string(),
        }
    }

    /// 再試行・手入力の二択を提示すべき解析系エラーか
    pub fn is_analysis_failure(&self) -> bool {
        matches!(
            self,
            Error::AnalysisHttp(_)
                | Error::AnalysisFormat
                | Error::AnalysisSemantic(_)
                | Error::Network(_)
        )
    }
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_selection() {
        let error = Error::Selection("document.pdf".to_string());
        assert_eq!(format!("{}", error), "Unsupported image file: document.pdf");
    }

    #[test]
    fn test_error_display_semantic_passthrough() {
        // サーバー報告のメッセージはそのまま表示する
        let error = Error::AnalysisSemantic("blurry image".to_string());
        assert_eq!(format!("{}", error), "blurry image");
    }

    #[test]
    fn test_user_message_server_unavailable() {
        let error = Error::AnalysisHttp(500);
        let message = error.user_message();
        assert!(message.contains("temporarily unavailable"));
        assert!(message.contains("manually"));
    }

    #[test]
    fn test_user_message_non_5xx_keeps_status() {
        let error = Error::AnalysisHttp(404);
        assert_eq!(error.user_message(), "Server error: 404");
    }

    #[test]
    fn test_user_message_network() {
        let error = Error::Network("connection refused".to_string());
        assert!(error.user_message().contains("internet connection"));
    }

    #[test]
    fn test_is_analysis_failure() {
        assert!(Error::AnalysisFormat.is_analysis_failure());
        assert!(Error::AnalysisHttp(502).is_analysis_failure());
        assert!(Error::AnalysisSemantic("x".into()).is_analysis_failure());
        assert!(!Error::SubmissionHttp(500).is_analysis_failure());
        assert!(!Error::Selection("a.gif".into()).is_analysis_failure());
    }
}
