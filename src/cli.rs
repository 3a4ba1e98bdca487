use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "meter-ai")]
#[command(about = "水道メーター写真のAI読み取り・検針値送信ツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 送信ペイロードなどの詳細を出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// メーター写真を解析し、確認のうえ検針値を送信する
    Read {
        /// メーター写真のパス（JPEG/PNG）
        #[arg(required_unless_present = "manual")]
        photo: Option<PathBuf>,

        /// 解析をスキップして手入力する
        #[arg(short, long)]
        manual: bool,

        /// 検出値を確認なしで送信する
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// 検針値を直接送信する（解析なし）
    Submit {
        /// 検針値（数字のみ）
        #[arg(required = true)]
        reading: String,
    },

    /// Webhookエンドポイントの設定
    Config {
        /// 画像解析WebhookのURLを設定
        #[arg(long)]
        set_upload_url: Option<String>,

        /// 検針値送信WebhookのURLを設定
        #[arg(long)]
        set_submit_url: Option<String>,

        /// 現在の設定を表示
        #[arg(long)]
        show: bool,
    },
}
