use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "safe-street")]
#[command(about = "道路損傷AI解析クライアント", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 道路写真を1枚送信して損傷レポートを表示
    Analyze {
        /// 画像ファイルのパス
        #[arg(required = true)]
        image: PathBuf,

        /// レポート送信先メールアドレス（設定ファイルより優先）
        #[arg(short, long)]
        email: Option<String>,

        /// 解析結果をJSONで出力
        #[arg(long)]
        json: bool,
    },

    /// 対話モード（選択 → 解析 → 結果 → 次の写真）
    Interactive,

    /// バックエンドの死活確認
    Health,

    /// 設定の表示・変更（次回起動から有効）
    Config {
        /// 設定を表示
        #[arg(long)]
        show: bool,

        /// ベースURL（例: http://10.0.2.2:8000）
        #[arg(long)]
        set_base_url: Option<String>,

        /// 解析エンドポイントのパス
        #[arg(long)]
        set_endpoint: Option<String>,

        /// 画像のmultipartフィールド名
        #[arg(long)]
        set_field: Option<String>,

        /// レポート送信先メールアドレス
        #[arg(long)]
        set_email: Option<String>,
    },
}
