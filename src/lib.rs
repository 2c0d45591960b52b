// Sedimentライブラリのエントリーポイント
//
// モジュール構造:
// - core: コアドメインロジック（Changeモデル、ファイル名解析、エラー型、設定）
// - adapters: ファイルシステムとアーカイブへのアクセスを抽象化
// - services: ディレクトリとアーカイブを統合するローダー

pub mod core;
pub mod adapters;
pub mod services;
