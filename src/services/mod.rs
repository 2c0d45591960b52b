// Services Layer
// ディレクトリとアーカイブを統合するローダーサービス

pub mod archive_aware_loader;

use crate::adapters::script_stream::ScriptStream;
use crate::core::change::Change;
use crate::core::error::{ScanError, ScriptReadError};
use crate::core::report::ScanReport;

/// マイグレーションローダーの共通インターフェース
///
/// マイグレーションの列挙とスクリプト本文の解決を提供します。
/// 実行レイヤーはこのトレイト経由でローダーを利用します。
pub trait MigrationLoader {
    /// マイグレーションを列挙してスキャン結果を返す
    fn list_migrations(&self) -> Result<ScanReport, ScanError>;

    /// Changeのスクリプト本文を開く
    ///
    /// 返されたストリームの所有権は呼び出し側に移ります。
    fn open_script(&self, change: &Change, undo: bool) -> Result<ScriptStream, ScriptReadError>;
}
