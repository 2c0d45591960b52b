// スキャン結果
//
// マージ済みのChange列と、読めずにスキップされたアーカイブの
// 失敗記録を併せて保持します。アーカイブ単位の部分失敗を例外の
// 伝播ではなく明示的な記録として報告します。

use crate::core::change::Change;
use crate::core::error::ArchiveScanError;

/// スキャン結果
///
/// 成功したChangeの列と、スキップされたアーカイブのエラー記録を
/// 併せて報告します。idの重複は検証されません（既知のギャップ）。
#[derive(Debug, Clone, Default)]
pub struct ScanReport {
    /// マイグレーションChangeの列
    pub changes: Vec<Change>,

    /// スキップされたアーカイブのエラー記録
    pub skipped_archives: Vec<ArchiveScanError>,
}

impl ScanReport {
    /// 空のスキャン結果を作成
    pub fn new() -> Self {
        Self::default()
    }

    /// Change列からスキャン結果を作成
    pub fn from_changes(changes: Vec<Change>) -> Self {
        Self {
            changes,
            skipped_archives: Vec::new(),
        }
    }

    /// すべてのアーカイブを読めたかどうか
    pub fn is_complete(&self) -> bool {
        self.skipped_archives.is_empty()
    }

    /// Changeの数を取得
    pub fn count(&self) -> usize {
        self.changes.len()
    }

    /// Change列だけを取り出す
    pub fn into_changes(self) -> Vec<Change> {
        self.changes
    }

    /// id昇順に整列
    ///
    /// 安定ソートのため、同一idのChangeは整列前の相対順を保ちます。
    pub fn sort_by_id(&mut self) {
        self.changes.sort_by(|a, b| a.id().cmp(b.id()));
    }
}
