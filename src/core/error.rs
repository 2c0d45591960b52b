// エラー型定義
//
// マイグレーション読み込みで使用されるカスタムエラー型を提供します。
// thiserrorを使用して、MigrationParseError, ArchiveScanError,
// ScanError, ScriptReadError を定義します。

use std::path::PathBuf;
use thiserror::Error;

/// ファイル名解析エラー
///
/// ファイル名（ディレクトリ上のファイルまたはアーカイブエントリ）が
/// `<id>_<説明>...` の規約に一致しない、またはidトークンが10進数として
/// 解析できない場合に発生します。該当アイテムに対して致命的で、
/// スキップとしては扱われません。
#[derive(Debug, Clone, Error)]
#[error("Cannot parse migration filename '{filename}': {cause}")]
pub struct MigrationParseError {
    /// 問題のファイル名
    pub filename: String,

    /// エラー原因
    pub cause: String,
}

impl MigrationParseError {
    /// 新しい解析エラーを作成
    pub fn new(filename: impl Into<String>, cause: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            cause: cause.into(),
        }
    }
}

/// アーカイブスキャンエラー
///
/// 受理されたアーカイブを開けない・読めない・内部エントリを解析できない
/// 場合の記録です。スキャン全体は中断せず、該当アーカイブのみが
/// スキップされ、スキャン結果に記録されます。
#[derive(Debug, Clone, Error)]
#[error("Cannot scan archive '{}': {cause}", .archive.display())]
pub struct ArchiveScanError {
    /// 問題のアーカイブのパス
    pub archive: PathBuf,

    /// エラー原因
    pub cause: String,
}

impl ArchiveScanError {
    /// 新しいアーカイブスキャンエラーを作成
    pub fn new(archive: impl Into<PathBuf>, cause: impl Into<String>) -> Self {
        Self {
            archive: archive.into(),
            cause: cause.into(),
        }
    }
}

/// スキャンエラー
///
/// マイグレーション列挙を中断させる致命的なエラーを表現します。
#[derive(Debug, Error)]
pub enum ScanError {
    /// スクリプトディレクトリを読めない
    #[error("Cannot read scripts directory '{}': {cause}", .path.display())]
    ScriptsDirectory {
        /// ディレクトリパス
        path: PathBuf,
        /// エラー原因
        cause: String,
    },

    /// アーカイブディレクトリを読めない
    #[error("Cannot read archives directory '{}': {cause}", .path.display())]
    ArchivesDirectory {
        /// ディレクトリパス
        path: PathBuf,
        /// エラー原因
        cause: String,
    },

    /// ファイル名の解析に失敗
    #[error(transparent)]
    Parse(#[from] MigrationParseError),
}

impl ScanError {
    /// スクリプトディレクトリのエラーかどうか
    pub fn is_scripts_directory(&self) -> bool {
        matches!(self, ScanError::ScriptsDirectory { .. })
    }

    /// アーカイブディレクトリのエラーかどうか
    pub fn is_archives_directory(&self) -> bool {
        matches!(self, ScanError::ArchivesDirectory { .. })
    }

    /// 解析エラーかどうか
    pub fn is_parse(&self) -> bool {
        matches!(self, ScanError::Parse(_))
    }
}

/// スクリプト読み込みエラー
///
/// スクリプト本文の解決時に発生するエラーを表現します。
/// 呼び出し側へ常に伝播し、黙殺されることはありません。
#[derive(Debug, Error)]
pub enum ScriptReadError {
    /// スクリプトファイルを開けない
    #[error("Cannot open script file '{}': {cause}", .path.display())]
    File {
        /// ファイルパス
        path: PathBuf,
        /// エラー原因
        cause: String,
    },

    /// アーカイブを開けない・読めない
    #[error("Cannot open archive '{}': {cause}", .archive.display())]
    Archive {
        /// アーカイブパス
        archive: PathBuf,
        /// エラー原因
        cause: String,
    },

    /// アーカイブ内にエントリが存在しない
    #[error("Entry '{entry}' not found in archive '{}'", .archive.display())]
    EntryNotFound {
        /// アーカイブパス
        archive: PathBuf,
        /// エントリパス
        entry: String,
    },
}

impl ScriptReadError {
    /// ファイルのエラーかどうか
    pub fn is_file(&self) -> bool {
        matches!(self, ScriptReadError::File { .. })
    }

    /// アーカイブのエラーかどうか
    pub fn is_archive(&self) -> bool {
        matches!(self, ScriptReadError::Archive { .. })
    }

    /// エントリ不在のエラーかどうか
    pub fn is_entry_not_found(&self) -> bool {
        matches!(self, ScriptReadError::EntryNotFound { .. })
    }
}
