// スクリプト位置
//
// マイグレーションスクリプトの所在（ディレクトリ上の通常ファイル、または
// アーカイブ内のエントリ）をタグ付きバリアントとして表現します。
// 文字列表現は `パス` または `アーカイブパス!エントリパス` の2形式です。

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// 複合識別子でアーカイブパスとエントリパスを区切る文字
///
/// 通常のファイルパスには現れないことが前提の規約。
pub const ARCHIVE_SEPARATOR: char = '!';

/// スクリプト位置
///
/// Changeのスクリプト本文がどこにあるかを表現します。
/// 区切り文字の有無による文字列判定ではなく、バリアントへの
/// パターンマッチで解決経路を選択します。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScriptLocation {
    /// ディレクトリ上の通常ファイル
    PlainFile {
        /// スクリプトファイルのパス
        path: PathBuf,
    },

    /// アーカイブ内のエントリ
    ArchiveEntry {
        /// アーカイブファイルのパス
        archive: PathBuf,
        /// アーカイブ内のエントリパス
        entry: String,
    },
}

impl ScriptLocation {
    /// 通常ファイルの位置を作成
    pub fn plain_file(path: impl Into<PathBuf>) -> Self {
        ScriptLocation::PlainFile { path: path.into() }
    }

    /// アーカイブエントリの位置を作成
    pub fn archive_entry(archive: impl Into<PathBuf>, entry: impl Into<String>) -> Self {
        ScriptLocation::ArchiveEntry {
            archive: archive.into(),
            entry: entry.into(),
        }
    }

    /// 識別文字列から位置を復元
    ///
    /// 区切り文字を含む場合は最初の出現で分割してアーカイブエントリ、
    /// 含まない場合は通常ファイルとして解釈します。
    pub fn parse(identifier: &str) -> Self {
        match identifier.split_once(ARCHIVE_SEPARATOR) {
            Some((archive, entry)) => ScriptLocation::archive_entry(archive, entry),
            None => ScriptLocation::plain_file(identifier),
        }
    }

    /// アーカイブエントリかどうか
    pub fn is_archive_entry(&self) -> bool {
        matches!(self, ScriptLocation::ArchiveEntry { .. })
    }

    /// 通常ファイルかどうか
    pub fn is_plain_file(&self) -> bool {
        matches!(self, ScriptLocation::PlainFile { .. })
    }

    /// 位置が参照するアーカイブのパス（通常ファイルの場合はNone）
    pub fn archive_path(&self) -> Option<&Path> {
        match self {
            ScriptLocation::PlainFile { .. } => None,
            ScriptLocation::ArchiveEntry { archive, .. } => Some(archive),
        }
    }
}

impl fmt::Display for ScriptLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScriptLocation::PlainFile { path } => write!(f, "{}", path.display()),
            ScriptLocation::ArchiveEntry { archive, entry } => {
                write!(f, "{}{}{}", archive.display(), ARCHIVE_SEPARATOR, entry)
            }
        }
    }
}
