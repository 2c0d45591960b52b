// ディレクトリローダー
//
// 設定されたスクリプトディレクトリを非再帰で走査し、規約に一致する
// ファイルをChangeとして列挙します。スクリプト本文の解決も行います。

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use crate::adapters::script_stream::ScriptStream;
use crate::core::change::Change;
use crate::core::config::ScriptConfig;
use crate::core::error::{ScanError, ScriptReadError};
use crate::core::location::ScriptLocation;
use crate::core::report::ScanReport;
use crate::services::MigrationLoader;

/// マイグレーションスクリプトの拡張子
pub const SCRIPT_EXTENSION: &str = ".sql";

/// マイグレーションとして列挙しない特別なスクリプト
pub const SPECIAL_FILES: [&str; 2] = ["bootstrap.sql", "onabort.sql"];

/// ディレクトリローダー
///
/// スクリプトディレクトリ上の通常ファイルからマイグレーションを
/// 読み込みます。列挙順の確定は上位レイヤーの責務です。
#[derive(Debug, Clone)]
pub struct DirectoryLoader {
    /// スクリプトディレクトリ
    scripts_dir: PathBuf,

    /// スクリプト読み込み設定
    config: ScriptConfig,
}

impl DirectoryLoader {
    /// 新しいDirectoryLoaderを作成
    pub fn new(scripts_dir: impl Into<PathBuf>, config: ScriptConfig) -> Self {
        Self {
            scripts_dir: scripts_dir.into(),
            config,
        }
    }

    /// スクリプトディレクトリを取得
    pub fn scripts_dir(&self) -> &Path {
        &self.scripts_dir
    }

    /// スクリプト読み込み設定を取得
    pub fn config(&self) -> &ScriptConfig {
        &self.config
    }

    /// ディレクトリ上のマイグレーションを列挙
    ///
    /// ファイル名を辞書順に整列してから解析するため、入力が変わらない
    /// 限り同じ順序の結果を返します。ディレクトリが存在しない場合は
    /// 空の列を返します。規約に一致するファイル名の解析失敗は
    /// スキップではなくエラーです。
    pub fn list_migrations(&self) -> Result<Vec<Change>, ScanError> {
        let mut changes = Vec::new();
        if !self.scripts_dir.is_dir() {
            return Ok(changes);
        }

        let entries = fs::read_dir(&self.scripts_dir).map_err(|e| ScanError::ScriptsDirectory {
            path: self.scripts_dir.clone(),
            cause: e.to_string(),
        })?;

        let mut filenames = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| ScanError::ScriptsDirectory {
                path: self.scripts_dir.clone(),
                cause: e.to_string(),
            })?;
            if !entry.path().is_file() {
                continue;
            }
            let file_name = entry.file_name();
            let Some(name) = file_name.to_str() else {
                continue;
            };
            if Self::qualifies(name) {
                filenames.push(name.to_string());
            }
        }
        filenames.sort();

        for name in &filenames {
            let location = ScriptLocation::plain_file(self.scripts_dir.join(name));
            changes.push(Change::from_filename(name, location)?);
        }
        Ok(changes)
    }

    /// マイグレーションとして列挙する対象かどうか
    fn qualifies(name: &str) -> bool {
        name.ends_with(SCRIPT_EXTENSION) && !SPECIAL_FILES.contains(&name)
    }

    /// Changeのスクリプト本文を開く
    ///
    /// 返されたストリームの所有権は呼び出し側に移ります。
    /// アーカイブエントリのChangeはこのローダーでは解決できません。
    pub fn open_script(
        &self,
        change: &Change,
        undo: bool,
    ) -> Result<ScriptStream, ScriptReadError> {
        let ScriptLocation::PlainFile { path } = change.location() else {
            return Err(ScriptReadError::File {
                path: PathBuf::from(change.identifier()),
                cause: "not a plain script file".to_string(),
            });
        };

        let file = File::open(path).map_err(|e| ScriptReadError::File {
            path: path.clone(),
            cause: e.to_string(),
        })?;
        Ok(ScriptStream::new(Box::new(file), &self.config, undo))
    }
}

impl MigrationLoader for DirectoryLoader {
    fn list_migrations(&self) -> Result<ScanReport, ScanError> {
        Ok(ScanReport::from_changes(DirectoryLoader::list_migrations(
            self,
        )?))
    }

    fn open_script(&self, change: &Change, undo: bool) -> Result<ScriptStream, ScriptReadError> {
        DirectoryLoader::open_script(self, change, undo)
    }
}
