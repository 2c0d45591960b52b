// アーカイブ対応ローダー
//
// ディレクトリ走査の結果にアーカイブ由来のマイグレーションを統合し、
// id昇順の単一の列として提供します。スクリプト本文の解決はChangeの
// 位置に応じてファイルシステムとアーカイブへ振り分けます。

use std::path::{Path, PathBuf};

use tracing::warn;

use crate::adapters::archive;
use crate::adapters::directory_loader::DirectoryLoader;
use crate::adapters::script_stream::ScriptStream;
use crate::core::change::Change;
use crate::core::config::{LoaderPaths, ScriptConfig};
use crate::core::error::{ScanError, ScriptReadError};
use crate::core::location::ScriptLocation;
use crate::core::report::ScanReport;
use crate::services::MigrationLoader;

/// アーカイブ対応ローダー
///
/// ディレクトリローダーの結果と、アーカイブディレクトリで発見した
/// アプリケーションアーカイブの同梱マイグレーションを統合します。
/// 呼び出しごとにファイルシステムとアーカイブを読み直し、状態は
/// 保持しません。
#[derive(Debug, Clone)]
pub struct ArchiveAwareLoader {
    /// ディレクトリローダー
    directory: DirectoryLoader,

    /// アーカイブディレクトリ
    archives_dir: PathBuf,
}

impl ArchiveAwareLoader {
    /// 新しいArchiveAwareLoaderを作成
    pub fn new(
        scripts_dir: impl Into<PathBuf>,
        archives_dir: impl Into<PathBuf>,
        config: ScriptConfig,
    ) -> Self {
        Self {
            directory: DirectoryLoader::new(scripts_dir, config),
            archives_dir: archives_dir.into(),
        }
    }

    /// パス設定からArchiveAwareLoaderを作成
    pub fn from_paths(paths: &LoaderPaths, config: ScriptConfig) -> Self {
        Self::new(paths.scripts_dir(), paths.archives_dir(), config)
    }

    /// ディレクトリローダーを取得
    pub fn directory(&self) -> &DirectoryLoader {
        &self.directory
    }

    /// アーカイブディレクトリを取得
    pub fn archives_dir(&self) -> &Path {
        &self.archives_dir
    }

    /// ディレクトリとアーカイブのマイグレーションを統合して列挙
    ///
    /// 読めないアーカイブは記録してスキップし、残りの走査を続行します。
    /// 結果はid昇順で、同一idは統合前の相対順（ディレクトリ分が先、
    /// 次に受理したアーカイブの名前順）を保ちます。
    pub fn list_migrations(&self) -> Result<ScanReport, ScanError> {
        let mut report = ScanReport::from_changes(self.directory.list_migrations()?);

        for archive_path in archive::discover_archives(&self.archives_dir)? {
            match archive::scan_archive(&archive_path) {
                Ok(found) => report.changes.extend(found),
                Err(error) => {
                    warn!(
                        archive = %archive_path.display(),
                        cause = %error.cause,
                        "skipping unreadable migration archive"
                    );
                    report.skipped_archives.push(error);
                }
            }
        }

        report.sort_by_id();
        Ok(report)
    }

    /// Changeのスクリプト本文を開く
    ///
    /// 位置がアーカイブエントリならアーカイブから、通常ファイルなら
    /// ディレクトリローダー経由で解決します。ストリームの所有権は
    /// 呼び出し側に移ります。
    pub fn open_script(
        &self,
        change: &Change,
        undo: bool,
    ) -> Result<ScriptStream, ScriptReadError> {
        match change.location() {
            ScriptLocation::PlainFile { .. } => self.directory.open_script(change, undo),
            ScriptLocation::ArchiveEntry { archive, entry } => {
                let reader = archive::open_entry(archive, entry)?;
                Ok(ScriptStream::new(reader, self.directory.config(), undo))
            }
        }
    }
}

impl MigrationLoader for ArchiveAwareLoader {
    fn list_migrations(&self) -> Result<ScanReport, ScanError> {
        ArchiveAwareLoader::list_migrations(self)
    }

    fn open_script(&self, change: &Change, undo: bool) -> Result<ScriptStream, ScriptReadError> {
        ArchiveAwareLoader::open_script(self, change, undo)
    }
}
