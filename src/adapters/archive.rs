// アーカイブアダプター
//
// アーカイブディレクトリからの候補アーカイブの発見、アーカイブ内
// エントリのChangeへの抽出、エントリ本文の読み出しを行います。
// アーカイブのハンドルは各関数の呼び出し内で開閉され、外に出ません。

use std::fs::{self, File};
use std::io::{Cursor, Read};
use std::path::{Path, PathBuf};

use zip::result::ZipError;
use zip::ZipArchive;

use crate::core::change::Change;
use crate::core::error::{ArchiveScanError, ScanError, ScriptReadError};
use crate::core::location::ScriptLocation;

/// マイグレーションアーカイブの拡張子
pub const ARCHIVE_EXTENSION: &str = ".jar";

/// マイグレーション同梱アーカイブを示すartifact idの接尾辞
pub const MARKER_SUFFIX: &str = "_app";

/// アーカイブ内でマイグレーションを配置する固定プレフィックス
pub const EMBEDDED_PREFIX: &str = "META-INF/migrate/";

/// アプリケーションアーカイブの命名規約に一致するかどうか
///
/// `<グループ>.<artifactId><接尾辞>-<バージョン>.jar` の形式を想定し、
/// 最初の `-` より前の部分の最後の `.` 以降をartifact idとみなして、
/// それが接尾辞で終わるものだけを受理します。内容の検査は行わない
/// 命名規約ベースの判定で、差し替え前提でこの関数に隔離しています。
pub fn is_application_archive(name: &str) -> bool {
    if !name.ends_with(ARCHIVE_EXTENSION) {
        return false;
    }
    let Some(hyphen) = name.find('-') else {
        return false;
    };
    if hyphen == 0 {
        return false;
    }
    let stem = &name[..hyphen];
    let Some(dot) = stem.rfind('.') else {
        return false;
    };
    if dot == 0 {
        return false;
    }
    stem[dot + 1..].ends_with(MARKER_SUFFIX)
}

/// アーカイブディレクトリから候補アーカイブを列挙
///
/// 命名規約に一致したアーカイブのパスを名前の辞書順で返します。
/// ディレクトリが存在しない場合は空の列を返します。
pub fn discover_archives(archives_dir: &Path) -> Result<Vec<PathBuf>, ScanError> {
    if !archives_dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut names = Vec::new();
    let entries = fs::read_dir(archives_dir).map_err(|e| ScanError::ArchivesDirectory {
        path: archives_dir.to_path_buf(),
        cause: e.to_string(),
    })?;

    for entry in entries {
        let entry = entry.map_err(|e| ScanError::ArchivesDirectory {
            path: archives_dir.to_path_buf(),
            cause: e.to_string(),
        })?;
        if !entry.path().is_file() {
            continue;
        }
        let file_name = entry.file_name();
        let Some(name) = file_name.to_str() else {
            continue;
        };
        if is_application_archive(name) {
            names.push(name.to_string());
        }
    }
    names.sort();

    Ok(names
        .into_iter()
        .map(|name| archives_dir.join(name))
        .collect())
}

/// アーカイブを走査し、同梱マイグレーションをChangeとして抽出
///
/// 固定プレフィックス配下のファイルエントリだけが対象です。
/// エントリ名の解析失敗を含め、あらゆる失敗はこのアーカイブ全体の
/// 失敗として返され、以降のエントリは失われます。
pub fn scan_archive(archive_path: &Path) -> Result<Vec<Change>, ArchiveScanError> {
    let file = File::open(archive_path)
        .map_err(|e| ArchiveScanError::new(archive_path, e.to_string()))?;
    let mut archive = ZipArchive::new(file)
        .map_err(|e| ArchiveScanError::new(archive_path, e.to_string()))?;

    let mut changes = Vec::new();
    for index in 0..archive.len() {
        let entry = archive
            .by_index(index)
            .map_err(|e| ArchiveScanError::new(archive_path, e.to_string()))?;
        if entry.is_dir() {
            continue;
        }

        let entry_path = entry.name().to_string();
        if !entry_path.starts_with(EMBEDDED_PREFIX) {
            continue;
        }

        let filename = entry_path.rsplit('/').next().unwrap_or(&entry_path);
        let location = ScriptLocation::archive_entry(archive_path, &entry_path);
        let change = Change::from_filename(filename, location)
            .map_err(|e| ArchiveScanError::new(archive_path, e.to_string()))?;
        changes.push(change);
    }
    Ok(changes)
}

/// アーカイブ内エントリの本文を読み出す
///
/// エントリ全体をメモリへ展開し、そのバイト列へのリーダーを返します。
/// アーカイブのハンドルはこの呼び出しの中で閉じられます。
pub fn open_entry(
    archive_path: &Path,
    entry_path: &str,
) -> Result<Box<dyn Read + Send>, ScriptReadError> {
    let file = File::open(archive_path).map_err(|e| ScriptReadError::Archive {
        archive: archive_path.to_path_buf(),
        cause: e.to_string(),
    })?;
    let mut archive = ZipArchive::new(file).map_err(|e| ScriptReadError::Archive {
        archive: archive_path.to_path_buf(),
        cause: e.to_string(),
    })?;

    let mut entry = match archive.by_name(entry_path) {
        Ok(entry) => entry,
        Err(ZipError::FileNotFound) => {
            return Err(ScriptReadError::EntryNotFound {
                archive: archive_path.to_path_buf(),
                entry: entry_path.to_string(),
            });
        }
        Err(e) => {
            return Err(ScriptReadError::Archive {
                archive: archive_path.to_path_buf(),
                cause: e.to_string(),
            });
        }
    };

    let mut body = Vec::with_capacity(entry.size() as usize);
    entry
        .read_to_end(&mut body)
        .map_err(|e| ScriptReadError::Archive {
            archive: archive_path.to_path_buf(),
            cause: e.to_string(),
        })?;
    Ok(Box::new(Cursor::new(body)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_marker_suffixed_artifact() {
        assert!(is_application_archive("com.example.foo_app-1.0.jar"));
        assert!(is_application_archive(
            "org.acme.billing_app-2.1.3-SNAPSHOT.jar"
        ));
    }

    #[test]
    fn test_rejects_artifact_without_marker() {
        assert!(!is_application_archive("com.example.foo-1.0.jar"));
        assert!(!is_application_archive("com.example.app_suffix-1.0.jar"));
    }

    #[test]
    fn test_rejects_wrong_extension() {
        assert!(!is_application_archive("com.example.foo_app-1.0.zip"));
        assert!(!is_application_archive("com.example.foo_app-1.0.jar.bak"));
    }

    #[test]
    fn test_rejects_name_without_version_separator() {
        assert!(!is_application_archive("com.example.foo_app.jar"));
    }

    #[test]
    fn test_rejects_name_without_group_segment() {
        assert!(!is_application_archive("foo_app-1.0.jar"));
    }

    #[test]
    fn test_rejects_leading_separators() {
        assert!(!is_application_archive("-com.example.foo_app.jar"));
        assert!(!is_application_archive(".foo_app-1.0.jar"));
    }
}
