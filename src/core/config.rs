// ローダー設定
//
// スクリプト読み込みパラメータ（文字エンコーディングと置換プロパティ）と、
// スクリプト・アーカイブ各ディレクトリのパス解決を管理します。
// 設定ファイルからの読み込み自体は呼び出し側の責務です。

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// 置換プロパティ
///
/// スクリプト本文中の変数置換に使用されるキーと値の組。置換処理は
/// スクリプトパーサー側の責務で、ローダーは保持して引き渡すだけです。
pub type ScriptProperties = BTreeMap<String, String>;

/// スクリプト読み込み設定
///
/// スクリプト本文の解釈に必要なパラメータを表現します。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptConfig {
    /// スクリプトの文字エンコーディング名
    #[serde(default = "default_encoding")]
    pub encoding: String,

    /// 置換プロパティ
    #[serde(default)]
    pub properties: ScriptProperties,
}

fn default_encoding() -> String {
    "UTF-8".to_string()
}

impl ScriptConfig {
    /// 新しいスクリプト設定を作成
    pub fn new(encoding: impl Into<String>, properties: ScriptProperties) -> Self {
        Self {
            encoding: encoding.into(),
            properties,
        }
    }

    /// エンコーディングのみ指定してスクリプト設定を作成
    pub fn with_encoding(encoding: impl Into<String>) -> Self {
        Self::new(encoding, ScriptProperties::new())
    }
}

impl Default for ScriptConfig {
    fn default() -> Self {
        Self::with_encoding(default_encoding())
    }
}

/// パス設定
///
/// ベースディレクトリからの相対でスクリプトディレクトリと
/// アーカイブディレクトリを解決します。個別の上書きも可能です。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoaderPaths {
    /// ベースディレクトリ
    #[serde(default = "default_base_dir")]
    pub base_dir: PathBuf,

    /// スクリプトディレクトリの上書き（未指定時は base_dir/scripts）
    #[serde(default)]
    pub scripts: Option<PathBuf>,

    /// アーカイブディレクトリの上書き（未指定時は base_dir/archives）
    #[serde(default)]
    pub archives: Option<PathBuf>,
}

fn default_base_dir() -> PathBuf {
    PathBuf::from("./")
}

impl LoaderPaths {
    /// ベースディレクトリを指定してパス設定を作成
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            scripts: None,
            archives: None,
        }
    }

    /// スクリプトディレクトリを上書き
    pub fn with_scripts(mut self, scripts: impl Into<PathBuf>) -> Self {
        self.scripts = Some(scripts.into());
        self
    }

    /// アーカイブディレクトリを上書き
    pub fn with_archives(mut self, archives: impl Into<PathBuf>) -> Self {
        self.archives = Some(archives.into());
        self
    }

    /// スクリプトディレクトリを解決
    pub fn scripts_dir(&self) -> PathBuf {
        self.scripts
            .clone()
            .unwrap_or_else(|| self.base_dir.join("scripts"))
    }

    /// アーカイブディレクトリを解決
    pub fn archives_dir(&self) -> PathBuf {
        self.archives
            .clone()
            .unwrap_or_else(|| self.base_dir.join("archives"))
    }
}

impl Default for LoaderPaths {
    fn default() -> Self {
        Self::new(default_base_dir())
    }
}
