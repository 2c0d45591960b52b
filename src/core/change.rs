// マイグレーションChangeモデル
//
// 1件のマイグレーションを表現するドメインモデルと、ファイル名規約
// `<id>_<トークン>[_<トークン>...].<拡張子>` の解析を提供します。

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::core::error::MigrationParseError;
use crate::core::location::ScriptLocation;

/// マイグレーションChange
///
/// id（適用順序を決める唯一のキー）、説明、スクリプト位置を保持します。
/// 構築後は不変で、スキャンのたびに新しいインスタンスが作られます。
/// マージ結果におけるidの一意性は検証されません（既知のギャップ）。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Change {
    /// マイグレーションID（任意精度10進数）
    id: BigDecimal,

    /// ファイル名から導出した説明（トークンを空白で連結）
    description: String,

    /// スクリプト位置
    location: ScriptLocation,
}

impl Change {
    /// 新しいChangeを作成
    pub fn new(id: BigDecimal, description: impl Into<String>, location: ScriptLocation) -> Self {
        Self {
            id,
            description: description.into(),
            location,
        }
    }

    /// ファイル名を解析してChangeを構築
    ///
    /// # Arguments
    ///
    /// * `filename` - `<id>_<トークン>...` 規約に従うベースファイル名
    /// * `location` - スクリプト本文の位置
    ///
    /// # Returns
    ///
    /// 解析結果のChange。idトークンが10進数として解析できない場合はエラー
    pub fn from_filename(
        filename: &str,
        location: ScriptLocation,
    ) -> Result<Self, MigrationParseError> {
        let (id, description) = parse_filename(filename)?;
        Ok(Self::new(id, description, location))
    }

    /// マイグレーションIDを取得
    pub fn id(&self) -> &BigDecimal {
        &self.id
    }

    /// 説明を取得
    pub fn description(&self) -> &str {
        &self.description
    }

    /// スクリプト位置を取得
    pub fn location(&self) -> &ScriptLocation {
        &self.location
    }

    /// 識別文字列を取得
    ///
    /// 通常ファイルはパス、アーカイブエントリは
    /// `アーカイブパス!エントリパス` の複合形式で表現されます。
    pub fn identifier(&self) -> String {
        self.location.to_string()
    }
}

/// ファイル名規約 `<id>_<トークン>[_<トークン>...].<拡張子>` を解析
///
/// 最初の `.` より前の部分を `_` で分割し、先頭トークンを10進数のid、
/// 残りを空白で連結した説明として返します。idが解析できない場合は
/// スキップではなくエラーになります。
pub fn parse_filename(filename: &str) -> Result<(BigDecimal, String), MigrationParseError> {
    let base = filename.split('.').next().unwrap_or_default();
    let mut tokens = base.split('_');

    let id_token = tokens.next().unwrap_or_default();
    let id = BigDecimal::from_str(id_token).map_err(|e| {
        MigrationParseError::new(filename, format!("invalid id token '{}': {}", id_token, e))
    })?;

    let description = tokens.collect::<Vec<_>>().join(" ");
    Ok((id, description))
}
