// スクリプトストリーム
//
// 解決済みスクリプト本文への生バイトリーダーに、スクリプトパーサー側へ
// 引き渡す読み込みパラメータ（エンコーディング、置換プロパティ、undo指定）を
// 添えた束。本文のデコードと変数置換はパーサー側の責務です。

use std::fmt;
use std::io::{self, Read};

use crate::core::config::{ScriptConfig, ScriptProperties};

/// スクリプトストリーム
///
/// スクリプト本文の生バイトストリーム。所有権は呼び出し側に移り、
/// dropで背後のハンドルが解放されます。
pub struct ScriptStream {
    /// スクリプト本文の生バイトリーダー
    reader: Box<dyn Read + Send>,

    /// 文字エンコーディング名
    encoding: String,

    /// 置換プロパティ
    properties: ScriptProperties,

    /// undoセクションを対象とするかどうか
    undo: bool,
}

impl ScriptStream {
    /// 新しいスクリプトストリームを作成
    pub fn new(reader: Box<dyn Read + Send>, config: &ScriptConfig, undo: bool) -> Self {
        Self {
            reader,
            encoding: config.encoding.clone(),
            properties: config.properties.clone(),
            undo,
        }
    }

    /// 文字エンコーディング名を取得
    pub fn encoding(&self) -> &str {
        &self.encoding
    }

    /// 置換プロパティを取得
    pub fn properties(&self) -> &ScriptProperties {
        &self.properties
    }

    /// undoセクションを対象とするかどうか
    pub fn is_undo(&self) -> bool {
        self.undo
    }

    /// 生バイトリーダーを取り出す
    pub fn into_reader(self) -> Box<dyn Read + Send> {
        self.reader
    }
}

impl Read for ScriptStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.reader.read(buf)
    }
}

impl fmt::Debug for ScriptStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScriptStream")
            .field("encoding", &self.encoding)
            .field("properties", &self.properties)
            .field("undo", &self.undo)
            .finish_non_exhaustive()
    }
}
