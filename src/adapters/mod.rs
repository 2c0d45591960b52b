// Adapters Layer
// ファイルシステムとアーカイブへのアクセスを抽象化

pub mod archive;
pub mod directory_loader;
pub mod script_stream;
