//! # ユースケース層
//!
//! ハンドラとリポジトリの間に位置し、操作ごとのログ出力と
//! エラー変換を担う。

pub mod todo;

pub use todo::TodoUseCaseImpl;
