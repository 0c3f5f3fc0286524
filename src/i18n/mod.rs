/// 国際化メッセージ管理
///
/// 言語設定の優先順位:
/// 1. UNDERBAR_LANG 環境変数（underbar専用の設定）
/// 2. LANG 環境変数（システムのロケール設定）
/// 3. デフォルト: en

// サブモジュール
mod en_messages;
mod ja_messages;
mod messages;
mod msg_key;

// 公開エクスポート
pub use en_messages::EN_MSGS;
pub use ja_messages::JA_MSGS;
pub use messages::{fmt_msg, messages, msg, Lang, Messages};
pub use msg_key::MsgKey;
