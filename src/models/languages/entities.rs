use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 可学习的语言
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/language.ts")]
pub struct Language {
    pub id: i64,
    /// ISO 639-1 代码，如 `es`、`ja`
    pub code: String,
    pub name: String,
    pub native_name: Option<String>,
    pub flag_emoji: Option<String>,
    pub is_active: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
