use serde::Deserialize;
use ts_rs::TS;

use crate::models::common::pagination::deserialize_optional_bool;

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/language.ts")]
pub struct CreateLanguageRequest {
    pub code: String,
    pub name: String,
    pub native_name: Option<String>,
    pub flag_emoji: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/language.ts")]
pub struct UpdateLanguageRequest {
    pub code: Option<String>,
    pub name: Option<String>,
    pub native_name: Option<String>,
    pub flag_emoji: Option<String>,
    pub is_active: Option<bool>,
}

// 列表查询：非管理员忽略 include_inactive
#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/language.ts")]
pub struct LanguageListParams {
    #[serde(default, deserialize_with = "deserialize_optional_bool")]
    pub include_inactive: Option<bool>,
}
