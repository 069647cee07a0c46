//! # VizPortal Entities
//!
//! VizPortal API（非公開API）が返すプロジェクトとユーザー

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// VizPortal のIDは文字列または数値で返るため、文字列に正規化する
fn id_from_value(value: &Value) -> Result<String, String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(format!("expected a string or numeric id, got {}", other)),
    }
}

fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    id_from_value(&Value::deserialize(deserializer)?).map_err(de::Error::custom)
}

/// `null` と空文字は「なし」として扱う
fn optional_id(raw: &Map<String, Value>, key: &str) -> Result<Option<String>, String> {
    match raw.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.is_empty() => Ok(None),
        Some(value) => id_from_value(value).map(Some),
    }
}

/// VizPortal のプロジェクト
///
/// 突き合わせに使うフィールドは正規化して型付きで持ち、
/// 受け取ったレコードは `raw` にそのまま保持する。
/// 出力は `raw` を受け取ったとおりに書き戻し、`raw` にないキーだけ型付きフィールドから補う。
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(try_from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct VizPortalProject {
    /// VizPortal 内部ID
    pub id: String,
    /// REST API のプロジェクトIDと一致する LUID
    pub luid: String,
    pub name: String,
    pub top_level_project: bool,
    /// 親プロジェクトの VizPortal 内部ID
    pub parent_project_id: Option<String>,
    pub owner_id: Option<String>,
    /// 受け取った VizPortal レコード
    pub raw: Map<String, Value>,
}

impl TryFrom<Map<String, Value>> for VizPortalProject {
    type Error = String;

    fn try_from(raw: Map<String, Value>) -> Result<Self, Self::Error> {
        let id = raw
            .get("id")
            .ok_or_else(|| "missing field `id`".to_string())
            .and_then(id_from_value)?;
        let luid = match raw.get("luid") {
            Some(Value::String(s)) => s.clone(),
            Some(other) => return Err(format!("expected a string luid, got {}", other)),
            None => return Err("missing field `luid`".to_string()),
        };
        let name = raw
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        let top_level_project = raw
            .get("topLevelProject")
            .and_then(Value::as_bool)
            .unwrap_or(false);
        let parent_project_id = optional_id(&raw, "parentProjectId")?;
        let owner_id = optional_id(&raw, "ownerId")?;

        Ok(Self {
            id,
            luid,
            name,
            top_level_project,
            parent_project_id,
            owner_id,
            raw,
        })
    }
}

impl From<VizPortalProject> for Map<String, Value> {
    fn from(project: VizPortalProject) -> Self {
        let mut map = project.raw;
        map.entry("id").or_insert(Value::String(project.id));
        map.entry("luid").or_insert(Value::String(project.luid));
        map.entry("name").or_insert(Value::String(project.name));
        map.entry("topLevelProject").or_insert(Value::Bool(project.top_level_project));
        if let Some(parent_id) = project.parent_project_id {
            map.entry("parentProjectId").or_insert(Value::String(parent_id));
        }
        if let Some(owner_id) = project.owner_id {
            map.entry("ownerId").or_insert(Value::String(owner_id));
        }
        map
    }
}

/// VizPortal のユーザー
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VizPortalUser {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
}

/// `getProjects` の結果（プロジェクトと、その所有者ユーザー）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VizPortalCatalog {
    pub projects: Vec<VizPortalProject>,
    pub users: Vec<VizPortalUser>,
}

impl VizPortalCatalog {
    pub fn new(projects: Vec<VizPortalProject>, users: Vec<VizPortalUser>) -> Self {
        Self { projects, users }
    }

    /// IDでユーザーを検索
    pub fn user_by_id(&self, user_id: &str) -> Option<&VizPortalUser> {
        self.users.iter().find(|user| user.id == user_id)
    }
}
