use serde::{Deserialize, Serialize};

pub mod date;

pub use date::MonthKey;

// =========================================================
// 常量定义 (Constants)
// =========================================================

/// LocalStorage 中存放 JSON 序列化 [`User`] 的键。
pub const STORAGE_USER_KEY: &str = "user";
/// LocalStorage 中存放不透明 Bearer Token 的键。
pub const STORAGE_TOKEN_KEY: &str = "token";

// =========================================================
// 领域模型 (Domain Models)
// =========================================================

/// 已认证用户。整体替换，不做字段级更新。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(rename = "isAdmin", default)]
    pub is_admin: bool,
}

/// 大多数非 2xx 响应使用的通用消息信封。
///
/// 后端填哪个字段并不一致，[`ApiMessage::first_message`] 取其中存在的那个。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiMessage {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ApiMessage {
    pub fn first_message(&self) -> Option<&str> {
        self.message
            .as_deref()
            .or(self.error.as_deref())
            .filter(|s| !s.is_empty())
    }
}

// =========================================================
// 认证 (Auth)
// =========================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignInResponse {
    pub token: String,
    pub user: User,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignUpRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateProfileRequest {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateProfileResponse {
    pub user: User,
    #[serde(default)]
    pub message: Option<String>,
}

// =========================================================
// 用户管理 (Admin Users)
// =========================================================

/// GET /users 的响应。后端把列表包了两层。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsersListResponse {
    pub data: UsersData,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsersData {
    pub users: Vec<User>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(rename = "isAdmin")]
    pub is_admin: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToggleAdminRequest {
    #[serde(rename = "isAdmin")]
    pub is_admin: bool,
}

/// 创建用户与切换管理员共用的响应结构。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserActionResponse {
    pub user: User,
    #[serde(default)]
    pub message: Option<String>,
}

// =========================================================
// 表彰 (Recognitions)
// =========================================================

/// POST /recognitions 的载荷。此端点用 snake_case，与其余接口不同。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRecognitionRequest {
    pub sender_id: i64,
    pub recipient_email: String,
    pub cc_emails: Vec<String>,
    pub subject: String,
    pub message: String,
    #[serde(default)]
    pub image_id: Option<i64>,
}

// =========================================================
// 排行榜 (Rankings)
// =========================================================

/// 排行榜的一行。收件人从未注册账号时 `name` 缺失。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingEntry {
    #[serde(default)]
    pub name: Option<String>,
    pub email: String,
    pub count: u32,
}

impl RankingEntry {
    /// 头像缩写：取显示名首尾两个词的首字母；名字缺失时退回 `?`。
    pub fn initials(&self) -> String {
        let name = match self.name.as_deref() {
            Some(n) if !n.trim().is_empty() => n.trim(),
            _ => return "?".to_string(),
        };
        let mut words = name.split_whitespace();
        let first = words.next().and_then(|w| w.chars().next());
        let last = words.next_back().and_then(|w| w.chars().next());
        match (first, last) {
            (Some(f), Some(l)) => format!("{}{}", f, l).to_uppercase(),
            (Some(f), None) => f.to_uppercase().to_string(),
            _ => "?".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingsResponse {
    #[serde(default)]
    pub top_senders: Vec<RankingEntry>,
    #[serde(default)]
    pub top_receivers: Vec<RankingEntry>,
}

impl RankingsResponse {
    pub fn is_empty(&self) -> bool {
        self.top_senders.is_empty() && self.top_receivers.is_empty()
    }
}

// =========================================================
// 仪表盘 (Dashboard)
// =========================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardData {
    #[serde(default)]
    pub users_count: u32,
    #[serde(default)]
    pub recognitions_count: u32,
    #[serde(default)]
    pub monthly_data: Vec<MonthlyCount>,
    #[serde(default)]
    pub monthly_rankings: Vec<MonthlyRankingEntry>,
}

impl DashboardData {
    /// 覆盖窗口内的月均表彰数，四舍五入到整数。
    pub fn monthly_average(&self) -> u32 {
        let months = self.monthly_data.len().max(1) as f64;
        (f64::from(self.recognitions_count) / months).round() as u32
    }
}

/// 单月发送的表彰数（`month` 为 `YYYY-MM`）。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyCount {
    pub month: String,
    pub count: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RankingKind {
    Sender,
    Receiver,
}

/// 扁平化的历史排行记录；仪表盘在客户端按月份与方向重新分组。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyRankingEntry {
    pub month: String,
    #[serde(rename = "type")]
    pub kind: RankingKind,
    #[serde(default)]
    pub name: Option<String>,
    pub email: String,
    pub count: u32,
}

// =========================================================
// 图片 (Images)
// =========================================================

/// 可供选择的表彰图片。公开列表把说明字段叫 `alt_text`，
/// 管理列表叫 `alt`，两者都接受。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageAsset {
    pub id: i64,
    pub url: String,
    #[serde(default, alias = "alt")]
    pub alt_text: Option<String>,
}

impl ImageAsset {
    pub fn caption(&self) -> &str {
        self.alt_text.as_deref().unwrap_or("recognition image")
    }
}

// =========================================================
// AI 文案 (AI message generation)
// =========================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateMessageRequest {
    pub recognition_type: String,
    pub qualities: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateMessageResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_round_trips_camel_case_admin_flag() {
        let json = r#"{"id":1,"name":"A","email":"a@b.com","isAdmin":true}"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert!(user.is_admin);
        let back = serde_json::to_string(&user).unwrap();
        assert!(back.contains("\"isAdmin\":true"));
    }

    #[test]
    fn user_admin_flag_defaults_to_false() {
        let user: User =
            serde_json::from_str(r#"{"id":2,"name":"B","email":"b@c.com"}"#).unwrap();
        assert!(!user.is_admin);
    }

    #[test]
    fn sign_in_response_matches_contract() {
        let json = r#"{"token":"t1","user":{"id":1,"name":"A","email":"a@b.com","isAdmin":false}}"#;
        let res: SignInResponse = serde_json::from_str(json).unwrap();
        assert_eq!(res.token, "t1");
        assert_eq!(res.user.email, "a@b.com");
    }

    #[test]
    fn users_list_is_double_wrapped() {
        let json = r#"{"data":{"users":[{"id":1,"name":"A","email":"a@b.com","isAdmin":false}]}}"#;
        let res: UsersListResponse = serde_json::from_str(json).unwrap();
        assert_eq!(res.data.users.len(), 1);
    }

    #[test]
    fn recognition_payload_stays_snake_case() {
        let req = CreateRecognitionRequest {
            sender_id: 7,
            recipient_email: "to@x.com".into(),
            cc_emails: vec!["cc@x.com".into()],
            subject: "s".into(),
            message: "m".into(),
            image_id: None,
        };
        let json = serde_json::to_string(&req).unwrap();
        assert!(json.contains("\"recipient_email\""));
        assert!(json.contains("\"cc_emails\""));
        assert!(json.contains("\"image_id\":null"));
    }

    #[test]
    fn rankings_response_tolerates_missing_lists() {
        let res: RankingsResponse = serde_json::from_str("{}").unwrap();
        assert!(res.is_empty());

        let res: RankingsResponse = serde_json::from_str(
            r#"{"topSenders":[{"email":"a@b.com","count":3}],"topReceivers":[]}"#,
        )
        .unwrap();
        assert!(!res.is_empty());
        assert_eq!(res.top_senders[0].count, 3);
        assert!(res.top_senders[0].name.is_none());
    }

    #[test]
    fn ranking_initials_cover_edge_cases() {
        let entry = |name: Option<&str>| RankingEntry {
            name: name.map(str::to_string),
            email: "x@y.z".into(),
            count: 0,
        };
        assert_eq!(entry(Some("Ana Maria Souza")).initials(), "AS");
        assert_eq!(entry(Some("ana")).initials(), "A");
        assert_eq!(entry(Some("  ")).initials(), "?");
        assert_eq!(entry(None).initials(), "?");
    }

    #[test]
    fn monthly_ranking_kind_uses_type_field() {
        let json = r#"{"month":"2025-12","type":"sender","email":"a@b.com","count":5}"#;
        let row: MonthlyRankingEntry = serde_json::from_str(json).unwrap();
        assert_eq!(row.kind, RankingKind::Sender);
        assert_eq!(row.month, "2025-12");
    }

    #[test]
    fn image_accepts_alt_alias() {
        let a: ImageAsset =
            serde_json::from_str(r#"{"id":1,"url":"u","alt_text":"cap"}"#).unwrap();
        let b: ImageAsset = serde_json::from_str(r#"{"id":1,"url":"u","alt":"cap"}"#).unwrap();
        assert_eq!(a.alt_text, b.alt_text);
        assert_eq!(a.caption(), "cap");
    }

    #[test]
    fn dashboard_monthly_average_rounds() {
        let data = DashboardData {
            users_count: 0,
            recognitions_count: 10,
            monthly_data: vec![
                MonthlyCount { month: "2025-11".into(), count: 4 },
                MonthlyCount { month: "2025-12".into(), count: 6 },
                MonthlyCount { month: "2026-01".into(), count: 0 },
            ],
            monthly_rankings: vec![],
        };
        assert_eq!(data.monthly_average(), 3);

        // No monthly data: divide by one, not zero.
        let empty = DashboardData { recognitions_count: 7, ..Default::default() };
        assert_eq!(empty.monthly_average(), 7);
    }

    #[test]
    fn generate_request_is_camel_case() {
        let req = GenerateMessageRequest {
            recognition_type: "recognition".into(),
            qualities: "leadership".into(),
        };
        let json = serde_json::to_string(&req).unwrap();
        assert!(json.contains("\"recognitionType\""));
    }

    #[test]
    fn api_message_prefers_whichever_field_is_set() {
        let m: ApiMessage = serde_json::from_str(r#"{"error":"nope"}"#).unwrap();
        assert_eq!(m.first_message(), Some("nope"));
        let m: ApiMessage = serde_json::from_str(r#"{"message":"ok"}"#).unwrap();
        assert_eq!(m.first_message(), Some("ok"));
        let m: ApiMessage = serde_json::from_str(r#"{"message":""}"#).unwrap();
        assert_eq!(m.first_message(), None);
    }
}
