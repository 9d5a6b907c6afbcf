//! 用户管理数据钩子
//!
//! 持有管理员用户列表的本地状态。变更成功后直接修改本地列表
//! （按名字排序插入 / 按 id 过滤 / 翻转单个标志），不再回读服务端 ——
//! 用一致性换响应速度；失败的变更不触碰列表。

use crate::api::{self, ApiClient};
use kudos_shared::{CreateUserRequest, User};
use leptos::prelude::*;

/// 管理员用户列表状态。`RwSignal` 可 Copy，便于在组件间传递。
#[derive(Clone, Copy)]
pub struct AdminUsers {
    pub users: RwSignal<Vec<User>>,
    pub is_loading: RwSignal<bool>,
    pub error: RwSignal<Option<String>>,
}

impl AdminUsers {
    pub fn new() -> Self {
        Self {
            users: RwSignal::new(Vec::new()),
            is_loading: RwSignal::new(true),
            error: RwSignal::new(None),
        }
    }

    /// 拉取完整用户列表（挂载时与手动刷新时调用）。
    pub async fn fetch(&self, api: &ApiClient) {
        self.is_loading.set(true);
        self.error.set(None);
        match api::admin::list_users(api).await {
            Ok(list) => self.users.set(list.data.users),
            Err(e) => self.error.set(Some(e.to_string())),
        }
        self.is_loading.set(false);
    }

    /// 创建用户；成功后按名字顺序插入本地列表。
    pub async fn create(
        &self,
        api: &ApiClient,
        payload: CreateUserRequest,
    ) -> Result<String, String> {
        match api::admin::create_user(api, &payload).await {
            Ok(created) => {
                self.users.update(|list| insert_sorted_by_name(list, created.user));
                Ok(created
                    .message
                    .unwrap_or_else(|| "User created.".to_string()))
            }
            Err(e) => Err(e.to_string()),
        }
    }

    /// 删除用户；成功后从本地列表移除恰好一条。
    pub async fn delete(&self, api: &ApiClient, user_id: i64) -> Result<String, String> {
        match api::admin::delete_user(api, user_id).await {
            Ok(()) => {
                self.users.update(|list| {
                    remove_by_id(list, user_id);
                });
                Ok("User deleted.".to_string())
            }
            Err(e) => Err(e.to_string()),
        }
    }

    /// 切换管理员标志；成功后只翻转目标行。
    pub async fn toggle_admin(
        &self,
        api: &ApiClient,
        user_id: i64,
        new_status: bool,
    ) -> Result<String, String> {
        match api::admin::toggle_admin(api, user_id, new_status).await {
            Ok(updated) => {
                self.users
                    .update(|list| set_admin_flag(list, user_id, updated.user.is_admin));
                Ok(updated
                    .message
                    .unwrap_or_else(|| "Admin status updated.".to_string()))
            }
            Err(e) => Err(e.to_string()),
        }
    }
}

impl Default for AdminUsers {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------
// 列表变更原语（纯函数，便于测试）
// ---------------------------------------------------------

fn insert_sorted_by_name(list: &mut Vec<User>, user: User) {
    list.push(user);
    list.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
}

/// 移除匹配 id 的第一条；返回是否有移除。
fn remove_by_id(list: &mut Vec<User>, id: i64) -> bool {
    let before = list.len();
    list.retain(|u| u.id != id);
    list.len() != before
}

fn set_admin_flag(list: &mut [User], id: i64, is_admin: bool) {
    if let Some(user) = list.iter_mut().find(|u| u.id == id) {
        user.is_admin = is_admin;
    }
}

/// 按名字或邮箱做大小写不敏感的子串过滤（搜索栏）。
pub fn filter_users(users: &[User], term: &str) -> Vec<User> {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return users.to_vec();
    }
    users
        .iter()
        .filter(|u| {
            u.name.to_lowercase().contains(&term) || u.email.to_lowercase().contains(&term)
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: i64, name: &str, is_admin: bool) -> User {
        User {
            id,
            name: name.to_string(),
            email: format!("{}@corp.com", name.to_lowercase()),
            is_admin,
        }
    }

    #[test]
    fn insert_keeps_name_order() {
        let mut list = vec![user(1, "Ana", false), user(2, "Caio", false)];
        insert_sorted_by_name(&mut list, user(3, "bruna", false));
        let names: Vec<&str> = list.iter().map(|u| u.name.as_str()).collect();
        assert_eq!(names, ["Ana", "bruna", "Caio"]);
    }

    #[test]
    fn delete_removes_exactly_one_matching_entry() {
        let mut list = vec![user(1, "Ana", false), user(2, "Caio", false)];
        assert!(remove_by_id(&mut list, 1));
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].id, 2);

        // Unknown id leaves the list untouched.
        assert!(!remove_by_id(&mut list, 99));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn toggle_flips_only_the_target_row() {
        let mut list = vec![user(1, "Ana", false), user(2, "Caio", false)];
        set_admin_flag(&mut list, 2, true);
        assert!(!list[0].is_admin);
        assert!(list[1].is_admin);

        set_admin_flag(&mut list, 2, false);
        assert!(!list[1].is_admin);
    }

    #[test]
    fn search_matches_name_and_email_case_insensitively() {
        let list = vec![user(1, "Ana Souza", false), user(2, "Caio", false)];
        assert_eq!(filter_users(&list, "SOUZA").len(), 1);
        assert_eq!(filter_users(&list, "caio@corp").len(), 1);
        assert_eq!(filter_users(&list, "nobody").len(), 0);
        assert_eq!(filter_users(&list, "  ").len(), 2);
    }
}
