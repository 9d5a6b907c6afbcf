//! LocalStorage 封装模块
//!
//! 对 `web_sys::Storage` 的轻量封装。持久化会话（user + token 两个键）
//! 的唯一出入口在会话层，这里只提供原语。

use serde::Serialize;

pub struct LocalStorage;

impl LocalStorage {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }

    /// 读取字符串值；键不存在或环境不可用时返回 `None`。
    pub fn get(key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok()?
    }

    /// 写入字符串值；返回操作是否成功。
    pub fn set(key: &str, value: &str) -> bool {
        Self::storage()
            .and_then(|s| s.set_item(key, value).ok())
            .is_some()
    }

    /// 删除键值对；返回操作是否成功。
    pub fn delete(key: &str) -> bool {
        Self::storage()
            .and_then(|s| s.remove_item(key).ok())
            .is_some()
    }

    /// 序列化并写入 JSON 值。
    pub fn set_json<T: Serialize>(key: &str, value: &T) -> bool {
        match serde_json::to_string(value) {
            Ok(json) => Self::set(key, &json),
            Err(_) => false,
        }
    }
}
