// 原生 Web API 封装模块
// 提供对浏览器原生 API 的轻量级封装，集中所有 web_sys 杂项操作。

pub mod route;
pub mod router;
mod storage;

pub use storage::LocalStorage;
