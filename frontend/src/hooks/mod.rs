// 数据钩子层：每个屏幕的取数/变更助手，持有本地列表状态。

pub mod admin_users;
