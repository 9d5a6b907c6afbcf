// 页面层：每个路由对应一个页面组件。

pub mod admin_dashboard;
pub mod forgot_password;
pub mod login;
pub mod profile;
pub mod ranking;
pub mod send_recognition;
pub mod signup;
pub mod upload_images;
pub mod users_dashboard;
