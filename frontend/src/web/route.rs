//! 路由定义模块 - 领域模型
//!
//! 纯业务层，不依赖 DOM 或 web_sys。定义应用的全部路由及其守卫属性。

use std::fmt::Display;

/// 应用路由枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppRoute {
    /// 登录页（公开）
    #[default]
    Login,
    /// 注册页（公开）
    Signup,
    /// 找回密码（公开）
    ForgotPassword,
    /// 发送表彰（登录后默认页）
    SendRecognition,
    /// 月度排行榜
    Ranking,
    /// 个人资料
    Profile,
    /// 管理员：总览仪表盘
    AdminDashboard,
    /// 管理员：图片库维护
    AdminUploadImages,
    /// 管理员：用户管理
    AdminUsers,
}

impl AppRoute {
    /// 将 URL path 解析为路由。未知路径落到 [`AppRoute::SendRecognition`]，
    /// 由守卫决定是否先去登录。
    pub fn from_path(path: &str) -> Self {
        let trimmed = path.trim_end_matches('/');
        match trimmed {
            "/login" => Self::Login,
            "/signup" => Self::Signup,
            "/forgot-password" => Self::ForgotPassword,
            "/ranking" => Self::Ranking,
            "/profile" => Self::Profile,
            "/admin/dashboard" => Self::AdminDashboard,
            "/admin/upload-images" => Self::AdminUploadImages,
            "/admin/users-dashboard" => Self::AdminUsers,
            _ => Self::SendRecognition,
        }
    }

    pub fn to_path(&self) -> &'static str {
        match self {
            Self::Login => "/login",
            Self::Signup => "/signup",
            Self::ForgotPassword => "/forgot-password",
            Self::SendRecognition => "/send-recognition",
            Self::Ranking => "/ranking",
            Self::Profile => "/profile",
            Self::AdminDashboard => "/admin/dashboard",
            Self::AdminUploadImages => "/admin/upload-images",
            Self::AdminUsers => "/admin/users-dashboard",
        }
    }

    /// **核心守卫逻辑：该路由是否需要认证**
    pub fn requires_auth(&self) -> bool {
        !matches!(self, Self::Login | Self::Signup | Self::ForgotPassword)
    }

    /// 该路由是否还需要管理员权限
    pub fn requires_admin(&self) -> bool {
        matches!(
            self,
            Self::AdminDashboard | Self::AdminUploadImages | Self::AdminUsers
        )
    }

    /// 已认证用户是否应离开此路由（登录/注册页）
    pub fn should_redirect_when_authenticated(&self) -> bool {
        matches!(self, Self::Login | Self::Signup)
    }

    /// 认证失败时的重定向目标
    pub fn auth_failure_redirect() -> Self {
        Self::Login
    }

    /// 认证成功时的默认落地页
    pub fn auth_success_redirect() -> Self {
        Self::SendRecognition
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_paths_round_trip() {
        for route in [
            AppRoute::Login,
            AppRoute::Signup,
            AppRoute::ForgotPassword,
            AppRoute::SendRecognition,
            AppRoute::Ranking,
            AppRoute::Profile,
            AppRoute::AdminDashboard,
            AppRoute::AdminUploadImages,
            AppRoute::AdminUsers,
        ] {
            assert_eq!(AppRoute::from_path(route.to_path()), route);
        }
    }

    #[test]
    fn unknown_paths_land_on_send_recognition() {
        for path in ["/", "/nope", "/admin", "/send-recognition", "/LOGIN"] {
            assert_eq!(AppRoute::from_path(path), AppRoute::SendRecognition);
        }
    }

    #[test]
    fn trailing_slash_is_ignored() {
        assert_eq!(AppRoute::from_path("/ranking/"), AppRoute::Ranking);
        assert_eq!(AppRoute::from_path("/login/"), AppRoute::Login);
    }

    #[test]
    fn guard_matrix() {
        assert!(!AppRoute::Login.requires_auth());
        assert!(!AppRoute::Signup.requires_auth());
        assert!(!AppRoute::ForgotPassword.requires_auth());
        assert!(AppRoute::SendRecognition.requires_auth());
        assert!(AppRoute::Ranking.requires_auth());
        assert!(AppRoute::Profile.requires_auth());

        assert!(AppRoute::AdminDashboard.requires_admin());
        assert!(AppRoute::AdminUploadImages.requires_admin());
        assert!(AppRoute::AdminUsers.requires_admin());
        assert!(!AppRoute::Ranking.requires_admin());

        assert!(AppRoute::Login.should_redirect_when_authenticated());
        assert!(!AppRoute::ForgotPassword.should_redirect_when_authenticated());
    }
}
