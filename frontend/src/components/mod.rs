// 可复用 UI 组件集合

pub mod confirm_modal;
pub mod icons;
pub mod layout;
pub mod monthly_chart;
pub mod password_field;
