// 植物求生知识闪卡：数据集 / 分类 / 牌组 / 会话状态机 / TUI / CSV 导入

pub mod app;
pub mod category;
pub mod config;
pub mod deck;
pub mod import;
pub mod plant;
pub mod session;
pub mod ui;
