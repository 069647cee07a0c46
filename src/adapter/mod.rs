//! Adapter Layer
//!
//! 外部システム（Tableau REST API, VizPortal API, ファイルシステム）との統合

pub mod config;
pub mod repositories;
pub mod tableau;
