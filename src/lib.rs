//! Safe Street CLI
//!
//! 道路写真を解析APIへ送り、損傷レポートを端末に表示する

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod report;
pub mod workflow;
