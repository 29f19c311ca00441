//! 基础类型定义
//!
//! 提供账户管理系统的核心基础类型，供所有模块共享使用
//! 遵循 Clean Architecture 原则，将共享的基础类型提取到独立模块

pub mod account;
pub mod base_types;

pub mod cqrs;

pub mod handler;

// Re-export all types
pub use base_types::{AccountId, AdminId, StatusId, Timestamp, UserId, Username};
