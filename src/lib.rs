//! CourseHub - 在线学习平台后端服务
//!
//! 基于 Actix Web 构建，提供课程、测验、作业批阅、导师辅导、支付与证书等功能。
//!
//! # 架构
//! - `cache`: 缓存层（Moka/Redis）与资源缓存
//! - `config`: 配置管理
//! - `entity`: SeaORM 数据库实体
//! - `errors`: 统一错误处理
//! - `integrations`: 外部服务（证书颁发、邮件）
//! - `middlewares`: 认证、角色、课程访问与限流中间件
//! - `models`: 数据模型定义
//! - `routes`: API 路由层
//! - `runtime`: 运行时生命周期管理
//! - `services`: 业务逻辑层
//! - `storage`: 数据存储层（SeaORM）
//! - `utils`: 工具函数

pub mod cache;
pub mod config;
pub mod entity;
pub mod errors;
pub mod integrations;
pub mod middlewares;
pub mod models;
pub mod routes;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod utils;
