//! # YT Summarize
//!
//! 一个面向视频摘要后端的交互式终端客户端
//!
//! ## 架构设计
//!
//! 本系统采用分层架构：
//!
//! ### ① 数据层（Models）
//! - `models/` - 请求与结果的数据结构
//! - `SubmissionRequest` - 一次提交的请求体（wire 契约）
//! - `RenderableResult` - 解码时完成形状判定的结果 payload
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，彼此独立
//! - `SubmissionValidator` - 表单校验能力（URL 白名单、输出勾选、题数透传）
//! - `ResultRenderer` - 结果渲染能力，按输出类型分发段落
//! - `QuizCard` - 单道题的交互状态机（Unanswered → Answered）
//!
//! ### ③ 客户端层（Clients）
//! - `clients/` - 封装对外部 API 的调用
//! - `SummarizeClient` - summarize 后端客户端（无超时、无重试）
//!
//! ### ④ 流程层（Workflow）
//! - `workflow/` - 定义"一次提交"的完整流程
//! - `RequestController` - 状态机编排（校验 → 请求 → 渲染，保证回到 Idle）
//!
//! ### ⑤ 编排层（App）
//! - `app.rs` - 终端交互主循环，持有表单提示和结果区域
//!
//! ## 模块结构

pub mod app;
pub mod clients;
pub mod config;
pub mod error;
pub mod logger;
pub mod models;
pub mod services;
pub mod workflow;

// 重新导出常用类型
pub use app::App;
pub use clients::SummarizeClient;
pub use config::Config;
pub use error::{ApiError, AppError, AppResult, ValidationError};
pub use models::{OutputKind, OutputValue, QuizQuestion, RenderableResult, SubmissionRequest};
pub use services::{QuizCard, RenderedDocument, ResultRenderer, SubmissionValidator};
pub use workflow::{FormInput, RequestController, SubmitOutcome, SubmitState};
