//! Bicycle theft reports and the active "red zone" set.
//!
//! Every report lives for a fixed TTL. Expired reports are purged lazily
//! when the active set is read; there is no background sweep.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | POST | `/robo` | No | Submit a theft report |
//! | GET | `/zonas-rojas` | No | List active reports, newest first |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod stores;

pub use services::TheftService;
pub use stores::{MemoryReportStore, PostgresReportStore, ReportStore};
