//! NimbusDrive Core - Domain types and the global listener contract
//!
//! This crate contains the hexagonal architecture core with:
//! - **Domain entities** - `User`, `Node`, `Alert`, `ContactRequest`, `EngineEvent`
//! - **Newtypes** - validated handles, emails, and sequence markers
//! - **Port definitions** - `IGlobalListener`, `IQuotaProbe`, `IResyncTrigger`
//!
//! # Architecture
//!
//! This crate follows the hexagonal (ports & adapters) architecture pattern.
//! The domain module contains pure data types with no external dependencies.
//! Ports define the trait boundary between the (external, unseen) engine and
//! the applications consuming its notifications; the dispatch layer lives in
//! the `nimbusdrive-events` crate.

pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
