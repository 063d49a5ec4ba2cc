//! # Rolo Architecture
//!
//! Rolo is a **terminal-agnostic contact and note library**. The interactive
//! shell in `main.rs` is just one client of it.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Shell (main.rs)                                            │
//! │  - Prompts, reads lines, prints replies, colors warnings    │
//! │  - Completes interactive sub-prompts before dispatch        │
//! │  - The ONLY place that knows about stdin/stdout/exit codes  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Dispatch Layer (commands/mod.rs)                           │
//! │  - Static command registry: name, arity, contact precheck   │
//! │  - Normalizes every error into a user-facing reply string   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Pure handlers: (session, args) -> Result<String>         │
//! │  - No I/O assumptions whatsoever                            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Stores and Persistence (book.rs, notes.rs, storage.rs)     │
//! │  - AddressBook and Notes own their maps outright            │
//! │  - Bulk JSON load at startup, bulk save at exit             │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `commands/` inward, code takes regular Rust arguments, returns
//! `Result<String>`, never writes to stdout/stderr and never calls
//! `std::process::exit`. The same core could back a bot or a web UI.
//!
//! ## Module Overview
//!
//! - [`model`]: Validated field types and the contact [`model::Record`]
//! - [`book`]: The [`book::AddressBook`] store and birthday scheduling
//! - [`notes`]: The per-user [`notes::Notes`] store
//! - [`commands`]: Registry, dispatch and the command handlers
//! - [`config`]: Optional policy knobs (`config.json`)
//! - [`storage`]: JSON persistence with corrupt-file recovery
//! - [`error`]: Error types

pub mod book;
pub mod commands;
pub mod config;
pub mod error;
pub mod model;
pub mod notes;
pub mod storage;
