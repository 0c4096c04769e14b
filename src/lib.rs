//! Fridge magnet poetry: canvas core, client view model, and the HTTP
//! service behind them.
//!
//! | Module | Role |
//! |--------|------|
//! | [`canvas`] | Drag-and-drop placement, reading order, mood, stickers |
//! | [`client`] | Screen router and poetry view state over repository traits |
//! | [`routes`] | Axum router for the JSON API and stored audio |
//! | [`services`] | Auth, sessions, poems, words, TTS, analysis, diagnostics |
//! | [`store`] | `PoemStore`/`AccountStore` over Postgres or memory |
//! | [`llm`] | Anthropic client behind the `LlmChat` trait |

pub mod canvas;
pub mod client;
pub mod config;
pub mod db;
pub mod llm;
pub mod poem;
pub mod rate_limit;
pub mod routes;
pub mod services;
pub mod state;
pub mod store;
