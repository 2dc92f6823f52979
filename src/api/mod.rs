/// API layer: backend response types and the HTTP client.
///
/// Architecture:
/// ```text
///   UI thread                      worker thread
///  ┌────────────┐  spawn job   ┌──────────────┐  HTTP   ┌─────────┐
///  │ controller │ ───────────▶ │  ApiClient   │ ──────▶ │ backend │
///  └────────────┘              └──────────────┘         └─────────┘
///        ▲                            │
///        └──────── ApiEvent (mpsc) ───┘
/// ```
///
/// `model` holds the serde types of the backend contract, `client` the
/// [`EquipmentApi`] trait and its reqwest implementation.

pub mod client;
pub mod model;

pub use client::{ApiClient, ApiConfig, ApiError, EquipmentApi};
pub use model::{Dataset, EquipmentRecord, Health};
