//! Backend Module
//!
//! Server-side code for the competition backend: an axum HTTP/WebSocket
//! server over a PostgreSQL store, with real-time room event broadcasting.
//!
//! # Architecture
//!
//! The backend is organized into focused submodules:
//!
//! - **`server`** - configuration, application state, app assembly
//! - **`routes`** - route configuration and router assembly
//! - **`realtime`** - connection registry and the WebSocket endpoint
//! - **`rooms`** - room store, membership index, lifecycle manager
//! - **`competition`** - the live quiz orchestrator and score ledger
//! - **`quiz`** - question provider seam
//! - **`users`** - user directory seam
//! - **`error`** - backend error types
//!
//! # State Management
//!
//! Shared state (`AppState`) holds the connection registry, the membership
//! index, and the two service objects built on top of them. Everything is
//! constructed once at startup and shared by `Arc`; the only cross-process
//! resource is the membership index, reached exclusively through its
//! atomic-operation interface.

/// Live quiz flow
pub mod competition;

/// Backend error types
pub mod error;

/// Question provider
pub mod quiz;

/// Connection registry and WebSocket endpoint
pub mod realtime;

/// Rooms: store, membership, lifecycle
pub mod rooms;

/// Route configuration
pub mod routes;

/// Server setup and state
pub mod server;

/// User directory
pub mod users;

/// Re-export commonly used types
pub use competition::{CompetitionOrchestrator, ScoreLedger};
pub use error::{BackendError, BackendResult};
pub use realtime::ConnectionRegistry;
pub use rooms::{RoomLifecycle, RoomStore};
pub use server::{create_app, AppState};
