//! Lingoduel - Main Library
//!
//! Lingoduel is the backend for a language-learning app's live multiplayer
//! mode: users connect over WebSocket, gather in competition rooms, and
//! race to answer translation questions in real time.
//!
//! # Module Structure
//!
//! The library is organized into two main modules:
//!
//! - **`shared`** - Types that cross the wire to clients
//!   - Room events (one closed enum, tagged by `type`)
//!   - Quiz question payloads
//!   - Room status and standings types
//!
//! - **`backend`** - Server-side code
//!   - Axum HTTP/WebSocket server
//!   - Connection registry and room membership index
//!   - Room lifecycle manager and competition orchestrator
//!   - PostgreSQL persistence via sqlx
//!
//! # Concurrency
//!
//! Every connection and request runs as an independent tokio task. The
//! connection registry's handle map is process-local; room membership goes
//! through an index whose interface admits only single-command atomic
//! operations, so multiple server processes can share a backing store
//! without lost updates. Broadcasts are best-effort fan-out with no
//! cross-recipient ordering.
//!
//! # Error Handling
//!
//! Operations return `Result<T, BackendError>`; errors convert to JSON
//! HTTP responses. Round preconditions (`owner_not_in_room`,
//! `owner_leave`) are broadcast to the whole room as `error` events rather
//! than returned to a single caller.

/// Types shared with connected clients
pub mod shared;

/// Backend server-side code
pub mod backend;
