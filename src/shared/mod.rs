//! Types shared with connected clients.
//!
//! Everything here crosses the wire: room status and standings entries,
//! quiz question payloads, and the closed set of server-pushed events.

/// Server-pushed room events
pub mod event;

/// Quiz question payloads
pub mod quiz;

/// Room status, presence, and standings types
pub mod room;

pub use event::{AnsweredUser, NewRoomData, RoomEvent, RoundErrorKind};
pub use quiz::{AnswerCheck, QuizQuestion, WordInfo};
pub use room::{PlayerScore, Presence, RoomStatus};
