/**
 * Competition Room Events
 *
 * This module defines every message the server pushes to connected clients.
 * Events form one closed variant type; the wire representation is a JSON
 * object whose `type` field discriminates the variant.
 *
 * # Event Types
 *
 * - `created_new_room` - a new room exists (sent to every connection)
 * - `user_join` / `user_leave` - membership changed (sent to the room)
 * - `new_question` - the next translation question (sent to the room)
 * - `check_competition_answer` - someone answered; updated standings
 * - `error` - the round cannot proceed (`owner_not_in_room`, `owner_leave`)
 */
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::quiz::{QuizQuestion, WordInfo};
use crate::shared::room::{PlayerScore, RoomStatus};

/// Summary of a freshly created room, broadcast to every connection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRoomData {
    pub room_id: i32,
    pub owner: String,
    pub language_from_id: i32,
    pub language_to_id: i32,
}

/// The participant whose answer produced a `check_competition_answer` event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnsweredUser {
    pub username: String,
    pub user_photo_url: Option<String>,
    pub success: bool,
}

/// Reasons a round cannot proceed, broadcast to the whole room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundErrorKind {
    /// The owner's presence is `offline`; a round cannot start or continue.
    OwnerNotInRoom,
    /// The owner left while an answer was in flight.
    OwnerLeave,
}

/// A server-pushed room event.
///
/// Serialized with an internal `type` tag, e.g.
/// `{"type":"user_join","room_id":3,...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RoomEvent {
    CreatedNewRoom {
        room_data: NewRoomData,
    },
    UserJoin {
        room_id: i32,
        username: String,
        status_room: RoomStatus,
        users_count: i64,
        users: Vec<PlayerScore>,
    },
    UserLeave {
        room_id: i32,
        username: String,
        status_room: RoomStatus,
        users_count: i64,
        users: Vec<PlayerScore>,
    },
    NewQuestion {
        word_for_translate: WordInfo,
        other_words: Vec<WordInfo>,
    },
    CheckCompetitionAnswer {
        answered_user: AnsweredUser,
        selected_word_id: Uuid,
        correct_word_id: Uuid,
        users: Vec<PlayerScore>,
    },
    Error {
        #[serde(skip_serializing_if = "Option::is_none")]
        room_id: Option<i32>,
        message: RoundErrorKind,
    },
}

impl RoomEvent {
    /// Build a `new_question` event from a prepared question.
    pub fn question(question: QuizQuestion) -> Self {
        Self::NewQuestion {
            word_for_translate: question.word_for_translate,
            other_words: question.other_words,
        }
    }

    /// Build a round error event.
    pub fn round_error(room_id: Option<i32>, message: RoundErrorKind) -> Self {
        Self::Error { room_id, message }
    }
}
