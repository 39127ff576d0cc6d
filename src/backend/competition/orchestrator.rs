/**
 * Competition Orchestrator
 *
 * Drives the synchronized quiz loop for an active room: owner-gated round
 * start, answer checking and scoring, standings rebroadcast, and the next
 * question after a fixed delay.
 *
 * # Round Flow
 *
 * A round advances on the first answer from any participant. The
 * inter-round delay is a plain timed suspension: it is never cancelled;
 * instead the room status is re-checked once it elapses, and a room that
 * went inactive gets an error broadcast instead of a question.
 *
 * # Failure Semantics
 *
 * Store failures roll back the failing write and surface to the caller;
 * broadcasts already delivered stand. Round preconditions
 * (`owner_not_in_room`, `owner_leave`) are broadcast to the whole room
 * because every participant needs to know the round cannot proceed; the
 * caller still gets a success response.
 */
use std::sync::Arc;
use std::time::Duration;

use uuid::Uuid;

use crate::backend::competition::ledger::ScoreLedger;
use crate::backend::error::{BackendError, BackendResult};
use crate::backend::quiz::QuestionProvider;
use crate::backend::realtime::{broadcast_to_room, ConnectionRegistry};
use crate::backend::rooms::membership::MembershipIndex;
use crate::backend::rooms::store::{Room, RoomStore};
use crate::backend::users::{UserDirectory, UserProfile};
use crate::shared::event::{AnsweredUser, RoundErrorKind};
use crate::shared::{RoomEvent, RoomStatus};

/// Delay between the answer broadcast and the next question, giving clients
/// time to render the result.
pub const ROUND_DELAY: Duration = Duration::from_secs(3);

pub struct CompetitionOrchestrator {
    store: Arc<dyn RoomStore>,
    users: Arc<dyn UserDirectory>,
    membership: Arc<dyn MembershipIndex>,
    questions: Arc<dyn QuestionProvider>,
    ledger: ScoreLedger,
    registry: ConnectionRegistry,
}

impl CompetitionOrchestrator {
    pub fn new(
        store: Arc<dyn RoomStore>,
        users: Arc<dyn UserDirectory>,
        membership: Arc<dyn MembershipIndex>,
        questions: Arc<dyn QuestionProvider>,
        ledger: ScoreLedger,
        registry: ConnectionRegistry,
    ) -> Self {
        Self {
            store,
            users,
            membership,
            questions,
            ledger,
            registry,
        }
    }

    /// Start a round: verify the owner is present, activate the room if it
    /// is still `created`, and push a question to every member.
    ///
    /// An absent owner aborts this attempt only: the room hears one
    /// `owner_not_in_room` error and stays as it was.
    pub async fn start(&self, room_id: i32) -> BackendResult<()> {
        let room = self.resolve_room(room_id).await?;

        if !self.store.owner_present(room_id).await? {
            tracing::info!(room_id, "round start refused, owner not in room");
            self.broadcast(room_id, &RoomEvent::round_error(None, RoundErrorKind::OwnerNotInRoom))
                .await?;
            return Ok(());
        }

        if room.status != RoomStatus::Active {
            self.store.set_room_status(room_id, RoomStatus::Active).await?;
        }

        self.push_question(&room).await?;
        tracing::info!(room_id, "competition round started");
        Ok(())
    }

    /// Handle one submitted answer: score it, rebroadcast standings, and
    /// after the fixed delay push the next question if the room is still
    /// active.
    pub async fn check_answer(
        &self,
        room_id: i32,
        telegram_id: i64,
        word_for_translate_id: Uuid,
        chosen_word_id: Uuid,
    ) -> BackendResult<()> {
        let user = self.resolve_user(telegram_id).await?;
        self.resolve_room(room_id).await?;

        let verdict = self
            .questions
            .check_translation(word_for_translate_id, chosen_word_id)
            .await?;

        self.ledger
            .adjust_points(room_id, user.id, ScoreLedger::delta_for(verdict.correct))
            .await?;
        let users = self.ledger.standings(room_id).await?;

        // Status re-read after the adjustment committed; the owner may have
        // left while the answer was in flight.
        let room = self.resolve_room(room_id).await?;
        if room.status != RoomStatus::Active {
            self.broadcast(
                room_id,
                &RoomEvent::round_error(Some(room_id), RoundErrorKind::OwnerLeave),
            )
            .await?;
            return Ok(());
        }

        tracing::info!(
            room_id,
            telegram_id,
            success = verdict.correct,
            "competition answer scored"
        );

        self.broadcast(
            room_id,
            &RoomEvent::CheckCompetitionAnswer {
                answered_user: AnsweredUser {
                    username: user.username,
                    user_photo_url: user.photo_url,
                    success: verdict.correct,
                },
                selected_word_id: chosen_word_id,
                correct_word_id: verdict.correct_word_id,
                users,
            },
        )
        .await?;

        tokio::time::sleep(ROUND_DELAY).await;

        let room = self.resolve_room(room_id).await?;
        if room.status == RoomStatus::Active {
            self.push_question(&room).await?;
        } else {
            self.broadcast(
                room_id,
                &RoomEvent::round_error(Some(room_id), RoundErrorKind::OwnerNotInRoom),
            )
            .await?;
        }

        Ok(())
    }

    async fn push_question(&self, room: &Room) -> BackendResult<()> {
        let question = self
            .questions
            .random_question(room.language_from_id, room.language_to_id)
            .await?;
        self.broadcast(room.id, &RoomEvent::question(question)).await
    }

    async fn broadcast(&self, room_id: i32, event: &RoomEvent) -> BackendResult<()> {
        broadcast_to_room(&self.registry, self.membership.as_ref(), room_id, event).await
    }

    async fn resolve_user(&self, telegram_id: i64) -> BackendResult<UserProfile> {
        self.users
            .resolve(telegram_id)
            .await?
            .ok_or(BackendError::UserNotFound(telegram_id))
    }

    async fn resolve_room(&self, room_id: i32) -> BackendResult<Room> {
        self.store
            .room(room_id)
            .await?
            .ok_or(BackendError::RoomNotFound(room_id))
    }
}
