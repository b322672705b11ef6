//! Reaction engine
//!
//! Likes and dislikes on posts and comments. A toggle is the only mutation;
//! totals are always counted live from the reaction rows.

use forum_core::entities::{Identity, ReactionCounts, ToggleOutcome};
use forum_core::{DomainError, ReactionValue, RowId, TargetKind, UserId};
use tracing::{info, instrument};
use validator::Validate;

use crate::dto::{ReactionSummaryResponse, ToggleReactionRequest, ToggleReactionResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Reaction service
pub struct ReactionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ReactionService<'a> {
    /// Create a new ReactionService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Toggle the caller's reaction as described by an API request
    #[instrument(skip(self, identity), fields(user_id = %identity.user_id))]
    pub async fn toggle_request(
        &self,
        identity: &Identity,
        request: ToggleReactionRequest,
    ) -> ServiceResult<ToggleReactionResponse> {
        request.validate()?;

        let target_kind: TargetKind = request.target_type.parse()?;
        let value = ReactionValue::try_from(request.value)?;
        let target_id = RowId::new(request.target_id);

        let outcome = self
            .toggle(identity.user_id, target_kind, target_id, value)
            .await?;
        let counts = self.counts(target_kind, target_id).await?;

        Ok(ToggleReactionResponse {
            outcome,
            like_count: counts.like_count,
            dislike_count: counts.dislike_count,
            my_reaction: match outcome {
                ToggleOutcome::Removed => None,
                ToggleOutcome::Created | ToggleOutcome::Updated => Some(value),
            },
        })
    }

    /// Apply one toggle
    ///
    /// none -> `Created`; same value -> `Removed`; opposite value -> `Updated`.
    /// Unknown targets fail with `DomainError::TargetNotFound` before any write.
    #[instrument(skip(self))]
    pub async fn toggle(
        &self,
        user_id: UserId,
        target_kind: TargetKind,
        target_id: RowId,
        value: ReactionValue,
    ) -> ServiceResult<ToggleOutcome> {
        self.ensure_target_exists(target_kind, target_id).await?;

        let outcome = self
            .ctx
            .reaction_repo()
            .toggle(user_id, target_kind, target_id, value)
            .await?;

        info!(
            user_id = %user_id,
            target = %target_kind,
            target_id = %target_id,
            ?outcome,
            "Reaction toggled"
        );
        Ok(outcome)
    }

    /// Live like/dislike totals
    pub async fn counts(
        &self,
        target_kind: TargetKind,
        target_id: RowId,
    ) -> ServiceResult<ReactionCounts> {
        Ok(self
            .ctx
            .reaction_repo()
            .counts(target_kind, target_id)
            .await?)
    }

    /// The user's current reaction on a target, if any
    pub async fn current_reaction(
        &self,
        user_id: UserId,
        target_kind: TargetKind,
        target_id: RowId,
    ) -> ServiceResult<Option<ReactionValue>> {
        let reaction = self
            .ctx
            .reaction_repo()
            .find(user_id, target_kind, target_id)
            .await?;
        Ok(reaction.map(|r| r.value))
    }

    /// The viewer's reaction, or `None` for anonymous viewers
    pub async fn viewer_reaction(
        &self,
        viewer: Option<&Identity>,
        target_kind: TargetKind,
        target_id: RowId,
    ) -> ServiceResult<Option<ReactionValue>> {
        match viewer {
            Some(identity) => {
                self.current_reaction(identity.user_id, target_kind, target_id)
                    .await
            }
            None => Ok(None),
        }
    }

    /// Totals and the viewer's reaction for one target
    #[instrument(skip(self, viewer))]
    pub async fn summary(
        &self,
        target_type: &str,
        target_id: i64,
        viewer: Option<&Identity>,
    ) -> ServiceResult<ReactionSummaryResponse> {
        let target_kind: TargetKind = target_type.parse()?;
        let target_id = RowId::new(target_id);
        self.ensure_target_exists(target_kind, target_id).await?;

        let counts = self.counts(target_kind, target_id).await?;
        let my_reaction = self
            .viewer_reaction(viewer, target_kind, target_id)
            .await?;

        Ok(ReactionSummaryResponse {
            target_type: target_kind,
            target_id,
            like_count: counts.like_count,
            dislike_count: counts.dislike_count,
            my_reaction,
        })
    }

    async fn ensure_target_exists(&self, kind: TargetKind, id: RowId) -> ServiceResult<()> {
        let exists = match kind {
            TargetKind::Post => self.ctx.post_repo().exists(id).await?,
            TargetKind::Comment => self.ctx.comment_repo().exists(id).await?,
        };

        if exists {
            Ok(())
        } else {
            Err(DomainError::TargetNotFound { kind, id }.into())
        }
    }
}
