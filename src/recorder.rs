//! Typed constructors for each recognized action category
//!
//! The recorder is the only place action-type string literals and their
//! payload shapes are defined. The store itself enforces no per-action
//! schema; internal consistency of each shape is this module's job. Adding
//! a new action category means adding one constructor here, nothing else.
//!
//! Every constructor swallows store failure after logging it and returns
//! `None`: an audit record that fails to land must never abort the business
//! action that triggered it.

use std::sync::Arc;

use serde_json::{json, Map, Value};
use tracing::error;

use crate::store::ActivityStore;

/// A user signed in
pub const USER_LOGIN: &str = "user_login";
/// A user signed out
pub const USER_LOGOUT: &str = "user_logout";
/// A quiz was submitted and scored
pub const QUIZ_ATTEMPT: &str = "quiz_attempt";
/// Progress on a piece of learning content
pub const LEARNING_PROGRESS: &str = "learning_progress";
/// A forum post was created
pub const POST_CREATED: &str = "post_created";
/// A comment was created under a post
pub const COMMENT_CREATED: &str = "comment_created";
/// A moderation/administration action
pub const ADMIN_ACTION: &str = "admin_action";

/// Facade producing well-formed records per action category
pub struct ActivityRecorder {
    store: Arc<ActivityStore>,
}

impl ActivityRecorder {
    pub fn new(store: Arc<ActivityStore>) -> Self {
        Self { store }
    }

    /// Record a user login, with the source address when known
    pub fn log_login(
        &self,
        actor_id: i64,
        actor_label: &str,
        ip_address: Option<&str>,
    ) -> Option<u64> {
        let details = match ip_address {
            Some(ip) => json!({ "ip_address": ip }),
            None => json!({}),
        };
        self.record(actor_id, actor_label, USER_LOGIN, details)
    }

    /// Record a user logout
    pub fn log_logout(&self, actor_id: i64, actor_label: &str) -> Option<u64> {
        self.record(actor_id, actor_label, USER_LOGOUT, json!({}))
    }

    /// Record a completed quiz attempt with its already-computed score
    pub fn log_quiz_attempt(
        &self,
        actor_id: i64,
        actor_label: &str,
        quiz_id: i64,
        quiz_title: &str,
        score: i64,
        accuracy: f64,
    ) -> Option<u64> {
        let details = json!({
            "quiz_id": quiz_id,
            "quiz_title": quiz_title,
            "score": score,
            "accuracy": accuracy,
        });
        self.record(actor_id, actor_label, QUIZ_ATTEMPT, details)
    }

    /// Record progress on learning content
    ///
    /// `content_type` names the content kind (e.g. "vocab", "grammar",
    /// "listening"); `action` is the progress step (e.g. "started",
    /// "completed", "reviewed").
    pub fn log_learning_progress(
        &self,
        actor_id: i64,
        actor_label: &str,
        content_type: &str,
        content_id: i64,
        action: &str,
    ) -> Option<u64> {
        let details = json!({
            "content_type": content_type,
            "content_id": content_id,
            "action": action,
        });
        self.record(actor_id, actor_label, LEARNING_PROGRESS, details)
    }

    /// Record a created forum post
    pub fn log_post_created(
        &self,
        actor_id: i64,
        actor_label: &str,
        post_id: i64,
        post_title: &str,
        category: &str,
    ) -> Option<u64> {
        let details = json!({
            "post_id": post_id,
            "post_title": post_title,
            "category": category,
        });
        self.record(actor_id, actor_label, POST_CREATED, details)
    }

    /// Record a created comment
    pub fn log_comment_created(
        &self,
        actor_id: i64,
        actor_label: &str,
        post_id: i64,
        comment_id: i64,
    ) -> Option<u64> {
        let details = json!({
            "post_id": post_id,
            "comment_id": comment_id,
        });
        self.record(actor_id, actor_label, COMMENT_CREATED, details)
    }

    /// Record a moderation/administration action
    ///
    /// `action` is the verb (e.g. "approve", "reject", "delete"),
    /// `target_type`/`target_id` name the affected entity. Extra fields are
    /// merged into the payload; they cannot displace the three fixed keys.
    pub fn log_admin_action(
        &self,
        actor_id: i64,
        actor_label: &str,
        action: &str,
        target_type: &str,
        target_id: i64,
        extra: Option<Map<String, Value>>,
    ) -> Option<u64> {
        let mut details = extra.unwrap_or_default();
        details.insert("action".to_string(), json!(action));
        details.insert("target_type".to_string(), json!(target_type));
        details.insert("target_id".to_string(), json!(target_id));

        self.record(actor_id, actor_label, ADMIN_ACTION, Value::Object(details))
    }

    /// Record an event of an arbitrary action type
    ///
    /// Escape hatch for action categories without a dedicated constructor;
    /// the payload shape is the caller's responsibility.
    pub fn log_custom(
        &self,
        actor_id: i64,
        actor_label: &str,
        action_type: &str,
        details: Value,
    ) -> Option<u64> {
        self.record(actor_id, actor_label, action_type, details)
    }

    fn record(
        &self,
        actor_id: i64,
        actor_label: &str,
        action_type: &str,
        details: Value,
    ) -> Option<u64> {
        match self.store.append(actor_id, actor_label, action_type, details) {
            Ok(record) => Some(record.id),
            Err(e) => {
                error!(actor_id, action_type, error = %e, "failed to record activity");
                None
            }
        }
    }
}
