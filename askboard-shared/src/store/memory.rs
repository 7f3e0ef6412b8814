/// In-memory data store
///
/// Keeps every record in plain collections owned by the store. Questions
/// keep insertion order; votes are keyed by (user, target) so a user can
/// hold at most one vote per target.

use std::collections::HashMap;

use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use super::{DataStore, StoreError, StoreResult};
use crate::auth::authorization::{require_question_owner, require_user, AuthzError};
use crate::models::answer::{Answer, CreateAnswer};
use crate::models::comment::{find_in_threads, find_in_threads_mut, Comment, CreateComment};
use crate::models::notification::{Notification, NotificationKind};
use crate::models::question::{CreateQuestion, Question, QuestionQuery};
use crate::models::user::{AuthorSnapshot, Ban, CreateUser, User};
use crate::models::vote::{apply_vote, Target, TargetType, Vote, VoteOutcome, VoteValue};
use crate::validation::normalize_tags;

/// [`DataStore`] backed by process memory
#[derive(Debug, Default)]
pub struct InMemoryStore {
    users: HashMap<Uuid, User>,
    bans: Vec<Ban>,
    questions: Vec<Question>,
    votes: HashMap<(Uuid, Target), Vote>,
    comments: HashMap<Target, Vec<Comment>>,
    notifications: Vec<Notification>,
}

impl InMemoryStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves the acting user against stored accounts
    ///
    /// The stored record wins over the caller's copy so a ban issued after
    /// login takes effect immediately.
    fn actor(&self, actor: Option<&User>) -> StoreResult<User> {
        let claimed = actor.ok_or(AuthzError::NotAuthenticated)?;
        let stored = self
            .users
            .get(&claimed.id)
            .ok_or(AuthzError::NotAuthenticated)?;
        require_user(Some(stored))?;
        Ok(stored.clone())
    }

    fn question_index(&self, id: Uuid) -> StoreResult<usize> {
        self.questions
            .iter()
            .position(|q| q.id == id)
            .ok_or_else(|| StoreError::not_found("question", id))
    }

    /// Returns (question index, answer index) for an answer ID
    fn locate_answer(&self, answer_id: Uuid) -> Option<(usize, usize)> {
        self.questions.iter().enumerate().find_map(|(qi, q)| {
            q.answers
                .iter()
                .position(|a| a.id == answer_id)
                .map(|ai| (qi, ai))
        })
    }

    fn ensure_target(&self, target: Target) -> StoreResult<()> {
        let exists = match target.target_type {
            TargetType::Question => self.questions.iter().any(|q| q.id == target.id),
            TargetType::Answer => self.locate_answer(target.id).is_some(),
        };
        if exists {
            Ok(())
        } else {
            Err(StoreError::not_found(target.target_type.as_str(), target.id))
        }
    }

    /// Applies `delta` to the target's vote total and returns the new total
    fn adjust_votes(&mut self, target: Target, delta: i64) -> StoreResult<i64> {
        match target.target_type {
            TargetType::Question => {
                let idx = self.question_index(target.id)?;
                let question = &mut self.questions[idx];
                question.votes += delta;
                Ok(question.votes)
            }
            TargetType::Answer => {
                let (qi, ai) = self
                    .locate_answer(target.id)
                    .ok_or_else(|| StoreError::not_found("answer", target.id))?;
                let answer = &mut self.questions[qi].answers[ai];
                answer.votes += delta;
                Ok(answer.votes)
            }
        }
    }
}

impl DataStore for InMemoryStore {
    fn create_user(&mut self, input: CreateUser) -> StoreResult<User> {
        input.validate()?;
        self.insert_user(User::new(input.username, input.role))
    }

    fn insert_user(&mut self, user: User) -> StoreResult<User> {
        if self.find_user_by_username(&user.username).is_some() {
            return Err(StoreError::DuplicateUsername(user.username));
        }

        tracing::info!(user_id = %user.id, username = %user.username, role = user.role.as_str(), "user created");
        self.users.insert(user.id, user.clone());
        Ok(user)
    }

    fn find_user(&self, id: Uuid) -> Option<User> {
        self.users.get(&id).cloned()
    }

    fn find_user_by_username(&self, username: &str) -> Option<User> {
        let username = username.trim();
        self.users
            .values()
            .find(|u| u.username.eq_ignore_ascii_case(username))
            .cloned()
    }

    fn users(&self) -> Vec<User> {
        let mut users: Vec<User> = self.users.values().cloned().collect();
        users.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.username.cmp(&b.username)));
        users
    }

    fn record_ban(&mut self, ban: Ban) -> StoreResult<Ban> {
        let user = self
            .users
            .get_mut(&ban.user_id)
            .ok_or_else(|| StoreError::not_found("user", ban.user_id))?;

        if user.banned {
            return Err(StoreError::InvalidOperation(format!(
                "user {} is already banned",
                user.username
            )));
        }

        user.banned = true;
        tracing::info!(user_id = %ban.user_id, banned_by = %ban.banned_by, reason = %ban.reason, "user banned");
        self.bans.push(ban.clone());
        Ok(ban)
    }

    fn bans(&self) -> Vec<Ban> {
        self.bans.clone()
    }

    fn list_questions(&self, query: &QuestionQuery) -> Vec<Question> {
        let mut questions: Vec<Question> = self
            .questions
            .iter()
            .filter(|q| query.admits(q))
            .cloned()
            .collect();
        query.sort(&mut questions);
        questions
    }

    fn get_question(&self, id: Uuid) -> Option<Question> {
        self.questions.iter().find(|q| q.id == id).cloned()
    }

    fn record_view(&mut self, id: Uuid) -> StoreResult<Question> {
        let idx = self.question_index(id)?;
        let question = &mut self.questions[idx];
        question.views += 1;
        Ok(question.clone())
    }

    fn add_question(
        &mut self,
        actor: Option<&User>,
        input: CreateQuestion,
    ) -> StoreResult<Question> {
        let actor = self.actor(actor)?;
        input.validate()?;

        let question = Question {
            id: Uuid::new_v4(),
            title: input.title.trim().to_string(),
            description: input.description,
            tags: normalize_tags(&input.tags),
            author: AuthorSnapshot::from(&actor),
            votes: 0,
            views: 0,
            created_at: Utc::now(),
            answers: Vec::new(),
            accepted_answer_id: None,
        };

        tracing::info!(question_id = %question.id, author = %actor.username, "question added");
        self.questions.push(question.clone());
        Ok(question)
    }

    fn delete_question(&mut self, id: Uuid) -> StoreResult<Question> {
        let idx = self.question_index(id)?;
        let question = self.questions.remove(idx);

        let answer_ids: Vec<Uuid> = question.answers.iter().map(|a| a.id).collect();
        self.votes
            .retain(|(_, target), _| target.id != id && !answer_ids.contains(&target.id));
        self.comments.remove(&Target::question(id));
        for answer_id in &answer_ids {
            self.comments.remove(&Target::answer(*answer_id));
        }
        self.notifications.retain(|n| n.question_id != Some(id));

        tracing::info!(question_id = %id, answers = answer_ids.len(), "question deleted");
        Ok(question)
    }

    fn add_answer(
        &mut self,
        actor: Option<&User>,
        question_id: Uuid,
        input: CreateAnswer,
    ) -> StoreResult<Answer> {
        let actor = self.actor(actor)?;
        input.validate()?;
        let idx = self.question_index(question_id)?;

        let answer = Answer::new(question_id, AuthorSnapshot::from(&actor), input.content);
        let question = &mut self.questions[idx];
        question.answers.push(answer.clone());

        let owner = question.author.id;
        let title = question.title.clone();

        tracing::info!(question_id = %question_id, answer_id = %answer.id, author = %actor.username, "answer added");

        if owner != actor.id {
            self.notify(Notification::new(
                owner,
                NotificationKind::Answer,
                format!("{} answered your question \"{}\"", actor.username, title),
                Some(question_id),
            ));
        }

        Ok(answer)
    }

    fn accept_answer(
        &mut self,
        actor: Option<&User>,
        question_id: Uuid,
        answer_id: Uuid,
    ) -> StoreResult<Answer> {
        let actor = self.actor(actor)?;
        let idx = self.question_index(question_id)?;

        {
            let question = &self.questions[idx];
            require_question_owner(&actor, question)?;
            if question.has_accepted_answer() {
                tracing::debug!(question_id = %question_id, "accept rejected: already accepted");
                return Err(StoreError::AlreadyAccepted(question_id));
            }
            if question.answer(answer_id).is_none() {
                return Err(StoreError::not_found("answer", answer_id));
            }
        }

        let question = &mut self.questions[idx];
        question.accepted_answer_id = Some(answer_id);
        for answer in question.answers.iter_mut() {
            answer.is_accepted = answer.id == answer_id;
        }

        let accepted = question
            .answer(answer_id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("answer", answer_id))?;
        let title = question.title.clone();

        tracing::info!(question_id = %question_id, answer_id = %answer_id, "answer accepted");

        if accepted.author.id != actor.id {
            self.notify(Notification::new(
                accepted.author.id,
                NotificationKind::Accepted,
                format!("Your answer to \"{}\" was accepted", title),
                Some(question_id),
            ));
        }

        Ok(accepted)
    }

    fn vote(
        &mut self,
        actor: Option<&User>,
        target: Target,
        value: VoteValue,
    ) -> StoreResult<VoteOutcome> {
        let actor = self.actor(actor)?;
        self.ensure_target(target)?;

        let key = (actor.id, target);
        let previous = self.votes.get(&key).map(|v| v.value);
        let (current, delta) = apply_vote(previous, value);
        let total = self.adjust_votes(target, delta)?;

        match current {
            Some(value) => {
                self.votes.insert(
                    key,
                    Vote {
                        user_id: actor.id,
                        target,
                        value,
                        created_at: Utc::now(),
                    },
                );
            }
            None => {
                self.votes.remove(&key);
            }
        }

        tracing::info!(
            user_id = %actor.id,
            target = %target,
            previous = ?previous,
            current = ?current,
            total,
            "vote recorded"
        );

        Ok(VoteOutcome { current, total })
    }

    fn get_user_vote(&self, user_id: Uuid, target: Target) -> Option<VoteValue> {
        self.votes.get(&(user_id, target)).map(|v| v.value)
    }

    fn comments(&self, target: Target) -> StoreResult<Vec<Comment>> {
        self.ensure_target(target)?;
        Ok(self.comments.get(&target).cloned().unwrap_or_default())
    }

    fn add_comment(
        &mut self,
        actor: Option<&User>,
        target: Target,
        input: CreateComment,
    ) -> StoreResult<Comment> {
        let actor = self.actor(actor)?;
        input.validate()?;
        self.ensure_target(target)?;

        let parent_id = input.parent_id;
        let comment = Comment::new(target, AuthorSnapshot::from(&actor), input.content, parent_id);

        match parent_id {
            Some(parent_id) => {
                let threads = self
                    .comments
                    .get_mut(&target)
                    .ok_or_else(|| StoreError::not_found("comment", parent_id))?;

                match find_in_threads(threads, parent_id) {
                    None => return Err(StoreError::not_found("comment", parent_id)),
                    Some(parent) if parent.is_reply() => {
                        return Err(StoreError::NestingTooDeep(parent_id))
                    }
                    Some(_) => {}
                }

                let parent = threads
                    .iter_mut()
                    .find(|c| c.id == parent_id)
                    .ok_or_else(|| StoreError::not_found("comment", parent_id))?;
                parent.replies.push(comment.clone());
            }
            None => {
                self.comments.entry(target).or_default().push(comment.clone());
            }
        }

        tracing::info!(comment_id = %comment.id, target = %target, reply = comment.is_reply(), "comment added");
        Ok(comment)
    }

    fn like_comment(&mut self, actor: Option<&User>, comment_id: Uuid) -> StoreResult<Comment> {
        let actor = self.actor(actor)?;

        let comment = self
            .comments
            .values_mut()
            .find_map(|threads| find_in_threads_mut(threads, comment_id))
            .ok_or_else(|| StoreError::not_found("comment", comment_id))?;
        comment.likes += 1;

        tracing::debug!(comment_id = %comment_id, user_id = %actor.id, likes = comment.likes, "comment liked");
        Ok(comment.clone())
    }

    fn notify(&mut self, notification: Notification) {
        tracing::debug!(user_id = %notification.user_id, kind = ?notification.kind, "notification queued");
        self.notifications.push(notification);
    }

    fn notifications(&self, user_id: Uuid) -> Vec<Notification> {
        self.notifications
            .iter()
            .rev()
            .filter(|n| n.user_id == user_id)
            .cloned()
            .collect()
    }

    fn unread_notification_count(&self, user_id: Uuid) -> usize {
        self.notifications
            .iter()
            .filter(|n| n.user_id == user_id && !n.read)
            .count()
    }

    fn mark_notifications_read(&mut self, user_id: Uuid) -> usize {
        let mut changed = 0;
        for notification in self
            .notifications
            .iter_mut()
            .filter(|n| n.user_id == user_id && !n.read)
        {
            notification.read = true;
            changed += 1;
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user::UserRole;

    fn store_with_users() -> (InMemoryStore, User, User) {
        let mut store = InMemoryStore::new();
        let asker = store
            .create_user(CreateUser {
                username: "john_doe".into(),
                role: UserRole::User,
            })
            .unwrap();
        let helper = store
            .create_user(CreateUser {
                username: "jane_smith".into(),
                role: UserRole::User,
            })
            .unwrap();
        (store, asker, helper)
    }

    fn ask(store: &mut InMemoryStore, author: &User) -> Question {
        store
            .add_question(
                Some(author),
                CreateQuestion {
                    title: "How do I parse JSON?".into(),
                    description: "<p>With serde?</p>".into(),
                    tags: vec!["Rust".into(), "serde".into(), "rust".into()],
                },
            )
            .unwrap()
    }

    #[test]
    fn test_duplicate_username_rejected() {
        let (mut store, _, _) = store_with_users();
        let err = store
            .create_user(CreateUser {
                username: "JOHN_DOE".into(),
                role: UserRole::User,
            })
            .unwrap_err();
        assert!(matches!(err, StoreError::DuplicateUsername(_)));
        assert_eq!(store.users().len(), 2);
    }

    #[test]
    fn test_add_question_normalizes_tags() {
        let (mut store, asker, _) = store_with_users();
        let question = ask(&mut store, &asker);
        assert_eq!(question.tags, vec!["rust", "serde"]);
        assert_eq!(question.author.username, "john_doe");
        assert_eq!(store.list_questions(&QuestionQuery::default()).len(), 1);
    }

    #[test]
    fn test_add_question_tag_limits() {
        let (mut store, asker, _) = store_with_users();

        let question = store
            .add_question(
                Some(&asker),
                CreateQuestion {
                    title: "Unicode tags".into(),
                    description: "<p>?</p>".into(),
                    tags: vec!["日本語".repeat(4)],
                },
            )
            .unwrap();
        assert_eq!(question.tags, vec!["日本語".repeat(4)]);

        // Six raw tags fold down to four
        let question = store
            .add_question(
                Some(&asker),
                CreateQuestion {
                    title: "Repeated tags".into(),
                    description: "<p>?</p>".into(),
                    tags: ["rust", "Rust", "RUST", "a", "b", "c"]
                        .iter()
                        .map(|t| t.to_string())
                        .collect(),
                },
            )
            .unwrap();
        assert_eq!(question.tags, vec!["rust", "a", "b", "c"]);
    }

    #[test]
    fn test_unauthenticated_mutation_is_rejected_without_change() {
        let (mut store, asker, _) = store_with_users();
        let question = ask(&mut store, &asker);

        let err = store
            .add_answer(None, question.id, CreateAnswer { content: "Try X".into() })
            .unwrap_err();
        assert!(matches!(
            err,
            StoreError::Unauthorized(AuthzError::NotAuthenticated)
        ));
        assert!(store.get_question(question.id).unwrap().answers.is_empty());
    }

    #[test]
    fn test_unknown_actor_is_unauthenticated() {
        let (mut store, asker, _) = store_with_users();
        let question = ask(&mut store, &asker);
        let ghost = User::new("ghost", UserRole::User);

        let err = store
            .vote(Some(&ghost), Target::question(question.id), VoteValue::Up)
            .unwrap_err();
        assert!(matches!(
            err,
            StoreError::Unauthorized(AuthzError::NotAuthenticated)
        ));
    }

    #[test]
    fn test_answer_notifies_question_author() {
        let (mut store, asker, helper) = store_with_users();
        let question = ask(&mut store, &asker);

        store
            .add_answer(Some(&helper), question.id, CreateAnswer { content: "Try X".into() })
            .unwrap();
        assert_eq!(store.unread_notification_count(asker.id), 1);
        assert_eq!(store.unread_notification_count(helper.id), 0);

        // answering your own question does not notify you
        store
            .add_answer(Some(&asker), question.id, CreateAnswer { content: "Solved it".into() })
            .unwrap();
        assert_eq!(store.unread_notification_count(asker.id), 1);

        assert_eq!(store.mark_notifications_read(asker.id), 1);
        assert_eq!(store.unread_notification_count(asker.id), 0);
        assert_eq!(store.notifications(asker.id).len(), 1);
    }

    #[test]
    fn test_vote_totals_follow_recorded_votes() {
        let (mut store, asker, helper) = store_with_users();
        let question = ask(&mut store, &asker);
        let target = Target::question(question.id);

        let outcome = store.vote(Some(&helper), target, VoteValue::Up).unwrap();
        assert_eq!(outcome.total, 1);
        let outcome = store.vote(Some(&asker), target, VoteValue::Up).unwrap();
        assert_eq!(outcome.total, 2);
        let outcome = store.vote(Some(&helper), target, VoteValue::Down).unwrap();
        assert_eq!(outcome.total, 0);
        assert_eq!(outcome.current, Some(VoteValue::Down));

        let outcome = store.vote(Some(&helper), target, VoteValue::Down).unwrap();
        assert_eq!(outcome.current, None);
        assert_eq!(outcome.total, 1);
        assert_eq!(store.get_user_vote(helper.id, target), None);
        assert_eq!(store.get_user_vote(asker.id, target), Some(VoteValue::Up));
        assert_eq!(store.get_question(question.id).unwrap().votes, 1);
    }

    #[test]
    fn test_vote_on_missing_target() {
        let (mut store, _, helper) = store_with_users();
        let err = store
            .vote(Some(&helper), Target::answer(Uuid::new_v4()), VoteValue::Up)
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound { kind: "answer", .. }));
    }

    #[test]
    fn test_delete_question_drops_votes_and_comments() {
        let (mut store, asker, helper) = store_with_users();
        let question = ask(&mut store, &asker);
        let answer = store
            .add_answer(Some(&helper), question.id, CreateAnswer { content: "Try X".into() })
            .unwrap();
        store
            .vote(Some(&asker), Target::answer(answer.id), VoteValue::Up)
            .unwrap();
        store
            .add_comment(
                Some(&helper),
                Target::question(question.id),
                CreateComment {
                    content: "Nice".into(),
                    parent_id: None,
                },
            )
            .unwrap();

        assert_eq!(store.unread_notification_count(asker.id), 1);

        store.delete_question(question.id).unwrap();
        assert!(store.get_question(question.id).is_none());
        assert!(store.notifications(asker.id).is_empty());
        assert_eq!(store.unread_notification_count(asker.id), 0);
        assert_eq!(store.get_user_vote(asker.id, Target::answer(answer.id)), None);
        assert!(store.comments(Target::question(question.id)).is_err());
    }
}
