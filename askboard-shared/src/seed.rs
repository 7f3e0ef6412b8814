/// Mock sample data
///
/// Installs a small, fixed set of users, questions, answers, votes and
/// comments so a fresh server has something to show. Everything goes
/// through the public [`DataStore`] operations, so seeded records obey the
/// same invariants as user-created ones.
///
/// # Accounts
///
/// | username     | role  | reputation |
/// |--------------|-------|------------|
/// | `john_doe`   | user  | 1250       |
/// | `jane_smith` | user  | 3450       |
/// | `admin`      | admin | 9999       |

use serde::Serialize;

use crate::models::answer::CreateAnswer;
use crate::models::comment::CreateComment;
use crate::models::question::CreateQuestion;
use crate::models::user::{User, UserRole};
use crate::models::vote::{Target, VoteValue};
use crate::store::{DataStore, StoreResult};

/// What [`seed_store`] inserted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SeedSummary {
    pub users: usize,
    pub questions: usize,
    pub answers: usize,
    pub comments: usize,
}

/// Fills an empty store with the mock records
///
/// # Errors
///
/// Fails with `StoreError::DuplicateUsername` if the store already holds
/// one of the seed accounts.
pub fn seed_store(store: &mut dyn DataStore) -> StoreResult<SeedSummary> {
    let mut summary = SeedSummary::default();

    let john = store.insert_user(User::new("john_doe", UserRole::User).with_reputation(1250))?;
    let jane = store.insert_user(User::new("jane_smith", UserRole::User).with_reputation(3450))?;
    let admin = store.insert_user(User::new("admin", UserRole::Admin).with_reputation(9999))?;
    summary.users = 3;

    let state_question = store.add_question(
        Some(&john),
        CreateQuestion {
            title: "How do I share mutable state between axum handlers?".into(),
            description: "<p>I have a <code>HashMap</code> that every handler needs to \
                          update. What is the idiomatic way to share it?</p>"
                .into(),
            tags: vec!["rust".into(), "axum".into(), "async".into()],
        },
    )?;
    let lifetime_question = store.add_question(
        Some(&jane),
        CreateQuestion {
            title: "Why does the borrow checker reject this loop?".into(),
            description: "<p>I push to a <code>Vec</code> while iterating over it and \
                          get E0502.</p>"
                .into(),
            tags: vec!["rust".into(), "borrow-checker".into()],
        },
    )?;
    store.add_question(
        Some(&john),
        CreateQuestion {
            title: "Best way to structure a Cargo workspace?".into(),
            description: "<p>Should shared types live in their own crate?</p>".into(),
            tags: vec!["rust".into(), "cargo".into()],
        },
    )?;
    summary.questions = 3;

    let arc_answer = store.add_answer(
        Some(&jane),
        state_question.id,
        CreateAnswer {
            content: "<p>Wrap it in <code>Arc&lt;RwLock&lt;_&gt;&gt;</code> and put it \
                      in your router state.</p>"
                .into(),
        },
    )?;
    store.add_answer(
        Some(&admin),
        state_question.id,
        CreateAnswer {
            content: "<p>Consider a channel to a single owner task if writes are \
                      frequent.</p>"
                .into(),
        },
    )?;
    store.add_answer(
        Some(&john),
        lifetime_question.id,
        CreateAnswer {
            content: "<p>Collect the new items first, then extend after the loop.</p>".into(),
        },
    )?;
    summary.answers = 3;

    store.accept_answer(Some(&john), state_question.id, arc_answer.id)?;

    store.vote(Some(&jane), Target::question(state_question.id), VoteValue::Up)?;
    store.vote(Some(&admin), Target::question(state_question.id), VoteValue::Up)?;
    store.vote(Some(&john), Target::answer(arc_answer.id), VoteValue::Up)?;
    store.vote(Some(&john), Target::question(lifetime_question.id), VoteValue::Up)?;

    let comment = store.add_comment(
        Some(&jane),
        Target::question(state_question.id),
        CreateComment {
            content: "Great question! I had the same issue.".into(),
            parent_id: None,
        },
    )?;
    store.add_comment(
        Some(&john),
        Target::question(state_question.id),
        CreateComment {
            content: "Glad it's not just me.".into(),
            parent_id: Some(comment.id),
        },
    )?;
    summary.comments = 2;

    // Seeding generates answer/accept notifications; start everyone clean.
    for user in [&john, &jane, &admin] {
        store.mark_notifications_read(user.id);
    }

    tracing::info!(
        users = summary.users,
        questions = summary.questions,
        answers = summary.answers,
        comments = summary.comments,
        "mock data seeded"
    );

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::admin::AdminStats;
    use crate::models::question::QuestionQuery;
    use crate::store::{InMemoryStore, StoreError};

    #[test]
    fn test_seed_store() {
        let mut store = InMemoryStore::new();
        let summary = seed_store(&mut store).unwrap();
        assert_eq!(summary.users, 3);

        let stats = AdminStats::collect(&store);
        assert_eq!(stats.total_questions, 3);
        assert_eq!(stats.total_answers, 3);
        assert_eq!(stats.accepted_questions, 1);
        assert_eq!(stats.unanswered_questions, 1);

        let admin = store.find_user_by_username("admin").unwrap();
        assert!(admin.role.is_admin());
        assert_eq!(store.unread_notification_count(admin.id), 0);

        let top = store.list_questions(&QuestionQuery {
            sort: crate::models::question::QuestionSort::Votes,
            ..Default::default()
        });
        assert_eq!(top[0].votes, 2);
    }

    #[test]
    fn test_seed_twice_fails() {
        let mut store = InMemoryStore::new();
        seed_store(&mut store).unwrap();
        assert!(matches!(
            seed_store(&mut store),
            Err(StoreError::DuplicateUsername(_))
        ));
    }
}
