mod common;

use std::cell::Cell;

use chrono::NaiveDate;
use rstest::rstest;
use serde_json::json;
use tracker_shared::{
    Category, Collection, Priority, TaskFilter, TaskForm, TaskList, TrackerError, ValidationError,
};

use common::{gateway, signed_in, signed_out, task};

fn titles(list: &TaskList, filter: TaskFilter, search: &str) -> Vec<String> {
    list.view(filter, search)
        .iter()
        .map(|task| task.title.clone())
        .collect()
}

fn form(title: &str) -> TaskForm {
    TaskForm {
        title: title.to_string(),
        ..TaskForm::default()
    }
}

#[test]
fn same_deadline_breaks_ties_by_priority() {
    let list = TaskList::from_tasks(vec![
        task("Submit Paper", Priority::Medium, Some("2024-06-03"), false),
        task("Study for Physics Exam", Priority::High, Some("2024-06-03"), false),
    ]);

    assert_eq!(
        titles(&list, TaskFilter::All, ""),
        ["Study for Physics Exam", "Submit Paper"]
    );
}

#[test]
fn view_all_sorts_deadlines_first_and_keeps_undated_order() {
    let list = TaskList::from_tasks(vec![
        task("Undated low", Priority::Low, None, false),
        task("Late", Priority::High, Some("2024-07-01"), false),
        task("Undated high", Priority::High, None, true),
        task("Early low", Priority::Low, Some("2024-06-01"), false),
        task("Early high", Priority::High, Some("2024-06-01"), true),
    ]);

    let view = list.view(TaskFilter::All, "");
    assert_eq!(view.len(), list.len());
    assert_eq!(
        titles(&list, TaskFilter::All, ""),
        ["Early high", "Early low", "Late", "Undated low", "Undated high"]
    );
}

#[test]
fn view_is_restartable() {
    let list = TaskList::from_tasks(vec![
        task("B", Priority::Low, Some("2024-06-02"), false),
        task("A", Priority::Low, Some("2024-06-01"), false),
    ]);
    let view = list.view(TaskFilter::All, "");

    let first: Vec<_> = view.iter().map(|task| task.id).collect();
    let second: Vec<_> = (&view).into_iter().map(|task| task.id).collect();
    assert_eq!(first, second);
}

#[rstest]
#[case(TaskFilter::All, "", 3)]
#[case(TaskFilter::Completed, "", 1)]
#[case(TaskFilter::Pending, "", 2)]
#[case(TaskFilter::All, "PHYSICS", 1)]
#[case(TaskFilter::All, "chapter", 2)]
#[case(TaskFilter::Completed, "physics", 0)]
fn filter_and_search_combine(#[case] filter: TaskFilter, #[case] search: &str, #[case] expected: usize) {
    let mut physics = task("Study for Physics Exam", Priority::High, None, false);
    physics.description = Some("Review chapters 1-3".to_string());
    let mut math = task("Math homework", Priority::Medium, None, true);
    math.description = Some("Problems from chapter 5".to_string());
    let list = TaskList::from_tasks(vec![physics, math, task("Laundry", Priority::Low, None, false)]);

    assert_eq!(list.view(filter, search).len(), expected);
}

#[test]
fn empty_view_message_depends_on_collection() {
    let empty = TaskList::new();
    assert_eq!(
        empty.view(TaskFilter::All, "").empty_message(),
        "Add your first task to get started!"
    );

    let list = TaskList::from_tasks(vec![task("Essay", Priority::High, None, false)]);
    let view = list.view(TaskFilter::Completed, "");
    assert!(view.is_empty());
    assert_eq!(view.empty_message(), "Try changing your search or filter");
}

#[test]
fn progress_of_three_with_two_completed() {
    let list = TaskList::from_tasks(vec![
        task("A", Priority::High, None, true),
        task("B", Priority::High, None, true),
        task("C", Priority::High, None, false),
    ]);
    let progress = list.progress();
    assert_eq!(progress.total, 3);
    assert_eq!(progress.completed, 2);
    assert_eq!(progress.pending, 1);
    assert_eq!(progress.percent_complete, 67);
    assert_eq!(progress.label(), "67% Complete");
}

#[test]
fn empty_progress_is_zero() {
    let progress = TaskList::new().progress();
    assert_eq!(progress.total, 0);
    assert_eq!(progress.percent_complete, 0);
}

#[tokio::test]
async fn load_seeds_three_samples_through_the_store() {
    let (api, store) = gateway();
    let mut list = TaskList::new();

    list.load(&api, &signed_out()).await;

    assert_eq!(list.len(), 3);
    assert_eq!(store.len(Collection::Tasks), 3);
    assert!(list.tasks().iter().all(|task| task.user_id.is_none()));
    assert_eq!(list.progress().completed, 1);
}

#[tokio::test]
async fn load_keeps_existing_tasks_without_seeding() {
    let (api, store) = gateway();
    let session = signed_in("Ada");
    let mut owned = task("Essay", Priority::High, None, false);
    owned.user_id = session.user_id();
    store.seed(Collection::Tasks, &owned).unwrap();
    store
        .seed(Collection::Tasks, &task("Other", Priority::Low, None, false))
        .unwrap();

    let mut list = TaskList::new();
    list.load(&api, &session).await;

    assert_eq!(list.len(), 1);
    assert_eq!(list.tasks()[0].title, "Essay");
    assert_eq!(store.write_calls(), 0);
}

#[tokio::test]
async fn load_skips_unreadable_records_without_seeding() {
    let (api, store) = gateway();
    store
        .seed(Collection::Tasks, &task("Good task", Priority::High, None, false))
        .unwrap();
    store
        .seed(
            Collection::Tasks,
            &json!({ "title": "Legacy task", "priority": "low", "completed": false }),
        )
        .unwrap();
    store
        .seed(
            Collection::Tasks,
            &json!({ "title": "Broken task", "priority": "urgent", "createdAt": "2024-06-01T10:00:00Z" }),
        )
        .unwrap();

    let mut list = TaskList::new();
    list.load(&api, &signed_out()).await;

    let loaded: Vec<_> = list.tasks().iter().map(|task| task.title.as_str()).collect();
    assert_eq!(loaded, ["Good task", "Legacy task"]);
    assert_eq!(list.tasks()[1].priority, Priority::Low);
    assert_eq!(store.len(Collection::Tasks), 3);
    assert_eq!(store.write_calls(), 0);
}

#[tokio::test]
async fn load_while_offline_seeds_nothing() {
    let (api, store) = gateway();
    store.set_offline(true);
    let mut list = TaskList::new();

    list.load(&api, &signed_out()).await;

    assert!(list.is_empty());
    assert_eq!(store.write_calls(), 3);
}

#[tokio::test]
async fn submit_without_session_never_writes() {
    let (api, store) = gateway();
    let mut list = TaskList::new();

    let err = list.submit(&api, &signed_out(), form("Essay")).await.unwrap_err();

    assert_eq!(err, TrackerError::AuthRequired);
    assert!(err.requires_login());
    assert_eq!(store.write_calls(), 0);
    assert_eq!(store.read_calls(), 0);
}

#[tokio::test]
async fn blank_title_is_rejected_before_the_network() {
    let (api, store) = gateway();
    let mut list = TaskList::new();

    let err = list.submit(&api, &signed_in("Ada"), form("   ")).await.unwrap_err();

    assert_eq!(err, TrackerError::Validation(ValidationError::EmptyTitle));
    assert!(!err.requires_login());
    assert_eq!(store.write_calls(), 0);
}

#[tokio::test]
async fn submit_creates_task_owned_by_session_user() {
    let (api, store) = gateway();
    let session = signed_in("Ada");
    let mut list = TaskList::new();

    let created = list
        .submit(
            &api,
            &session,
            TaskForm {
                title: " Lab report ".to_string(),
                description: "Section 2".to_string(),
                priority: Priority::High,
                deadline: NaiveDate::from_ymd_opt(2024, 6, 10),
                category: Category::Work,
            },
        )
        .await
        .unwrap();

    assert_eq!(created.user_id, session.user_id());
    assert_eq!(created.title, "Lab report");
    assert_eq!(list.tasks(), [created.clone()]);
    assert_eq!(store.records(Collection::Tasks)[0]["id"], created.id.to_string());
}

#[tokio::test]
async fn editing_replaces_the_target_and_clears_edit_mode() {
    let (api, store) = gateway();
    let session = signed_in("Ada");
    let mut list = TaskList::new();
    let created = list.submit(&api, &session, form("Draft essay")).await.unwrap();

    let populated = list.edit(created.id).unwrap();
    assert_eq!(populated.title, "Draft essay");
    assert_eq!(list.editing(), Some(created.id));
    assert_eq!(store.write_calls(), 1);

    let updated = list
        .submit(
            &api,
            &session,
            TaskForm {
                title: "Final essay".to_string(),
                ..populated
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!(list.len(), 1);
    assert_eq!(list.get(created.id).unwrap().title, "Final essay");
    assert_eq!(list.editing(), None);
    assert_eq!(store.len(Collection::Tasks), 1);
}

#[tokio::test]
async fn failed_edit_keeps_edit_target_and_local_state() {
    let (api, store) = gateway();
    let session = signed_in("Ada");
    let mut list = TaskList::new();
    let created = list.submit(&api, &session, form("Draft essay")).await.unwrap();
    list.edit(created.id);
    store.set_offline(true);

    let err = list.submit(&api, &session, form("Final essay")).await.unwrap_err();

    assert!(matches!(err, TrackerError::Network(_)));
    assert_eq!(list.editing(), Some(created.id));
    assert_eq!(list.get(created.id).unwrap().title, "Draft essay");
}

#[tokio::test]
async fn toggling_twice_restores_completion() {
    let (api, _store) = gateway();
    let session = signed_in("Ada");
    let mut list = TaskList::new();
    let created = list.submit(&api, &session, form("Essay")).await.unwrap();

    let once = list.toggle_complete(&api, created.id).await.unwrap().unwrap();
    assert!(once.completed);
    assert_eq!(list.progress().completed, 1);

    let twice = list.toggle_complete(&api, created.id).await.unwrap().unwrap();
    assert_eq!(twice.completed, created.completed);
    assert_eq!(list.get(created.id).unwrap(), &twice);
}

#[tokio::test]
async fn toggle_takes_the_store_representation() {
    let (api, store) = gateway();
    let original = task("Essay", Priority::High, None, false);
    let id = store.seed(Collection::Tasks, &original).unwrap();
    let mut list = TaskList::from_tasks(api.list_tasks(None).await);

    let toggled = list.toggle_complete(&api, id).await.unwrap().unwrap();
    assert_eq!(toggled, list.get(id).unwrap().clone());
    assert!(toggled.completed);
}

#[tokio::test]
async fn toggling_unknown_task_is_a_no_op() {
    let (api, store) = gateway();
    let mut list = TaskList::new();
    assert_eq!(list.toggle_complete(&api, uuid::Uuid::new_v4()).await, Ok(None));
    assert_eq!(store.write_calls(), 0);
}

#[tokio::test]
async fn declined_removal_changes_nothing() {
    let (api, store) = gateway();
    let session = signed_in("Ada");
    let mut list = TaskList::new();
    let created = list.submit(&api, &session, form("Essay")).await.unwrap();
    let asked = Cell::new(0);

    let removed = list
        .remove(&api, created.id, &|_: &str| {
            asked.set(asked.get() + 1);
            false
        })
        .await
        .unwrap();

    assert!(!removed);
    assert_eq!(asked.get(), 1);
    assert_eq!(list.len(), 1);
    assert_eq!(store.len(Collection::Tasks), 1);
    assert_eq!(store.write_calls(), 1);
}

#[tokio::test]
async fn confirmed_removal_deletes_after_store_confirms() {
    let (api, store) = gateway();
    let session = signed_in("Ada");
    let mut list = TaskList::new();
    let created = list.submit(&api, &session, form("Essay")).await.unwrap();

    assert!(list.remove(&api, created.id, &|_: &str| true).await.unwrap());
    assert!(list.is_empty());
    assert!(store.is_empty(Collection::Tasks));
}

#[tokio::test]
async fn failed_removal_keeps_the_task() {
    let (api, store) = gateway();
    let session = signed_in("Ada");
    let mut list = TaskList::new();
    let created = list.submit(&api, &session, form("Essay")).await.unwrap();
    store.set_offline(true);

    let err = list.remove(&api, created.id, &|_: &str| true).await.unwrap_err();

    assert!(matches!(err, TrackerError::Network(_)));
    assert_eq!(list.len(), 1);
}
