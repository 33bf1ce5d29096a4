use std::collections::HashSet;

use chrono::{NaiveDate, Utc};
use log::{error, info};
use sauron::prelude::*;
use tracker_shared::{
    tasks::TaskWriteOutcome,
    validation::{password_reset_notice, LoginForm, SignupForm},
    widgets::{
        contact::{SENDING_NOTICE, SENT_NOTICE, SIMULATED_SEND_DELAY},
        notification::AUTO_DISMISS_AFTER,
        select_plan, Accordion, ContactForm, NavMenu, NotificationKind, Notifier, Page, Plan,
        FAQ_ENTRIES,
    },
    ApiGateway, ClientConfig, ClientContext, Confirm, Feature, RecordId, Task, TaskFilter, TaskForm,
    TaskList, TaskWrite, TeamMember, TrackerError, TrackerResult, User,
};

use crate::browser::{self, BrowserConfirm, LocalStorage};
use crate::fetch::FetchStore;

const LOGOUT_PROMPT: &str = "Are you sure you want to logout?";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modal {
    Login,
    Signup,
    ForgotPassword,
    ContactSent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignupField {
    FirstName,
    LastName,
    Email,
    Password,
    ConfirmPassword,
    University,
    Major,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactField {
    Name,
    Email,
    Subject,
    Category,
    Message,
}

/// Which user action a store write came from, for its notice and to clear
/// the per-task busy marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteKind {
    Save,
    Toggle(RecordId),
    Delete(RecordId),
}

impl WriteKind {
    fn failure_notice(&self) -> &'static str {
        match self {
            WriteKind::Save => "Failed to save task. Please try again.",
            WriteKind::Toggle(_) => "Failed to update task",
            WriteKind::Delete(_) => "Failed to delete task",
        }
    }
}

#[derive(Debug, Clone)]
pub enum Msg {
    // Navigation and chrome
    NavigateTo(Page),
    ToggleMenu,
    ToggleTheme,
    DismissNotification(u64),

    // Tasks
    TasksLoaded(Vec<Task>),
    SetTaskTitle(String),
    SetTaskDescription(String),
    SetTaskPriority(String),
    SetTaskDeadline(String),
    SetTaskCategory(String),
    SubmitTask,
    ToggleTask(RecordId),
    EditTask(RecordId),
    CancelEdit,
    DeleteTask(RecordId),
    TaskWritten(WriteKind, TrackerResult<TaskWriteOutcome>),
    SetFilter(String),
    SetSearch(String),

    // Accounts
    AuthButton,
    OpenModal(Modal),
    CloseModal,
    SetLoginEmail(String),
    SetLoginPassword(String),
    SubmitLogin,
    LoggedIn(TrackerResult<User>),
    SetSignupField(SignupField, String),
    SubmitSignup,
    SignedUp(TrackerResult<User>),
    SetResetEmail(String),
    SubmitPasswordReset,

    // Site content
    FeaturesLoaded(Vec<Feature>),
    TeamLoaded(Vec<TeamMember>),
    ToggleFaq(usize),
    SetContactField(ContactField, String),
    SubmitContact,
    ContactSent,
    SelectPlan(Plan),
}

pub struct Model {
    pub(crate) api: ApiGateway<FetchStore>,
    pub(crate) context: ClientContext<LocalStorage>,
    pub(crate) page: Page,
    pub(crate) menu: NavMenu,
    pub(crate) notifier: Notifier,
    pub(crate) modal: Option<Modal>,

    pub(crate) tasks: TaskList,
    pub(crate) loading: bool,
    pub(crate) saving: bool,
    pub(crate) busy_tasks: HashSet<RecordId>,
    pub(crate) task_form: TaskForm,
    pub(crate) filter: TaskFilter,
    pub(crate) search: String,

    pub(crate) login: LoginForm,
    pub(crate) signup: SignupForm,
    pub(crate) reset_email: String,

    pub(crate) features: Vec<Feature>,
    pub(crate) team: Vec<TeamMember>,
    pub(crate) faq: Accordion,
    pub(crate) contact: ContactForm,
    pub(crate) contact_sending: bool,
}

impl Model {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            api: ApiGateway::new(FetchStore::new(config)),
            context: ClientContext::restore(LocalStorage),
            page: Page::default(),
            menu: NavMenu::default(),
            notifier: Notifier::default(),
            modal: None,
            tasks: TaskList::new(),
            loading: false,
            saving: false,
            busy_tasks: HashSet::new(),
            task_form: TaskForm::default(),
            filter: TaskFilter::default(),
            search: String::new(),
            login: LoginForm::default(),
            signup: SignupForm::default(),
            reset_email: String::new(),
            features: Vec::new(),
            team: Vec::new(),
            faq: Accordion::new(FAQ_ENTRIES.len()),
            contact: ContactForm::default(),
            contact_sending: false,
        }
    }

    fn notify(&mut self, kind: NotificationKind, message: impl Into<String>) -> Cmd<Msg> {
        let id = self.notifier.show(kind, message);
        Cmd::new(async move {
            browser::sleep(AUTO_DISMISS_AFTER).await;
            Msg::DismissNotification(id)
        })
    }

    fn load_tasks(&mut self) -> Cmd<Msg> {
        self.loading = true;
        let api = self.api.clone();
        let user_id = self.context.session.user_id();
        Cmd::new(async move { Msg::TasksLoaded(TaskList::fetch_or_seed(&api, user_id, Utc::now()).await) })
    }

    /// Fetches the content a page shows, once per page load.
    fn load_page_content(&self) -> Cmd<Msg> {
        let api = self.api.clone();
        match self.page {
            Page::Features if self.features.is_empty() => {
                Cmd::new(async move { Msg::FeaturesLoaded(api.list_features().await) })
            }
            Page::Team if self.team.is_empty() => {
                Cmd::new(async move { Msg::TeamLoaded(api.list_team().await) })
            }
            _ => Cmd::none(),
        }
    }

    fn execute(&self, kind: WriteKind, write: TaskWrite) -> Cmd<Msg> {
        let api = self.api.clone();
        Cmd::new(async move { Msg::TaskWritten(kind, write.execute(&api).await) })
    }

    fn task_written(&mut self, kind: WriteKind, result: TrackerResult<TaskWriteOutcome>) -> Cmd<Msg> {
        match kind {
            WriteKind::Save => self.saving = false,
            WriteKind::Toggle(id) | WriteKind::Delete(id) => {
                self.busy_tasks.remove(&id);
            }
        }

        let outcome = match result {
            Ok(outcome) => outcome,
            Err(err) => {
                error!("event=task_write module=app status=error kind={kind:?} error={err}");
                return self.notify(NotificationKind::Error, kind.failure_notice());
            }
        };

        if kind == WriteKind::Save {
            self.task_form = TaskForm::default();
        }
        match settle_write(&mut self.tasks, outcome) {
            Some((notice_kind, notice)) => self.notify(notice_kind, notice),
            None => {
                info!("event=task_write module=app status=stale kind={kind:?}");
                Cmd::none()
            }
        }
    }

    fn signed_in(&mut self, user: User, welcome: String) -> Cmd<Msg> {
        self.context.session.sign_in(user);
        self.modal = None;
        self.login = LoginForm::default();
        self.signup = SignupForm::default();
        self.page = Page::Home;
        browser::push_path(Page::Home.to_path());
        let notice = self.notify(NotificationKind::Success, welcome);
        Cmd::batch(vec![notice, self.load_tasks()])
    }
}

impl Application for Model {
    type MSG = Msg;

    fn init(&mut self) -> Cmd<Msg> {
        browser::apply_theme(self.context.theme.current());
        self.page = Page::from_path(&browser::current_path());
        info!("event=init module=app page={}", self.page.label());

        Cmd::batch(vec![self.load_tasks(), self.load_page_content()])
    }

    fn update(&mut self, msg: Msg) -> Cmd<Msg> {
        match msg {
            Msg::NavigateTo(page) => {
                self.page = page;
                self.menu.close();
                browser::push_path(page.to_path());
                self.load_page_content()
            }
            Msg::ToggleMenu => {
                self.menu.toggle();
                Cmd::none()
            }
            Msg::ToggleTheme => {
                browser::apply_theme(self.context.theme.toggle());
                Cmd::none()
            }
            Msg::DismissNotification(id) => {
                self.notifier.dismiss(id);
                Cmd::none()
            }

            Msg::TasksLoaded(tasks) => {
                info!("event=tasks_loaded module=app count={}", tasks.len());
                self.tasks.replace_all(tasks);
                self.task_form = TaskForm::default();
                self.loading = false;
                Cmd::none()
            }
            Msg::SetTaskTitle(value) => {
                self.task_form.title = value;
                Cmd::none()
            }
            Msg::SetTaskDescription(value) => {
                self.task_form.description = value;
                Cmd::none()
            }
            Msg::SetTaskPriority(value) => {
                if let Ok(priority) = value.parse() {
                    self.task_form.priority = priority;
                }
                Cmd::none()
            }
            Msg::SetTaskDeadline(value) => {
                self.task_form.deadline = NaiveDate::parse_from_str(&value, "%Y-%m-%d").ok();
                Cmd::none()
            }
            Msg::SetTaskCategory(value) => {
                if let Ok(category) = value.parse() {
                    self.task_form.category = category;
                }
                Cmd::none()
            }
            Msg::SubmitTask => {
                if self.saving {
                    return Cmd::none();
                }
                match self
                    .tasks
                    .plan_submit(&self.context.session, self.task_form.clone())
                {
                    Ok(write) => {
                        self.saving = true;
                        self.execute(WriteKind::Save, write)
                    }
                    Err(err) => {
                        if err.requires_login() {
                            self.modal = Some(Modal::Login);
                        }
                        self.notify(NotificationKind::Error, err.to_string())
                    }
                }
            }
            Msg::ToggleTask(id) => {
                match claim_write(&mut self.busy_tasks, id, || self.tasks.plan_toggle(id)) {
                    Some(write) => self.execute(WriteKind::Toggle(id), write),
                    None => Cmd::none(),
                }
            }
            Msg::EditTask(id) => match self.tasks.edit(id) {
                Some(form) => {
                    let notice = format!("Editing task: {}", form.title);
                    self.task_form = form;
                    self.notify(NotificationKind::Info, notice)
                }
                None => Cmd::none(),
            },
            Msg::CancelEdit => {
                self.tasks.cancel_edit();
                self.task_form = TaskForm::default();
                Cmd::none()
            }
            Msg::DeleteTask(id) => {
                let planned = claim_write(&mut self.busy_tasks, id, || {
                    self.tasks.plan_remove(id, &BrowserConfirm)
                });
                match planned {
                    Some(write) => self.execute(WriteKind::Delete(id), write),
                    None => Cmd::none(),
                }
            }
            Msg::TaskWritten(kind, result) => self.task_written(kind, result),
            Msg::SetFilter(value) => {
                self.filter = value.parse().unwrap_or_default();
                Cmd::none()
            }
            Msg::SetSearch(value) => {
                self.search = value;
                Cmd::none()
            }

            Msg::AuthButton => {
                if !self.context.session.is_active() {
                    self.modal = Some(Modal::Login);
                    return Cmd::none();
                }
                if !BrowserConfirm.confirm(LOGOUT_PROMPT) {
                    return Cmd::none();
                }
                self.context.logout(&mut self.tasks);
                self.task_form = TaskForm::default();
                self.notify(NotificationKind::Info, "Logged out successfully")
            }
            Msg::OpenModal(modal) => {
                self.modal = Some(modal);
                Cmd::none()
            }
            Msg::CloseModal => {
                self.modal = None;
                Cmd::none()
            }
            Msg::SetLoginEmail(value) => {
                self.login.email = value;
                Cmd::none()
            }
            Msg::SetLoginPassword(value) => {
                self.login.password = value;
                Cmd::none()
            }
            Msg::SubmitLogin => {
                if let Err(err) = self.login.validate() {
                    return self.notify(NotificationKind::Error, err.to_string());
                }
                let api = self.api.clone();
                let LoginForm { email, password } = self.login.clone();
                let notice = self.notify(NotificationKind::Info, "Logging in...");
                let login = Cmd::new(async move { Msg::LoggedIn(api.login(&email, &password).await) });
                Cmd::batch(vec![notice, login])
            }
            Msg::LoggedIn(Ok(user)) => {
                let welcome = format!("Welcome back, {}!", user.first_name);
                self.signed_in(user, welcome)
            }
            Msg::LoggedIn(Err(err)) => {
                error!("event=login module=app status=error error={err}");
                let notice = match err {
                    TrackerError::NotFound { .. } => "Invalid email or password",
                    _ => "Login failed. Please try again.",
                };
                self.notify(NotificationKind::Error, notice)
            }
            Msg::SetSignupField(field, value) => {
                let slot = match field {
                    SignupField::FirstName => &mut self.signup.first_name,
                    SignupField::LastName => &mut self.signup.last_name,
                    SignupField::Email => &mut self.signup.email,
                    SignupField::Password => &mut self.signup.password,
                    SignupField::ConfirmPassword => &mut self.signup.confirm_password,
                    SignupField::University => &mut self.signup.university,
                    SignupField::Major => &mut self.signup.major,
                };
                *slot = value;
                Cmd::none()
            }
            Msg::SubmitSignup => {
                let new_user = match self.signup.clone().into_new_user(Utc::now()) {
                    Ok(new_user) => new_user,
                    Err(err) => return self.notify(NotificationKind::Error, err.to_string()),
                };
                let api = self.api.clone();
                let notice = self.notify(NotificationKind::Info, "Creating account...");
                let signup = Cmd::new(async move { Msg::SignedUp(api.create_user(&new_user).await) });
                Cmd::batch(vec![notice, signup])
            }
            Msg::SignedUp(Ok(user)) => {
                let welcome = format!("Account created successfully! Welcome, {}!", user.first_name);
                self.signed_in(user, welcome)
            }
            Msg::SignedUp(Err(err)) => {
                error!("event=signup module=app status=error error={err}");
                let notice = match err {
                    TrackerError::Conflict { .. } => err.to_string(),
                    _ => "Failed to create account. Please try again.".to_string(),
                };
                self.notify(NotificationKind::Error, notice)
            }
            Msg::SetResetEmail(value) => {
                self.reset_email = value;
                Cmd::none()
            }
            Msg::SubmitPasswordReset => match password_reset_notice(&self.reset_email) {
                Ok(notice) => {
                    self.modal = None;
                    self.reset_email.clear();
                    self.notify(NotificationKind::Info, notice)
                }
                Err(err) => self.notify(NotificationKind::Error, err.to_string()),
            },

            Msg::FeaturesLoaded(features) => {
                self.features = features;
                Cmd::none()
            }
            Msg::TeamLoaded(team) => {
                self.team = team;
                Cmd::none()
            }
            Msg::ToggleFaq(index) => {
                self.faq.toggle(index);
                Cmd::none()
            }
            Msg::SetContactField(field, value) => {
                let slot = match field {
                    ContactField::Name => &mut self.contact.name,
                    ContactField::Email => &mut self.contact.email,
                    ContactField::Subject => &mut self.contact.subject,
                    ContactField::Category => &mut self.contact.category,
                    ContactField::Message => &mut self.contact.message,
                };
                *slot = value;
                Cmd::none()
            }
            Msg::SubmitContact => {
                if self.contact_sending {
                    return Cmd::none();
                }
                if let Err(err) = self.contact.validate() {
                    return self.notify(NotificationKind::Error, err.to_string());
                }
                self.contact_sending = true;
                let notice = self.notify(NotificationKind::Info, SENDING_NOTICE);
                let send = Cmd::new(async {
                    browser::sleep(SIMULATED_SEND_DELAY).await;
                    Msg::ContactSent
                });
                Cmd::batch(vec![notice, send])
            }
            Msg::ContactSent => {
                self.contact_sending = false;
                self.contact.reset();
                self.modal = Some(Modal::ContactSent);
                self.notify(NotificationKind::Success, SENT_NOTICE)
            }
            Msg::SelectPlan(plan) => {
                let selection = select_plan(plan, self.context.session.is_logged_in());
                let kind = if selection.requires_login() {
                    self.modal = Some(Modal::Login);
                    NotificationKind::Error
                } else {
                    NotificationKind::Success
                };
                self.notify(kind, selection.message())
            }
        }
    }

    fn view(&self) -> Node<Msg> {
        self.view_root()
    }
}

/// Plans a per-task write unless one for the same task is still in flight.
/// `plan` is not consulted for a busy task, so no confirmation is shown.
fn claim_write(
    busy: &mut HashSet<RecordId>,
    id: RecordId,
    plan: impl FnOnce() -> Option<TaskWrite>,
) -> Option<TaskWrite> {
    if busy.contains(&id) {
        return None;
    }
    let write = plan()?;
    busy.insert(id);
    Some(write)
}

/// Folds a confirmed write into `tasks` and picks the notice for it.
/// An update whose task has since left the list yields no notice.
fn settle_write(
    tasks: &mut TaskList,
    outcome: TaskWriteOutcome,
) -> Option<(NotificationKind, String)> {
    match outcome {
        TaskWriteOutcome::Created(task) => {
            tasks.apply(TaskWriteOutcome::Created(task));
            Some((NotificationKind::Success, "Task added successfully!".to_string()))
        }
        TaskWriteOutcome::Deleted(id) => {
            tasks.apply(TaskWriteOutcome::Deleted(id));
            Some((NotificationKind::Info, "Task deleted".to_string()))
        }
        updated @ TaskWriteOutcome::Updated { from_edit, .. } => {
            let task = tasks.apply(updated)?;
            let notice = if from_edit {
                "Task updated successfully!".to_string()
            } else if task.completed {
                format!("Task \"{}\" completed", task.title)
            } else {
                format!("Task \"{}\" marked as pending", task.title)
            };
            Some((NotificationKind::Success, notice))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use tracker_shared::{Category, Priority};

    fn task(title: &str, completed: bool) -> Task {
        Task {
            id: RecordId::new_v4(),
            user_id: None,
            title: title.to_string(),
            description: None,
            priority: Priority::Medium,
            deadline: None,
            category: Category::Academic,
            completed,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn busy_task_is_not_planned_twice() {
        let essay = task("Essay", false);
        let list = TaskList::from_tasks(vec![essay.clone()]);
        let mut busy = HashSet::new();
        let asked = Cell::new(0);
        let plan = || {
            asked.set(asked.get() + 1);
            list.plan_toggle(essay.id)
        };

        assert!(claim_write(&mut busy, essay.id, plan).is_some());
        assert!(busy.contains(&essay.id));
        assert!(claim_write(&mut busy, essay.id, plan).is_none());
        assert_eq!(asked.get(), 1);
    }

    #[test]
    fn declined_write_leaves_task_idle() {
        let id = RecordId::new_v4();
        let mut busy = HashSet::new();

        assert!(claim_write(&mut busy, id, || None).is_none());
        assert!(busy.is_empty());
    }

    #[test]
    fn edit_saved_after_removal_has_no_notice() {
        let essay = task("Essay", false);
        let mut tasks = TaskList::from_tasks(vec![task("Reading", false)]);

        let settled = settle_write(
            &mut tasks,
            TaskWriteOutcome::Updated {
                task: essay,
                from_edit: true,
            },
        );

        assert!(settled.is_none());
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks.tasks()[0].title, "Reading");
    }

    #[test]
    fn toggle_notice_names_the_stored_state() {
        let essay = task("Essay", false);
        let mut tasks = TaskList::from_tasks(vec![essay.clone()]);
        let mut done = essay;
        done.completed = true;

        let settled = settle_write(
            &mut tasks,
            TaskWriteOutcome::Updated {
                task: done,
                from_edit: false,
            },
        );

        assert_eq!(
            settled,
            Some((NotificationKind::Success, "Task \"Essay\" completed".to_string()))
        );
        assert!(tasks.tasks()[0].completed);
    }
}
