use sauron::{
    html::{attributes, attributes::*, *},
    prelude::*,
};
use tracker_shared::{
    widgets::{contact::CONTACT_CATEGORIES, NotificationKind, Page, Plan, FAQ_ENTRIES},
    Category, Priority, Task, TaskFilter,
};

use crate::app::{ContactField, Modal, Model, Msg, SignupField};

const INPUT_CLASS: &str = "w-full px-3 py-2 bg-ctp-surface0 border border-ctp-surface2 rounded-md text-ctp-text placeholder-ctp-subtext0 focus:outline-none focus:ring-2 focus:ring-ctp-blue focus:border-transparent";
const CARD_CLASS: &str = "bg-ctp-surface0 rounded-lg shadow-lg p-8 border border-ctp-surface1";
const PRIMARY_BUTTON: &str = "bg-ctp-blue hover:bg-ctp-sapphire text-ctp-base font-medium px-6 py-2 rounded-md transition-colors duration-200";
const SECONDARY_BUTTON: &str = "bg-ctp-surface2 hover:bg-ctp-overlay0 text-ctp-text font-medium px-6 py-2 rounded-md transition-colors duration-200";

impl Model {
    pub(crate) fn view_root(&self) -> Node<Msg> {
        div(
            [class("min-h-screen bg-ctp-base text-ctp-text")],
            [
                self.view_header(),
                div(
                    [class("max-w-6xl mx-auto px-6 py-8")],
                    [match self.page {
                        Page::Home => self.view_home(),
                        Page::Features => self.view_features(),
                        Page::Team => self.view_team(),
                        Page::Pricing => self.view_pricing(),
                        Page::Faq => self.view_faq(),
                        Page::Contact => self.view_contact(),
                    }],
                ),
                self.view_modal(),
                self.view_notification(),
            ],
        )
    }

    fn view_header(&self) -> Node<Msg> {
        let auth_label = if self.context.session.is_active() {
            format!("Logout ({})", self.context.session.display_name())
        } else {
            "Login".to_string()
        };
        let nav_class = if self.menu.is_open() {
            "flex flex-col md:flex-row md:space-x-6"
        } else {
            "hidden md:flex md:space-x-6"
        };

        header([class("bg-ctp-mantle shadow-lg border-b border-ctp-surface0")], [
            div([class("max-w-6xl mx-auto px-6 py-4")], [
                div([class("flex items-center justify-between")], [
                    h1([class("text-2xl font-bold text-ctp-text")], [text("Student Task Tracker")]),
                    button([
                        r#type("button"),
                        class("md:hidden text-2xl text-ctp-subtext0"),
                        on_click(|_| Msg::ToggleMenu),
                    ], [text(self.menu.icon())]),
                    nav([class(nav_class)], Page::ALL.into_iter().map(|page| self.nav_link(page)).collect::<Vec<_>>()),
                    div([class("flex items-center space-x-3")], [
                        button([
                            r#type("button"),
                            class("text-xl px-2"),
                            on_click(|_| Msg::ToggleTheme),
                        ], [text(self.context.theme.current().toggle_icon())]),
                        button([
                            r#type("button"),
                            class(PRIMARY_BUTTON),
                            on_click(|_| Msg::AuthButton),
                        ], [text(auth_label)]),
                    ]),
                ]),
            ]),
        ])
    }

    fn nav_link(&self, page: Page) -> Node<Msg> {
        let is_active = self.page == page;
        a([
            href(page.to_path()),
            on_click(move |event| {
                event.prevent_default();
                Msg::NavigateTo(page)
            }),
            class(&format!(
                "px-3 py-2 rounded-md text-sm font-medium transition-colors duration-200 {}",
                if is_active {
                    "bg-ctp-blue text-ctp-base"
                } else {
                    "text-ctp-subtext0 hover:text-ctp-text hover:bg-ctp-surface0"
                }
            )),
        ], [text(page.label())])
    }

    fn view_home(&self) -> Node<Msg> {
        let progress = self.tasks.progress();
        div([class("space-y-8")], [
            div([class(CARD_CLASS)], [
                h2([class("text-3xl font-bold text-ctp-text mb-4")], [
                    text(format!("Welcome, {}", self.context.session.display_name())),
                ]),
                div([class("grid grid-cols-1 md:grid-cols-3 gap-6")], [
                    self.stat_card("Total Tasks", &progress.total.to_string(), "📝"),
                    self.stat_card("Completed", &progress.completed.to_string(), "✅"),
                    self.stat_card("Pending", &progress.pending.to_string(), "⏳"),
                ]),
                div([class("mt-6")], [
                    div([class("flex justify-between text-sm text-ctp-subtext1 mb-2")], [
                        span([], [text("Progress")]),
                        span([], [text(progress.label())]),
                    ]),
                    div([class("w-full bg-ctp-surface1 rounded-full h-3")], [
                        div([
                            class("bg-ctp-green h-3 rounded-full transition-all duration-300"),
                            attributes::style("width", format!("{}%", progress.percent_complete)),
                        ], []),
                    ]),
                ]),
            ]),
            div([class(CARD_CLASS)], [
                self.view_task_form(),
                self.view_task_controls(),
                if self.loading {
                    div([class("text-center py-10 text-ctp-subtext0 italic")], [text("Loading...")])
                } else {
                    self.view_task_list()
                },
            ]),
        ])
    }

    fn stat_card(&self, card_title: &str, value: &str, icon: &str) -> Node<Msg> {
        div([class("bg-ctp-surface1 rounded-lg p-6 border border-ctp-surface2")], [
            div([class("flex items-center justify-between")], [
                div([], [
                    p([class("text-sm font-medium text-ctp-subtext0")], [text(card_title)]),
                    p([class("text-2xl font-bold text-ctp-text mt-1")], [text(value)]),
                ]),
                span([class("text-3xl")], [text(icon)]),
            ]),
        ])
    }

    fn view_task_form(&self) -> Node<Msg> {
        let editing = self.tasks.editing().is_some();
        let deadline = self
            .task_form
            .deadline
            .map(|date| date.format("%Y-%m-%d").to_string())
            .unwrap_or_default();

        div([class("mb-8 p-6 bg-ctp-surface1 rounded-lg border border-ctp-surface2")], [
            h2([class("text-xl font-semibold text-ctp-text mb-4 pb-2 border-b border-ctp-surface2")], [
                text(if editing { "Edit Task" } else { "Add New Task" }),
            ]),
            div([class("space-y-4")], [
                input([
                    r#type("text"),
                    placeholder("Task title"),
                    value(&self.task_form.title),
                    on_input(|event| Msg::SetTaskTitle(event.value())),
                    class(INPUT_CLASS),
                ], []),
                textarea([
                    placeholder("Task description"),
                    value(&self.task_form.description),
                    on_input(|event| Msg::SetTaskDescription(event.value())),
                    class(&format!("{INPUT_CLASS} h-20 resize-y")),
                ], []),
                div([class("grid grid-cols-1 md:grid-cols-3 gap-4")], [
                    select(
                        [class(INPUT_CLASS), on_change(|event| Msg::SetTaskPriority(event.value()))],
                        Priority::ALL.into_iter().map(|priority| {
                            option([
                                value(priority.as_str()),
                                selected(priority == self.task_form.priority),
                            ], [text(capitalize(priority.as_str()))])
                        }).collect::<Vec<_>>(),
                    ),
                    input([
                        r#type("date"),
                        value(deadline),
                        on_input(|event| Msg::SetTaskDeadline(event.value())),
                        class(INPUT_CLASS),
                    ], []),
                    select(
                        [class(INPUT_CLASS), on_change(|event| Msg::SetTaskCategory(event.value()))],
                        Category::ALL.into_iter().map(|category| {
                            option([
                                value(category.as_str()),
                                selected(category == self.task_form.category),
                            ], [text(capitalize(category.as_str()))])
                        }).collect::<Vec<_>>(),
                    ),
                ]),
                div([class("flex space-x-3")], [
                    button([
                        r#type("button"),
                        disabled(self.saving),
                        on_click(|_| Msg::SubmitTask),
                        class(PRIMARY_BUTTON),
                    ], [text(if editing { "Update Task" } else { "Add Task" })]),
                    if editing {
                        button([
                            r#type("button"),
                            on_click(|_| Msg::CancelEdit),
                            class(SECONDARY_BUTTON),
                        ], [text("Cancel")])
                    } else {
                        span([], [])
                    },
                ]),
            ]),
        ])
    }

    fn view_task_controls(&self) -> Node<Msg> {
        div([class("flex flex-col md:flex-row gap-4 mb-6")], [
            input([
                r#type("search"),
                placeholder("Search tasks..."),
                value(&self.search),
                on_input(|event| Msg::SetSearch(event.value())),
                class(INPUT_CLASS),
            ], []),
            select(
                [class(INPUT_CLASS), on_change(|event| Msg::SetFilter(event.value()))],
                TaskFilter::ALL.into_iter().map(|filter| {
                    option([
                        value(filter.as_str()),
                        selected(filter == self.filter),
                    ], [text(capitalize(filter.as_str()))])
                }).collect::<Vec<_>>(),
            ),
        ])
    }

    fn view_task_list(&self) -> Node<Msg> {
        let view = self.tasks.view(self.filter, &self.search);
        if view.is_empty() {
            return div([class("text-center py-10 text-ctp-subtext0")], [
                p([class("text-4xl mb-2")], [text("📋")]),
                p([class("italic")], [text(view.empty_message())]),
            ]);
        }
        ul([class("space-y-3")], view.iter().map(|task| self.view_task(task)).collect::<Vec<_>>())
    }

    fn view_task(&self, task: &Task) -> Node<Msg> {
        let id = task.id;
        let is_busy = self.busy_tasks.contains(&id);
        let is_editing = self.tasks.editing() == Some(id);
        let priority_badge = match task.priority {
            Priority::High => "bg-ctp-red/20 text-ctp-red",
            Priority::Medium => "bg-ctp-yellow/20 text-ctp-yellow",
            Priority::Low => "bg-ctp-green/20 text-ctp-green",
        };

        li(
            [
                key(id.to_string()),
                class(&format!(
                    "p-4 rounded-lg border transition-all duration-200 {}",
                    if is_editing {
                        "border-ctp-blue bg-ctp-surface1"
                    } else {
                        "border-ctp-surface2 bg-ctp-surface0"
                    }
                )),
            ],
            [div([class("flex items-start justify-between gap-4")], [
                div([class("flex items-start gap-3")], [
                    input([
                        r#type("checkbox"),
                        checked(task.completed),
                        disabled(is_busy),
                        on_click(move |_| Msg::ToggleTask(id)),
                        class("mt-1 h-5 w-5"),
                    ], []),
                    div([], [
                        p([class(if task.completed {
                            "font-medium line-through text-ctp-subtext0"
                        } else {
                            "font-medium text-ctp-text"
                        })], [text(&task.title)]),
                        match &task.description {
                            Some(description) => p([class("text-sm text-ctp-subtext1 mt-1")], [text(description)]),
                            None => span([], []),
                        },
                        div([class("flex flex-wrap gap-2 mt-2 text-xs")], [
                            span([class(&format!("px-2 py-1 rounded-full font-medium {priority_badge}"))], [
                                text(capitalize(task.priority.as_str())),
                            ]),
                            span([class("px-2 py-1 rounded-full bg-ctp-surface2 text-ctp-subtext1")], [
                                text(capitalize(task.category.as_str())),
                            ]),
                            span([class("px-2 py-1 text-ctp-subtext0")], [text(
                                task.deadline
                                    .map(|date| format!("Due {}", date.format("%b %-d, %Y")))
                                    .unwrap_or_else(|| "No deadline".to_string()),
                            )]),
                        ]),
                    ]),
                ]),
                div([class("flex space-x-2")], [
                    button([
                        r#type("button"),
                        disabled(is_busy),
                        on_click(move |_| Msg::EditTask(id)),
                        class("text-ctp-blue hover:text-ctp-sapphire px-2"),
                    ], [text("Edit")]),
                    button([
                        r#type("button"),
                        disabled(is_busy),
                        on_click(move |_| Msg::DeleteTask(id)),
                        class("text-ctp-red hover:text-ctp-maroon px-2"),
                    ], [text("Delete")]),
                ]),
            ])],
        )
    }

    fn view_features(&self) -> Node<Msg> {
        div([class(CARD_CLASS)], [
            h2([class("text-2xl font-bold text-ctp-text mb-6")], [text("Features")]),
            div(
                [class("grid grid-cols-1 md:grid-cols-2 gap-6")],
                self.features.iter().map(|feature| {
                    div([class("bg-ctp-surface1 rounded-lg p-6 border border-ctp-surface2")], [
                        i([class(&format!("fas {} text-2xl text-ctp-blue mb-3", feature.icon))], []),
                        h3([class("text-lg font-semibold text-ctp-text mb-2")], [text(&feature.title)]),
                        p([class("text-ctp-subtext1")], [text(&feature.description)]),
                    ])
                }).collect::<Vec<_>>(),
            ),
        ])
    }

    fn view_team(&self) -> Node<Msg> {
        div([class(CARD_CLASS)], [
            h2([class("text-2xl font-bold text-ctp-text mb-6")], [text("Meet the Team")]),
            div(
                [class("grid grid-cols-1 md:grid-cols-3 gap-6")],
                self.team.iter().map(|member| {
                    div([class("bg-ctp-surface1 rounded-lg p-6 border border-ctp-surface2 text-center")], [
                        img([
                            src(&member.avatar),
                            alt(&member.name),
                            class("w-24 h-24 rounded-full mx-auto mb-4 object-cover"),
                        ], []),
                        h3([class("text-lg font-semibold text-ctp-text")], [text(&member.name)]),
                        p([class("text-sm text-ctp-blue mb-2")], [text(&member.role)]),
                        p([class("text-ctp-subtext1")], [text(&member.bio)]),
                    ])
                }).collect::<Vec<_>>(),
            ),
        ])
    }

    fn view_pricing(&self) -> Node<Msg> {
        div([class("grid grid-cols-1 md:grid-cols-3 gap-6")], Plan::ALL.into_iter().map(|plan| {
            div([class(CARD_CLASS)], [
                h3([class("text-xl font-semibold text-ctp-text")], [text(plan.name())]),
                p([class("text-3xl font-bold text-ctp-text my-4")], [
                    text(plan.monthly_price()),
                    span([class("text-sm text-ctp-subtext0")], [text("/month")]),
                ]),
                ul(
                    [class("space-y-2 mb-6 text-ctp-subtext1")],
                    plan.perks().iter().map(|perk| li([], [text(format!("✓ {perk}"))])).collect::<Vec<_>>(),
                ),
                button([
                    r#type("button"),
                    on_click(move |_| Msg::SelectPlan(plan)),
                    class(PRIMARY_BUTTON),
                ], [text(format!("Choose {}", plan.name()))]),
            ])
        }).collect::<Vec<_>>())
    }

    fn view_faq(&self) -> Node<Msg> {
        div([class(CARD_CLASS)], [
            h2([class("text-2xl font-bold text-ctp-text mb-6")], [text("Frequently Asked Questions")]),
            div(
                [class("space-y-3")],
                FAQ_ENTRIES.iter().enumerate().map(|(index, entry)| {
                    let is_open = self.faq.is_open(index);
                    div([class("border border-ctp-surface2 rounded-lg")], [
                        button([
                            r#type("button"),
                            on_click(move |_| Msg::ToggleFaq(index)),
                            class("w-full flex justify-between items-center px-4 py-3 text-left font-medium"),
                        ], [
                            text(entry.question),
                            span([], [text(if is_open { "▲" } else { "▼" })]),
                        ]),
                        if is_open {
                            p([class("px-4 pb-4 text-ctp-subtext1")], [text(entry.answer)])
                        } else {
                            span([], [])
                        },
                    ])
                }).collect::<Vec<_>>(),
            ),
        ])
    }

    fn view_contact(&self) -> Node<Msg> {
        let field = |kind: ContactField, placeholder_text: &str, current: &str| {
            input([
                r#type(if kind == ContactField::Email { "email" } else { "text" }),
                placeholder(placeholder_text),
                value(current),
                on_input(move |event| Msg::SetContactField(kind, event.value())),
                class(INPUT_CLASS),
            ], [])
        };

        div([class(CARD_CLASS)], [
            h2([class("text-2xl font-bold text-ctp-text mb-6")], [text("Contact Us")]),
            div([class("space-y-4")], [
                field(ContactField::Name, "Your name", &self.contact.name),
                field(ContactField::Email, "Your email", &self.contact.email),
                field(ContactField::Subject, "Subject", &self.contact.subject),
                select(
                    [class(INPUT_CLASS), on_change(|event| Msg::SetContactField(ContactField::Category, event.value()))],
                    std::iter::once(option([value(""), selected(self.contact.category.is_empty())], [text("Select a category")]))
                        .chain(CONTACT_CATEGORIES.into_iter().map(|category| {
                            option([
                                value(category),
                                selected(self.contact.category == category),
                            ], [text(capitalize(category))])
                        }))
                        .collect::<Vec<_>>(),
                ),
                textarea([
                    placeholder("Your message"),
                    value(&self.contact.message),
                    on_input(|event| Msg::SetContactField(ContactField::Message, event.value())),
                    class(&format!("{INPUT_CLASS} h-32 resize-y")),
                ], []),
                button([
                    r#type("button"),
                    disabled(self.contact_sending),
                    on_click(|_| Msg::SubmitContact),
                    class(PRIMARY_BUTTON),
                ], [text(if self.contact_sending { "Sending..." } else { "Send Message" })]),
            ]),
        ])
    }

    fn view_modal(&self) -> Node<Msg> {
        let Some(modal) = self.modal else {
            return span([], []);
        };
        let body = match modal {
            Modal::Login => self.view_login(),
            Modal::Signup => self.view_signup(),
            Modal::ForgotPassword => self.view_forgot_password(),
            Modal::ContactSent => div([class("text-center")], [
                p([class("text-4xl mb-2")], [text("✉️")]),
                h2([class("text-xl font-semibold mb-2")], [text("Message Sent")]),
                p([class("text-ctp-subtext1")], [text("Thanks for reaching out. We'll respond within 24 hours.")]),
            ]),
        };

        div([class("fixed inset-0 bg-black/50 flex items-center justify-center z-40")], [
            div([class("bg-ctp-base rounded-lg shadow-xl p-8 w-full max-w-md relative")], [
                button([
                    r#type("button"),
                    on_click(|_| Msg::CloseModal),
                    class("absolute top-3 right-4 text-2xl text-ctp-subtext0"),
                ], [text("×")]),
                body,
            ]),
        ])
    }

    fn view_login(&self) -> Node<Msg> {
        div([class("space-y-4")], [
            h2([class("text-2xl font-bold")], [text("Login")]),
            input([
                r#type("email"),
                placeholder("Email"),
                value(&self.login.email),
                on_input(|event| Msg::SetLoginEmail(event.value())),
                class(INPUT_CLASS),
            ], []),
            input([
                r#type("password"),
                placeholder("Password"),
                value(&self.login.password),
                on_input(|event| Msg::SetLoginPassword(event.value())),
                class(INPUT_CLASS),
            ], []),
            button([r#type("button"), on_click(|_| Msg::SubmitLogin), class(&format!("{PRIMARY_BUTTON} w-full"))], [text("Login")]),
            div([class("flex justify-between text-sm")], [
                self.modal_link("Forgot password?", Modal::ForgotPassword),
                self.modal_link("Create an account", Modal::Signup),
            ]),
        ])
    }

    fn view_signup(&self) -> Node<Msg> {
        let field = |kind: SignupField, input_type: &str, placeholder_text: &str, current: &str| {
            input([
                r#type(input_type),
                placeholder(placeholder_text),
                value(current),
                on_input(move |event| Msg::SetSignupField(kind, event.value())),
                class(INPUT_CLASS),
            ], [])
        };

        div([class("space-y-3")], [
            h2([class("text-2xl font-bold")], [text("Create Account")]),
            div([class("grid grid-cols-2 gap-3")], [
                field(SignupField::FirstName, "text", "First name", &self.signup.first_name),
                field(SignupField::LastName, "text", "Last name", &self.signup.last_name),
            ]),
            field(SignupField::Email, "email", "Email", &self.signup.email),
            field(SignupField::Password, "password", "Password", &self.signup.password),
            field(SignupField::ConfirmPassword, "password", "Confirm password", &self.signup.confirm_password),
            field(SignupField::University, "text", "University", &self.signup.university),
            field(SignupField::Major, "text", "Major (optional)", &self.signup.major),
            button([r#type("button"), on_click(|_| Msg::SubmitSignup), class(&format!("{PRIMARY_BUTTON} w-full"))], [text("Sign Up")]),
            div([class("text-sm text-center")], [self.modal_link("Already have an account? Login", Modal::Login)]),
        ])
    }

    fn view_forgot_password(&self) -> Node<Msg> {
        div([class("space-y-4")], [
            h2([class("text-2xl font-bold")], [text("Reset Password")]),
            input([
                r#type("email"),
                placeholder("Email"),
                value(&self.reset_email),
                on_input(|event| Msg::SetResetEmail(event.value())),
                class(INPUT_CLASS),
            ], []),
            button([r#type("button"), on_click(|_| Msg::SubmitPasswordReset), class(&format!("{PRIMARY_BUTTON} w-full"))], [text("Send Reset Link")]),
            div([class("text-sm text-center")], [self.modal_link("Back to login", Modal::Login)]),
        ])
    }

    fn modal_link(&self, link_text: &str, modal: Modal) -> Node<Msg> {
        a([
            href("#"),
            on_click(move |event| {
                event.prevent_default();
                Msg::OpenModal(modal)
            }),
            class("text-ctp-blue hover:underline"),
        ], [text(link_text)])
    }

    fn view_notification(&self) -> Node<Msg> {
        let Some(notification) = self.notifier.current() else {
            return span([], []);
        };
        let id = notification.id;
        let palette = match notification.kind {
            NotificationKind::Info => "bg-ctp-blue",
            NotificationKind::Success => "bg-ctp-green",
            NotificationKind::Error => "bg-ctp-red",
        };

        div([class(&format!(
            "notification {} fixed top-6 right-6 z-50 {palette} text-ctp-base px-5 py-3 rounded-lg shadow-lg flex items-center space-x-4",
            notification.kind.as_str()
        ))], [
            span([], [text(&notification.message)]),
            button([
                r#type("button"),
                on_click(move |_| Msg::DismissNotification(id)),
                class("text-xl leading-none"),
            ], [text("×")]),
        ])
    }
}

fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::capitalize;

    #[test]
    fn capitalizes_first_letter_only() {
        assert_eq!(capitalize("extracurricular"), "Extracurricular");
        assert_eq!(capitalize(""), "");
    }
}
