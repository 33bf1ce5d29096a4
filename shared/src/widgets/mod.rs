//! Toolkit-agnostic state of the site's presentational widgets.

pub mod contact;
pub mod faq;
pub mod navigation;
pub mod notification;
pub mod pricing;
pub mod theme;

pub use contact::ContactForm;
pub use faq::{Accordion, FaqEntry, FAQ_ENTRIES};
pub use navigation::{NavMenu, Page};
pub use notification::{Notification, NotificationKind, Notifier};
pub use pricing::{select_plan, Plan, PlanSelection};
pub use theme::{Theme, ThemePreference};
