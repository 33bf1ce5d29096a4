#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Plan {
    Free,
    Pro,
    Campus,
}

impl Plan {
    pub const ALL: [Plan; 3] = [Plan::Free, Plan::Pro, Plan::Campus];

    pub fn name(&self) -> &'static str {
        match self {
            Plan::Free => "Free",
            Plan::Pro => "Pro",
            Plan::Campus => "Campus",
        }
    }

    pub fn monthly_price(&self) -> &'static str {
        match self {
            Plan::Free => "$0",
            Plan::Pro => "$4.99",
            Plan::Campus => "$9.99",
        }
    }

    pub fn perks(&self) -> &'static [&'static str] {
        match self {
            Plan::Free => &["Personal task list", "Deadline sorting", "Progress tracking"],
            Plan::Pro => &["Everything in Free", "Unlimited categories", "Priority reminders"],
            Plan::Campus => &["Everything in Pro", "Study groups", "Shared course boards"],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanSelection {
    LoginRequired,
    Activated(Plan),
    RedirectToPayment(Plan),
}

impl PlanSelection {
    pub fn requires_login(&self) -> bool {
        matches!(self, PlanSelection::LoginRequired)
    }

    pub fn message(&self) -> String {
        match self {
            PlanSelection::LoginRequired => "Please login to select a plan".to_string(),
            PlanSelection::Activated(_) => {
                "Free plan selected! You can start using basic features immediately.".to_string()
            }
            PlanSelection::RedirectToPayment(plan) => format!(
                "Thank you for choosing {} plan! You'll be redirected to payment.",
                plan.name()
            ),
        }
    }
}

/// Selection is gated on the persisted logged-in flag.
pub fn select_plan(plan: Plan, logged_in: bool) -> PlanSelection {
    if !logged_in {
        return PlanSelection::LoginRequired;
    }
    match plan {
        Plan::Free => PlanSelection::Activated(plan),
        paid => PlanSelection::RedirectToPayment(paid),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requires_login() {
        assert_eq!(select_plan(Plan::Free, false), PlanSelection::LoginRequired);
        assert_eq!(select_plan(Plan::Campus, false), PlanSelection::LoginRequired);
        assert!(select_plan(Plan::Pro, false).requires_login());
        assert!(!select_plan(Plan::Pro, true).requires_login());
    }

    #[test]
    fn free_activates_and_paid_redirects() {
        assert_eq!(select_plan(Plan::Free, true), PlanSelection::Activated(Plan::Free));
        let selection = select_plan(Plan::Pro, true);
        assert_eq!(selection, PlanSelection::RedirectToPayment(Plan::Pro));
        assert!(selection.message().contains("Pro plan"));
    }
}
