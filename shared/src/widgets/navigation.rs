#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Home,
    Features,
    Team,
    Pricing,
    Faq,
    Contact,
}

impl Page {
    pub const ALL: [Page; 6] = [
        Page::Home,
        Page::Features,
        Page::Team,
        Page::Pricing,
        Page::Faq,
        Page::Contact,
    ];

    pub fn to_path(&self) -> &'static str {
        match self {
            Page::Home => "/",
            Page::Features => "/features",
            Page::Team => "/team",
            Page::Pricing => "/pricing",
            Page::Faq => "/faq",
            Page::Contact => "/contact",
        }
    }

    /// Matches on the last path segment, with or without `.html`.
    /// Empty, `home`, `index*` and unknown segments all land on Home.
    pub fn from_path(path: &str) -> Self {
        let segment = path.rsplit('/').next().unwrap_or_default();
        let name = segment.strip_suffix(".html").unwrap_or(segment);
        match name {
            "features" => Page::Features,
            "team" | "about" => Page::Team,
            "pricing" => Page::Pricing,
            "faq" => Page::Faq,
            "contact" => Page::Contact,
            _ => Page::Home,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Page::Home => "Home",
            Page::Features => "Features",
            Page::Team => "Team",
            Page::Pricing => "Pricing",
            Page::Faq => "FAQ",
            Page::Contact => "Contact",
        }
    }
}

/// Collapsible navigation menu on narrow screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NavMenu {
    open: bool,
}

impl NavMenu {
    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        self.open
    }

    /// Following a link always collapses the menu.
    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn icon(&self) -> &'static str {
        if self.open {
            "✕"
        } else {
            "☰"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("/", Page::Home)]
    #[case("", Page::Home)]
    #[case("/index.html", Page::Home)]
    #[case("/home.html", Page::Home)]
    #[case("/faq", Page::Faq)]
    #[case("/site/pricing.html", Page::Pricing)]
    #[case("/about.html", Page::Team)]
    #[case("/nowhere", Page::Home)]
    fn resolves_paths(#[case] path: &str, #[case] page: Page) {
        assert_eq!(Page::from_path(path), page);
    }

    #[test]
    fn paths_round_trip() {
        for page in Page::ALL {
            assert_eq!(Page::from_path(page.to_path()), page);
        }
    }

    #[test]
    fn menu_toggles_and_closes() {
        let mut menu = NavMenu::default();
        assert!(menu.toggle());
        menu.close();
        assert!(!menu.is_open());
    }
}
