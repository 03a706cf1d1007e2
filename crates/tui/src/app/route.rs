#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SettingsTab {
    #[default]
    General,
    Categories,
    Salaries,
}

impl SettingsTab {
    pub const ALL: [SettingsTab; 3] = [Self::General, Self::Categories, Self::Salaries];

    pub fn label(self) -> &'static str {
        match self {
            Self::General => "General",
            Self::Categories => "Categories",
            Self::Salaries => "Salaries",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Self::General => Self::Categories,
            Self::Categories => Self::Salaries,
            Self::Salaries => Self::General,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Root,
    Auth,
    Dashboard,
    Movements,
    Analytics,
    Salaries,
    Settings(SettingsTab),
}

impl Route {
    /// Entries of the side panel, in display order.
    pub const NAV: [Route; 5] = [
        Self::Dashboard,
        Self::Movements,
        Self::Analytics,
        Self::Salaries,
        Self::Settings(SettingsTab::General),
    ];

    pub fn path(self) -> &'static str {
        match self {
            Self::Root => "/",
            Self::Auth => "/auth",
            Self::Dashboard => "/dashboard",
            Self::Movements => "/movements",
            Self::Analytics => "/analytics",
            Self::Salaries => "/salaries",
            Self::Settings(_) => "/settings",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Root => "Wisp",
            Self::Auth => "Sign in",
            Self::Dashboard => "Dashboard",
            Self::Movements => "Movements",
            Self::Analytics => "Analytics",
            Self::Salaries => "Salaries",
            Self::Settings(_) => "Settings",
        }
    }

    pub fn parse(path: &str) -> Option<Self> {
        let route = match path.trim_end_matches('/') {
            "" => Self::Root,
            "/auth" => Self::Auth,
            "/dashboard" => Self::Dashboard,
            "/movements" => Self::Movements,
            "/analytics" => Self::Analytics,
            "/salaries" => Self::Salaries,
            "/settings" => Self::Settings(SettingsTab::General),
            _ => return None,
        };
        Some(route)
    }

    pub fn is_protected(self) -> bool {
        !matches!(self, Self::Root | Self::Auth)
    }

    /// Whether two routes highlight the same side panel entry.
    pub fn same_section(self, other: Route) -> bool {
        matches!(
            (self, other),
            (Self::Settings(_), Self::Settings(_))
        ) || self == other
    }
}
