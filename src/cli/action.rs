use std::fmt;

/// A command typed at the interactive prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Begin,
    Put,
    Get,
    Commit,
    Rollback,
    Exit,
}

impl Action {
    pub const ALL: [Action; 6] = [
        Action::Begin,
        Action::Put,
        Action::Get,
        Action::Commit,
        Action::Rollback,
        Action::Exit,
    ];

    /// Parse an action name, ignoring case and surrounding whitespace.
    pub fn parse(input: &str) -> Option<Action> {
        let name = input.trim();
        Self::ALL
            .into_iter()
            .find(|action| action.name().eq_ignore_ascii_case(name))
    }

    pub fn name(&self) -> &'static str {
        match self {
            Action::Begin => "BEGIN",
            Action::Put => "PUT",
            Action::Get => "GET",
            Action::Commit => "COMMIT",
            Action::Rollback => "ROLLBACK",
            Action::Exit => "EXIT",
        }
    }

    /// The menu line listing every action, e.g. `BEGIN, PUT, GET, ...`
    pub fn menu() -> String {
        Self::ALL
            .iter()
            .map(Action::name)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
