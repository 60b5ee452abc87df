use tracing::info;

use crate::model::{ResourceKind, ResourceSummary};

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum MenuAction {
    Definition,
    Shell,
    Delete,
    Edit,
    Describe,
    Scale,
}

impl MenuAction {
    pub fn label(self) -> &'static str {
        match self {
            Self::Definition => "definition",
            Self::Shell => "shell",
            Self::Delete => "delete",
            Self::Edit => "edit",
            Self::Describe => "describe",
            Self::Scale => "scale",
        }
    }

    /// Entries that are listed in the menu but have no backend call behind them.
    pub fn wired(self) -> bool {
        !matches!(self, Self::Shell | Self::Describe)
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct SelectionState {
    pub resource: ResourceSummary,
    /// Table row the menu was opened from.
    pub anchor: usize,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum MenuOutcome {
    Edit {
        kind: ResourceKind,
        name: String,
        namespace: String,
    },
    Delete {
        kind: ResourceKind,
        name: String,
        namespace: String,
    },
    Scale {
        kind: ResourceKind,
        name: String,
        namespace: String,
    },
    Definition {
        name: String,
        namespace: String,
    },
    NotWired {
        action: MenuAction,
        name: String,
    },
    Ignored,
}

/// Contextual actions for one row of a resource list.
#[derive(Debug)]
pub struct ActionMenu {
    kind: ResourceKind,
    selection: Option<SelectionState>,
    highlighted: usize,
}

impl ActionMenu {
    pub fn new(kind: ResourceKind) -> Self {
        Self {
            kind,
            selection: None,
            highlighted: 0,
        }
    }

    pub fn actions(&self) -> &'static [MenuAction] {
        self.kind.actions()
    }

    pub fn is_open(&self) -> bool {
        self.selection.is_some()
    }

    pub fn selection(&self) -> Option<&SelectionState> {
        self.selection.as_ref()
    }

    pub fn highlighted(&self) -> usize {
        self.highlighted
    }

    /// Opens the menu for `resource`, replacing any previous selection.
    pub fn open(&mut self, resource: ResourceSummary, anchor: usize) {
        self.selection = Some(SelectionState { resource, anchor });
        self.highlighted = 0;
    }

    pub fn close(&mut self) {
        self.selection = None;
        self.highlighted = 0;
    }

    pub fn move_highlight(&mut self, delta: isize) {
        let len = self.actions().len();
        if len == 0 {
            return;
        }
        let next = (self.highlighted as isize + delta).rem_euclid(len as isize);
        self.highlighted = next as usize;
    }

    pub fn invoke_highlighted(&mut self) -> MenuOutcome {
        match self.actions().get(self.highlighted).copied() {
            Some(action) => self.invoke(action),
            None => {
                self.close();
                MenuOutcome::Ignored
            }
        }
    }

    /// Turns `action` into an outcome for the selected row and closes the menu.
    pub fn invoke(&mut self, action: MenuAction) -> MenuOutcome {
        let Some(selection) = self.selection.take() else {
            return MenuOutcome::Ignored;
        };
        self.close();

        if !self.actions().contains(&action) {
            info!(
                "{} is not offered for {}",
                action.label(),
                self.kind.title()
            );
            return MenuOutcome::Ignored;
        }

        let SelectionState { resource, .. } = selection;
        info!(
            "action={} {} {}/{}",
            action.label(),
            self.kind,
            resource.namespace,
            resource.name
        );

        match action {
            MenuAction::Edit => MenuOutcome::Edit {
                kind: self.kind,
                name: resource.name,
                namespace: resource.namespace,
            },
            MenuAction::Delete => MenuOutcome::Delete {
                kind: self.kind,
                name: resource.name,
                namespace: resource.namespace,
            },
            MenuAction::Scale => MenuOutcome::Scale {
                kind: self.kind,
                name: resource.name,
                namespace: resource.namespace,
            },
            MenuAction::Definition => MenuOutcome::Definition {
                name: resource.name,
                namespace: resource.namespace,
            },
            MenuAction::Shell | MenuAction::Describe => {
                info!(
                    "{} for {} {} is not wired to a backend call yet",
                    action.label(),
                    self.kind,
                    resource.name
                );
                MenuOutcome::NotWired {
                    action,
                    name: resource.name,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ActionMenu, MenuAction, MenuOutcome};
    use crate::model::{ResourceKind, ResourceSummary, SummaryDetails};

    fn pod(name: &str) -> ResourceSummary {
        ResourceSummary {
            name: name.to_string(),
            namespace: "default".to_string(),
            age_seconds: 65,
            details: SummaryDetails::Pod {
                status: "Running".to_string(),
                restarts: 0,
                ip: String::new(),
                node: String::new(),
            },
        }
    }

    #[test]
    fn opening_a_second_row_replaces_the_first_selection() {
        let mut menu = ActionMenu::new(ResourceKind::Pods);
        menu.open(pod("r"), 0);
        menu.open(pod("s"), 1);

        let selection = menu.selection().unwrap();
        assert_eq!(selection.resource.name, "s");
        assert_eq!(selection.anchor, 1);
    }

    #[test]
    fn close_clears_the_selection() {
        let mut menu = ActionMenu::new(ResourceKind::Pods);
        menu.open(pod("r"), 0);
        menu.move_highlight(2);
        menu.close();

        assert!(!menu.is_open());
        assert_eq!(menu.highlighted(), 0);
    }

    #[test]
    fn invoking_an_action_closes_the_menu() {
        let mut menu = ActionMenu::new(ResourceKind::Pods);
        menu.open(pod("nginx-1"), 0);

        let outcome = menu.invoke(MenuAction::Delete);
        assert_eq!(
            outcome,
            MenuOutcome::Delete {
                kind: ResourceKind::Pods,
                name: "nginx-1".to_string(),
                namespace: "default".to_string(),
            }
        );
        assert!(!menu.is_open());
    }

    #[test]
    fn unwired_actions_are_accepted_but_reported() {
        let mut menu = ActionMenu::new(ResourceKind::Pods);
        menu.open(pod("nginx-1"), 0);
        assert_eq!(
            menu.invoke(MenuAction::Shell),
            MenuOutcome::NotWired {
                action: MenuAction::Shell,
                name: "nginx-1".to_string(),
            }
        );

        menu.open(pod("nginx-1"), 0);
        assert!(matches!(
            menu.invoke(MenuAction::Describe),
            MenuOutcome::NotWired { .. }
        ));
        assert!(ResourceKind::Pods.actions().contains(&MenuAction::Shell));
    }

    #[test]
    fn actions_outside_the_vocabulary_are_ignored() {
        let mut menu = ActionMenu::new(ResourceKind::Services);
        menu.open(pod("web"), 0);
        assert_eq!(menu.invoke(MenuAction::Scale), MenuOutcome::Ignored);
        assert!(!menu.is_open());
    }

    #[test]
    fn invoke_without_selection_is_ignored() {
        let mut menu = ActionMenu::new(ResourceKind::Deployments);
        assert_eq!(menu.invoke(MenuAction::Edit), MenuOutcome::Ignored);
    }

    #[test]
    fn highlight_wraps_around_the_vocabulary() {
        let mut menu = ActionMenu::new(ResourceKind::Deployments);
        menu.open(pod("web"), 0);
        menu.move_highlight(-1);
        assert_eq!(menu.highlighted(), 2);
        assert!(matches!(
            menu.invoke_highlighted(),
            MenuOutcome::Delete { .. }
        ));
    }
}
