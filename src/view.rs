use std::time::Duration;

use crate::menu::ActionMenu;
use crate::model::{ResourceKind, ResourceSummary};
use crate::polling::{PollingController, ViewId};

/// A mounted resource list: its refresh controller, row cursor and menu.
#[derive(Debug)]
pub struct ResourceView {
    pub controller: PollingController,
    pub menu: ActionMenu,
    selected: usize,
}

impl ResourceView {
    pub fn mount(view: ViewId, kind: ResourceKind, interval: Option<Duration>) -> Self {
        Self {
            controller: PollingController::new(view, kind, interval),
            menu: ActionMenu::new(kind),
            selected: 0,
        }
    }

    pub fn kind(&self) -> ResourceKind {
        self.controller.kind()
    }

    pub fn rows(&self) -> &[ResourceSummary] {
        self.controller.items()
    }

    pub fn selected_index(&self) -> Option<usize> {
        (!self.rows().is_empty()).then_some(self.selected)
    }

    pub fn selected_row(&self) -> Option<&ResourceSummary> {
        self.rows().get(self.selected)
    }

    pub fn move_selection(&mut self, delta: isize) {
        let len = self.rows().len();
        if len == 0 {
            self.selected = 0;
            return;
        }
        let next = (self.selected as isize + delta).clamp(0, len as isize - 1);
        self.selected = next as usize;
    }

    pub fn select_first(&mut self) {
        self.selected = 0;
    }

    pub fn select_last(&mut self) {
        self.selected = self.rows().len().saturating_sub(1);
    }

    /// Re-anchors the cursor after the rows were replaced.
    pub fn clamp_selection(&mut self) {
        let len = self.rows().len();
        if self.selected >= len {
            self.selected = len.saturating_sub(1);
        }
    }

    /// Opens the action menu on the highlighted row.
    pub fn open_menu(&mut self) -> bool {
        let Some(row) = self.selected_row().cloned() else {
            return false;
        };
        self.menu.open(row, self.selected);
        true
    }

    pub fn unmount(&mut self) {
        self.menu.close();
        self.controller.unmount();
    }
}

#[cfg(test)]
mod tests {
    use super::ResourceView;
    use crate::model::{ResourceKind, ResourceSummary, SummaryDetails};
    use crate::polling::ViewId;

    fn daemon_set(name: &str) -> ResourceSummary {
        ResourceSummary {
            name: name.to_string(),
            namespace: "kube-system".to_string(),
            age_seconds: 3_600,
            details: SummaryDetails::DaemonSet,
        }
    }

    fn mounted_with(names: &[&str]) -> ResourceView {
        let mut view = ResourceView::mount(ViewId(1), ResourceKind::DaemonSets, None);
        let ticket = view.controller.request("kube-system").unwrap();
        view.controller.resolve(
            &ticket,
            Ok(names.iter().map(|name| daemon_set(name)).collect()),
        );
        view
    }

    #[test]
    fn selection_stays_inside_the_rows() {
        let mut view = mounted_with(&["a", "b", "c"]);
        view.move_selection(10);
        assert_eq!(view.selected_index(), Some(2));
        view.move_selection(-10);
        assert_eq!(view.selected_index(), Some(0));
    }

    #[test]
    fn shrinking_rows_clamps_the_cursor() {
        let mut view = mounted_with(&["a", "b", "c"]);
        view.select_last();

        let ticket = view.controller.request("kube-system").unwrap();
        view.controller.resolve(&ticket, Ok(vec![daemon_set("a")]));
        view.clamp_selection();
        assert_eq!(view.selected_row().map(|row| row.name.as_str()), Some("a"));
    }

    #[test]
    fn menu_needs_a_row() {
        let mut empty = ResourceView::mount(ViewId(2), ResourceKind::Services, None);
        assert!(!empty.open_menu());
        assert_eq!(empty.selected_index(), None);

        let mut view = mounted_with(&["a", "b"]);
        view.move_selection(1);
        assert!(view.open_menu());
        let selection = view.menu.selection().unwrap();
        assert_eq!(selection.resource.name, "b");
        assert_eq!(selection.anchor, 1);
    }

    #[test]
    fn unmount_closes_the_menu() {
        let mut view = mounted_with(&["a"]);
        view.open_menu();
        view.unmount();
        assert!(!view.menu.is_open());
        assert!(view.controller.request("default").is_none());
    }
}
