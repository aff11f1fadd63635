use crate::types::ProjectId;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// Work that needs a remote call. Handled one at a time, in order.
#[derive(Debug, Clone, PartialEq)]
pub(super) enum Action {
    SelectProject(ProjectId),
    SelectTask(String),
    RefreshTimer,
}

pub(super) type ActionTx = UnboundedSender<Action>;
pub(super) type ActionRx = UnboundedReceiver<Action>;

pub(super) fn channel() -> (ActionTx, ActionRx) {
    mpsc::unbounded_channel()
}
