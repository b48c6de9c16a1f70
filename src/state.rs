use std::rc::Rc;

use yew::prelude::*;

use crate::catalog::ActivityCatalog;
use crate::status::StatusMessage;

#[derive(Debug, Clone, PartialEq)]
pub enum Listing {
    Loading,
    Ready(ActivityCatalog),
    Unavailable,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShownStatus {
    pub id: u64,
    pub message: StatusMessage,
}

/// Page state behind the `App` component.
#[derive(Debug, Clone, PartialEq)]
pub struct BoardState {
    pub listing: Listing,
    /// Selector options; only a successful load replaces them.
    pub options: Vec<String>,
    pub status: Option<ShownStatus>,
    next_status_id: u64,
}

impl Default for BoardState {
    fn default() -> Self {
        Self {
            listing: Listing::Loading,
            options: Vec::new(),
            status: None,
            next_status_id: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum BoardAction {
    CatalogLoaded(ActivityCatalog),
    CatalogFailed,
    ShowStatus(StatusMessage),
    /// Hide timer fired for the status with this id.
    ExpireStatus(u64),
}

impl Reducible for BoardState {
    type Action = BoardAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            BoardAction::CatalogLoaded(catalog) => {
                next.options = catalog.names().map(str::to_string).collect();
                next.listing = Listing::Ready(catalog);
            }
            BoardAction::CatalogFailed => {
                next.listing = Listing::Unavailable;
            }
            BoardAction::ShowStatus(message) => {
                next.status = Some(ShownStatus { id: next.next_status_id, message });
                next.next_status_id += 1;
            }
            BoardAction::ExpireStatus(id) => {
                if next.status.as_ref().map(|s| s.id) != Some(id) {
                    return self;
                }
                next.status = None;
            }
        }
        Rc::new(next)
    }
}
