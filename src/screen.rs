//! List screens: a collection paired with its view state

use crate::core::auth::ViewerContext;
use crate::core::entity::Record;
use crate::core::service::CollectionStore;
use crate::core::view::{ViewSpec, ViewState, build_view};
use anyhow::Result;

/// One list screen of the dashboard.
///
/// The screen owns its [`ViewState`]; the records belong to the store and
/// are fetched fresh on every [`Screen::load`].
#[derive(Debug, Clone)]
pub struct Screen {
    name: String,
    collection: String,
    state: ViewState,
}

impl Screen {
    pub fn new(name: impl Into<String>, collection: impl Into<String>, spec: ViewSpec) -> Self {
        Self {
            name: name.into(),
            collection: collection.into(),
            state: ViewState::new(spec),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut ViewState {
        &mut self.state
    }

    /// Navigating away drops any search, filter or sort the user applied
    pub fn leave(&mut self) {
        self.state.reset();
    }

    /// Fetch the collection and return the rows to render, in view order
    pub async fn load<S>(&self, store: &S, viewer: Option<&ViewerContext>) -> Result<Vec<Record>>
    where
        S: CollectionStore + ?Sized,
    {
        let records = store.list(&self.collection).await?;
        let rows = build_view(&records, self.state.spec(), viewer);

        tracing::debug!(
            screen = %self.name,
            collection = %self.collection,
            rows = rows.len(),
            "loaded screen"
        );

        Ok(rows.into_iter().cloned().collect())
    }
}
