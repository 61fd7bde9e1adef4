use std::sync::Arc;

use chrono::Local;
use service::client::{Backend, EntityClient};
use service::pages::{PageQuery, PageSettings, ViewContext};

use crate::viewer::Viewer;

#[derive(Clone)]
pub struct AppState {
    pub backend: Arc<dyn Backend>,
    pub pages: PageSettings,
}

impl AppState {
    pub fn new(backend: Arc<dyn Backend>, pages: PageSettings) -> Self {
        Self { backend, pages }
    }

    /// Client bound to the viewer's session.
    pub fn client_for(&self, viewer: Viewer) -> EntityClient {
        self.backend.client(viewer.into_token())
    }

    pub fn view_context(&self, query: PageQuery) -> ViewContext {
        ViewContext::new(Local::now().date_naive()).with_query(query).with_settings(self.pages.clone())
    }
}
