//! App operations - the surface commands and widget actions act through

use super::App;
use crate::commands::CommandError;
use crate::models::{Collection, HttpMethod, Request};

impl App {
    // ========================
    // Collections
    // ========================

    pub fn create_collection(&mut self, name: &str, activate: bool) -> Result<(), CommandError> {
        if self.context.find_collection(name).is_some() {
            return Err(CommandError::DuplicateCollection(name.to_string()));
        }
        let collection = Collection::new(name)?;
        self.context.collections.push(collection);
        tracing::info!(name, "Created collection");

        if activate {
            self.set_active_collection(self.context.collections.len() - 1);
        }
        Ok(())
    }

    pub fn set_active_collection(&mut self, index: usize) {
        let Some(collection) = self.context.collections.get(index) else {
            tracing::warn!(index, "No collection at index");
            return;
        };
        self.collection_view.show(collection);
        self.context.active_collection = Some(index);
        self.context.active_request = None;
        self.request_view.show(None);
        self.response_view.show(None);
    }

    pub fn select_collection(&mut self, name: &str) -> Result<(), CommandError> {
        let index = self
            .context
            .find_collection(name)
            .ok_or_else(|| CommandError::NoSuchCollection(name.to_string()))?;
        self.set_active_collection(index);
        Ok(())
    }

    // ========================
    // Requests
    // ========================

    pub fn create_request(&mut self, name: &str, activate: bool) -> Result<(), CommandError> {
        let collection = self.context.collection().ok_or(CommandError::NoActiveCollection)?;
        if collection.find(name).is_some() {
            return Err(CommandError::DuplicateRequest(name.to_string()));
        }
        let request = Request::new(name)?;

        let collection = self
            .context
            .collection_mut()
            .ok_or(CommandError::NoActiveCollection)?;
        collection.requests.push(request);
        let index = collection.requests.len() - 1;
        tracing::info!(collection = %collection.name, name, "Created request");

        self.collection_view.insert_request(name);
        if activate {
            self.set_active_request(index);
        }
        Ok(())
    }

    pub fn set_active_request(&mut self, index: usize) {
        let Some(request) = self.context.collection().and_then(|c| c.requests.get(index)) else {
            tracing::warn!(index, "No request at index");
            return;
        };
        self.request_view.show(Some(request));
        self.context.active_request = Some(index);
        self.response_view.show(self.context.request_id());
    }

    pub fn select_request(&mut self, name: &str) -> Result<(), CommandError> {
        let collection = self.context.collection().ok_or(CommandError::NoActiveCollection)?;
        let index = collection
            .find(name)
            .ok_or_else(|| CommandError::NoSuchRequest(name.to_string()))?;
        self.set_active_request(index);
        Ok(())
    }

    /// Activate the request shown on row `row` of the collection list
    pub fn open_request_row(&mut self, row: usize) {
        let Some(name) = self.collection_view.request_name(row).map(str::to_string) else {
            return;
        };
        if let Err(e) = self.select_request(&name) {
            tracing::error!(error = %e, row, "List row does not match a request");
        }
        self.set_focus(None);
    }

    /// Dispatch the active request. The response pane shows it as loading until it completes.
    pub fn execute_request(&mut self) -> Result<(), CommandError> {
        let request = self.context.request().ok_or(CommandError::NoActiveRequest)?;
        let id = self.context.request_id().ok_or(CommandError::NoActiveRequest)?;
        self.executor.dispatch(request, id.as_str());
        self.response_view.set_loading(&id);
        Ok(())
    }

    pub fn set_method(&mut self, method: HttpMethod) {
        if let Some(request) = self.context.request_mut() {
            request.method = method;
        }
    }

    pub fn set_url(&mut self, url: String) {
        self.request_view.mark_url(&url);
        if let Some(request) = self.context.request_mut() {
            request.url = url;
        }
    }

    pub fn quit(&mut self) {
        tracing::info!("Quit requested");
        self.running = false;
    }
}
