//! App context - collections and the active selection, no I/O

use crate::models::{Collection, Request};

#[derive(Debug, Default)]
pub struct AppContext {
    pub collections: Vec<Collection>,
    pub active_collection: Option<usize>,
    /// Index into the active collection's `requests`
    pub active_request: Option<usize>,
}

impl AppContext {
    pub fn find_collection(&self, name: &str) -> Option<usize> {
        self.collections.iter().position(|c| c.name == name)
    }

    pub fn collection(&self) -> Option<&Collection> {
        self.active_collection.and_then(|i| self.collections.get(i))
    }

    pub fn collection_mut(&mut self) -> Option<&mut Collection> {
        self.active_collection.and_then(|i| self.collections.get_mut(i))
    }

    pub fn request(&self) -> Option<&Request> {
        let index = self.active_request?;
        self.collection()?.requests.get(index)
    }

    pub fn request_mut(&mut self) -> Option<&mut Request> {
        let index = self.active_request?;
        self.collection_mut()?.requests.get_mut(index)
    }

    /// `"<collection>/<request>"` for the active request
    pub fn request_id(&self) -> Option<String> {
        let collection = self.collection()?;
        let request = self.request()?;
        Some(format!("{}/{}", collection.name, request.name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_id() {
        let mut context = AppContext::default();
        assert_eq!(context.request_id(), None);

        let mut collection = Collection::new("Team").unwrap();
        collection.requests.push(Request::new("Login").unwrap());
        context.collections.push(collection);
        context.active_collection = Some(0);
        assert_eq!(context.request_id(), None);

        context.active_request = Some(0);
        assert_eq!(context.request_id().as_deref(), Some("Team/Login"));
        context.request_mut().unwrap().url = "http://x".into();
        assert_eq!(context.request().unwrap().url, "http://x");
    }
}
