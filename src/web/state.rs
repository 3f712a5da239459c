use std::sync::Arc;

use minijinja::Environment;

use super::templates::build_environment;
use crate::application::ports::RelayApi;

pub struct WebState<R>
where
    R: RelayApi,
{
    pub relay: Arc<R>,
    pub templates: Arc<Environment<'static>>,
}

impl<R> WebState<R>
where
    R: RelayApi,
{
    pub fn new(relay: Arc<R>) -> Self {
        Self {
            relay,
            templates: Arc::new(build_environment()),
        }
    }
}

impl<R> Clone for WebState<R>
where
    R: RelayApi,
{
    fn clone(&self) -> Self {
        Self {
            relay: Arc::clone(&self.relay),
            templates: Arc::clone(&self.templates),
        }
    }
}
