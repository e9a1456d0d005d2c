// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::sync::Arc;

use calmodel_ical::{ComponentKind, ErrorCode, FormatOptions, parse};
use tokio::task::JoinHandle;

use crate::timezone::{TimezoneProvider, install_timezone_service};
use crate::{ComponentTree, Config, IcsError, Property};

/// Receives the outcome of [`IcsService::parse_async_with_listener`].
pub trait ParsingListener: Send + 'static {
    /// Called exactly once, with the tree or the error.
    fn on_parsing_complete(self: Box<Self>, result: Result<ComponentTree, IcsError>);
}

impl<F> ParsingListener for F
where
    F: FnOnce(Result<ComponentTree, IcsError>) + Send + 'static,
{
    fn on_parsing_complete(self: Box<Self>, result: Result<ComponentTree, IcsError>) {
        self(result);
    }
}

/// Entry point of the object model: parsing, creation and serialization.
#[derive(Debug, Clone, Default)]
pub struct IcsService {
    format: FormatOptions,
}

impl IcsService {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A service formatting by `config`.
    ///
    /// The timezone aliases of `config` become the process-wide timezone
    /// service, unless another one was installed before.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        if install_timezone_service(config.timezone_service()).is_err() {
            tracing::debug!("timezone service already installed, keeping it");
        }
        Self {
            format: config.format_options(),
        }
    }

    #[must_use]
    pub const fn format_options(&self) -> &FormatOptions {
        &self.format
    }

    /// Parse iCalendar text holding exactly one top-level component.
    ///
    /// `provider` is consulted for TZIDs before the process-wide service.
    ///
    /// # Errors
    /// [`IcsError::ParseError`] if the text is malformed or has no or several
    /// top-level components. No partial tree is returned.
    #[tracing::instrument(skip_all, fields(len = text.len()))]
    pub fn parse(
        &self,
        text: &str,
        provider: Option<Arc<dyn TimezoneProvider>>,
    ) -> Result<ComponentTree, IcsError> {
        let mut roots = parse(text)?;
        if roots.len() != 1 {
            return Err(IcsError::ParseError {
                code: ErrorCode::MalformedData,
                message: format!("expected one top-level component, found {}", roots.len()),
            });
        }

        let root = roots.remove(0);
        let tree = ComponentTree::from_raw(&root, provider);
        tracing::debug!(kind = %root.name, components = tree.len(), "parsed");
        Ok(tree)
    }

    /// [`IcsService::parse`] on the blocking pool.
    ///
    /// # Errors
    /// Same as [`IcsService::parse`], [`IcsError::Unexpected`] if the worker
    /// panicked.
    #[tracing::instrument(skip_all)]
    pub async fn parse_async(
        &self,
        text: String,
        provider: Option<Arc<dyn TimezoneProvider>>,
    ) -> Result<ComponentTree, IcsError> {
        let service = self.clone();
        tokio::task::spawn_blocking(move || service.parse(&text, provider))
            .await
            .map_err(|err| IcsError::Unexpected(format!("parse worker failed: {err}")))?
    }

    /// Parse in the background and hand the outcome to `listener`.
    ///
    /// Must be called within a tokio runtime. The listener runs on a runtime
    /// thread, exactly once.
    #[tracing::instrument(skip_all)]
    pub fn parse_async_with_listener(
        &self,
        text: String,
        provider: Option<Arc<dyn TimezoneProvider>>,
        listener: impl ParsingListener,
    ) -> JoinHandle<()> {
        let listener: Box<dyn ParsingListener> = Box::new(listener);
        let service = self.clone();
        tokio::spawn(async move {
            let result = service.parse_async(text, provider).await;
            if let Err(err) = &result {
                tracing::debug!(%err, "async parse failed");
            }
            listener.on_parsing_complete(result);
        })
    }

    /// An empty component of a well-known kind, e.g. `"VEVENT"`.
    ///
    /// # Errors
    /// [`IcsError::InvalidArgument`] for experimental and unknown kinds.
    pub fn create_component(&self, kind: &str) -> Result<ComponentTree, IcsError> {
        let Ok(kind) = kind.parse::<ComponentKind>();
        ComponentTree::new(kind)
    }

    /// An empty property of a well-known kind, e.g. `"DTSTART"`.
    ///
    /// # Errors
    /// [`IcsError::InvalidArgument`] for unknown kinds.
    pub fn create_property(&self, kind: &str) -> Result<Property, IcsError> {
        Property::from_name(kind)
    }

    /// A property from one content line.
    ///
    /// # Errors
    /// [`IcsError::ParseError`] if the text is no content line.
    pub fn create_property_from_string(&self, text: &str) -> Result<Property, IcsError> {
        Property::from_ical_string(text)
    }

    /// Serialize with the options of this service.
    ///
    /// # Errors
    /// [`IcsError::SerializationError`] if the codec fails.
    #[tracing::instrument(skip_all)]
    pub fn serialize(&self, tree: &mut ComponentTree) -> Result<String, IcsError> {
        tree.serialize_with(&self.format)
    }
}
