//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::sync::Arc;
use std::time::Duration;

use crate::application::services::{DivinationService, Session};
use crate::config::Settings;
use crate::domain::Renderer;
use crate::infrastructure::traits::{GuaTransport, HttpTransport, Notifier, TerminalNotifier};
use crate::infrastructure::{InfraError, InfraResult};

/// Container holding all application services.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Generation endpoint
    pub transport: Arc<dyn GuaTransport>,

    /// User notice sink
    pub notifier: Arc<dyn Notifier>,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Settings) -> InfraResult<Self> {
        let transport = HttpTransport::new(
            &settings.endpoint,
            Duration::from_secs(settings.timeout_secs),
        )
        .map_err(|e| InfraError::Client { message: e.message })?;
        Ok(Self::with_deps(
            settings,
            Arc::new(transport),
            Arc::new(TerminalNotifier),
        ))
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(
        settings: Settings,
        transport: Arc<dyn GuaTransport>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let settings = Arc::new(settings);

        Self {
            settings,
            transport,
            notifier,
        }
    }

    pub fn renderer(&self) -> Renderer {
        Renderer::new(self.settings.classify)
    }

    pub fn divination_service(&self) -> DivinationService {
        DivinationService::new(Arc::clone(&self.transport), self.renderer())
    }

    pub fn session(&self) -> Session {
        Session::new(self.divination_service(), Arc::clone(&self.notifier))
    }
}
