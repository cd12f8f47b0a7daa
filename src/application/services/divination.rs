//! Divination service
//!
//! Validates a cast entry, sends it to the generation endpoint, decodes the
//! answer and renders it.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::application::wire::decode_body;
use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{CastInput, DivinationResult, Renderer, Tree};
use crate::infrastructure::traits::GuaTransport;

/// Service for one validate -> request -> decode -> render pass.
pub struct DivinationService {
    transport: Arc<dyn GuaTransport>,
    renderer: Renderer,
}

impl DivinationService {
    pub fn new(transport: Arc<dyn GuaTransport>, renderer: Renderer) -> Self {
        Self {
            transport,
            renderer,
        }
    }

    /// Validate `raw`; nothing is sent when it is rejected.
    pub fn validate(&self, raw: &str) -> ApplicationResult<CastInput> {
        CastInput::parse(raw).map_err(|e| {
            debug!("validate: rejected {:?}: {}", raw, e);
            ApplicationError::from(e)
        })
    }

    /// Request a result for a validated entry.
    pub fn request(&self, cast: &CastInput) -> ApplicationResult<DivinationResult> {
        let response = self.transport.post_numbers(cast.as_str()).map_err(|e| {
            warn!("request: transport failed: {}", e);
            ApplicationError::NetworkError { message: e.message }
        })?;

        if !response.is_success() {
            warn!("request: HTTP {}", response.status);
            return Err(ApplicationError::RequestFailed {
                status: response.status,
            });
        }
        decode_body(&response.body)
    }

    /// Full pass for a raw entry.
    pub fn cast(&self, raw: &str) -> ApplicationResult<Tree> {
        let cast = self.validate(raw)?;
        let result = self.request(&cast)?;
        info!(
            "cast {}: {} rows, {} moving",
            cast,
            result.lines.len(),
            cast.moving_count()
        );
        Ok(self.render(&result))
    }

    /// Decode a saved response body without any request.
    pub fn decode(&self, body: &str) -> ApplicationResult<DivinationResult> {
        decode_body(body)
    }

    pub fn render(&self, result: &DivinationResult) -> Tree {
        self.renderer.render(result)
    }
}
