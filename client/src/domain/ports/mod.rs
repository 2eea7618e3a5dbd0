//! Driven ports at the edge of the access layer.

mod macros;
pub(crate) use macros::define_port_error;

mod http_transport;
mod recommendation_source;
mod session_provider;
mod submission_uploader;

#[cfg(test)]
pub use http_transport::MockHttpTransport;
pub use http_transport::{
    FixtureHttpTransport, HttpTransport, TransportError, TransportRequest, TransportResponse,
};
#[cfg(test)]
pub use recommendation_source::MockRecommendationSource;
pub use recommendation_source::{FixtureRecommendationSource, RecommendationSource};
#[cfg(test)]
pub use session_provider::MockSessionProvider;
pub use session_provider::{FixtureSessionProvider, SessionProvider, SessionProviderError};
#[cfg(test)]
pub use submission_uploader::MockSubmissionUploader;
pub use submission_uploader::{SubmissionFile, SubmissionUploadError, SubmissionUploader};
