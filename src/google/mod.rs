mod credentials;
mod drive;

pub use credentials::{AuthorizedUser, TokenSource, DEFAULT_TOKEN_URI};
pub use drive::{document_url, DocumentPublisher, GoogleDrivePublisher};
