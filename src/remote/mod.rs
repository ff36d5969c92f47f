//! HTTP collaborators: the file store holding the roster and the wiki
//! page it is published to.

mod confluence;
mod nextcloud;

pub use confluence::{
    ConfluenceClient, Page, PageBody, PageUpdate, PageVersion, PublishOutcome, StorageBody,
};
pub use nextcloud::{NextcloudClient, parse_http_date};
