pub mod client;
pub mod error;
pub mod form;
pub mod queue;
pub mod result;
pub mod session;
pub mod types;
pub mod upload;

pub use client::WebhookClient;
pub use error::Error;
pub use form::{ArticleForm, ImageUpload};
pub use queue::ArticleQueue;
pub use result::{ArticleOutput, ProcessingResult};
pub use session::{Notice, NoticeLevel, Session, SubmitError};
pub use types::{ArticleInput, ExamType, InputMethod, QueuedArticle, SubmitOptions, SubmitPayload};

pub type Result<T> = std::result::Result<T, Error>;
