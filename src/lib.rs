//! quote-pdf: collect client and line-item details and render them into a
//! paginated PDF quote.
//!
//! The flow mirrors a short form session: an [`AccessGate`] signs the admin
//! in, a [`QuoteSession`] holds the editable item list and validates the
//! submission, and [`generate_pdf`] lays the resulting [`QuoteForm`] out onto
//! a [`PdfCanvas`].

pub mod auth;
pub mod canvas;
pub mod config;
pub mod error;
pub mod format;
pub mod input;
pub mod logger;
pub mod logo;
pub mod pdf;
pub mod quote;
pub mod render;
pub mod session;
pub mod text;
pub mod validation;

pub use auth::AccessGate;
pub use canvas::{Canvas, RecordingCanvas};
pub use config::{CompanyInfo, Credentials, PageSize};
pub use error::{AppError, Result};
pub use pdf::{generate_pdf, PdfCanvas};
pub use quote::{ClientDetails, ItemId, Money, NewItem, QuoteForm, QuoteItem};
pub use render::{render_quote, RenderSummary};
pub use session::QuoteSession;
pub use validation::{Field, FieldError, ValidationErrors};
