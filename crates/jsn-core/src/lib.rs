//! jsn notifications
//!
//! Toast-style notices rendered into a host document.
//!
//! Features:
//! - Layered options (built-in defaults, instance bag, per-call overrides)
//! - One shared container per container id, created on demand
//! - Duplicate suppression by last shown content
//! - Sanitized dismiss-control markup
//! - Display and dismissal events

pub mod builder;
pub mod class_name;
pub mod container;
pub mod notifier;
pub mod options;
pub mod sanitize;

mod error;

pub use builder::{build, Built, ElementSpec, StyleValue, Target};
pub use class_name::is_valid_class_name;
pub use container::get_container;
pub use error::NotifyError;
pub use notifier::{
    DismissReason, NoticeEvent, NoticeId, NoticeKind, Notifier, NotifyOutcome, SubscriptionId,
    NOTICE_ID_PREFIX,
};
pub use options::{resolve, Options, PartialOptions, Theme, DEFAULT_CLOSE_HTML};
pub use sanitize::{escape_text, MarkupSanitizer, SanitizerConfig};

pub use jsn_dom;
