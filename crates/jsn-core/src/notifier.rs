//! Notification orchestrator
//!
//! [`Notifier`] owns the instance options, the identity counter, the last
//! shown content and the list of live notices. One notifier serves one
//! document for the lifetime of a page; the document itself is borrowed per
//! call.
//!
//! A notify call runs ENTRY → DEDUP-CHECK → SUPPRESSED, or
//! ENTRY → DEDUP-CHECK → CONFIG-RESOLVED → CONTAINER-READY → NOTICE-BUILT →
//! DISMISS-WIRED → DONE, all within the call.

use std::fmt;

use jsn_dom::{Document, DomEventType, NodeId};

use crate::builder::{self, ElementSpec, Target};
use crate::class_name;
use crate::container;
use crate::options::{resolve, Options, PartialOptions};
use crate::sanitize::MarkupSanitizer;
use crate::NotifyError;

/// Prefix of the DOM id given to each notice node
pub const NOTICE_ID_PREFIX: &str = "jsn-notice-";

/// Identity of one displayed notice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NoticeId(pub u32);

impl NoticeId {
    /// DOM id of the notice node
    pub fn dom_id(self) -> String {
        format!("{}{}", NOTICE_ID_PREFIX, self.0)
    }
}

impl fmt::Display for NoticeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Notice flavour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoticeKind {
    Standard,
    Warning,
    Success,
    Error,
    Info,
}

impl NoticeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Warning => "warning",
            Self::Success => "success",
            Self::Error => "error",
            Self::Info => "info",
        }
    }

    /// Icon class this kind puts in place of the configured default.
    /// `Standard` keeps whatever the defaults say.
    pub fn icon_class(self) -> Option<&'static str> {
        match self {
            Self::Standard => None,
            Self::Warning => Some("jsn-warning"),
            Self::Success => Some("jsn-success"),
            Self::Error => Some("jsn-error"),
            Self::Info => Some("jsn-info"),
        }
    }
}

/// What a notify call did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyOutcome {
    /// Built and connected to the document
    Displayed(NoticeId),
    /// The container could not be attached (e.g. the target selector
    /// matched nothing), so nothing was rendered. The identity and the
    /// dedup key are consumed all the same.
    Detached(NoticeId),
    /// Same content as the previous notice; nothing happened
    Suppressed,
}

impl NotifyOutcome {
    pub fn id(self) -> Option<NoticeId> {
        match self {
            Self::Displayed(id) | Self::Detached(id) => Some(id),
            Self::Suppressed => None,
        }
    }

    pub fn is_visible(self) -> bool {
        matches!(self, Self::Displayed(_))
    }
}

/// Why a notice went away
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DismissReason {
    /// The dismiss control was clicked
    User,
    /// [`Notifier::remove`]
    Removed,
    /// [`Notifier::clear`]
    Cleared,
}

/// Delivered to subscribers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoticeEvent {
    Shown {
        id: NoticeId,
        kind: NoticeKind,
        title: Option<String>,
        content: String,
        attached: bool,
    },
    Dismissed {
        id: NoticeId,
        reason: DismissReason,
    },
}

/// Handle returned by [`Notifier::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&NoticeEvent)>;

#[derive(Debug, Clone, Copy)]
struct ActiveNotice {
    id: NoticeId,
    node: NodeId,
    close: NodeId,
}

impl ActiveNotice {
    /// The cached node still carries this notice's DOM id. Released slots
    /// may have been reused by unrelated nodes.
    fn owns(&self, doc: &Document) -> bool {
        doc.element(self.node)
            .and_then(|e| e.id.as_deref())
            .is_some_and(|dom_id| dom_id == self.id.dom_id())
    }

    fn is_live(&self, doc: &Document) -> bool {
        self.owns(doc) && doc.is_connected(self.node)
    }
}

/// The public entry point
pub struct Notifier {
    defaults: Options,
    options: PartialOptions,
    sanitizer: MarkupSanitizer,
    last_id: u32,
    last_content: Option<String>,
    active: Vec<ActiveNotice>,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl Notifier {
    /// Notifier with built-in defaults and an empty instance bag
    pub fn new() -> Self {
        Self::with_options(PartialOptions::default())
    }

    /// Notifier with an instance-level option bag
    pub fn with_options(options: PartialOptions) -> Self {
        Self {
            defaults: Options::default(),
            options,
            sanitizer: MarkupSanitizer::default_safe(),
            last_id: 0,
            last_content: None,
            active: Vec::new(),
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Instance-level options
    pub fn options(&self) -> &PartialOptions {
        &self.options
    }

    /// Mutable instance-level options
    pub fn options_mut(&mut self) -> &mut PartialOptions {
        &mut self.options
    }

    /// Replace the instance-level options
    pub fn set_options(&mut self, options: PartialOptions) {
        self.options = options;
    }

    /// Value of the identity counter (the id of the latest notice)
    pub fn current_id(&self) -> u32 {
        self.last_id
    }

    /// Content of the most recently displayed notice
    pub fn last_content(&self) -> Option<&str> {
        self.last_content.as_deref()
    }

    /// Notices displayed, not yet dismissed and still in the document,
    /// oldest first
    pub fn visible(&self, doc: &Document) -> Vec<NoticeId> {
        self.active
            .iter()
            .filter(|a| a.is_live(doc))
            .map(|a| a.id)
            .collect()
    }

    /// Node of a notice that is still in the document
    pub fn notice_node(&self, doc: &Document, id: NoticeId) -> Option<NodeId> {
        self.active
            .iter()
            .find(|a| a.id == id && a.is_live(doc))
            .map(|a| a.node)
    }

    /// Find (or create) the container using defaults plus instance options
    pub fn get_container(&self, doc: &mut Document, create: bool) -> Option<NodeId> {
        let options = resolve(&self.defaults, &self.options, None);
        container::get_container(doc, &options, create)
    }

    pub fn standard(
        &mut self,
        doc: &mut Document,
        title: Option<&str>,
        content: &str,
        overrides: Option<&PartialOptions>,
    ) -> Result<NotifyOutcome, NotifyError> {
        self.notify(doc, NoticeKind::Standard, title, content, overrides)
    }

    pub fn warning(
        &mut self,
        doc: &mut Document,
        title: Option<&str>,
        content: &str,
        overrides: Option<&PartialOptions>,
    ) -> Result<NotifyOutcome, NotifyError> {
        self.notify(doc, NoticeKind::Warning, title, content, overrides)
    }

    pub fn success(
        &mut self,
        doc: &mut Document,
        title: Option<&str>,
        content: &str,
        overrides: Option<&PartialOptions>,
    ) -> Result<NotifyOutcome, NotifyError> {
        self.notify(doc, NoticeKind::Success, title, content, overrides)
    }

    pub fn error(
        &mut self,
        doc: &mut Document,
        title: Option<&str>,
        content: &str,
        overrides: Option<&PartialOptions>,
    ) -> Result<NotifyOutcome, NotifyError> {
        self.notify(doc, NoticeKind::Error, title, content, overrides)
    }

    pub fn info(
        &mut self,
        doc: &mut Document,
        title: Option<&str>,
        content: &str,
        overrides: Option<&PartialOptions>,
    ) -> Result<NotifyOutcome, NotifyError> {
        self.notify(doc, NoticeKind::Info, title, content, overrides)
    }

    /// Show a notice.
    ///
    /// Content identical to the previous notice is suppressed without any
    /// side effect. Title and kind are not part of that comparison.
    pub fn notify(
        &mut self,
        doc: &mut Document,
        kind: NoticeKind,
        title: Option<&str>,
        content: &str,
        overrides: Option<&PartialOptions>,
    ) -> Result<NotifyOutcome, NotifyError> {
        let mut base = self.defaults.clone();
        if let Some(icon) = kind.icon_class() {
            base.icon_class = icon.to_string();
        }
        let options = resolve(&base, &self.options, overrides);

        if self.last_content.as_deref() == Some(content) {
            tracing::debug!("Suppressed duplicate {} notice", kind.as_str());
            return Ok(NotifyOutcome::Suppressed);
        }
        self.last_content = Some(content.to_string());
        self.last_id += 1;
        let id = NoticeId(self.last_id);

        if options.rtl {
            tracing::trace!("rtl is reserved and has no effect on notice {}", id);
        }

        let title = title
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .or_else(|| (!options.title.is_empty()).then(|| options.title.clone()));

        self.prune(doc);

        let container = match container::get_container(doc, &options, false) {
            Some(node) => node,
            None => container::create_container(doc, &options),
        };
        if !doc.is_connected(container) {
            // Lookups only see connected nodes, so this one is unreachable.
            if let Err(err) = doc.destroy(container) {
                tracing::warn!("Could not release detached container: {}", err);
            }
            tracing::warn!("Notice {} has no container in the document", id);
            self.emit(&NoticeEvent::Shown {
                id,
                kind,
                title,
                content: content.to_string(),
                attached: false,
            });
            return Ok(NotifyOutcome::Detached(id));
        }

        let notice = builder::build(doc, &notice_spec(&options), None, Some(Target::Node(container)));
        doc.set_id(notice.node, &id.dom_id())?;

        let wrap = builder::build(
            doc,
            &ElementSpec::div().classes(["jsn-title-content"]).style("width", "100%"),
            None,
            Some(Target::Node(notice.node)),
        );
        if let Some(title) = &title {
            let title_spec = ElementSpec::div().classes(class_name::split_tokens(&options.title_class));
            let node = builder::build(doc, &title_spec, None, Some(Target::Node(wrap.node))).node;
            doc.append_text(node, title)?;
        }

        let body_spec = ElementSpec::div()
            .classes(class_name::split_tokens(&options.content_class))
            .style("width", "100%");
        let body = builder::build(doc, &body_spec, None, Some(Target::Node(wrap.node))).node;
        doc.append_text(body, content)?;

        let close = self.build_dismiss_control(doc, &options, notice.node, id)?;

        self.active.push(ActiveNotice { id, node: notice.node, close });

        tracing::info!("Displayed {} notice {}", kind.as_str(), id);
        self.emit(&NoticeEvent::Shown {
            id,
            kind,
            title,
            content: content.to_string(),
            attached: true,
        });
        Ok(NotifyOutcome::Displayed(id))
    }

    fn build_dismiss_control(
        &self,
        doc: &mut Document,
        options: &Options,
        notice: NodeId,
        id: NoticeId,
    ) -> Result<NodeId, NotifyError> {
        let spec = ElementSpec::div().classes(class_name::split_tokens(&options.close_class));
        let close = builder::build(doc, &spec, None, Some(Target::Node(notice))).node;

        let markup = self.sanitizer.sanitize(&options.close_html);
        doc.set_inner_html(close, &markup)?;
        if let Some(first) = doc.first_element_child(close) {
            doc.set_style_property(first, "border", "0px")?;
        }
        doc.add_event_listener(close, DomEventType::Click, id.0)?;
        Ok(close)
    }

    /// Remove a notice by identity, or the most recent one when `id` is
    /// `None`. Returns `false` if there was nothing to remove.
    pub fn remove(&mut self, doc: &mut Document, id: Option<NoticeId>) -> bool {
        self.prune(doc);
        let Some(id) = id.or_else(|| self.active.last().map(|a| a.id)) else {
            return false;
        };
        self.dismiss(doc, id, DismissReason::Removed)
    }

    /// Remove every live notice and forget the last shown content.
    /// Returns how many notices were removed.
    pub fn clear(&mut self, doc: &mut Document) -> usize {
        self.prune(doc);
        let ids: Vec<NoticeId> = self.active.iter().map(|a| a.id).collect();
        let removed = ids
            .into_iter()
            .filter(|id| self.dismiss(doc, *id, DismissReason::Cleared))
            .count();
        self.last_content = None;
        tracing::debug!("Cleared {} notices", removed);
        removed
    }

    /// Deliver a click on `target`.
    ///
    /// Dismisses the notice whose dismiss control contains `target`.
    /// Returns the dismissed notices; clicking a control a second time is a
    /// no-op.
    pub fn handle_click(&mut self, doc: &mut Document, target: NodeId) -> Vec<NoticeId> {
        self.prune(doc);
        let mut path = Vec::new();
        let mut current = doc.node(target).map(|_| target);
        while let Some(node) = current {
            path.push(node);
            current = doc.parent(node);
        }

        let hits: Vec<NoticeId> = doc
            .dispatch_event(target, DomEventType::Click)
            .into_iter()
            .map(NoticeId)
            .filter(|id| {
                self.active
                    .iter()
                    .any(|a| a.id == *id && path.contains(&a.close))
            })
            .collect();

        hits.into_iter()
            .filter(|id| self.dismiss(doc, *id, DismissReason::User))
            .collect()
    }

    fn dismiss(&mut self, doc: &mut Document, id: NoticeId, reason: DismissReason) -> bool {
        let Some(pos) = self.active.iter().position(|a| a.id == id) else {
            tracing::trace!("Notice {} already gone", id);
            return false;
        };
        let notice = self.active.remove(pos);

        if let Err(err) = doc.destroy(notice.node) {
            tracing::warn!("Could not release notice {}: {}", id, err);
        }
        tracing::debug!("Dismissed notice {} ({:?})", id, reason);
        self.emit(&NoticeEvent::Dismissed { id, reason });
        true
    }

    /// Forget notices the host took out of the document (for example by
    /// removing the whole container). No events are emitted for them.
    fn prune(&mut self, doc: &mut Document) {
        let (live, gone): (Vec<ActiveNotice>, Vec<ActiveNotice>) =
            self.active.drain(..).partition(|a| a.is_live(doc));
        self.active = live;

        for notice in gone {
            if notice.owns(doc) {
                doc.remove_event_listeners_in(notice.node);
            }
            tracing::debug!("Notice {} left the document, forgetting it", notice.id);
        }
    }

    /// Register a listener for display and dismissal events
    pub fn subscribe(&mut self, listener: impl FnMut(&NoticeEvent) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Drop a listener. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sub, _)| *sub != id);
        self.listeners.len() != before
    }

    fn emit(&mut self, event: &NoticeEvent) {
        for (_, listener) in self.listeners.iter_mut() {
            listener(event);
        }
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Notifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Notifier")
            .field("options", &self.options)
            .field("last_id", &self.last_id)
            .field("last_content", &self.last_content)
            .field("active", &self.active)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

/// Style block of a notice node
fn notice_spec(options: &Options) -> ElementSpec {
    let mut classes = class_name::split_tokens(&options.notification_class);
    classes.extend(class_name::split_tokens(&options.icon_class));
    ElementSpec::div()
        .classes(classes)
        .style("background", options.theme.background.as_str())
        .style("padding", "15px")
        .style("margin", "0 0 10px")
        .style("border", format!("1px solid {}", options.theme.text))
        .style("boxShadow", "0 2px 6px rgba(0, 0, 0, 0.2)")
        .style("display", "flex")
        .style("alignItems", "center")
        .style("justifyContent", "space-between")
}
