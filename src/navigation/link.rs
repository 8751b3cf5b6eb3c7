//! Link activation classification.
//!
//! Decides whether a click on an anchor is a same-origin, same-tab document
//! navigation the controller should own, or something the browser handles.

use url::Url;

/// Mouse button that activated the link.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MouseButton {
    #[default]
    Primary,
    Middle,
    Secondary,
}

/// Keyboard modifiers held during activation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub ctrl: bool,
    pub meta: bool,
    pub shift: bool,
    pub alt: bool,
}

impl Modifiers {
    pub fn any(&self) -> bool {
        self.ctrl || self.meta || self.shift || self.alt
    }
}

/// A click (or keyboard activation) on an anchor element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkActivation {
    pub href: String,
    /// The anchor's `target` attribute.
    pub target: Option<String>,
    pub button: MouseButton,
    pub modifiers: Modifiers,
    /// The anchor carries a `download` attribute.
    pub download: bool,
}

impl LinkActivation {
    /// A plain primary-button click on `href`.
    pub fn click(href: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            ..Self::default()
        }
    }

    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    pub fn with_button(mut self, button: MouseButton) -> Self {
        self.button = button;
        self
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn as_download(mut self) -> Self {
        self.download = true;
        self
    }

    fn opens_new_context(&self) -> bool {
        self.button != MouseButton::Primary
            || self.modifiers.any()
            || self
                .target
                .as_deref()
                .is_some_and(|t| !t.is_empty() && !t.eq_ignore_ascii_case("_self"))
    }
}

/// Why a link was left to the browser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BypassReason {
    /// New tab or window requested.
    NewContext,
    Download,
    /// Only moves to an anchor on the current page.
    SamePageAnchor,
    /// A different origin.
    External,
    /// `mailto:`, `tel:`, `javascript:` and other non-http schemes.
    ForeignScheme,
    /// The href could not be resolved.
    Unparsable,
}

/// What the controller did with a link activation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkDisposition {
    /// Default navigation prevented; the controller pushed `path`.
    Intercepted { path: String },
    /// Default browser handling applies.
    PassThrough(BypassReason),
}

/// Classify `link` relative to the site `origin` and the current location.
///
/// Returns the path (plus query) to push for internal navigations.
pub fn classify(link: &LinkActivation, origin: &Url, current: &str) -> Result<String, BypassReason> {
    if link.download {
        return Err(BypassReason::Download);
    }
    if link.opens_new_context() {
        return Err(BypassReason::NewContext);
    }

    let href = link.href.trim();
    if href.starts_with('#') {
        return Err(BypassReason::SamePageAnchor);
    }

    let base = origin.join(current).unwrap_or_else(|_| origin.clone());
    let resolved = base.join(href).map_err(|_| BypassReason::Unparsable)?;

    if !matches!(resolved.scheme(), "http" | "https") {
        return Err(BypassReason::ForeignScheme);
    }
    if resolved.origin() != origin.origin() {
        return Err(BypassReason::External);
    }

    let mut target = resolved.path().to_string();
    if let Some(query) = resolved.query() {
        target.push('?');
        target.push_str(query);
    }

    if resolved.fragment().is_some() && target == strip_fragment(current) {
        return Err(BypassReason::SamePageAnchor);
    }
    Ok(target)
}

fn strip_fragment(location: &str) -> &str {
    match location.find('#') {
        Some(idx) => &location[..idx],
        None => location,
    }
}
