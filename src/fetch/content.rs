//! One-pass HTML summarization.
//!
//! The fetched document is parsed once and reduced to the plain tallies the
//! content signals need. Parsing happens here, at resolve time, so the
//! summary can be shared across signal workers without carrying a DOM
//! around.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{Html, Selector};
use url::Url;

fn selector(raw: &'static str) -> Selector {
    Selector::parse(raw).unwrap_or_else(|e| {
        log::error!("Failed to parse selector '{raw}': {e}");
        Selector::parse("*:not(*)").expect("fallback selector is valid")
    })
}

static LINK_SELECTOR: LazyLock<Selector> = LazyLock::new(|| selector("link[href]"));
static SCRIPT_SRC_SELECTOR: LazyLock<Selector> = LazyLock::new(|| selector("script[src]"));
static ANCHOR_SELECTOR: LazyLock<Selector> = LazyLock::new(|| selector("a[href]"));
static FORM_SELECTOR: LazyLock<Selector> = LazyLock::new(|| selector("form[action]"));
static IFRAME_SELECTOR: LazyLock<Selector> = LazyLock::new(|| selector("iframe"));
static META_ROBOTS_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| selector("meta[name=\"robots\"]"));
static RESOURCE_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| selector("img[src], script[src], link[href], iframe[src], embed[src], audio[src]"));

static STATUS_BAR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)onmouseover\s*=[^>]*window\.status|window\.status\s*=")
        .expect("status bar pattern is valid")
});
static RIGHT_CLICK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)event\.button\s*==\s*2|oncontextmenu\s*=|document\.oncontextmenu")
        .expect("right click pattern is valid")
});
static POPUP_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)window\.open\s*\(|alert\s*\(|confirm\s*\(|prompt\s*\(|showModalDialog")
        .expect("popup pattern is valid")
});
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)mailto:|mail\s*\(").expect("email pattern is valid"));

/// Markers of analytics tooling; two or more suggests an operated site.
const ANALYTICS_MARKERS: [&str; 6] = [
    "google-analytics.com",
    "googletagmanager.com",
    "facebook.com/tr",
    "gtag(",
    "ga(",
    "_gaq.push",
];

/// Social platform references; established sites typically link several.
const SOCIAL_MARKERS: [&str; 5] = [
    "facebook.com",
    "twitter.com",
    "instagram.com",
    "linkedin.com",
    "youtube.com",
];

/// Counts of references, split by origin.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RefTally {
    /// Total references considered.
    pub total: usize,
    /// References resolving to a different host.
    pub external: usize,
}

impl RefTally {
    /// External share as a percentage; `None` when there are no references.
    pub fn external_pct(&self) -> Option<f64> {
        if self.total == 0 {
            None
        } else {
            Some(self.external as f64 / self.total as f64 * 100.0)
        }
    }
}

/// Anchor statistics for the anchor and link-ratio signals.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnchorTally {
    /// All anchors with an href.
    pub total: usize,
    /// Fragment/javascript/mailto/empty/off-host anchors.
    pub suspicious: usize,
    /// Anchors pointing at the page's own host (relative included).
    pub internal: usize,
    /// Anchors pointing at another host.
    pub external: usize,
}

/// Aggregate verdict over the page's form actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormHandling {
    /// No forms with an action attribute.
    #[default]
    NoForms,
    /// At least one blank or `about:blank` action.
    Blank,
    /// At least one action posting to a different host.
    OffDomain,
    /// All actions stay on the page's host.
    OnDomain,
}

/// Where the page's favicon is served from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FaviconOrigin {
    /// No favicon link found.
    #[default]
    Missing,
    /// Favicon served from the page's own host.
    SameOrigin,
    /// Favicon served from another host.
    External,
}

/// Iframe usage on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IframeUsage {
    /// No iframes.
    #[default]
    None,
    /// Iframes present, all same-origin and visibly sized.
    Present,
    /// An iframe points off-host or is hidden/zero-sized.
    OffDomainOrHidden,
}

/// Script behaviors associated with lure pages.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScriptMarkers {
    /// Status-bar text manipulation.
    pub status_bar: bool,
    /// Right-click suppression.
    pub right_click: bool,
    /// Popup/alert/confirm/prompt usage.
    pub popup: bool,
}

/// Plain summary of a fetched page, shared read-only by the signal workers.
#[derive(Debug, Clone, Default)]
pub struct PageContent {
    /// Final HTTP status.
    pub status: u16,
    /// URL after following redirects.
    pub final_url: String,
    /// Number of redirect hops taken to reach the final URL.
    pub redirect_count: usize,
    /// img/script/link/iframe/embed/audio references.
    pub request_refs: RefTally,
    /// link[href] and script[src] references only.
    pub link_script_refs: RefTally,
    /// Anchor statistics.
    pub anchors: AnchorTally,
    /// Form action verdict.
    pub forms: FormHandling,
    /// Favicon origin.
    pub favicon: FaviconOrigin,
    /// mailto:/mail( markers present.
    pub has_email_markers: bool,
    /// Suspicious script behaviors.
    pub scripts: ScriptMarkers,
    /// Iframe usage.
    pub iframes: IframeUsage,
    /// Distinct analytics markers found.
    pub analytics_markers: usize,
    /// Distinct social platform markers found.
    pub social_markers: usize,
    /// Whether the body contains an `<html` tag at all.
    pub has_html_tag: bool,
    /// `<meta name="robots">` requesting noindex.
    pub robots_noindex: bool,
}

/// True when `raw` resolves to a host other than `page_host`.
///
/// Relative references, fragments, and unresolvable values count as
/// same-origin; only a successfully resolved foreign host is external.
fn is_external_ref(base: Option<&Url>, page_host: &str, raw: &str) -> bool {
    let raw = raw.trim();
    if raw.is_empty() || raw.starts_with('#') || raw.starts_with("data:") {
        return false;
    }
    let resolved = match base {
        Some(base) => base.join(raw).ok(),
        None => Url::parse(raw).ok(),
    };
    match resolved.as_ref().and_then(|u| u.host_str()) {
        Some(host) => !host.eq_ignore_ascii_case(page_host),
        None => false,
    }
}

/// Reduces a fetched body to a [`PageContent`] summary.
///
/// # Arguments
///
/// * `body` - The (possibly truncated) response body
/// * `final_url` - URL after redirects, used as the join base
/// * `host` - The page's host, lower-cased
/// * `status` - Final HTTP status
/// * `redirect_count` - Hops taken in the redirect chain
pub fn summarize(
    body: &str,
    final_url: &str,
    host: &str,
    status: u16,
    redirect_count: usize,
) -> PageContent {
    let document = Html::parse_document(body);
    let base = Url::parse(final_url).ok();
    let base_ref = base.as_ref();

    let mut request_refs = RefTally::default();
    for element in document.select(&RESOURCE_SELECTOR) {
        let raw = element
            .value()
            .attr("src")
            .or_else(|| element.value().attr("href"))
            .unwrap_or("");
        request_refs.total += 1;
        if is_external_ref(base_ref, host, raw) {
            request_refs.external += 1;
        }
    }

    let mut link_script_refs = RefTally::default();
    for element in document
        .select(&LINK_SELECTOR)
        .map(|e| e.value().attr("href"))
        .chain(
            document
                .select(&SCRIPT_SRC_SELECTOR)
                .map(|e| e.value().attr("src")),
        )
    {
        let raw = element.unwrap_or("");
        link_script_refs.total += 1;
        if is_external_ref(base_ref, host, raw) {
            link_script_refs.external += 1;
        }
    }

    let mut anchors = AnchorTally::default();
    for element in document.select(&ANCHOR_SELECTOR) {
        let href = element.value().attr("href").unwrap_or("").trim();
        let lower = href.to_lowercase();
        anchors.total += 1;

        let external = is_external_ref(base_ref, host, href);
        if lower.is_empty()
            || lower.starts_with('#')
            || lower.starts_with("javascript:")
            || lower.starts_with("mailto:")
            || lower == "about:blank"
            || external
        {
            anchors.suspicious += 1;
        }

        if !lower.is_empty() && !lower.starts_with('#') {
            if external {
                anchors.external += 1;
            } else {
                anchors.internal += 1;
            }
        }
    }

    let mut forms = FormHandling::NoForms;
    for element in document.select(&FORM_SELECTOR) {
        let action = element.value().attr("action").unwrap_or("").trim();
        let lower = action.to_lowercase();
        if lower.is_empty() || lower == "about:blank" {
            forms = FormHandling::Blank;
            break;
        }
        if is_external_ref(base_ref, host, action) {
            forms = FormHandling::OffDomain;
        } else if forms == FormHandling::NoForms {
            forms = FormHandling::OnDomain;
        }
    }

    let mut favicon = FaviconOrigin::Missing;
    for element in document.select(&LINK_SELECTOR) {
        let rel = element.value().attr("rel").unwrap_or("").to_lowercase();
        if !rel.contains("icon") {
            continue;
        }
        let href = element.value().attr("href").unwrap_or("");
        if href.is_empty() {
            continue;
        }
        favicon = if is_external_ref(base_ref, host, href) {
            FaviconOrigin::External
        } else {
            FaviconOrigin::SameOrigin
        };
        break;
    }

    let mut iframes = IframeUsage::None;
    for element in document.select(&IFRAME_SELECTOR) {
        let src = element.value().attr("src").unwrap_or("");
        let style = element.value().attr("style").unwrap_or("").to_lowercase();
        let width = element.value().attr("width").unwrap_or("");
        let height = element.value().attr("height").unwrap_or("");

        let hidden = style.contains("display:none")
            || style.contains("display: none")
            || style.contains("visibility:hidden")
            || style.contains("visibility: hidden")
            || matches!(width, "0" | "1")
            || matches!(height, "0" | "1");

        if hidden || is_external_ref(base_ref, host, src) {
            iframes = IframeUsage::OffDomainOrHidden;
            break;
        }
        iframes = IframeUsage::Present;
    }

    let robots_noindex = document
        .select(&META_ROBOTS_SELECTOR)
        .filter_map(|e| e.value().attr("content"))
        .any(|content| content.to_lowercase().contains("noindex"));

    let body_lower = body.to_lowercase();
    let analytics_markers = ANALYTICS_MARKERS
        .iter()
        .filter(|m| body_lower.contains(*m))
        .count();
    let social_markers = SOCIAL_MARKERS
        .iter()
        .filter(|m| body_lower.contains(*m))
        .count();

    PageContent {
        status,
        final_url: final_url.to_string(),
        redirect_count,
        request_refs,
        link_script_refs,
        anchors,
        forms,
        favicon,
        has_email_markers: EMAIL_RE.is_match(body),
        scripts: ScriptMarkers {
            status_bar: STATUS_BAR_RE.is_match(body),
            right_click: RIGHT_CLICK_RE.is_match(body),
            popup: POPUP_RE.is_match(body),
        },
        iframes,
        analytics_markers,
        social_markers,
        has_html_tag: body_lower.contains("<html"),
        robots_noindex,
    }
}
