//! Content signals: derived from the fetched page summary.
//!
//! Every signal here treats a missing page (fetch failure) as
//! phishing-indicative. An empty element set on a successfully fetched page
//! is legitimate; absence of evidence on a page we did retrieve is not held
//! against it.

use crate::fetch::content::{FaviconOrigin, FormHandling, IframeUsage, PageContent};
use crate::fetch::ResolvedTarget;
use crate::signals::Signal;

fn with_page(target: &ResolvedTarget, f: impl FnOnce(&PageContent) -> Signal) -> Signal {
    match &target.page {
        Some(page) => f(page),
        None => Signal::Phishing,
    }
}

pub(crate) fn favicon(target: &ResolvedTarget) -> Signal {
    with_page(target, |page| match page.favicon {
        FaviconOrigin::SameOrigin => Signal::Legitimate,
        FaviconOrigin::External | FaviconOrigin::Missing => Signal::Phishing,
    })
}

pub(crate) fn request_url(target: &ResolvedTarget) -> Signal {
    with_page(target, |page| match page.request_refs.external_pct() {
        None => Signal::Legitimate,
        Some(pct) if pct < 22.0 => Signal::Legitimate,
        Some(pct) if pct < 61.0 => Signal::Ambiguous,
        Some(_) => Signal::Phishing,
    })
}

pub(crate) fn anchor_url(target: &ResolvedTarget) -> Signal {
    with_page(target, |page| {
        if page.anchors.total == 0 {
            return Signal::Legitimate;
        }
        let pct = page.anchors.suspicious as f64 / page.anchors.total as f64 * 100.0;
        if pct < 31.0 {
            Signal::Legitimate
        } else if pct < 67.0 {
            Signal::Ambiguous
        } else {
            Signal::Phishing
        }
    })
}

pub(crate) fn links_in_script_tags(target: &ResolvedTarget) -> Signal {
    with_page(target, |page| match page.link_script_refs.external_pct() {
        None => Signal::Legitimate,
        Some(pct) if pct < 17.0 => Signal::Legitimate,
        Some(pct) if pct < 81.0 => Signal::Ambiguous,
        Some(_) => Signal::Phishing,
    })
}

pub(crate) fn server_form_handler(target: &ResolvedTarget) -> Signal {
    with_page(target, |page| match page.forms {
        FormHandling::NoForms | FormHandling::OnDomain => Signal::Legitimate,
        FormHandling::OffDomain => Signal::Ambiguous,
        FormHandling::Blank => Signal::Phishing,
    })
}

pub(crate) fn info_email(target: &ResolvedTarget) -> Signal {
    with_page(target, |page| {
        if page.has_email_markers {
            Signal::Phishing
        } else {
            Signal::Legitimate
        }
    })
}

pub(crate) fn status_bar_cust(target: &ResolvedTarget) -> Signal {
    with_page(target, |page| {
        if page.scripts.status_bar {
            Signal::Phishing
        } else {
            Signal::Legitimate
        }
    })
}

pub(crate) fn disable_right_click(target: &ResolvedTarget) -> Signal {
    with_page(target, |page| {
        if page.scripts.right_click {
            Signal::Phishing
        } else {
            Signal::Legitimate
        }
    })
}

pub(crate) fn using_popup_window(target: &ResolvedTarget) -> Signal {
    with_page(target, |page| {
        if page.scripts.popup {
            Signal::Phishing
        } else {
            Signal::Legitimate
        }
    })
}

pub(crate) fn iframe_redirection(target: &ResolvedTarget) -> Signal {
    with_page(target, |page| match page.iframes {
        IframeUsage::None => Signal::Legitimate,
        IframeUsage::Present => Signal::Ambiguous,
        IframeUsage::OffDomainOrHidden => Signal::Phishing,
    })
}

pub(crate) fn google_index(target: &ResolvedTarget) -> Signal {
    with_page(target, |page| {
        // A non-HTML body (API endpoint, file download) is not a lure page.
        if !page.has_html_tag {
            return Signal::Legitimate;
        }
        if page.robots_noindex {
            Signal::Phishing
        } else {
            Signal::Legitimate
        }
    })
}

pub(crate) fn links_pointing_to_page(target: &ResolvedTarget) -> Signal {
    with_page(target, |page| {
        let total = page.anchors.internal + page.anchors.external;
        if total == 0 {
            return Signal::Legitimate;
        }
        let ratio = page.anchors.internal as f64 / total as f64;
        if ratio >= 0.8 {
            Signal::Legitimate
        } else if ratio >= 0.4 {
            Signal::Ambiguous
        } else {
            Signal::Phishing
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::content::{summarize, AnchorTally, RefTally};
    use crate::initialization::init_extractor;

    fn target_with_page(body: Option<&str>) -> ResolvedTarget {
        let extractor = init_extractor();
        let mut target =
            ResolvedTarget::from_url("https://example.com/", &extractor).unwrap();
        target.page =
            body.map(|b| summarize(b, "https://example.com/", "example.com", 200, 0));
        target
    }

    #[test]
    fn test_missing_page_is_fail_suspicious() {
        let target = target_with_page(None);
        assert_eq!(favicon(&target), Signal::Phishing);
        assert_eq!(request_url(&target), Signal::Phishing);
        assert_eq!(anchor_url(&target), Signal::Phishing);
        assert_eq!(google_index(&target), Signal::Phishing);
    }

    #[test]
    fn test_empty_page_scores_clean() {
        let target = target_with_page(Some("<html><body>hello</body></html>"));
        assert_eq!(request_url(&target), Signal::Legitimate);
        assert_eq!(anchor_url(&target), Signal::Legitimate);
        assert_eq!(server_form_handler(&target), Signal::Legitimate);
        assert_eq!(iframe_redirection(&target), Signal::Legitimate);
        assert_eq!(info_email(&target), Signal::Legitimate);
        // no favicon link at all is still suspicious
        assert_eq!(favicon(&target), Signal::Phishing);
    }

    #[test]
    fn test_request_url_buckets() {
        let mut target = target_with_page(Some("<html></html>"));
        let page = target.page.as_mut().unwrap();

        page.request_refs = RefTally { total: 10, external: 2 };
        assert_eq!(request_url(&target), Signal::Legitimate);

        let page = target.page.as_mut().unwrap();
        page.request_refs = RefTally { total: 10, external: 5 };
        assert_eq!(request_url(&target), Signal::Ambiguous);

        let page = target.page.as_mut().unwrap();
        page.request_refs = RefTally { total: 10, external: 9 };
        assert_eq!(request_url(&target), Signal::Phishing);
    }

    #[test]
    fn test_anchor_url_buckets() {
        let mut target = target_with_page(Some("<html></html>"));
        let page = target.page.as_mut().unwrap();
        page.anchors = AnchorTally {
            total: 10,
            suspicious: 3,
            internal: 7,
            external: 3,
        };
        assert_eq!(anchor_url(&target), Signal::Legitimate);

        let page = target.page.as_mut().unwrap();
        page.anchors.suspicious = 5;
        assert_eq!(anchor_url(&target), Signal::Ambiguous);

        let page = target.page.as_mut().unwrap();
        page.anchors.suspicious = 8;
        assert_eq!(anchor_url(&target), Signal::Phishing);
    }

    #[test]
    fn test_popup_and_right_click() {
        let target = target_with_page(Some(
            "<html><body><script>alert('win'); document.oncontextmenu = no;</script></body></html>",
        ));
        assert_eq!(using_popup_window(&target), Signal::Phishing);
        assert_eq!(disable_right_click(&target), Signal::Phishing);
        assert_eq!(status_bar_cust(&target), Signal::Legitimate);
    }

    #[test]
    fn test_google_index_noindex() {
        let target = target_with_page(Some(
            r#"<html><head><meta name="robots" content="noindex"></head></html>"#,
        ));
        assert_eq!(google_index(&target), Signal::Phishing);
    }

    #[test]
    fn test_google_index_non_html_body() {
        let target = target_with_page(Some(r#"{"status":"ok"}"#));
        assert_eq!(google_index(&target), Signal::Legitimate);
    }

    #[test]
    fn test_links_pointing_buckets() {
        let mut target = target_with_page(Some("<html></html>"));
        let page = target.page.as_mut().unwrap();
        page.anchors = AnchorTally {
            total: 10,
            suspicious: 0,
            internal: 9,
            external: 1,
        };
        assert_eq!(links_pointing_to_page(&target), Signal::Legitimate);

        let page = target.page.as_mut().unwrap();
        page.anchors.internal = 5;
        page.anchors.external = 5;
        assert_eq!(links_pointing_to_page(&target), Signal::Ambiguous);

        let page = target.page.as_mut().unwrap();
        page.anchors.internal = 1;
        page.anchors.external = 9;
        assert_eq!(links_pointing_to_page(&target), Signal::Phishing);
    }
}
