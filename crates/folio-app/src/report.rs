//! Plain-text rendering of host events and the tab list.

use folio_page::{ErrorKind, HostEvent};
use folio_tabs::Tab;

/// One line for an event the user should see. Bookkeeping events that only
/// matter to a graphical host return `None`.
pub fn describe(event: &HostEvent) -> Option<String> {
    match event {
        HostEvent::LoadComplete(reference) => Some(format!("Showing: {reference}")),
        HostEvent::SetupToc { sections, .. } if !sections.is_empty() => {
            let titles: Vec<String> = sections
                .iter()
                .map(|s| format!("{}{}", "  ".repeat(usize::from(s.level.saturating_sub(2))), s.title))
                .collect();
            Some(format!("Contents:\n  {}", titles.join("\n  ")))
        }
        HostEvent::ShowError { reference, kind } => Some(match kind {
            ErrorKind::Offline => format!("{reference}: not available offline (retry or go back)"),
            ErrorKind::NotFound => format!("{reference}: no such document (go back)"),
            ErrorKind::Generic => format!("{reference}: could not be loaded (refresh or go back)"),
        }),
        HostEvent::OpenExternal(url) => Some(format!("Open in browser: {url}")),
        HostEvent::ShowLinkPreview(reference) => Some(format!(
            "Preview: {reference} (open it with `folio open \"{}\"`)",
            reference.prefixed_text()
        )),
        HostEvent::ScrollToAnchor(anchor) => Some(format!("Jump to section: {anchor}")),
        HostEvent::ShowReference { link_text, .. } => Some(format!("Reference {link_text}")),
        HostEvent::ShowIpa { contents } => Some(format!("Pronunciation: {contents}")),
        HostEvent::OpenGallery { filename } => Some(format!("Open media: {filename}")),
        HostEvent::ShowOnboardingTip => Some("Tip: select text to share or look it up.".into()),
        HostEvent::RefreshFinished => Some("Refreshed.".into()),
        HostEvent::TabsChanged { count } => Some(format!("{count} tab(s) open")),
        HostEvent::SessionEnded => Some("All tabs closed.".into()),
        _ => None,
    }
}

/// Tab list, active tab last and marked with `*`.
pub fn tab_list(tabs: &[Tab]) -> String {
    let last = tabs.len().saturating_sub(1);
    tabs.iter()
        .enumerate()
        .map(|(i, tab)| {
            let marker = if i == last { '*' } else { ' ' };
            match tab.current() {
                Some(item) => format!(
                    "{marker} {i}: {} ({} in history, visited {})",
                    item.reference,
                    tab.back_stack.len(),
                    item.entry
                        .timestamp
                        .with_timezone(&chrono::Local)
                        .format("%Y-%m-%d %H:%M")
                ),
                None => format!("{marker} {i}: (empty)"),
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
