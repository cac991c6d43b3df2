//! Document identity: site + namespace + name, with an optional anchor.

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// Path prefix of internal document links.
pub const WIKI_PATH_PREFIX: &str = "/wiki/";

/// Namespaces a document can live in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Namespace {
    #[default]
    Main,
    Talk,
    User,
    UserTalk,
    Project,
    ProjectTalk,
    File,
    FileTalk,
    Template,
    TemplateTalk,
    Help,
    HelpTalk,
    Category,
    CategoryTalk,
    Special,
    Media,
}

impl Namespace {
    const NAMED: &'static [Namespace] = &[
        Namespace::Talk,
        Namespace::User,
        Namespace::UserTalk,
        Namespace::Project,
        Namespace::ProjectTalk,
        Namespace::File,
        Namespace::FileTalk,
        Namespace::Template,
        Namespace::TemplateTalk,
        Namespace::Help,
        Namespace::HelpTalk,
        Namespace::Category,
        Namespace::CategoryTalk,
        Namespace::Special,
        Namespace::Media,
    ];

    /// Canonical prefix, without the trailing colon. Empty for `Main`.
    pub fn prefix(self) -> &'static str {
        match self {
            Namespace::Main => "",
            Namespace::Talk => "Talk",
            Namespace::User => "User",
            Namespace::UserTalk => "User talk",
            Namespace::Project => "Wikipedia",
            Namespace::ProjectTalk => "Wikipedia talk",
            Namespace::File => "File",
            Namespace::FileTalk => "File talk",
            Namespace::Template => "Template",
            Namespace::TemplateTalk => "Template talk",
            Namespace::Help => "Help",
            Namespace::HelpTalk => "Help talk",
            Namespace::Category => "Category",
            Namespace::CategoryTalk => "Category talk",
            Namespace::Special => "Special",
            Namespace::Media => "Media",
        }
    }

    /// Resolve a prefix as written in a link. Case-insensitive, `_` == ` `.
    pub fn from_prefix(prefix: &str) -> Option<Namespace> {
        let normalized = prefix.trim().replace('_', " ");
        if normalized.eq_ignore_ascii_case("Image") {
            return Some(Namespace::File);
        }
        if normalized.eq_ignore_ascii_case("Image talk") {
            return Some(Namespace::FileTalk);
        }
        Self::NAMED
            .iter()
            .copied()
            .find(|ns| ns.prefix().eq_ignore_ascii_case(&normalized))
    }

    pub fn is_talk(self) -> bool {
        matches!(
            self,
            Namespace::Talk
                | Namespace::UserTalk
                | Namespace::ProjectTalk
                | Namespace::FileTalk
                | Namespace::TemplateTalk
                | Namespace::HelpTalk
                | Namespace::CategoryTalk
        )
    }

    /// Virtual namespaces with no stored content of their own.
    pub fn is_non_content(self) -> bool {
        matches!(self, Namespace::Special | Namespace::Media)
    }
}

/// Identifies a document. Equality and hashing ignore the fragment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentReference {
    site: String,
    namespace: Namespace,
    name: String,
    fragment: Option<String>,
}

impl DocumentReference {
    /// `name` is the display name without namespace prefix; underscores are
    /// normalized to spaces.
    pub fn new(site: impl Into<String>, namespace: Namespace, name: impl Into<String>) -> Self {
        Self {
            site: site.into(),
            namespace,
            name: name.into().replace('_', " ").trim().to_string(),
            fragment: None,
        }
    }

    /// Parse `Namespace:Name#fragment` text as shown to users.
    pub fn from_prefixed_text(site: impl Into<String>, text: &str) -> Self {
        let (body, fragment) = match text.split_once('#') {
            Some((body, frag)) if !frag.is_empty() => (body, Some(frag.to_string())),
            Some((body, _)) => (body, None),
            None => (text, None),
        };

        let (namespace, name) = match body.split_once(':') {
            Some((prefix, rest)) => match Namespace::from_prefix(prefix) {
                Some(ns) => (ns, rest),
                None => (Namespace::Main, body),
            },
            None => (Namespace::Main, body),
        };

        let mut reference = Self::new(site, namespace, name);
        reference.fragment = fragment;
        reference
    }

    /// Parse an internal link path such as `/wiki/Talk:Foo_bar#History`.
    /// Returns `None` when the path is not an internal document link.
    pub fn from_wiki_path(site: impl Into<String>, path: &str) -> Option<Self> {
        let encoded = path.strip_prefix(WIKI_PATH_PREFIX)?;
        if encoded.is_empty() {
            return None;
        }
        let decoded = urlencoding::decode(encoded).ok()?;
        Some(Self::from_prefixed_text(site, &decoded))
    }

    pub fn with_fragment(mut self, fragment: impl Into<String>) -> Self {
        let fragment = fragment.into();
        self.fragment = if fragment.is_empty() {
            None
        } else {
            Some(fragment)
        };
        self
    }

    pub fn without_fragment(&self) -> Self {
        Self {
            fragment: None,
            ..self.clone()
        }
    }

    pub fn site(&self) -> &str {
        &self.site
    }

    pub fn namespace(&self) -> Namespace {
        self.namespace
    }

    /// Display name without namespace prefix.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fragment(&self) -> Option<&str> {
        self.fragment.as_deref()
    }

    /// Display text including the namespace prefix, e.g. `Talk:Foo bar`.
    pub fn prefixed_text(&self) -> String {
        match self.namespace {
            Namespace::Main => self.name.clone(),
            ns => format!("{}:{}", ns.prefix(), self.name),
        }
    }

    pub fn is_main(&self) -> bool {
        self.namespace == Namespace::Main
    }

    pub fn is_special(&self) -> bool {
        self.namespace == Namespace::Special
    }

    pub fn is_talk(&self) -> bool {
        self.namespace.is_talk()
    }

    /// Path component for URLs, e.g. `Talk:Foo_bar`.
    pub fn url_path(&self) -> String {
        let name = urlencoding::encode(&self.name.replace(' ', "_")).into_owned();
        match self.namespace {
            Namespace::Main => name,
            ns => format!("{}:{}", ns.prefix().replace(' ', "_"), name),
        }
    }

    /// URL of the mobile web rendition, used by the external viewer.
    pub fn mobile_url(&self) -> String {
        let mut url = format!(
            "https://{}{}{}",
            mobile_host(&self.site),
            WIKI_PATH_PREFIX,
            self.url_path()
        );
        if let Some(fragment) = &self.fragment {
            url.push('#');
            url.push_str(&urlencoding::encode(&fragment.replace(' ', "_")));
        }
        url
    }
}

/// `en.wikipedia.org` -> `en.m.wikipedia.org`. Hosts that are already mobile
/// or have no language label are returned unchanged.
fn mobile_host(site: &str) -> String {
    let labels: Vec<&str> = site.split('.').collect();
    if labels.len() < 3 || labels.get(1) == Some(&"m") {
        return site.to_string();
    }
    let mut out = Vec::with_capacity(labels.len() + 1);
    out.push(labels[0]);
    out.push("m");
    out.extend_from_slice(&labels[1..]);
    out.join(".")
}

impl PartialEq for DocumentReference {
    fn eq(&self, other: &Self) -> bool {
        self.site == other.site && self.namespace == other.namespace && self.name == other.name
    }
}

impl Eq for DocumentReference {}

impl Hash for DocumentReference {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.site.hash(state);
        self.namespace.hash(state);
        self.name.hash(state);
    }
}

impl fmt::Display for DocumentReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.prefixed_text())?;
        if let Some(fragment) = &self.fragment {
            write!(f, "#{fragment}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SITE: &str = "en.wikipedia.org";

    #[test]
    fn equality_ignores_fragment() {
        let a = DocumentReference::new(SITE, Namespace::Main, "Rust").with_fragment("History");
        let b = DocumentReference::new(SITE, Namespace::Main, "Rust");
        assert_eq!(a, b);
        assert_eq!(a.fragment(), Some("History"));
    }

    #[test]
    fn equality_respects_site_and_namespace() {
        let main = DocumentReference::new(SITE, Namespace::Main, "Rust");
        let talk = DocumentReference::new(SITE, Namespace::Talk, "Rust");
        let other_site = DocumentReference::new("de.wikipedia.org", Namespace::Main, "Rust");
        assert_ne!(main, talk);
        assert_ne!(main, other_site);
    }

    #[test]
    fn hash_is_consistent_with_eq() {
        use std::collections::HashSet;
        let mut set = HashSet::new();
        set.insert(DocumentReference::new(SITE, Namespace::Main, "Rust").with_fragment("a"));
        set.insert(DocumentReference::new(SITE, Namespace::Main, "Rust").with_fragment("b"));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn underscores_become_spaces() {
        let r = DocumentReference::new(SITE, Namespace::Main, "Foo_bar");
        assert_eq!(r.name(), "Foo bar");
        assert_eq!(r.url_path(), "Foo_bar");
    }

    #[test]
    fn parses_wiki_path_with_namespace_and_fragment() {
        let r = DocumentReference::from_wiki_path(SITE, "/wiki/Talk:Foo_bar#History").unwrap();
        assert_eq!(r.namespace(), Namespace::Talk);
        assert_eq!(r.name(), "Foo bar");
        assert_eq!(r.fragment(), Some("History"));
        assert!(r.is_talk());
        assert_eq!(r.prefixed_text(), "Talk:Foo bar");
    }

    #[test]
    fn parses_percent_encoded_path() {
        let r = DocumentReference::from_wiki_path(SITE, "/wiki/Caf%C3%A9").unwrap();
        assert_eq!(r.name(), "Café");
        assert!(r.is_main());
    }

    #[test]
    fn unknown_prefix_stays_in_main() {
        let r = DocumentReference::from_prefixed_text(SITE, "Star Wars: Episode IV");
        assert_eq!(r.namespace(), Namespace::Main);
        assert_eq!(r.name(), "Star Wars: Episode IV");
    }

    #[test]
    fn namespace_prefix_is_case_insensitive() {
        assert_eq!(Namespace::from_prefix("special"), Some(Namespace::Special));
        assert_eq!(Namespace::from_prefix("User_talk"), Some(Namespace::UserTalk));
        assert_eq!(Namespace::from_prefix("Image"), Some(Namespace::File));
        assert_eq!(Namespace::from_prefix("Nope"), None);
    }

    #[test]
    fn rejects_non_wiki_paths() {
        assert!(DocumentReference::from_wiki_path(SITE, "/w/index.php").is_none());
        assert!(DocumentReference::from_wiki_path(SITE, "/wiki/").is_none());
    }

    #[test]
    fn mobile_url_inserts_mobile_label() {
        let r = DocumentReference::new(SITE, Namespace::Special, "Random");
        assert!(r.is_special());
        assert!(r.namespace().is_non_content());
        assert_eq!(r.mobile_url(), "https://en.m.wikipedia.org/wiki/Special:Random");

        let talk = DocumentReference::new(SITE, Namespace::UserTalk, "Some one");
        assert_eq!(
            talk.mobile_url(),
            "https://en.m.wikipedia.org/wiki/User_talk:Some_one"
        );
    }

    #[test]
    fn mobile_host_leaves_short_hosts_alone() {
        assert_eq!(mobile_host("localhost"), "localhost");
        assert_eq!(mobile_host("en.m.wikipedia.org"), "en.m.wikipedia.org");
    }

    #[test]
    fn serialization_keeps_fragment() {
        let r = DocumentReference::new(SITE, Namespace::Help, "Contents").with_fragment("Top");
        let json = serde_json::to_string(&r).unwrap();
        let back: DocumentReference = serde_json::from_str(&json).unwrap();
        assert_eq!(back, r);
        assert_eq!(back.fragment(), Some("Top"));
        assert_eq!(back.site(), SITE);
    }
}
