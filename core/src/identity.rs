/// Prefixes that mark a requirement as a VCS or direct-URL reference.
const URL_PREFIXES: [&str; 8] = [
    "git+", "git://", "hg+", "svn+", "bzr+", "http://", "https://", "file://",
];

/// Version-specifier operators, two-character operators first.
pub const SPECIFIER_OPERATORS: [&str; 7] = ["~=", "==", ">=", "<=", "!=", ">", "<"];

/// The syntactic shape of a requirement line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequirementKind {
    /// `name`, `name==1.0`, `name[extra]>=2.0`, ...
    Plain,
    /// `./pkg` or `../pkg`
    LocalPath,
    /// VCS or direct-URL reference, including PEP 440 `name @ url`
    UrlOrVcs,
}

/// Canonical identity of one requirement line.
///
/// Derived fresh for every matching or sorting decision; never cached
/// across lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// Extracted package name, if one could be determined. URL references
    /// without an `#egg=` fragment, `@`-syntax, or recognizable host path
    /// have no extractable name and stay unmatchable.
    pub name: Option<String>,
    pub kind: RequirementKind,
    /// Whole-line comment (`# ...`). Commented lines never match.
    pub commented_out: bool,
}

impl Identity {
    /// Derive the identity of a requirement line. Returns `None` for blank
    /// or whitespace-only lines.
    pub fn of(line: &str) -> Option<Self> {
        let trimmed = line.trim();

        if trimmed.is_empty() {
            return None;
        }

        if trimmed.starts_with('#') {
            return Some(Self {
                name: None,
                kind: RequirementKind::Plain,
                commented_out: true,
            });
        }

        if is_url_requirement(trimmed) {
            return Some(Self {
                name: extract_url_name(trimmed),
                kind: RequirementKind::UrlOrVcs,
                commented_out: false,
            });
        }

        if trimmed.starts_with("./") || trimmed.starts_with("../") {
            let segment = trimmed.rsplit('/').next().unwrap_or(trimmed);
            return Some(Self {
                name: Some(segment.to_string()),
                kind: RequirementKind::LocalPath,
                commented_out: false,
            });
        }

        Some(Self {
            name: Some(plain_name(trimmed).to_string()),
            kind: RequirementKind::Plain,
            commented_out: false,
        })
    }
}

/// Lower-case a package name and collapse underscores to hyphens, mirroring
/// the case-insensitive, separator-insensitive name semantics of the
/// packaging ecosystem.
pub fn canonical_name(name: &str) -> String {
    name.to_lowercase().replace('_', "-")
}

/// Byte offset of the first version-specifier operator, if any.
pub fn find_specifier_operator(s: &str) -> Option<usize> {
    SPECIFIER_OPERATORS
        .iter()
        .filter_map(|op| s.find(op))
        .min()
}

/// Strip an extras suffix (`[...]`) and everything from the first version
/// operator onward, leaving the bare package name.
fn plain_name(line: &str) -> &str {
    let without_extras = match line.find('[') {
        Some(idx) => &line[..idx],
        None => line,
    };
    let without_spec = match find_specifier_operator(without_extras) {
        Some(idx) => &without_extras[..idx],
        None => without_extras,
    };
    without_spec.trim()
}

fn is_url_requirement(trimmed: &str) -> bool {
    let lower = trimmed.to_lowercase();
    URL_PREFIXES.iter().any(|prefix| lower.starts_with(prefix)) || lower.contains(" @ ")
}

/// Extract a package name from a URL/VCS requirement, in order of
/// precedence: `#egg=` fragment, PEP 440 `name @ url` syntax, then the
/// final path segment of a github.com/gitlab.com URL.
fn extract_url_name(trimmed: &str) -> Option<String> {
    let lower = trimmed.to_lowercase();

    if let Some(idx) = lower.find("#egg=") {
        let fragment = &lower[idx + "#egg=".len()..];
        let name = fragment
            .split(['&', '#'])
            .next()
            .unwrap_or(fragment)
            .trim();
        if !name.is_empty() {
            return Some(name.to_string());
        }
    }

    if let Some(idx) = trimmed.find(" @ ") {
        let name = trimmed[..idx].trim();
        if !name.is_empty() {
            return Some(name.to_lowercase());
        }
    }

    if lower.contains("github.com") || lower.contains("gitlab.com") {
        // Last path segment, minus any fragment, revision, or .git suffix.
        let without_fragment = lower.split('#').next().unwrap_or(&lower);
        let segment = without_fragment
            .rsplit('/')
            .next()
            .unwrap_or(without_fragment);
        let segment = segment.split('@').next().unwrap_or(segment);
        let segment = segment.strip_suffix(".git").unwrap_or(segment);
        if !segment.is_empty() {
            return Some(segment.to_string());
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_line_has_no_identity() {
        assert_eq!(Identity::of(""), None);
        assert_eq!(Identity::of("   "), None);
    }

    #[test]
    fn test_comment_line() {
        let identity = Identity::of("# pinned for CVE-2023-1234").unwrap();
        assert!(identity.commented_out);
        assert_eq!(identity.name, None);
    }

    #[test]
    fn test_plain_name_extraction() {
        let cases = [
            ("requests", "requests"),
            ("requests==2.28.0", "requests"),
            ("django>=4.0,<5.0", "django"),
            ("requests[security]>=2.0.0", "requests"),
            ("pytest ~= 7.0", "pytest"),
            ("click!=8.0.0", "click"),
        ];
        for (line, expected) in cases {
            let identity = Identity::of(line).unwrap();
            assert_eq!(identity.kind, RequirementKind::Plain, "line: {line}");
            assert_eq!(identity.name.as_deref(), Some(expected), "line: {line}");
        }
    }

    #[test]
    fn test_local_path_last_segment() {
        let identity = Identity::of("./another_dir/mypackage_1.2.3.tar.gz").unwrap();
        assert_eq!(identity.kind, RequirementKind::LocalPath);
        assert_eq!(identity.name.as_deref(), Some("mypackage_1.2.3.tar.gz"));

        let identity = Identity::of("../shared").unwrap();
        assert_eq!(identity.kind, RequirementKind::LocalPath);
        assert_eq!(identity.name.as_deref(), Some("shared"));
    }

    #[test]
    fn test_url_kind_detection() {
        for line in [
            "git+https://github.com/user/repo.git#egg=pkg",
            "git://example.com/repo",
            "hg+https://example.com/repo",
            "svn+https://example.com/repo",
            "bzr+https://example.com/repo",
            "http://example.com/pkg.whl",
            "https://example.com/pkg.whl",
            "file:///tmp/pkg.whl",
            "package @ https://example.com/pkg.whl",
        ] {
            let identity = Identity::of(line).unwrap();
            assert_eq!(identity.kind, RequirementKind::UrlOrVcs, "line: {line}");
        }
    }

    #[test]
    fn test_egg_fragment_takes_precedence() {
        let identity =
            Identity::of("git+https://github.com/user/repo.git@v1.0#egg=my_package&subdirectory=src")
                .unwrap();
        assert_eq!(identity.name.as_deref(), Some("my_package"));
    }

    #[test]
    fn test_egg_fragment_case_insensitive() {
        let identity = Identity::of("git+https://example.com/repo.git#EGG=MyPackage").unwrap();
        assert_eq!(identity.name.as_deref(), Some("mypackage"));
    }

    #[test]
    fn test_pep440_at_syntax_name() {
        let identity = Identity::of("mypackage @ https://example.com/mypackage.whl").unwrap();
        assert_eq!(identity.name.as_deref(), Some("mypackage"));
    }

    #[test]
    fn test_github_fallback_name() {
        let identity = Identity::of("git+https://github.com/user/repo.git").unwrap();
        assert_eq!(identity.name.as_deref(), Some("repo"));

        let identity = Identity::of("git+https://gitlab.com/user/other@v2.1").unwrap();
        assert_eq!(identity.name.as_deref(), Some("other"));
    }

    #[test]
    fn test_unmatchable_url_has_no_name() {
        let identity = Identity::of("https://example.com/downloads/pkg.whl").unwrap();
        assert_eq!(identity.kind, RequirementKind::UrlOrVcs);
        assert_eq!(identity.name, None);
    }

    #[test]
    fn test_canonical_name() {
        assert_eq!(canonical_name("My_Package"), "my-package");
        assert_eq!(canonical_name("already-canonical"), "already-canonical");
    }
}
