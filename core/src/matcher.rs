use crate::identity::{canonical_name, Identity, RequirementKind};

/// Decide whether a requirement line refers to the given package.
///
/// Matching is case-insensitive and treats `-` and `_` as equivalent, so
/// `example-package` matches `Example_Package>=1.2.3`. Commented-out lines
/// never match, and URL references without an extractable name simply yield
/// no match.
pub fn matches_package(target: &str, line: &str) -> bool {
    let trimmed = line.trim();

    // Fast path for exact round-trips of a previously written line.
    if trimmed == target {
        return true;
    }

    let Some(identity) = Identity::of(trimmed) else {
        return false;
    };
    if identity.commented_out {
        return false;
    }

    let canonical_target = canonical_name(target);

    match identity.kind {
        RequirementKind::UrlOrVcs => identity
            .name
            .is_some_and(|name| canonical_name(&name) == canonical_target),
        // Path references carry versioned archive names such as
        // `mypackage_1.2.3.tar.gz`, so the target is substring-matched
        // against the final path segment.
        RequirementKind::LocalPath => identity
            .name
            .is_some_and(|segment| canonical_name(&segment).contains(&canonical_target)),
        RequirementKind::Plain => identity
            .name
            .is_some_and(|name| canonical_name(&name) == canonical_target),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match() {
        assert!(matches_package("requests", "requests"));
        assert!(matches_package("requests==2.28.0", "requests==2.28.0"));
    }

    #[test]
    fn test_versioned_line_matches_bare_target() {
        assert!(matches_package("requests", "requests==2.28.0"));
        assert!(matches_package("django", "django>=4.0,<5.0"));
        assert!(matches_package("pytest", "pytest~=7.0"));
    }

    #[test]
    fn test_case_insensitive() {
        assert!(matches_package("django", "Django==4.2.0"));
        assert!(matches_package("Django", "django==4.2.0"));
        assert!(matches_package("DJANGO", "Django"));
    }

    #[test]
    fn test_separator_equivalence() {
        assert!(matches_package("example-package", "example_package>=1.2.3"));
        assert!(matches_package("example_package", "example-package>=1.2.3"));
    }

    #[test]
    fn test_exact_mismatch_with_versioned_target() {
        assert!(!matches_package("example==1.3.0", "example==1.2.3"));
    }

    #[test]
    fn test_different_package_no_match() {
        assert!(!matches_package("requests", "requests-toolbelt==1.0.0"));
        assert!(!matches_package("flask", "flask-cors"));
    }

    #[test]
    fn test_commented_line_never_matches() {
        assert!(!matches_package("requests", "# requests==2.28.0"));
        assert!(!matches_package("requests", "  # requests"));
    }

    #[test]
    fn test_extras_transparency() {
        assert!(matches_package("example", "example[extra]==1.2.3"));
        assert!(matches_package("celery", "celery[redis,msgpack]==5.2.0"));
    }

    #[test]
    fn test_path_substring_rule() {
        assert!(matches_package(
            "mypackage",
            "./another_dir/mypackage_1.2.3.tar.gz"
        ));
        assert!(matches_package("mypackage", "../mypackage"));
        assert!(!matches_package("mypackage", "./another-package"));
        // Only the last segment counts.
        assert!(!matches_package("another_dir", "./another_dir/mypackage.tar.gz"));
    }

    #[test]
    fn test_url_egg_extraction() {
        assert!(matches_package(
            "mypackage",
            "git+https://github.com/user/repo.git#egg=mypackage"
        ));
        assert!(!matches_package(
            "mypackage",
            "git+https://github.com/user/other.git#egg=other"
        ));
    }

    #[test]
    fn test_url_separator_equivalence() {
        assert!(matches_package(
            "my-package",
            "git+https://github.com/user/repo.git#egg=my_package"
        ));
    }

    #[test]
    fn test_url_at_syntax() {
        assert!(matches_package(
            "mypackage",
            "mypackage @ https://example.com/mypackage-1.0.whl"
        ));
    }

    #[test]
    fn test_url_github_fallback() {
        assert!(matches_package("repo", "git+https://github.com/user/repo.git"));
    }

    #[test]
    fn test_unmatchable_url_yields_no_match() {
        assert!(!matches_package("pkg", "https://example.com/downloads/pkg.whl"));
    }

    #[test]
    fn test_blank_line_no_match() {
        assert!(!matches_package("requests", ""));
        assert!(!matches_package("requests", "   "));
    }
}
