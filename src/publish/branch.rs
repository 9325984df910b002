//! Branch name derivation from pull request titles.

/// Derives a branch name from a pull request title.
///
/// The pipeline is order-sensitive: quote characters (`'`, `"`) and colons
/// are stripped first, then the remainder is lower-cased, then spaces
/// become underscores. Sanitizing before substitution means no forbidden
/// character can be reintroduced by a later step. Input is `&str`, so
/// invalid byte sequences cannot occur.
///
/// No collision detection happens here; an existing remote branch of the
/// same name surfaces later as a push failure.
#[must_use]
pub fn derive_branch_name(title: &str) -> String {
    let sanitized: String = title
        .chars()
        .filter(|character| !matches!(character, '\'' | '"' | ':'))
        .collect();
    sanitized.to_lowercase().replace(' ', "_")
}
